//! # NFA Construction
//!
//! Thompson-style automaton fragments over an index-addressed node arena.
//!
//! Every node of every compiled rule lives in one [`NfaArena`]; node
//! identifiers are drawn from a single monotonically increasing counter,
//! so identifiers are unique across rules. A [`Fragment`] is a
//! `(start, accept)` pair of node ids; combining fragments rewires the
//! boundary nodes in place and shares the underlying nodes, so there is
//! no duplication when a sub-expression is absorbed into a larger one.
//!
//! Each node has at most two outgoing edges, each labeled with either a
//! literal character or epsilon. An edge is set exactly once during
//! construction.

pub mod sim;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Identifier of a node in the arena.
///
/// Uses u32, which is sufficient for all practical automaton sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Edge label: a literal character, or epsilon (consumes no input).
///
/// Epsilon is a distinct variant, never a member of the input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Label {
    Char(char),
    Epsilon,
}

impl Label {
    #[must_use]
    pub const fn is_epsilon(self) -> bool {
        matches!(self, Self::Epsilon)
    }

    /// Does this label consume the character `c`?
    #[must_use]
    pub const fn consumes(self, c: char) -> bool {
        match self {
            Self::Char(label) => label == c,
            Self::Epsilon => false,
        }
    }
}

/// A graph vertex with up to two outgoing labeled edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Node {
    first: Option<(Label, NodeId)>,
    second: Option<(Label, NodeId)>,
}

impl Node {
    /// Iterate the outgoing edges that are present.
    pub(crate) fn edges(self) -> impl Iterator<Item = (Label, NodeId)> {
        self.first.into_iter().chain(self.second)
    }
}

/// An automaton fragment: one start node, one accept node.
///
/// The instance graph may contain cycles after Kleene-star wiring; the
/// closure algorithm in [`sim`] terminates on them via fixed-point
/// detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Fragment {
    pub start: NodeId,
    pub accept: NodeId,
}

/// Arena owning the nodes of every compiled rule.
///
/// Also the compiler context: the next node id is simply the arena
/// length, so ids stay monotonic across all construction calls.
#[derive(Debug, Default)]
pub struct NfaArena {
    nodes: Vec<Node>,
}

impl NfaArena {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Total number of nodes allocated so far, across all rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub(crate) fn node(&self, id: NodeId) -> Node {
        self.nodes[id.index()]
    }

    /// Edges of a node, for simulation and visualization.
    pub fn edges_of(&self, id: NodeId) -> impl Iterator<Item = (Label, NodeId)> {
        self.node(id).edges()
    }

    fn add_node(&mut self) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(0));
        self.nodes.push(Node::default());
        id
    }

    fn set_first(&mut self, id: NodeId, label: Label, to: NodeId) {
        let node = &mut self.nodes[id.index()];
        debug_assert!(node.first.is_none(), "first edge wired twice");
        node.first = Some((label, to));
    }

    fn set_second(&mut self, id: NodeId, label: Label, to: NodeId) {
        let node = &mut self.nodes[id.index()];
        debug_assert!(node.second.is_none(), "second edge wired twice");
        node.second = Some((label, to));
    }

    /// `CHAR c`: start --c--> accept.
    pub fn literal(&mut self, c: char) -> Fragment {
        let start = self.add_node();
        let accept = self.add_node();
        self.set_first(start, Label::Char(c), accept);
        Fragment { start, accept }
    }

    /// `_`: start --eps--> accept.
    pub fn epsilon_fragment(&mut self) -> Fragment {
        let start = self.add_node();
        let accept = self.add_node();
        self.set_first(start, Label::Epsilon, accept);
        Fragment { start, accept }
    }

    /// `(E1).(E2)`: retarget E1's accept into E2's start via epsilon.
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.set_first(first.accept, Label::Epsilon, second.start);
        Fragment {
            start: first.start,
            accept: second.accept,
        }
    }

    /// `(E1)|(E2)`: new start forks to both; both accepts feed a new accept.
    pub fn alternate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.add_node();
        let accept = self.add_node();
        self.set_first(start, Label::Epsilon, left.start);
        self.set_second(start, Label::Epsilon, right.start);
        self.set_first(left.accept, Label::Epsilon, accept);
        self.set_first(right.accept, Label::Epsilon, accept);
        Fragment { start, accept }
    }

    /// `(E1)*`: new start reaches E1 and the new accept; E1's accept loops
    /// back to E1's start and exits to the new accept.
    pub fn star(&mut self, inner: Fragment) -> Fragment {
        let start = self.add_node();
        let accept = self.add_node();
        self.set_first(start, Label::Epsilon, inner.start);
        self.set_second(start, Label::Epsilon, accept);
        self.set_first(inner.accept, Label::Epsilon, accept);
        self.set_second(inner.accept, Label::Epsilon, inner.start);
        Fragment { start, accept }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_fragment_shape() {
        let mut arena = NfaArena::new();
        let frag = arena.literal('a');
        assert_eq!(arena.len(), 2);
        let edges: Vec<_> = arena.edges_of(frag.start).collect();
        assert_eq!(edges, vec![(Label::Char('a'), frag.accept)]);
        assert_eq!(arena.edges_of(frag.accept).count(), 0);
    }

    #[test]
    fn test_epsilon_fragment_shape() {
        let mut arena = NfaArena::new();
        let frag = arena.epsilon_fragment();
        let edges: Vec<_> = arena.edges_of(frag.start).collect();
        assert_eq!(edges, vec![(Label::Epsilon, frag.accept)]);
    }

    #[test]
    fn test_node_ids_are_monotonic_across_fragments() {
        let mut arena = NfaArena::new();
        let a = arena.literal('a');
        let b = arena.literal('b');
        assert!(a.accept < b.start);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_concat_shares_nodes() {
        let mut arena = NfaArena::new();
        let a = arena.literal('a');
        let b = arena.literal('b');
        let before = arena.len();
        let cat = arena.concat(a, b);
        // Concatenation allocates nothing; it only rewires.
        assert_eq!(arena.len(), before);
        assert_eq!(cat.start, a.start);
        assert_eq!(cat.accept, b.accept);
        let edges: Vec<_> = arena.edges_of(a.accept).collect();
        assert_eq!(edges, vec![(Label::Epsilon, b.start)]);
    }

    #[test]
    fn test_alternate_wiring() {
        let mut arena = NfaArena::new();
        let a = arena.literal('a');
        let b = arena.literal('b');
        let alt = arena.alternate(a, b);
        let fork: Vec<_> = arena.edges_of(alt.start).collect();
        assert_eq!(
            fork,
            vec![(Label::Epsilon, a.start), (Label::Epsilon, b.start)]
        );
        assert_eq!(
            arena.edges_of(a.accept).collect::<Vec<_>>(),
            vec![(Label::Epsilon, alt.accept)]
        );
        assert_eq!(
            arena.edges_of(b.accept).collect::<Vec<_>>(),
            vec![(Label::Epsilon, alt.accept)]
        );
    }

    #[test]
    fn test_star_wires_a_cycle() {
        let mut arena = NfaArena::new();
        let a = arena.literal('a');
        let star = arena.star(a);
        let inner_accept: Vec<_> = arena.edges_of(a.accept).collect();
        assert_eq!(
            inner_accept,
            vec![(Label::Epsilon, star.accept), (Label::Epsilon, a.start)]
        );
        let outer: Vec<_> = arena.edges_of(star.start).collect();
        assert_eq!(
            outer,
            vec![(Label::Epsilon, a.start), (Label::Epsilon, star.accept)]
        );
    }

    #[test]
    fn test_label_consumes() {
        assert!(Label::Char('x').consumes('x'));
        assert!(!Label::Char('x').consumes('y'));
        assert!(!Label::Epsilon.consumes('x'));
        assert!(Label::Epsilon.is_epsilon());
    }
}
