//! # State-Set Engine
//!
//! Epsilon-closure and character-driven transitions over sets of arena
//! nodes, and the greedy longest-match scan built on them.
//!
//! A [`StateSet`] is an ordered set of node ids (sorted small-vector), so
//! membership and equality are by identifier, and iteration order is
//! deterministic.

use super::{Fragment, NfaArena, NodeId};
use smallvec::SmallVec;

/// The set of automaton positions consistent with the input consumed so
/// far. Deduplicated, ordered by node id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateSet {
    ids: SmallVec<[NodeId; 8]>,
}

impl StateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(id: NodeId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self { ids }
    }

    /// Insert an id, keeping the set sorted. Returns true if it was new.
    pub fn insert(&mut self, id: NodeId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(slot) => {
                self.ids.insert(slot, id);
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Smallest superset of `set` closed under epsilon edges.
///
/// Worklist fixed point: the set only grows and is bounded by the arena's
/// node count, so this terminates even on the cyclic graphs that
/// Kleene-star wiring produces.
#[must_use]
pub fn closure(arena: &NfaArena, mut set: StateSet) -> StateSet {
    let mut pending: SmallVec<[NodeId; 8]> = set.iter().collect();
    while let Some(id) = pending.pop() {
        for (label, target) in arena.edges_of(id) {
            if label.is_epsilon() && set.insert(target) {
                pending.push(target);
            }
        }
    }
    set
}

/// Consume one character: move along every edge labeled `c`, then take
/// the epsilon closure of the result.
#[must_use]
pub fn step(arena: &NfaArena, set: &StateSet, c: char) -> StateSet {
    let mut moved = StateSet::new();
    for id in set.iter() {
        for (label, target) in arena.edges_of(id) {
            if label.consumes(c) {
                moved.insert(target);
            }
        }
    }
    if moved.is_empty() { moved } else { closure(arena, moved) }
}

/// Length in bytes of the longest prefix of `word[pos..]` accepted by
/// `fragment`, or 0 if the accept node is never reached.
///
/// Greedy: scanning continues past the first accepting configuration
/// until the state set empties or input runs out. A match is only
/// recorded after consuming at least one character, so a fragment that
/// accepts the empty string still reports 0 here (see
/// [`accepts_empty`] for that check).
#[must_use]
pub fn match_len(arena: &NfaArena, fragment: Fragment, word: &str, pos: usize) -> usize {
    let mut states = closure(arena, StateSet::single(fragment.start));
    let mut best = 0;
    let mut consumed = 0;

    for c in word[pos..].chars() {
        states = step(arena, &states, c);
        if states.is_empty() {
            break;
        }
        consumed += c.len_utf8();
        if states.contains(fragment.accept) {
            best = consumed;
        }
    }

    best
}

/// Does the fragment accept the empty string? True exactly when the
/// accept node is epsilon-reachable from the start node.
#[must_use]
pub fn accepts_empty(arena: &NfaArena, fragment: Fragment) -> bool {
    closure(arena, StateSet::single(fragment.start)).contains(fragment.accept)
}
