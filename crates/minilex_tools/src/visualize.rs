//! Automaton visualization utilities
//!
//! Renders compiled rule automata in DOT/Graphviz format, one cluster
//! per rule, with doublecircle accept nodes and epsilon edges labeled ε.

use minilex::{Label, RuleSet, StateSet};
use std::fmt::Write;

/// Generate a DOT/Graphviz representation of the given rules.
///
/// When `rule` is `Some`, only that rule's automaton is rendered;
/// otherwise every rule gets its own cluster.
///
/// # Example
///
/// ```rust
/// use minilex::parse_spec;
/// use minilex_tools::visualize::generate_dot;
///
/// let spec = parse_spec("t1 (a)|(b) # \"a\"").unwrap();
/// let dot = generate_dot(&spec.rules, None);
/// assert!(dot.starts_with("digraph Rules {"));
/// ```
#[must_use]
pub fn generate_dot(rules: &RuleSet, rule: Option<&str>) -> String {
    let mut output = String::new();

    writeln!(output, "digraph Rules {{").unwrap();
    writeln!(output, "  rankdir=LR;").unwrap();
    writeln!(output, "  node [shape=circle];").unwrap();
    writeln!(output).unwrap();

    for (idx, r) in rules.rules().iter().enumerate() {
        if rule.is_some_and(|name| name != r.name) {
            continue;
        }

        writeln!(output, "  subgraph cluster_{idx} {{").unwrap();
        writeln!(output, "    label=\"{}\";", r.name).unwrap();
        writeln!(
            output,
            "    n{} [shape=doublecircle];",
            r.fragment.accept.raw()
        )
        .unwrap();

        // Walk every node reachable from the rule's start.
        let mut visited = StateSet::single(r.fragment.start);
        let mut pending = vec![r.fragment.start];
        while let Some(id) = pending.pop() {
            for (label, target) in rules.arena().edges_of(id) {
                let text = match label {
                    Label::Char(c) => c.to_string(),
                    Label::Epsilon => "\u{03b5}".to_string(),
                };
                writeln!(
                    output,
                    "    n{} -> n{} [label=\"{}\"];",
                    id.raw(),
                    target.raw(),
                    text
                )
                .unwrap();
                if visited.insert(target) {
                    pending.push(target);
                }
            }
        }

        writeln!(output, "  }}").unwrap();
        writeln!(output).unwrap();
    }

    writeln!(output, "}}").unwrap();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use minilex::parse_spec;

    #[test]
    fn test_dot_contains_every_fragment_node() {
        let spec = parse_spec("t1 (a)|(b) # \"a\"").unwrap();
        let dot = generate_dot(&spec.rules, None);
        let frag = spec.rules.rules()[0].fragment;
        assert!(dot.contains(&format!("n{}", frag.start.raw())));
        assert!(dot.contains(&format!("n{} [shape=doublecircle]", frag.accept.raw())));
        assert!(dot.contains("label=\"t1\""));
        assert!(dot.contains("\u{03b5}"));
    }

    #[test]
    fn test_dot_filters_by_rule_name() {
        let spec = parse_spec("t1 a , t2 b # \"a\"").unwrap();
        let dot = generate_dot(&spec.rules, Some("t2"));
        assert!(!dot.contains("label=\"t1\""));
        assert!(dot.contains("label=\"t2\""));
    }

    #[test]
    fn test_dot_renders_char_edges() {
        let spec = parse_spec("t1 x # \"x\"").unwrap();
        let dot = generate_dot(&spec.rules, None);
        assert!(dot.contains("[label=\"x\"]"));
    }
}
