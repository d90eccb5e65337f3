//! Export of automata to the graphviz DOT format.
use std::fmt::Display;

use itertools::Itertools;

use crate::{math::Map, prelude::*};

fn sanitize_dot_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .filter_map(|chr| match chr {
            c if c.is_alphanumeric() || c == '_' => Some(c),
            '|' | ':' | ',' | '-' => Some('_'),
            _ => None,
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("A{ident}")
    } else {
        ident
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Attributes of a node in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", escape(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{}\"", escape(s)),
        }
    }
}

/// Attributes of an edge in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{}\"", escape(lbl)),
        }
    }
}

impl Automaton {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Nodes are named `s0`, `s1`, ... in the order of the states and labelled with the
    /// state identifiers. Final states are drawn as double circles and every initial state
    /// receives an incoming arrow from an invisible node. Transitions between the same pair
    /// of states are merged into one edge whose label lists the symbol values.
    pub fn dot_representation(&self) -> String {
        let idents: Map<&str, String> = self
            .states()
            .enumerate()
            .map(|(i, q)| (q.id(), format!("s{i}")))
            .collect();

        let header = [
            format!("digraph {} {{", sanitize_dot_ident(self.name())),
            "rankdir=LR".to_string(),
        ];

        let states = self.states().map(|q| {
            let shape = if q.is_final() {
                "doublecircle"
            } else {
                "circle"
            };
            format!(
                "{} [{}]",
                idents[q.id()],
                [
                    DotStateAttribute::Shape(shape.into()),
                    DotStateAttribute::Label(q.id().into()),
                ]
                .iter()
                .join(", ")
            )
        });

        let arrows = self.initial_states().flat_map(|q| {
            let ident = &idents[q.id()];
            [
                format!("init_{ident} [label=\"\", shape=none]"),
                format!("init_{ident} -> {ident}"),
            ]
        });

        let mut grouped: Vec<((&str, &str), Vec<&str>)> = vec![];
        for t in self.transitions() {
            let key = (t.source(), t.target());
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(self.value_of(t)),
                None => grouped.push((key, vec![self.value_of(t)])),
            }
        }
        let transitions = grouped.into_iter().map(|((source, target), values)| {
            format!(
                "{} -> {} [{}]",
                idents[source],
                idents[target],
                DotTransitionAttribute::Label(values.into_iter().unique().join(", "))
            )
        });

        header
            .into_iter()
            .chain(states)
            .chain(arrows)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_dot_ident;
    use crate::prelude::*;

    #[test]
    fn dot_output() {
        let nfa = Automaton::builder("two-letters")
            .with_symbols(["a", "b"])
            .with_states([("q0", StateKind::Initial), ("q1", StateKind::Final)])
            .with_transitions([("q0", "a", "q1"), ("q0", "b", "q1"), ("q1", "a", "q1")])
            .build()
            .unwrap();
        let dot = nfa.dot_representation();
        assert!(dot.starts_with("digraph two_letters {"));
        assert!(dot.contains("s1 [shape=\"doublecircle\", label=\"q1\"]"));
        assert!(dot.contains("init_s0 -> s0"));
        assert!(dot.contains("s0 -> s1 [label=\"a, b\"]"));
        assert!(dot.contains("s1 -> s1 [label=\"a\"]"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn macro_state_names_are_quoted() {
        let dot = crate::tests::single_a().determinize().dot_representation();
        assert!(dot.contains("label=\"{q0}\""));
        assert!(dot.contains("label=\"∅\""));
        assert_eq!(sanitize_dot_ident("9 lives"), "A9lives");
    }
}
