use crate::{
    error::{AutomatonError, EntityKind, Result},
    prelude::*,
};

/// Helper struct for assembling an [`Automaton`] from plain data. Symbols are given by
/// their values and receive identifiers `sym_0`, `sym_1`, ... in order, transitions are
/// given as `(source, value, target)` triples and receive identifiers `t0`, `t1`, ...
///
/// # Example
///
/// We want an automaton over `['a', 'b']` with two states where `q0` is initial and `q1` is
/// final, reading `a` moves from `q0` to `q1` and every other pair loops.
/// ```
/// use automata_lab::prelude::*;
///
/// let aut = Automaton::builder("ends_in_a")
///     .with_symbols(["a", "b"])
///     .with_states([("q0", StateKind::Initial), ("q1", StateKind::Final)])
///     .with_transitions([
///         ("q0", "a", "q1"),
///         ("q0", "b", "q0"),
///         ("q1", "a", "q1"),
///         ("q1", "b", "q0"),
///     ])
///     .build()
///     .unwrap();
/// assert!(aut.is_deterministic() && aut.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    name: String,
    symbols: Vec<String>,
    states: Vec<(String, bool, bool)>,
    transitions: Vec<(String, String, String)>,
}

impl AutomatonBuilder {
    /// Creates an empty builder for an automaton with the given name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds symbols with the given values.
    pub fn with_symbols<S: Into<String>, I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        self.symbols.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Adds states with the given identifiers and roles.
    pub fn with_states<S: Into<String>, I: IntoIterator<Item = (S, StateKind)>>(
        mut self,
        iter: I,
    ) -> Self {
        self.states.extend(iter.into_iter().map(|(id, kind)| {
            let (initial, accepting) = kind.facets();
            (id.into(), initial, accepting)
        }));
        self
    }

    /// Adds states given as `(id, initial, final)`, which allows states that are both
    /// initial and final.
    pub fn with_facets<S: Into<String>, I: IntoIterator<Item = (S, bool, bool)>>(
        mut self,
        iter: I,
    ) -> Self {
        self.states.extend(
            iter.into_iter()
                .map(|(id, initial, accepting)| (id.into(), initial, accepting)),
        );
        self
    }

    /// Adds transitions given as `(source, value, target)`.
    pub fn with_transitions<S, V, T, I>(mut self, iter: I) -> Self
    where
        S: Into<String>,
        V: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (S, V, T)>,
    {
        self.transitions.extend(
            iter.into_iter()
                .map(|(source, value, target)| (source.into(), value.into(), target.into())),
        );
        self
    }

    /// Consumes the builder and produces the automaton, validating every element in the
    /// same way as the corresponding `add_*` method of [`Automaton`].
    pub fn build(self) -> Result<Automaton> {
        let mut aut = Automaton::new(self.name);
        for (i, value) in self.symbols.into_iter().enumerate() {
            aut.add_symbol(Symbol::new(format!("sym_{i}"), value))?;
        }
        for (id, initial, accepting) in self.states {
            aut.add_state(State::unlabeled(id, StateKind::Normal).with_facets(initial, accepting))?;
        }
        for (i, (source, value, target)) in self.transitions.into_iter().enumerate() {
            let symbol = aut
                .symbol_by_value(&value)
                .ok_or(AutomatonError::DanglingReference {
                    kind: EntityKind::Symbol,
                    id: value.clone(),
                })?
                .id()
                .to_string();
            aut.add_transition(Transition::new(format!("t{i}"), source, target, symbol))?;
        }
        Ok(aut)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_rejects_unknown_values() {
        let res = Automaton::builder("broken")
            .with_symbols(["a"])
            .with_states([("q0", StateKind::Initial)])
            .with_transitions([("q0", "b", "q0")])
            .build();
        assert_eq!(
            res,
            Err(AutomatonError::DanglingReference {
                kind: EntityKind::Symbol,
                id: "b".into()
            })
        );
    }

    #[test]
    fn builder_assigns_identifiers() {
        let aut = Automaton::builder("ids")
            .with_symbols(["a", "b"])
            .with_facets([("q", true, true)])
            .with_transitions([("q", "b", "q")])
            .build()
            .unwrap();
        assert_eq!(aut.symbol("sym_1").map(|s| s.value()), Some("b"));
        assert_eq!(aut.transition("t0").map(|t| t.symbol()), Some("sym_1"));
        assert_eq!(aut.state("q").and_then(|q| q.kind()), None);
    }
}
