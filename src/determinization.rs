//! Subset construction, turning an arbitrary automaton into a complete deterministic one.
use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    math::{Map, OrderedSet, Set},
    prelude::*,
};

/// Name of the state that represents the empty set of states.
pub const EMPTY_MACRO_STATE: &str = "∅";

/// A state of the automaton produced by the subset construction. It either stands for a
/// non-empty set of states of the input, or for the empty set, which is the unique
/// rejecting sink of the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroState {
    /// No state of the input is active.
    Empty,
    /// The given (non-empty) set of input states is active.
    Concrete(OrderedSet<String>),
}

impl MacroState {
    /// Creates the macro-state for the given members, which is [`MacroState::Empty`] if
    /// there are none.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(members: I) -> Self {
        let members: OrderedSet<String> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            MacroState::Empty
        } else {
            MacroState::Concrete(members)
        }
    }

    /// Returns the name of the macro-state, `{a,b}` for a concrete one and
    /// [`EMPTY_MACRO_STATE`] for the empty one. Names of different macro-states coincide
    /// if member identifiers contain `,`.
    pub fn name(&self) -> String {
        match self {
            MacroState::Empty => EMPTY_MACRO_STATE.to_string(),
            MacroState::Concrete(members) => format!("{{{}}}", members.iter().join(",")),
        }
    }

    /// Iterates over the members.
    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        let members = match self {
            MacroState::Empty => None,
            MacroState::Concrete(members) => Some(members.iter().map(String::as_str)),
        };
        members.into_iter().flatten()
    }

    /// Returns true for [`MacroState::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, MacroState::Empty)
    }
}

impl Automaton {
    /// Computes an equivalent complete deterministic automaton through the subset
    /// construction. Macro-states are explored in breadth-first order, so the result is
    /// reproducible. Whenever a macro-state has no successor on some symbol, the transition
    /// leads to the empty macro-state, which is never final and loops on every symbol.
    ///
    /// If the input has no initial state, the result consists of the empty macro-state alone
    /// and accepts nothing.
    pub fn determinize(&self) -> Automaton {
        let table = self.transition_table();
        let finals: Set<&str> = self.final_states().map(|q| q.id()).collect();
        let alphabet = self.alphabet().cloned().collect_vec();

        let initial = MacroState::new(self.initial_states().map(|q| q.id()));
        let mut ids: Map<MacroState, usize> = Map::default();
        let mut macros: Vec<(MacroState, bool)> = vec![];
        let mut edges: Vec<(usize, String, usize)> = vec![];
        let mut queue = VecDeque::new();

        ids.insert(initial.clone(), 0);
        macros.push((initial.clone(), false));
        if !initial.is_empty() {
            queue.push_back(initial);
        }

        while let Some(current) = queue.pop_front() {
            let source = ids[&current];
            trace!("processing macro-state {}", current.name());
            macros[source].1 = current.members().any(|q| finals.contains(q));

            for symbol in &alphabet {
                let target = MacroState::new(current.members().flat_map(|q| {
                    table
                        .get(&(q, symbol.value()))
                        .into_iter()
                        .flatten()
                        .copied()
                }));
                let target_id = match ids.get(&target) {
                    Some(&id) => id,
                    None => {
                        let id = macros.len();
                        ids.insert(target.clone(), id);
                        macros.push((target.clone(), false));
                        if !target.is_empty() {
                            queue.push_back(target);
                        }
                        id
                    }
                };
                edges.push((source, symbol.id().to_string(), target_id));
            }
        }

        if let Some(&empty) = ids.get(&MacroState::Empty) {
            for symbol in &alphabet {
                edges.push((empty, symbol.id().to_string(), empty));
            }
        }

        let mut dfa = Automaton::new(format!("{}_dfa", self.name()));
        for symbol in alphabet {
            dfa.add_symbol(symbol)
                .expect("alphabet symbols have distinct ids");
        }
        // member ids may contain `,` so distinct macro-states can share a name
        let mut names = Vec::with_capacity(macros.len());
        for (i, (macro_state, accepting)) in macros.iter().enumerate() {
            let id = dfa.fresh_state_id(&macro_state.name());
            dfa.add_state(
                State::new(id.clone(), macro_state.name(), StateKind::Normal)
                    .with_facets(i == 0, *accepting),
            )
            .expect("state id is fresh");
            names.push(id);
        }
        for (i, (source, symbol, target)) in edges.into_iter().enumerate() {
            dfa.add_transition(Transition::new(
                format!("t{i}"),
                names[source].clone(),
                names[target].clone(),
                symbol,
            ))
            .expect("macro-states and symbols were added before");
        }
        debug!(
            "determinized {} with {} states into {} states",
            self.name(),
            self.size(),
            dfa.size()
        );
        dfa
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn branching_nfa() -> Automaton {
        Automaton::builder("branching")
            .with_symbols(["a"])
            .with_states([
                ("q0", StateKind::Initial),
                ("q1", StateKind::Normal),
                ("q2", StateKind::Final),
            ])
            .with_transitions([("q0", "a", "q1"), ("q0", "a", "q2")])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn subset_construction() {
        let nfa = branching_nfa();
        assert!(!nfa.is_deterministic());

        let dfa = nfa.determinize();
        assert!(dfa.is_deterministic());
        assert!(dfa.is_complete());
        assert_eq!(dfa.name(), "branching_dfa");
        assert_eq!(
            dfa.states().map(|q| q.id()).collect::<Vec<_>>(),
            vec!["{q0}", "{q1,q2}", EMPTY_MACRO_STATE]
        );
        assert!(dfa.state("{q1,q2}").unwrap().is_final());
        assert!(!dfa.state(EMPTY_MACRO_STATE).unwrap().is_final());
        assert!(dfa.simulate("a").unwrap());
        assert!(!dfa.simulate("aa").unwrap());
        assert!(!dfa.simulate("").unwrap());
    }

    #[test]
    fn no_initial_state_gives_the_empty_language() {
        let mut nfa = branching_nfa();
        nfa.set_initial("q0", false).unwrap();
        let dfa = nfa.determinize();
        assert_eq!(dfa.size(), 1);
        let empty = dfa.state(EMPTY_MACRO_STATE).unwrap();
        assert!(empty.is_initial() && !empty.is_final());
        assert!(dfa.is_complete());
        assert!(dfa.accepted_words(3).unwrap().is_empty());
    }

    #[test]
    fn deterministic_input_is_preserved() {
        let dfa = crate::tests::single_a();
        let det = dfa.determinize();
        // q0, q1 and the empty set, since q1 has no outgoing transition
        assert_eq!(det.size(), 3);
        assert_eq!(det.determinize().size(), 3);
        assert!(det.equivalent(&dfa).unwrap());
    }

    #[test]
    fn initial_final_states_are_accepting() {
        let nfa = Automaton::builder("eps")
            .with_symbols(["a"])
            .with_facets([("q", true, true)])
            .build()
            .unwrap();
        let dfa = nfa.determinize();
        assert!(dfa.simulate("").unwrap());
        assert!(!dfa.simulate("a").unwrap());
    }

    #[test_log::test]
    fn clashing_macro_state_names_are_disambiguated() {
        let nfa = Automaton::builder("commas")
            .with_symbols(["x"])
            .with_states([
                ("a,b", StateKind::Initial),
                ("a", StateKind::Normal),
                ("b", StateKind::Final),
            ])
            .with_transitions([("a,b", "x", "a"), ("a,b", "x", "b")])
            .build()
            .unwrap();
        let dfa = nfa.determinize();
        assert_eq!(
            dfa.states().map(|q| q.id()).collect::<Vec<_>>(),
            vec!["{a,b}", "{a,b}1", EMPTY_MACRO_STATE]
        );
        assert_eq!(dfa.state("{a,b}1").unwrap().label(), "{a,b}");
        assert!(dfa.state("{a,b}1").unwrap().is_final());
        assert!(dfa.is_deterministic() && dfa.is_complete());
        assert!(dfa.simulate("x").unwrap());
        assert!(!dfa.simulate("xx").unwrap());
    }

    #[test]
    fn macro_state_names() {
        assert_eq!(MacroState::new(["b", "a"]).name(), "{a,b}");
        assert_eq!(MacroState::new(Vec::<String>::new()), MacroState::Empty);
        assert_eq!(MacroState::Empty.members().count(), 0);
    }
}
