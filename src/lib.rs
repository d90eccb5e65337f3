//! Library for analysing and transforming finite automata over finite alphabets.
//!
//! The central type is [`Automaton`], which stores an alphabet of [`Symbol`]s, a collection of
//! [`State`]s and a collection of labelled [`Transition`]s between them. An automaton may be
//! non-deterministic (several transitions for the same state and symbol, several or no
//! initial states) and incomplete. Every state carries two independent facets, being initial
//! and being final, and the sets of initial and final states are always derived from these.
//!
//! On top of the model the crate provides
//! - structural predicates [`Automaton::is_deterministic`] and [`Automaton::is_complete`]
//!   together with the in-place completion [`Automaton::complete`],
//! - the subset construction [`Automaton::determinize`], which always yields a complete
//!   deterministic automaton,
//! - minimization through Moore's partition refinement in [`Automaton::minimize`],
//! - the language operations in [`language`]: running words, enumerating accepted words up to
//!   a length, product constructions for union and intersection, complement and equivalence.
//!
//! Apart from [`Automaton::complete`], all transformations leave their input untouched and
//! return a fresh automaton.
//!
//! Automata can be exchanged in a flat JSON form (see [`record`]) and collected in a
//! [`catalog::Catalog`] which may be backed by a directory.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_lab::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{
            AccessWord, Automaton, AutomatonBuilder, State, StateKind, Symbol, Transition,
            EPSILON,
        },
        catalog::{Catalog, CatalogError},
        determinization::{MacroState, EMPTY_MACRO_STATE},
        error::{AutomatonError, EntityKind},
        language::{Product, ProductMode, EQUIVALENCE_DEPTH},
        math,
        record::{AutomatonRecord, RecordError},
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Errors raised by operations on automata.
pub mod error;
pub use error::{AutomatonError, EntityKind};

/// Defines the automaton model: symbols, states, transitions and the automaton itself.
pub mod automaton;
pub use automaton::{Automaton, State, StateKind, Symbol, Transition};

pub mod analysis;

pub mod determinization;

pub mod minimization;

pub mod language;

pub mod record;

pub mod catalog;

pub mod dot;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Accepts exactly the word `a`. Deterministic but not complete.
    pub fn single_a() -> Automaton {
        Automaton::builder("single_a")
            .with_symbols(["a"])
            .with_states([("q0", StateKind::Initial), ("q1", StateKind::Final)])
            .with_transitions([("q0", "a", "q1")])
            .build()
            .unwrap()
    }

    /// The example DFA from the wikipedia article on DFA minimization, in which `q0`/`q1`
    /// and `q2`/`q3`/`q4` are equivalent.
    pub fn wiki_dfa() -> Automaton {
        Automaton::builder("wiki")
            .with_symbols(["a", "b"])
            .with_states([
                ("q0", StateKind::Initial),
                ("q1", StateKind::Normal),
                ("q2", StateKind::Final),
                ("q3", StateKind::Final),
                ("q4", StateKind::Final),
                ("q5", StateKind::Normal),
            ])
            .with_transitions([
                ("q0", "a", "q1"),
                ("q0", "b", "q2"),
                ("q1", "a", "q0"),
                ("q1", "b", "q3"),
                ("q2", "a", "q4"),
                ("q2", "b", "q5"),
                ("q3", "a", "q4"),
                ("q3", "b", "q5"),
                ("q4", "a", "q4"),
                ("q4", "b", "q5"),
                ("q5", "a", "q5"),
                ("q5", "b", "q5"),
            ])
            .build()
            .unwrap()
    }

    #[cfg(feature = "random")]
    mod properties {
        use itertools::Itertools;

        use crate::{
            minimization::partition_refinement::{moore_partition_refinement, ReachableDfa},
            prelude::*,
            random::{generate_random_dfa, generate_random_nfa},
        };

        /// Accepts a word in an arbitrary automaton iff some run ends in a final state.
        fn nfa_accepts(aut: &Automaton, word: &[&str]) -> bool {
            let mut current: Vec<&str> = aut.initial_states().map(|q| q.id()).collect();
            for value in word {
                current = current
                    .iter()
                    .flat_map(|q| aut.successors(q, value))
                    .unique()
                    .collect();
            }
            current
                .iter()
                .any(|q| aut.state(q).is_some_and(State::is_final))
        }

        fn all_words<'a>(values: &'a [&'a str], max: usize) -> Vec<Vec<&'a str>> {
            let mut words = vec![vec![]];
            for length in 1..=max {
                words.extend(
                    itertools::repeat_n(values.iter().copied(), length)
                        .multi_cartesian_product(),
                );
            }
            words
        }

        #[test_log::test]
        fn determinization_preserves_language() {
            for seed in 0..20 {
                let nfa = generate_random_nfa(seed, 4, 2, 0.3);
                let dfa = nfa.determinize();
                assert!(dfa.is_deterministic() && dfa.is_complete());
                for word in all_words(&["a", "b"], 5) {
                    assert_eq!(
                        dfa.run(&word).unwrap(),
                        nfa_accepts(&nfa, &word),
                        "seed {seed}, word {word:?}"
                    );
                }
                assert!(nfa.equivalent_exact(&dfa));
            }
        }

        #[test]
        fn minimization_properties() {
            for seed in 0..20 {
                let dfa = generate_random_dfa(seed, 6, 2);
                let min = dfa.minimize();
                assert_eq!(min.minimize().size(), min.size(), "seed {seed}");
                assert_eq!(min.reachable_state_ids().len(), min.size());
                assert!(min.is_minimal());
                assert!(min.equivalent(&dfa).unwrap());
                assert!(min.equivalent_exact(&dfa));

                let partition = moore_partition_refinement(&dfa);
                let reachable = ReachableDfa::new(&dfa);
                for block in &partition {
                    assert!(block
                        .iter()
                        .map(|q| reachable.signature(q, &partition))
                        .all_equal());
                }
            }
        }

        #[test]
        fn complement_and_completion() {
            for seed in 0..20 {
                let dfa = generate_random_dfa(seed, 5, 2);
                assert!(dfa.equivalent(&dfa.complement().complement()).unwrap());

                let mut nfa = generate_random_nfa(seed, 4, 3, 0.2);
                let before = nfa.clone();
                nfa.complete();
                assert!(nfa.is_complete());
                assert!(nfa.equivalent_exact(&before));
            }
        }

        #[test]
        fn union_and_intersection_agree_with_components() {
            for seed in 0..10 {
                let left = generate_random_dfa(seed, 3, 2);
                let right = generate_random_dfa(seed + 100, 3, 2);
                let union = left.union(&right);
                let intersection = left.intersection(&right);
                for word in all_words(&["a", "b"], 4) {
                    let l = left.run(&word).unwrap();
                    let r = right.run(&word).unwrap();
                    assert_eq!(union.run(&word).unwrap(), l || r);
                    assert_eq!(intersection.run(&word).unwrap(), l && r);
                }
            }
        }
    }
}
