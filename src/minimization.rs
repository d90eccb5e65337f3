//! Minimization of complete deterministic automata.
pub mod partition_refinement;

use itertools::Itertools;
use tracing::debug;

use crate::{error::Result, prelude::*};

use self::partition_refinement::{moore_partition_refinement, ReachableDfa};

impl Automaton {
    /// Returns the minimal automaton that accepts the same language as `self`. Unreachable
    /// states are dropped and the remaining ones are merged with Moore's partition
    /// refinement. Every block of the final partition becomes a state `B<i>` whose label
    /// lists the merged states; it is initial (final) if one of its members is.
    ///
    /// `self` must be deterministic and complete, e.g. the result of
    /// [`Automaton::determinize`] or of [`Automaton::complete`]. This is not checked, see
    /// [`Automaton::try_minimize`] for a checked variant.
    pub fn minimize(&self) -> Automaton {
        let dfa = ReachableDfa::new(self);
        let partition = moore_partition_refinement(self);
        let index = partition.index();

        let mut min = Automaton::new(format!("{}_min", self.name()));
        for symbol in self.alphabet() {
            min.add_symbol(symbol.clone())
                .expect("alphabet symbols have distinct ids");
        }
        for (i, block) in partition.iter().enumerate() {
            let members = block.iter().filter_map(|q| self.state(q)).collect_vec();
            let state = State::new(
                format!("B{i}"),
                format!("{{{}}}", block.iter().join(", ")),
                StateKind::Normal,
            )
            .with_facets(
                members.iter().any(|q| q.is_initial()),
                members.iter().any(|q| q.is_final()),
            );
            min.add_state(state).expect("block names are distinct");
        }
        for (i, block) in partition.iter().enumerate() {
            let Some(representative) = block.iter().next() else {
                continue;
            };
            for symbol in self.alphabet() {
                let target = dfa
                    .successor(representative, symbol.value())
                    .and_then(|q| index.get(&q.to_string()));
                if let Some(j) = target {
                    min.connect(&format!("B{i}"), &format!("B{j}"), symbol.id())
                        .expect("blocks and symbols were added before");
                }
            }
        }
        debug!(
            "minimized {} from {} to {} states",
            self.name(),
            self.size(),
            min.size()
        );
        min
    }

    /// Like [`Automaton::minimize`], but first verifies that `self` is deterministic and
    /// complete.
    pub fn try_minimize(&self) -> Result<Automaton> {
        self.ensure_complete_deterministic()?;
        Ok(self.minimize())
    }

    /// Returns true if minimizing `self` does not reduce the number of states. Like
    /// [`Automaton::minimize`], this assumes that `self` is deterministic and complete.
    pub fn is_minimal(&self) -> bool {
        self.minimize().size() == self.size()
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::wiki_dfa};

    #[test_log::test]
    fn minimize_wiki_dfa() {
        let dfa = wiki_dfa();
        assert!(!dfa.is_minimal());
        let min = dfa.minimize();
        assert_eq!(min.size(), 3);
        assert!(min.is_deterministic() && min.is_complete());
        assert!(min.is_minimal());
        assert_eq!(min.name(), "wiki_min");
        assert_eq!(min.state("B0").map(|q| q.label()), Some("{q2, q3, q4}"));
        assert!(min.state("B0").is_some_and(|q| q.is_final()));
        for word in ["", "a", "b", "ab", "ba", "bb", "aab", "abab"] {
            assert_eq!(
                min.simulate(word).unwrap(),
                dfa.simulate(word).unwrap(),
                "{word}"
            );
        }
        assert_eq!(min.minimize().size(), min.size());
    }

    #[test]
    fn equivalent_looping_states_are_merged() {
        let dfa = Automaton::builder("loops")
            .with_symbols(["a", "b"])
            .with_states([("p", StateKind::Initial), ("r", StateKind::Normal)])
            .with_transitions([
                ("p", "a", "r"),
                ("p", "b", "p"),
                ("r", "a", "r"),
                ("r", "b", "r"),
            ])
            .build()
            .unwrap();
        assert!(!dfa.is_minimal());
        let min = dfa.try_minimize().unwrap();
        assert_eq!(min.size(), 1);
        let state = min.state("B0").unwrap();
        assert_eq!(state.label(), "{p, r}");
        assert!(state.is_initial() && !state.is_final());
        assert_eq!(min.transitions().count(), 2);
    }

    #[test]
    fn result_is_reachable() {
        let mut dfa = wiki_dfa();
        dfa.add_state(State::unlabeled("dead", StateKind::Final))
            .unwrap();
        dfa.connect("dead", "q0", "sym_0").unwrap();
        dfa.connect("dead", "q0", "sym_1").unwrap();
        let min = dfa.minimize();
        assert_eq!(min.reachable_state_ids().len(), min.size());
        assert_eq!(min.size(), 3);
    }

    #[test]
    fn try_minimize_checks_preconditions() {
        let incomplete = crate::tests::single_a();
        assert!(matches!(
            incomplete.try_minimize(),
            Err(AutomatonError::PreconditionFailed(_))
        ));
    }
}
