//! Moore's partition refinement on the reachable part of a complete deterministic automaton.
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{
    math::{Map, Partition},
    prelude::*,
};

/// For every symbol of the alphabet (in a fixed order), the index of the block that the
/// transition on that symbol leads to, or `None` if there is no such transition.
pub type Signature = Vec<Option<usize>>;

/// The transition function of a deterministic automaton restricted to the states that are
/// reachable from its initial states, as needed for partition refinement.
#[derive(Debug, Clone)]
pub struct ReachableDfa<'a> {
    states: Vec<&'a str>,
    alphabet: Vec<&'a str>,
    delta: Map<(&'a str, &'a str), &'a str>,
}

impl<'a> ReachableDfa<'a> {
    /// Extracts the reachable part of `aut`. If several transitions leave a state on the same
    /// symbol, only the first one is taken into account.
    pub fn new(aut: &'a Automaton) -> Self {
        let states = aut.reachable_state_ids();
        let alphabet = aut.alphabet().map(|s| s.value()).collect_vec();
        let mut delta = Map::default();
        for t in aut.transitions() {
            delta.entry((t.source(), aut.value_of(t))).or_insert(t.target());
        }
        Self {
            states,
            alphabet,
            delta,
        }
    }

    /// The reachable states, in breadth-first order.
    pub fn states(&self) -> &[&'a str] {
        &self.states
    }

    /// The symbol values, in the order used for signatures.
    pub fn alphabet(&self) -> &[&'a str] {
        &self.alphabet
    }

    /// The target of the transition leaving `state` on `value`.
    pub fn successor(&self, state: &str, value: &str) -> Option<&'a str> {
        self.delta.get(&(state, value)).copied()
    }

    /// Computes the signature of `state` with respect to `partition`.
    pub fn signature(&self, state: &str, partition: &Partition<String>) -> Signature {
        let index = partition.index();
        self.signature_with(state, &index)
    }

    fn signature_with(&self, state: &str, index: &Map<&String, usize>) -> Signature {
        self.alphabet
            .iter()
            .map(|value| {
                self.successor(state, value)
                    .and_then(|target| index.get(&target.to_string()).copied())
            })
            .collect()
    }

    /// Performs one round of refinement: every block is split according to the signatures
    /// of its members. Sub-blocks keep the relative order of the blocks they come from.
    pub fn refine(&self, partition: &Partition<String>) -> Partition<String> {
        let index = partition.index();
        let mut blocks = vec![];
        for block in partition {
            let mut split: IndexMap<Signature, Vec<String>> = IndexMap::new();
            for q in block {
                split
                    .entry(self.signature_with(q, &index))
                    .or_default()
                    .push(q.clone());
            }
            blocks.extend(split.into_values());
        }
        Partition::new(blocks)
    }

    /// The partition into final and non-final reachable states.
    pub fn initial_partition(&self, aut: &Automaton) -> Partition<String> {
        let (accepting, rejecting): (Vec<_>, Vec<_>) = self
            .states
            .iter()
            .map(|q| q.to_string())
            .partition(|q| aut.state(q).is_some_and(State::is_final));
        Partition::new([accepting, rejecting])
    }
}

/// Computes the coarsest partition of the reachable states of `aut` that separates final
/// from non-final states and is stable under the transition function, using Moore's
/// algorithm. Rounds are repeated until a round no longer increases the number of blocks.
///
/// `aut` should be deterministic and complete.
pub fn moore_partition_refinement(aut: &Automaton) -> Partition<String> {
    let dfa = ReachableDfa::new(aut);
    let mut partition = dfa.initial_partition(aut);
    let mut round = 0;
    loop {
        round += 1;
        let refined = dfa.refine(&partition);
        trace!(
            "refinement round {round} of {}: {} -> {} blocks",
            aut.name(),
            partition.size(),
            refined.size()
        );
        if refined.size() == partition.size() {
            return refined;
        }
        partition = refined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn blocks_are_stable() {
        let aut = crate::tests::wiki_dfa();
        let dfa = ReachableDfa::new(&aut);
        let partition = moore_partition_refinement(&aut);
        assert_eq!(partition.size(), 3);
        for block in &partition {
            let signatures = block
                .iter()
                .map(|q| dfa.signature(q, &partition))
                .collect_vec();
            assert!(signatures.iter().all_equal());
        }
        assert_eq!(
            partition,
            Partition::new([
                vec!["q0".to_string(), "q1".to_string()],
                vec!["q2".into(), "q3".into(), "q4".into()],
                vec!["q5".into()],
            ])
        );
    }

    #[test]
    fn unreachable_states_are_ignored() {
        let mut aut = crate::tests::wiki_dfa();
        aut.add_state(State::unlabeled("q9", StateKind::Final))
            .unwrap();
        let partition = moore_partition_refinement(&aut);
        assert!(partition.block_of("q9").is_none());
        assert_eq!(partition.iter().map(|b| b.len()).sum::<usize>(), 6);
    }
}
