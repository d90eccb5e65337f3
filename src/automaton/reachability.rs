use std::collections::VecDeque;

use crate::{math::Set, prelude::*};

/// Type alias for the access word of a state together with the identifier of that state.
pub type AccessWord<'a> = (Vec<&'a str>, &'a str);

impl Automaton {
    /// Computes, for every state reachable from some initial state, a shortest word (as a
    /// sequence of symbol values) leading to it. States are returned in breadth-first order,
    /// starting with the initial states in insertion order.
    pub fn access_words(&self) -> Vec<AccessWord<'_>> {
        let mut seen: Set<&str> = Set::default();
        let mut queue: VecDeque<AccessWord<'_>> = VecDeque::new();
        for q in self.initial_states() {
            if seen.insert(q.id()) {
                queue.push_back((vec![], q.id()));
            }
        }

        let mut out = Vec::with_capacity(self.size());
        while let Some((access, q)) = queue.pop_front() {
            for t in self.transitions().filter(|t| t.source() == q) {
                if seen.insert(t.target()) {
                    let mut extended = access.clone();
                    extended.push(self.value_of(t));
                    queue.push_back((extended, t.target()));
                }
            }
            out.push((access, q));
        }
        out
    }

    /// Returns the identifiers of all states that can be reached from an initial state by
    /// following any sequence of transitions.
    pub fn reachable_state_ids(&self) -> Vec<&str> {
        self.access_words().into_iter().map(|(_, q)| q).collect()
    }
}
