//! Structural predicates on automata and the completion transform.
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::{AutomatonError, Result},
    math::Set,
    prelude::*,
};

/// Identifier that is tried first for the sink state added by [`Automaton::complete`].
pub const SINK_STATE_ID: &str = "sink";

impl Automaton {
    /// Returns true if the automaton is deterministic, that is it has precisely one initial
    /// state, no transition reads the empty word and for every state and symbol value there
    /// is at most one target.
    pub fn is_deterministic(&self) -> bool {
        if self.initial_states().count() != 1 {
            trace!("{} does not have exactly one initial state", self.name());
            return false;
        }
        if self
            .transitions()
            .any(|t| self.symbol(t.symbol()).is_some_and(Symbol::is_epsilon))
        {
            trace!("{} has epsilon transitions", self.name());
            return false;
        }
        self.transition_table()
            .values()
            .all(|targets| targets.iter().all_equal())
    }

    /// Returns true if for every state and every symbol value of the alphabet there is at
    /// least one outgoing transition.
    pub fn is_complete(&self) -> bool {
        let defined: Set<(&str, &str)> = self
            .transitions()
            .map(|t| (t.source(), self.value_of(t)))
            .collect();
        self.states().all(|q| {
            self.alphabet()
                .all(|s| defined.contains(&(q.id(), s.value())))
        })
    }

    /// Completes the automaton in place. If it is not yet complete, a fresh non-final sink
    /// state is added, every missing transition is redirected to it, and the sink loops on
    /// every symbol. Returns `self` for chaining.
    pub fn complete(&mut self) -> &mut Self {
        if self.is_complete() {
            return self;
        }
        let sink = self.fresh_state_id(SINK_STATE_ID);
        debug!("completing {} with sink state {sink}", self.name());

        let defined: Set<(String, String)> = self
            .transitions()
            .map(|t| (t.source().to_string(), self.value_of(t).to_string()))
            .collect();
        let alphabet = self
            .alphabet()
            .map(|s| (s.id().to_string(), s.value().to_string()))
            .collect_vec();
        let missing = self
            .states()
            .flat_map(|q| alphabet.iter().map(move |sym| (q.id().to_string(), sym)))
            .filter(|(q, (_, value))| !defined.contains(&(q.clone(), value.clone())))
            .map(|(q, (symbol, _))| (q, symbol.clone()))
            .collect_vec();

        self.add_state(State::new(sink.clone(), "sink state", StateKind::Normal))
            .expect("sink id is fresh");
        for (q, symbol) in missing {
            self.connect(&q, &sink, &symbol)
                .expect("states and symbols exist");
        }
        for (symbol, _) in &alphabet {
            self.connect(&sink, &sink, symbol)
                .expect("sink and symbols exist");
        }
        self
    }

    /// Returns an error if the automaton is not deterministic.
    pub fn ensure_deterministic(&self) -> Result<()> {
        if self.is_deterministic() {
            Ok(())
        } else {
            Err(AutomatonError::PreconditionFailed(format!(
                "{} is not deterministic",
                self.name()
            )))
        }
    }

    /// Returns an error if the automaton is not both deterministic and complete.
    pub fn ensure_complete_deterministic(&self) -> Result<()> {
        self.ensure_deterministic()?;
        if self.is_complete() {
            Ok(())
        } else {
            Err(AutomatonError::PreconditionFailed(format!(
                "{} is not complete",
                self.name()
            )))
        }
    }
}
