//! Language level operations: running words, enumerating accepted words and the boolean
//! operations on the accepted languages.
pub mod product;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::{AutomatonError, Result},
    prelude::*,
};

pub use product::{Product, ProductMode};

/// Maximal length of the words that [`Automaton::equivalent`] compares.
pub const EQUIVALENCE_DEPTH: usize = 5;

impl Automaton {
    /// Runs the sequence of symbol values `word` from the first initial state and returns
    /// whether the reached state is final. If at some point there is no transition for the
    /// next symbol, the word is rejected. The automaton is assumed to be deterministic, if
    /// it is not, the first matching transition is taken.
    ///
    /// Fails with [`AutomatonError::NoInitialState`] if there is no state to start in.
    pub fn run<S: AsRef<str>, I: IntoIterator<Item = S>>(&self, word: I) -> Result<bool> {
        let mut current = self
            .initial_states()
            .next()
            .ok_or(AutomatonError::NoInitialState)?
            .id();
        for symbol in word {
            let next = self
                .transitions()
                .find(|t| t.source() == current && self.value_of(t) == symbol.as_ref());
            match next {
                Some(t) => current = t.target(),
                None => {
                    trace!("no transition from {current} on {}", symbol.as_ref());
                    return Ok(false);
                }
            }
        }
        Ok(self.state(current).is_some_and(State::is_final))
    }

    /// Runs `word`, where every `char` is one symbol value. See [`Automaton::run`].
    pub fn simulate(&self, word: &str) -> Result<bool> {
        self.run(word.chars().map(String::from))
    }

    /// Returns every string of at most `max_length` characters that [`Automaton::simulate`]
    /// accepts, ordered by length and lexicographically within one length. Since
    /// `simulate` reads one `char` per symbol, only symbol values consisting of a single
    /// character take part; see [`Automaton::accepted_token_words`] for words over
    /// arbitrary values.
    ///
    /// The number of candidates grows exponentially in `max_length`, so this is only meant
    /// for small bounds.
    pub fn accepted_words(&self, max_length: usize) -> Result<Vec<String>> {
        let values = self
            .alphabet()
            .map(|s| s.value())
            .filter(|value| value.chars().count() == 1)
            .sorted()
            .collect_vec();
        Ok(self
            .enumerate_accepted(&values, max_length)?
            .into_iter()
            .map(|word| word.concat())
            .collect())
    }

    /// Returns every sequence of at most `max_length` symbol values that [`Automaton::run`]
    /// accepts, ordered by length and lexicographically within one length.
    pub fn accepted_token_words(&self, max_length: usize) -> Result<Vec<Vec<&str>>> {
        let values = self.alphabet().map(|s| s.value()).sorted().collect_vec();
        self.enumerate_accepted(&values, max_length)
    }

    fn enumerate_accepted<'a>(
        &self,
        values: &[&'a str],
        max_length: usize,
    ) -> Result<Vec<Vec<&'a str>>> {
        let mut accepted = vec![];
        if self.run(std::iter::empty::<&str>())? {
            accepted.push(vec![]);
        }
        for length in 1..=max_length {
            for word in itertools::repeat_n(values.iter().copied(), length)
                .multi_cartesian_product()
            {
                if self.run(&word)? {
                    accepted.push(word);
                }
            }
        }
        Ok(accepted)
    }

    /// Builds the product of `self` and `other` in which a state is final if one of its
    /// components is. See [`Product::new`] for the requirements on the inputs.
    pub fn union(&self, other: &Automaton) -> Automaton {
        Product::new(self, other, ProductMode::Union).into_automaton()
    }

    /// Builds the product of `self` and `other` in which a state is final if both of its
    /// components are. See [`Product::new`] for the requirements on the inputs.
    pub fn intersection(&self, other: &Automaton) -> Automaton {
        Product::new(self, other, ProductMode::Intersection).into_automaton()
    }

    /// Returns a copy of `self` in which final and non-final states are swapped. This only
    /// complements the language if `self` is deterministic and complete.
    pub fn complement(&self) -> Automaton {
        let mut complement = self.clone();
        complement.set_name(format!("{}_complement", self.name()));
        let flipped = self
            .states()
            .map(|q| (q.id().to_string(), !q.is_final()))
            .collect_vec();
        for (id, accepting) in flipped {
            complement
                .set_final(&id, accepting)
                .expect("the copy has the same states");
        }
        complement
    }

    /// Checks whether `self` and `other` accept the same words by verifying that neither
    /// `self ∩ ¬other` nor `other ∩ ¬self` accepts a word of length at most
    /// [`EQUIVALENCE_DEPTH`].
    ///
    /// This is an approximation: automata that only differ on longer words are reported as
    /// equivalent. Both inputs should be deterministic and complete over the same alphabet.
    /// See [`Automaton::equivalent_exact`] for a decision procedure.
    pub fn equivalent(&self, other: &Automaton) -> Result<bool> {
        let left = self.intersection(&other.complement());
        let right = other.intersection(&self.complement());
        let witnesses = left.accepted_token_words(EQUIVALENCE_DEPTH)?.len()
            + right.accepted_token_words(EQUIVALENCE_DEPTH)?.len();
        debug!(
            "{} words in the symmetric difference of {} and {}",
            witnesses,
            self.name(),
            other.name()
        );
        Ok(witnesses == 0)
    }

    /// Decides whether `self` and `other` accept the same language. Both are extended to the
    /// union of their alphabets and determinized, after which neither difference may reach
    /// a final state. Works for arbitrary inputs.
    pub fn equivalent_exact(&self, other: &Automaton) -> bool {
        let left = self.with_symbols_of(other).determinize();
        let right = other.with_symbols_of(self).determinize();
        left.intersection(&right.complement()).is_empty_language()
            && right.intersection(&left.complement()).is_empty_language()
    }

    /// Returns a shortest sequence of symbol values that leads from an initial state to a
    /// final state, or `None` if there is none.
    pub fn give_word(&self) -> Option<Vec<&str>> {
        self.access_words().into_iter().find_map(|(word, q)| {
            self.state(q)
                .is_some_and(State::is_final)
                .then_some(word)
        })
    }

    /// Returns true if no final state is reachable from an initial state.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Returns a copy of `self` to which every symbol value of `other` that `self` lacks has
    /// been added.
    fn with_symbols_of(&self, other: &Automaton) -> Automaton {
        let mut extended = self.clone();
        for symbol in other.alphabet() {
            if !extended.symbols().any(|s| s.same_letter(symbol)) {
                let id = extended.fresh_symbol_id(symbol.id());
                extended
                    .add_symbol(Symbol::new(id, symbol.value()))
                    .expect("identifier is fresh");
            }
        }
        extended
    }
}
