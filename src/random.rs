//! Generation of random automata, mainly for testing.
use tracing::debug;

use crate::prelude::*;

/// Returns the `i`-th letter used for random alphabets, `a`, `b`, `c`, ...
fn letter(i: usize) -> String {
    char::from_u32('a' as u32 + i as u32)
        .map(String::from)
        .unwrap_or_else(|| format!("x{i}"))
}

/// Generates a random automaton with states `q0`, ..., `q{size-1}` over an alphabet of
/// `symbols` letters. For every state and letter, each state becomes a target with
/// probability `density`, so the result is in general non-deterministic and incomplete.
/// Every state is final with probability one half and `q0` is the only initial state.
///
/// The same `seed` always produces the same automaton.
pub fn generate_random_nfa(seed: u64, size: usize, symbols: usize, density: f64) -> Automaton {
    let mut rng = fastrand::Rng::with_seed(seed);
    let values = (0..symbols).map(letter).collect::<Vec<_>>();
    let mut aut = Automaton::builder(format!("random_nfa_{seed}"))
        .with_symbols(values)
        .with_facets((0..size).map(|i| (format!("q{i}"), i == 0, rng.bool())))
        .build()
        .expect("generated identifiers are distinct");

    for p in 0..size {
        for s in 0..symbols {
            for q in 0..size {
                if rng.f64() < density {
                    aut.connect(&format!("q{p}"), &format!("q{q}"), &format!("sym_{s}"))
                        .expect("states and symbols exist");
                }
            }
        }
    }
    debug!(
        "generated {} with {} transitions",
        aut.name(),
        aut.transitions().count()
    );
    aut
}

/// Generates a random complete deterministic automaton with states `q0`, ...,
/// `q{size-1}` over `symbols` letters, where every transition target is drawn uniformly.
/// Depending on the draw, some states may be unreachable from the initial state `q0`.
pub fn generate_random_dfa(seed: u64, size: usize, symbols: usize) -> Automaton {
    let mut rng = fastrand::Rng::with_seed(seed);
    let values = (0..symbols).map(letter).collect::<Vec<_>>();
    let mut aut = Automaton::builder(format!("random_dfa_{seed}"))
        .with_symbols(values)
        .with_facets((0..size).map(|i| (format!("q{i}"), i == 0, rng.bool())))
        .build()
        .expect("generated identifiers are distinct");

    for p in 0..size {
        for s in 0..symbols {
            let q = rng.usize(..size);
            aut.connect(&format!("q{p}"), &format!("q{q}"), &format!("sym_{s}"))
                .expect("states and symbols exist");
        }
    }
    aut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_reproducible() {
        assert_eq!(
            generate_random_nfa(7, 4, 2, 0.3),
            generate_random_nfa(7, 4, 2, 0.3)
        );
        let dfa = generate_random_dfa(3, 5, 2);
        assert!(dfa.is_deterministic());
        assert!(dfa.is_complete());
        assert_eq!(dfa.size(), 5);
        assert_eq!(letter(2), "c");
    }
}
