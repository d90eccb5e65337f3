//! The synchronous product of two automata, used for union and intersection.
use tracing::debug;

use crate::{math::Bijection, prelude::*};

/// Determines which product states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductMode {
    /// A product state is final if either component is.
    Union,
    /// A product state is final if both components are.
    Intersection,
}

impl ProductMode {
    /// Combines the final facets of the two components.
    pub fn accepts(self, left: bool, right: bool) -> bool {
        match self {
            ProductMode::Union => left || right,
            ProductMode::Intersection => left && right,
        }
    }

    fn infix(self) -> &'static str {
        match self {
            ProductMode::Union => "union",
            ProductMode::Intersection => "inter",
        }
    }
}

/// The result of a product construction, which remembers for every product state the pair
/// of component states it stands for.
#[derive(Debug, Clone)]
pub struct Product {
    automaton: Automaton,
    components: Bijection<(String, String), String>,
}

impl Product {
    /// Builds the product of `left` and `right`. The state for the pair `(p, q)` is named
    /// `p_q` (with a numeric suffix should that name already be taken by another pair). It is
    /// initial if both `p` and `q` are, and its final facet is given by `mode`. For every
    /// two transitions reading the same symbol value there is one product transition.
    ///
    /// The alphabet of the product is the one of `left`. For the result to be deterministic
    /// and complete, both inputs have to be deterministic and complete over the same
    /// alphabet; otherwise only the partial product is obtained.
    pub fn new(left: &Automaton, right: &Automaton, mode: ProductMode) -> Self {
        let mut automaton = Automaton::new(format!(
            "{}_{}_{}",
            left.name(),
            mode.infix(),
            right.name()
        ));
        let mut components = Bijection::new();

        for symbol in left.alphabet() {
            automaton
                .add_symbol(symbol.clone())
                .expect("alphabet symbols have distinct ids");
        }
        for p in left.states() {
            for q in right.states() {
                let id = automaton.fresh_state_id(&format!("{}_{}", p.id(), q.id()));
                let state = State::unlabeled(id.clone(), StateKind::Normal).with_facets(
                    p.is_initial() && q.is_initial(),
                    mode.accepts(p.is_final(), q.is_final()),
                );
                automaton
                    .add_state(state)
                    .expect("product state ids are fresh");
                components.insert((p.id().to_string(), q.id().to_string()), id);
            }
        }

        let mut edges = vec![];
        for s in left.transitions() {
            let value = left.value_of(s);
            let Some(symbol) = automaton.symbol_by_value(value) else {
                continue;
            };
            for t in right.transitions().filter(|t| right.value_of(t) == value) {
                let source =
                    components.get_by_left(&(s.source().to_string(), t.source().to_string()));
                let target =
                    components.get_by_left(&(s.target().to_string(), t.target().to_string()));
                if let (Some(source), Some(target)) = (source, target) {
                    edges.push((source.to_string(), target.to_string(), symbol.id().to_string()));
                }
            }
        }
        for (source, target, symbol) in edges {
            automaton
                .connect(&source, &target, &symbol)
                .expect("product states and symbols were added before");
        }
        debug!(
            "built {:?} product of {} and {} with {} states",
            mode,
            left.name(),
            right.name(),
            automaton.size()
        );

        Self {
            automaton,
            components,
        }
    }

    /// The product automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Consumes `self` and returns the product automaton.
    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }

    /// Returns the pair of component states that the product state `id` stands for.
    pub fn components(&self, id: &str) -> Option<(&str, &str)> {
        self.components
            .get_by_right(id)
            .map(|(p, q)| (p.as_str(), q.as_str()))
    }

    /// Returns the identifier of the product state for the pair `(p, q)`.
    pub fn state_for(&self, p: &str, q: &str) -> Option<&str> {
        self.components
            .get_by_left(&(p.to_string(), q.to_string()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_names_and_facets() {
        let left = crate::tests::single_a();
        let right = crate::tests::single_a();
        let product = Product::new(&left, &right, ProductMode::Intersection);
        let aut = product.automaton();

        assert_eq!(aut.size(), 4);
        assert_eq!(product.state_for("q0", "q1"), Some("q0_q1"));
        assert_eq!(product.components("q1_q0"), Some(("q1", "q0")));
        assert!(aut.state("q0_q0").unwrap().is_initial());
        assert!(!aut.state("q0_q1").unwrap().is_initial());
        assert!(aut.state("q1_q1").unwrap().is_final());
        assert!(!aut.state("q1_q0").unwrap().is_final());
        assert_eq!(aut.transitions().count(), 1);
    }

    #[test]
    fn clashing_pair_names_are_disambiguated() {
        let left = Automaton::builder("l")
            .with_symbols(["a"])
            .with_states([("a", StateKind::Initial), ("a_b", StateKind::Normal)])
            .build()
            .unwrap();
        let right = Automaton::builder("r")
            .with_symbols(["a"])
            .with_states([("b_c", StateKind::Initial), ("c", StateKind::Final)])
            .build()
            .unwrap();
        let product = Product::new(&left, &right, ProductMode::Union);
        assert_eq!(product.automaton().size(), 4);
        assert_eq!(product.state_for("a", "b_c"), Some("a_b_c"));
        assert_eq!(product.state_for("a_b", "c"), Some("a_b_c1"));
    }
}
