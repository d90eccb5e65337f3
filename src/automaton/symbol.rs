/// Value that marks an epsilon (empty) transition. A transition labelled with this value or
/// with the empty string is never deterministic.
pub const EPSILON: &str = "ε";

/// An element of the alphabet of an [`crate::Automaton`]. The `id` identifies the symbol
/// inside its automaton, while the `value` is the token that is actually read.
///
/// `==` compares identity, i.e. id and value. Two symbols denote the same letter if their
/// values agree, which is what [`crate::Automaton::alphabet`] and all language level
/// operations compare; use [`Symbol::same_letter`] for that check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    id: String,
    value: String,
}

impl Symbol {
    /// Creates a new symbol with the given identifier and value.
    pub fn new<I: Into<String>, V: Into<String>>(id: I, value: V) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// The identifier of the symbol.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The token that this symbol stands for.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value of the symbol.
    pub fn set_value<V: Into<String>>(&mut self, value: V) {
        self.value = value.into();
    }

    /// Returns true if `self` and `other` stand for the same token, regardless of their ids.
    pub fn same_letter(&self, other: &Symbol) -> bool {
        self.value == other.value
    }

    /// Returns true if the symbol represents an epsilon transition.
    pub fn is_epsilon(&self) -> bool {
        self.value.is_empty() || self.value == EPSILON
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_identity() {
        let a = Symbol::new("sym_0", "a");
        let other_a = Symbol::new("sym_1", "a");
        assert_ne!(a, other_a);
        assert!(a.same_letter(&other_a));
        assert!(!a.same_letter(&Symbol::new("sym_0", "b")));
        assert!(Symbol::new("e", "").is_epsilon());
        assert!(Symbol::new("e", EPSILON).is_epsilon());
    }
}
