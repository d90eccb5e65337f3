/// A directed, labelled edge of an [`crate::Automaton`]. `source` and `target` are state
/// identifiers, `symbol` is a symbol identifier; all of them are resolved by the automaton
/// when the transition is added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    id: String,
    source: String,
    target: String,
    symbol: String,
}

impl Transition {
    /// Creates a transition from `source` to `target` on the symbol with identifier `symbol`.
    pub fn new<I, S, T, Y>(id: I, source: S, target: T, symbol: Y) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        T: Into<String>,
        Y: Into<String>,
    {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            symbol: symbol.into(),
        }
    }

    /// The identifier of the transition.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier of the state the transition leaves.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Identifier of the state the transition enters.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Identifier of the symbol the transition reads.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns true if the transition touches the state `id` on either end.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}
