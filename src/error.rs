use thiserror::Error;

/// The kind of entity an [`AutomatonError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A state of the automaton.
    State,
    /// A symbol of the alphabet.
    Symbol,
    /// A transition between two states.
    Transition,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::State => write!(f, "state"),
            EntityKind::Symbol => write!(f, "symbol"),
            EntityKind::Transition => write!(f, "transition"),
        }
    }
}

/// Errors raised by operations on an [`crate::Automaton`]. None of them leaves the
/// automaton partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// An entity with the given identifier already exists.
    #[error("{kind} with id `{id}` already exists")]
    DuplicateIdentifier {
        /// Kind of the entity that was added.
        kind: EntityKind,
        /// The offending identifier.
        id: String,
    },
    /// A transition refers to a state or symbol that is not part of the automaton.
    #[error("transition refers to unknown {kind} `{id}`")]
    DanglingReference {
        /// Kind of the entity that could not be resolved.
        kind: EntityKind,
        /// The unresolved identifier.
        id: String,
    },
    /// No entity with the given identifier exists.
    #[error("{kind} with id `{id}` not found")]
    NotFound {
        /// Kind of the entity that was looked up.
        kind: EntityKind,
        /// The identifier that was looked up.
        id: String,
    },
    /// A role tag other than `initial`, `final` or `normal` was given.
    #[error("invalid state role `{0}`, expected one of initial, final or normal")]
    InvalidRole(String),
    /// The automaton has no initial state to start a run from.
    #[error("the automaton has no initial state")]
    NoInitialState,
    /// An operation was called on an automaton that does not satisfy its precondition.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
}

/// Alias for results of operations on automata.
pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;
