use std::str::FromStr;

use crate::error::AutomatonError;

/// The single-tag view on the role of a [`State`]. Internally a state carries two
/// independent facets, this tag is what users and the persistence layer speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateKind {
    /// The state is initial (and not final).
    Initial,
    /// The state is final (and not initial).
    Final,
    /// The state is neither initial nor final.
    #[default]
    Normal,
}

impl StateKind {
    /// Returns the `(initial, final)` facets that correspond to the tag.
    pub fn facets(self) -> (bool, bool) {
        match self {
            StateKind::Initial => (true, false),
            StateKind::Final => (false, true),
            StateKind::Normal => (false, false),
        }
    }

    /// The lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Initial => "initial",
            StateKind::Final => "final",
            StateKind::Normal => "normal",
        }
    }
}

impl FromStr for StateKind {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initial" => Ok(StateKind::Initial),
            "final" => Ok(StateKind::Final),
            "normal" => Ok(StateKind::Normal),
            _ => Err(AutomatonError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A state of an [`crate::Automaton`]. Being initial and being final are independent, a state
/// may be both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    id: String,
    label: String,
    initial: bool,
    accepting: bool,
}

impl State {
    /// Creates a state with the given identifier, label and role.
    pub fn new<I: Into<String>, L: Into<String>>(id: I, label: L, kind: StateKind) -> Self {
        let (initial, accepting) = kind.facets();
        Self {
            id: id.into(),
            label: label.into(),
            initial,
            accepting,
        }
    }

    /// Creates a state whose label equals its identifier.
    pub fn unlabeled<I: Into<String>>(id: I, kind: StateKind) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, kind)
    }

    /// Sets both facets at once.
    pub fn with_facets(mut self, initial: bool, accepting: bool) -> Self {
        self.initial = initial;
        self.accepting = accepting;
        self
    }

    /// The identifier of the state.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The human readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether runs may start in this state.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether runs ending in this state are accepting.
    pub fn is_final(&self) -> bool {
        self.accepting
    }

    /// Returns the single-tag view of the role, or `None` if the state is both initial
    /// and final since no single tag expresses that.
    pub fn kind(&self) -> Option<StateKind> {
        match (self.initial, self.accepting) {
            (true, true) => None,
            (true, false) => Some(StateKind::Initial),
            (false, true) => Some(StateKind::Final),
            (false, false) => Some(StateKind::Normal),
        }
    }

    pub(crate) fn set_label<L: Into<String>>(&mut self, label: L) {
        self.label = label.into();
    }

    pub(crate) fn set_initial(&mut self, initial: bool) {
        self.initial = initial;
    }

    pub(crate) fn set_final(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    pub(crate) fn set_kind(&mut self, kind: StateKind) {
        (self.initial, self.accepting) = kind.facets();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roles() {
        assert_eq!("Initial".parse::<StateKind>(), Ok(StateKind::Initial));
        assert_eq!(" final ".parse::<StateKind>(), Ok(StateKind::Final));
        assert_eq!("normal".parse::<StateKind>(), Ok(StateKind::Normal));
        assert_eq!(
            "initial_final".parse::<StateKind>(),
            Err(AutomatonError::InvalidRole("initial_final".into()))
        );
    }

    #[test]
    fn facets_are_independent() {
        let q = State::unlabeled("q", StateKind::Initial).with_facets(true, true);
        assert!(q.is_initial() && q.is_final());
        assert_eq!(q.kind(), None);
        assert_eq!(q.label(), "q");
    }
}
