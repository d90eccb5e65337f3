//! The serialized shape of an automaton, as exchanged with the persistence layer.
#![allow(missing_docs)]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::{AutomatonError, Result},
    prelude::*,
};

/// Role tag used for states that are both initial and final.
pub const INITIAL_FINAL: &str = "initial_final";

/// Errors that can occur while reading or writing the serialized form of an automaton.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The input is not valid JSON or does not have the expected shape.
    #[error("malformed automaton record: {0}")]
    Json(#[from] serde_json::Error),
    /// The record describes an automaton that violates one of its invariants.
    #[error("invalid automaton record: {0}")]
    Automaton(#[from] AutomatonError),
}

/// A symbol as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub id: String,
    pub value: String,
}

/// A state as stored on disk. `kind` is one of `initial`, `final`, `normal` or
/// `initial_final`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A transition as stored on disk, referring to states and symbols by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub id: String,
    pub source: String,
    pub dest: String,
    pub symbol: String,
}

/// The full contents of an automaton in a flat, serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonRecord {
    pub name: String,
    pub alphabet: Vec<SymbolRecord>,
    pub states: Vec<StateRecord>,
    pub transitions: Vec<TransitionRecord>,
}

fn parse_kind(kind: &str) -> Result<(bool, bool)> {
    if kind.trim().eq_ignore_ascii_case(INITIAL_FINAL) {
        Ok((true, true))
    } else {
        Ok(kind.parse::<StateKind>()?.facets())
    }
}

impl From<&Automaton> for AutomatonRecord {
    fn from(aut: &Automaton) -> Self {
        Self {
            name: aut.name().to_string(),
            alphabet: aut
                .symbols()
                .map(|s| SymbolRecord {
                    id: s.id().to_string(),
                    value: s.value().to_string(),
                })
                .collect(),
            states: aut
                .states()
                .map(|q| StateRecord {
                    id: q.id().to_string(),
                    label: q.label().to_string(),
                    kind: q
                        .kind()
                        .map(|k| k.as_str())
                        .unwrap_or(INITIAL_FINAL)
                        .to_string(),
                })
                .collect(),
            transitions: aut
                .transitions()
                .map(|t| TransitionRecord {
                    id: t.id().to_string(),
                    source: t.source().to_string(),
                    dest: t.target().to_string(),
                    symbol: t.symbol().to_string(),
                })
                .collect(),
        }
    }
}

impl TryFrom<AutomatonRecord> for Automaton {
    type Error = AutomatonError;

    /// Rebuilds the automaton through the validating `add_*` operations, so that a record
    /// with duplicate identifiers or dangling references is rejected.
    fn try_from(record: AutomatonRecord) -> Result<Self> {
        let mut aut = Automaton::new(record.name);
        for symbol in record.alphabet {
            aut.add_symbol(Symbol::new(symbol.id, symbol.value))?;
        }
        for state in record.states {
            let (initial, accepting) = parse_kind(&state.kind)?;
            aut.add_state(
                State::new(state.id, state.label, StateKind::Normal)
                    .with_facets(initial, accepting),
            )?;
        }
        for t in record.transitions {
            aut.add_transition(Transition::new(t.id, t.source, t.dest, t.symbol))?;
        }
        Ok(aut)
    }
}

impl Automaton {
    /// Serializes the automaton into pretty printed JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(&AutomatonRecord::from(self))?)
    }

    /// Parses and validates an automaton from JSON.
    pub fn from_json(json: &str) -> Result<Automaton, RecordError> {
        let record: AutomatonRecord = serde_json::from_str(json)?;
        Ok(Automaton::try_from(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_everything() {
        let mut aut = crate::tests::wiki_dfa();
        aut.set_final("q0", true).unwrap();
        aut.set_state_label("q1", "second").unwrap();
        let json = aut.to_json().unwrap();
        assert!(json.contains("\"type\": \"initial_final\""));
        assert!(json.contains("\"dest\""));
        let back = Automaton::from_json(&json).unwrap();
        assert_eq!(back, aut);
    }

    #[test]
    fn invalid_records_are_rejected() {
        let json = r#"{
            "name": "broken",
            "alphabet": [{"id": "sym_0", "value": "a"}],
            "states": [{"id": "q0", "label": "q0", "type": "initial"}],
            "transitions": [{"id": "t0", "source": "q0", "dest": "q1", "symbol": "sym_0"}]
        }"#;
        assert!(matches!(
            Automaton::from_json(json),
            Err(RecordError::Automaton(AutomatonError::DanglingReference { .. }))
        ));

        let json = r#"{
            "name": "broken",
            "alphabet": [],
            "states": [{"id": "q0", "label": "q0", "type": "start"}],
            "transitions": []
        }"#;
        assert!(matches!(
            Automaton::from_json(json),
            Err(RecordError::Automaton(AutomatonError::InvalidRole(_)))
        ));

        assert!(matches!(
            Automaton::from_json("{\"name\": 3}"),
            Err(RecordError::Json(_))
        ));
    }
}
