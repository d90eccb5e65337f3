use itertools::Itertools;

use crate::prelude::*;

impl Automaton {
    /// Returns a string representation of the transition table. Initial states are prefixed
    /// with `->`, final states with `*`. A cell lists all targets for the pair of state and
    /// symbol, or `-` if there is none.
    pub fn build_transition_table(&self) -> String {
        let table = self.transition_table();
        let alphabet = self.alphabet().map(|s| s.value()).collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(alphabet.iter().map(|v| v.to_string())),
        );
        for q in self.states() {
            let mut row = vec![format!(
                "{}{}{}",
                if q.is_initial() { "->" } else { "" },
                if q.is_final() { "*" } else { "" },
                q.id()
            )];
            for value in &alphabet {
                match table.get(&(q.id(), *value)) {
                    Some(targets) => row.push(targets.iter().join(", ")),
                    None => row.push("-".to_string()),
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name())?;
        write!(f, "{}", self.build_transition_table())
    }
}
