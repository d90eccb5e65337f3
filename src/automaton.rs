use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{
    error::{AutomatonError, EntityKind, Result},
    math::Map,
};

mod symbol;
pub use symbol::{Symbol, EPSILON};

mod state;
pub use state::{State, StateKind};

mod transition;
pub use transition::Transition;

mod builder;
pub use builder::AutomatonBuilder;

mod reachability;
pub use reachability::AccessWord;

mod display;

/// A finite automaton over a finite alphabet, which may or may not be deterministic.
///
/// Symbols, states and transitions are each kept in insertion order and indexed by their
/// identifier. The sets of initial and final states are not stored separately, they are
/// always computed from the facets of the states themselves (see [`Automaton::initial_states`]
/// and [`Automaton::final_states`]).
///
/// Every mutating operation validates its input against the current contents and either
/// succeeds completely or returns an [`AutomatonError`] without touching the automaton.
///
/// # Example
/// ```
/// use automata_lab::prelude::*;
///
/// let mut aut = Automaton::new("example");
/// aut.add_symbol(Symbol::new("sym_0", "a")).unwrap();
/// aut.add_state(State::unlabeled("q0", StateKind::Initial)).unwrap();
/// aut.add_state(State::unlabeled("q1", StateKind::Final)).unwrap();
/// aut.add_transition(Transition::new("t0", "q0", "q1", "sym_0")).unwrap();
/// assert!(aut.simulate("a").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    name: String,
    symbols: IndexMap<String, Symbol>,
    states: IndexMap<String, State>,
    transitions: IndexMap<String, Transition>,
}

impl Automaton {
    /// Creates an empty automaton with the given name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            symbols: IndexMap::new(),
            states: IndexMap::new(),
            transitions: IndexMap::new(),
        }
    }

    /// Returns an [`AutomatonBuilder`] for conveniently assembling an automaton.
    pub fn builder<N: Into<String>>(name: N) -> AutomatonBuilder {
        AutomatonBuilder::new(name)
    }

    /// The name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the automaton.
    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = name.into();
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Adds a symbol to the alphabet.
    pub fn add_symbol(&mut self, symbol: Symbol) -> Result<()> {
        if self.symbols.contains_key(symbol.id()) {
            return Err(AutomatonError::DuplicateIdentifier {
                kind: EntityKind::Symbol,
                id: symbol.id().to_string(),
            });
        }
        trace!("adding symbol {} = {:?}", symbol.id(), symbol.value());
        self.symbols.insert(symbol.id().to_string(), symbol);
        Ok(())
    }

    /// Removes a symbol together with every transition that reads it.
    pub fn remove_symbol(&mut self, id: &str) -> Result<Symbol> {
        let symbol = self
            .symbols
            .shift_remove(id)
            .ok_or_else(|| AutomatonError::NotFound {
                kind: EntityKind::Symbol,
                id: id.to_string(),
            })?;
        self.transitions.retain(|_, t| t.symbol() != id);
        Ok(symbol)
    }

    /// Adds a state.
    pub fn add_state(&mut self, state: State) -> Result<()> {
        if self.states.contains_key(state.id()) {
            return Err(AutomatonError::DuplicateIdentifier {
                kind: EntityKind::State,
                id: state.id().to_string(),
            });
        }
        trace!("adding state {}", state.id());
        self.states.insert(state.id().to_string(), state);
        Ok(())
    }

    /// Removes a state together with every transition that enters or leaves it.
    pub fn remove_state(&mut self, id: &str) -> Result<State> {
        let state = self
            .states
            .shift_remove(id)
            .ok_or_else(|| AutomatonError::NotFound {
                kind: EntityKind::State,
                id: id.to_string(),
            })?;
        self.transitions.retain(|_, t| !t.touches(id));
        Ok(state)
    }

    /// Adds a transition, which must refer to existing states and an existing symbol.
    pub fn add_transition(&mut self, transition: Transition) -> Result<()> {
        if self.transitions.contains_key(transition.id()) {
            return Err(AutomatonError::DuplicateIdentifier {
                kind: EntityKind::Transition,
                id: transition.id().to_string(),
            });
        }
        for state in [transition.source(), transition.target()] {
            if !self.states.contains_key(state) {
                return Err(AutomatonError::DanglingReference {
                    kind: EntityKind::State,
                    id: state.to_string(),
                });
            }
        }
        if !self.symbols.contains_key(transition.symbol()) {
            return Err(AutomatonError::DanglingReference {
                kind: EntityKind::Symbol,
                id: transition.symbol().to_string(),
            });
        }
        self.transitions
            .insert(transition.id().to_string(), transition);
        Ok(())
    }

    /// Adds a transition with a freshly generated identifier and returns that identifier.
    pub fn connect(&mut self, source: &str, target: &str, symbol: &str) -> Result<String> {
        let id = self.fresh_transition_id();
        self.add_transition(Transition::new(id.clone(), source, target, symbol))?;
        Ok(id)
    }

    /// Removes a transition.
    pub fn remove_transition(&mut self, id: &str) -> Result<Transition> {
        self.transitions
            .shift_remove(id)
            .ok_or_else(|| AutomatonError::NotFound {
                kind: EntityKind::Transition,
                id: id.to_string(),
            })
    }

    fn state_mut(&mut self, id: &str) -> Result<&mut State> {
        self.states
            .get_mut(id)
            .ok_or_else(|| AutomatonError::NotFound {
                kind: EntityKind::State,
                id: id.to_string(),
            })
    }

    /// Sets the role of a state from its textual tag (`initial`, `final` or `normal`).
    pub fn set_state_role(&mut self, id: &str, role: &str) -> Result<()> {
        let kind = role.parse::<StateKind>()?;
        self.set_state_kind(id, kind)
    }

    /// Sets the role of a state, overwriting both facets.
    pub fn set_state_kind(&mut self, id: &str, kind: StateKind) -> Result<()> {
        self.state_mut(id)?.set_kind(kind);
        Ok(())
    }

    /// Marks a state as initial or removes that mark, leaving the final facet untouched.
    pub fn set_initial(&mut self, id: &str, initial: bool) -> Result<()> {
        self.state_mut(id)?.set_initial(initial);
        Ok(())
    }

    /// Marks a state as final or removes that mark, leaving the initial facet untouched.
    pub fn set_final(&mut self, id: &str, accepting: bool) -> Result<()> {
        self.state_mut(id)?.set_final(accepting);
        Ok(())
    }

    /// Changes the label of a state.
    pub fn set_state_label<L: Into<String>>(&mut self, id: &str, label: L) -> Result<()> {
        self.state_mut(id)?.set_label(label);
        Ok(())
    }

    /// Looks up a state.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    /// Looks up a symbol.
    pub fn symbol(&self, id: &str) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Returns the first symbol whose value is `value`.
    pub fn symbol_by_value(&self, value: &str) -> Option<&Symbol> {
        self.symbols.values().find(|s| s.value() == value)
    }

    /// Looks up a transition.
    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.get(id)
    }

    /// Iterates over all states in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    /// Iterates over all symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.values()
    }

    /// Iterates over all transitions in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.values()
    }

    /// Iterates over the initial states.
    pub fn initial_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states().filter(|q| q.is_initial())
    }

    /// Iterates over the final states.
    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states().filter(|q| q.is_final())
    }

    /// Returns the alphabet, that is the symbols with pairwise distinct values. If several
    /// symbols share a value, only the first one is kept.
    pub fn alphabet(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols().unique_by(|s| s.value())
    }

    /// The value of the symbol that `transition` reads.
    pub fn value_of(&self, transition: &Transition) -> &str {
        self.symbols
            .get(transition.symbol())
            .map(|s| s.value())
            .unwrap_or_default()
    }

    /// Iterates over the targets of all transitions that leave `source` on a symbol
    /// with value `value`.
    pub fn successors<'a, 'b>(
        &'a self,
        source: &'b str,
        value: &'b str,
    ) -> impl Iterator<Item = &'a str> + 'b
    where
        'a: 'b,
    {
        self.transitions()
            .filter(move |t| t.source() == source && self.value_of(t) == value)
            .map(|t| t.target())
    }

    /// Groups the transition targets by source state and symbol value.
    pub(crate) fn transition_table(&self) -> Map<(&str, &str), Vec<&str>> {
        let mut table: Map<(&str, &str), Vec<&str>> = Map::default();
        for t in self.transitions() {
            table
                .entry((t.source(), self.value_of(t)))
                .or_default()
                .push(t.target());
        }
        table
    }

    /// Returns `base` if no state uses it as identifier, otherwise the first of `base1`,
    /// `base2`, ... that is unused.
    pub fn fresh_state_id(&self, base: &str) -> String {
        if !self.states.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}{i}"))
            .find(|id| !self.states.contains_key(id))
            .expect("infinitely many candidates")
    }

    /// Returns `base` if no symbol uses it as identifier, otherwise `base` followed by as
    /// many `'` as are needed to obtain an unused identifier.
    pub fn fresh_symbol_id(&self, base: &str) -> String {
        let mut id = base.to_string();
        while self.symbols.contains_key(&id) {
            id.push('\'');
        }
        id
    }

    /// Returns a transition identifier of the form `t<n>` that is not yet in use.
    pub fn fresh_transition_id(&self) -> String {
        (self.transitions.len()..)
            .map(|i| format!("t{i}"))
            .find(|id| !self.transitions.contains_key(id))
            .expect("infinitely many candidates")
    }
}
