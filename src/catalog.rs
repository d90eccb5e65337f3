//! An explicit store of named automata, optionally backed by a directory of JSON files.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{prelude::*, record::RecordError};

/// Errors raised by a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An automaton with this name is already stored.
    #[error("an automaton named `{0}` already exists")]
    DuplicateName(String),
    /// No automaton with this name is stored.
    #[error("no automaton named `{0}`")]
    UnknownName(String),
    /// The name cannot be used as a file name inside the backing directory.
    #[error("`{0}` is not a valid file name for an automaton")]
    InvalidName(String),
    /// The catalog has no backing directory.
    #[error("the catalog is not backed by a directory")]
    NoDirectory,
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A file did not contain a valid automaton.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A collection of automata with pairwise distinct names. If the catalog has a directory,
/// the automaton named `n` is persisted as `<directory>/n.json`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    directory: Option<PathBuf>,
    automata: IndexMap<String, Automaton>,
}

impl Catalog {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog that persists into `directory`.
    pub fn with_directory<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: Some(directory.into()),
            automata: IndexMap::new(),
        }
    }

    /// The backing directory, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Adds an automaton under its own name.
    pub fn insert(&mut self, automaton: Automaton) -> Result<(), CatalogError> {
        if self.automata.contains_key(automaton.name()) {
            return Err(CatalogError::DuplicateName(automaton.name().to_string()));
        }
        self.automata
            .insert(automaton.name().to_string(), automaton);
        Ok(())
    }

    /// Looks up an automaton by name.
    pub fn get(&self, name: &str) -> Option<&Automaton> {
        self.automata.get(name)
    }

    /// Looks up an automaton by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Automaton> {
        self.automata.get_mut(name)
    }

    /// Removes an automaton from the catalog. Its file, if any, is left alone.
    pub fn remove(&mut self, name: &str) -> Result<Automaton, CatalogError> {
        self.automata
            .shift_remove(name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    /// Names of the stored automata in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.automata.keys().map(String::as_str)
    }

    /// Number of stored automata.
    pub fn len(&self) -> usize {
        self.automata.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.automata.is_empty()
    }

    /// The file of `name` in the backing directory. Names that are empty, contain a path
    /// separator or `..` are rejected so that every file stays inside the directory.
    fn path_of(&self, name: &str) -> Result<PathBuf, CatalogError> {
        let dir = self.directory.as_ref().ok_or(CatalogError::NoDirectory)?;
        if name.is_empty() || name.contains(std::path::is_separator) || name.contains("..") {
            return Err(CatalogError::InvalidName(name.to_string()));
        }
        Ok(dir.join(format!("{name}.json")))
    }

    /// Writes the automaton `name` to the backing directory, creating it if needed.
    pub fn save(&self, name: &str) -> Result<PathBuf, CatalogError> {
        let automaton = self
            .get(name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))?;
        let path = self.path_of(name)?;
        if let Some(dir) = &self.directory {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, automaton.to_json()?)?;
        debug!("saved {name} to {}", path.display());
        Ok(path)
    }

    /// Reads `<directory>/<name>.json` and adds it to the catalog. The automaton is
    /// registered under the name stored in the file.
    pub fn load(&mut self, name: &str) -> Result<&Automaton, CatalogError> {
        let path = self.path_of(name)?;
        let automaton = Automaton::from_json(&std::fs::read_to_string(&path)?)?;
        let name = automaton.name().to_string();
        self.insert(automaton)?;
        trace!("loaded {name} from {}", path.display());
        self.get(&name)
            .ok_or(CatalogError::UnknownName(name.clone()))
    }

    /// Loads every `*.json` file of the backing directory that is not in the catalog yet,
    /// returning the names that were added.
    pub fn load_all(&mut self) -> Result<Vec<String>, CatalogError> {
        let dir = self.directory.clone().ok_or(CatalogError::NoDirectory)?;
        let mut stems = vec![];
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.push(stem.to_string());
                }
            }
        }
        stems.sort();

        let mut added = vec![];
        for stem in stems {
            if self.automata.contains_key(&stem) {
                continue;
            }
            added.push(self.load(&stem)?.name().to_string());
        }
        Ok(added)
    }
}
