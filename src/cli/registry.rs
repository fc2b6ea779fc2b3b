//! Option vocabulary for the token resolver
//!
//! A [`TokenRegistry`] records which short (`/p`, `-p`) and long (`--path`)
//! spellings are recognized, whether each consumes a value, and which
//! options may be filled from bare positional arguments.
//!
//! The canonical key of an option is its short spelling when one was given,
//! otherwise its long spelling. Registering the same key twice replaces the
//! earlier slot.

use std::collections::{HashMap, HashSet};

use crate::errors::{IcdError, Result};

/// Storage slot for one canonical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySlot {
    /// Whether the option consumes the following argument as its value
    pub has_value: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    slots: HashMap<String, KeySlot>,
    /// long spelling -> short spelling, only when both were registered
    aliases: HashMap<String, String>,
    positional: Vec<String>,
    short_keys: HashSet<String>,
    long_keys: HashSet<String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from short spellings only; every option takes a value and is positional
    pub fn from_short<S: AsRef<str>>(short: &[S]) -> Self {
        let long = vec![""; short.len()];
        // Lengths match by construction
        Self::from_lists(short, &long).unwrap_or_default()
    }

    /// Build from parallel short/long lists
    pub fn from_lists<S: AsRef<str>, L: AsRef<str>>(short: &[S], long: &[L]) -> Result<Self> {
        if short.len() != long.len() {
            return Err(IcdError::InvalidConfiguration(format!(
                "token list sizes do not match ({} short, {} long)",
                short.len(),
                long.len()
            )));
        }
        let mut registry = Self::new();
        registry.positional.reserve(short.len());
        for (s, l) in short.iter().zip(long) {
            registry.add(s.as_ref(), l.as_ref());
        }
        Ok(registry)
    }

    /// Build from `(short, long)` pairs
    pub fn from_pairs<S: AsRef<str>, L: AsRef<str>>(pairs: &[(S, L)]) -> Self {
        let mut registry = Self::new();
        for (s, l) in pairs {
            registry.add(s.as_ref(), l.as_ref());
        }
        registry
    }

    /// Register a value-bearing, positional option
    pub fn add(&mut self, short: &str, long: &str) -> bool {
        self.register(short, long, true, true)
    }

    /// Register an option.
    ///
    /// Returns `false` without touching the registry when both spellings are
    /// empty. A `positional` option is only eligible for backfill when it
    /// also has a value.
    pub fn register(&mut self, short: &str, long: &str, has_value: bool, positional: bool) -> bool {
        if short.is_empty() && long.is_empty() {
            return false;
        }
        if !short.is_empty() && !long.is_empty() {
            self.aliases.insert(long.to_string(), short.to_string());
            self.long_keys.insert(long.to_string());
        }

        let canonical = if short.is_empty() {
            self.long_keys.insert(long.to_string());
            long
        } else {
            self.short_keys.insert(short.to_string());
            short
        };

        self.slots.insert(canonical.to_string(), KeySlot { has_value });
        let listed = self.positional.iter().any(|k| k == canonical);
        if has_value && positional {
            if !listed {
                self.positional.push(canonical.to_string());
            }
        } else if listed {
            self.positional.retain(|k| k != canonical);
        }
        true
    }

    /// Map a long spelling to its short spelling; other tokens pass through
    pub fn canonical<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn slot(&self, key: &str) -> Option<&KeySlot> {
        self.slots.get(key)
    }

    pub fn is_short(&self, key: &str) -> bool {
        self.short_keys.contains(key)
    }

    pub fn is_long(&self, key: &str) -> bool {
        self.long_keys.contains(key)
    }

    /// Canonical keys eligible for positional backfill, in registration order
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
