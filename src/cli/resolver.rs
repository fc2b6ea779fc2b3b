//! Token resolution
//!
//! Resolves a raw argument vector against a [`TokenRegistry`]. The grammar is
//! deliberately small: an argument starting with `-` or `/` is an option,
//! a recognized option that takes a value consumes the next argument
//! verbatim, and everything left over is assigned in order to positional
//! options that were not given explicitly.
//!
//! Resolution never fails. Unknown options and missing values simply leave
//! keys unfound, which callers check with [`ResolvedArguments::found`].

use std::collections::{HashMap, VecDeque};

use super::registry::TokenRegistry;

/// Per-invocation resolver over a shared, immutable registry
#[derive(Debug, Clone, Copy)]
pub struct TokenResolver<'r> {
    registry: &'r TokenRegistry,
}

/// Values discovered during one resolution pass
#[derive(Debug, Clone)]
pub struct ResolvedArguments<'r> {
    registry: &'r TokenRegistry,
    values: HashMap<String, String>,
    found: HashMap<String, bool>,
}

/// Is this argument an option token
fn is_option(arg: &str) -> bool {
    arg.starts_with('-') || arg.starts_with('/')
}

/// Lookup key for an option token.
///
/// The prefix-stripped spelling is used when it is a known key of the
/// matching kind; otherwise the whole token, prefix included, is the key.
pub fn lookup_key<'a>(registry: &TokenRegistry, token: &'a str) -> &'a str {
    if let Some(stripped) = token.strip_prefix("--") {
        if registry.is_long(stripped) {
            return stripped;
        }
    } else if let Some(first) = token.chars().next() {
        let stripped = &token[first.len_utf8()..];
        if registry.is_short(stripped) {
            return stripped;
        }
    }
    token
}

/// Strip a single leading and a single trailing double quote
fn strip_quotes(arg: &str) -> &str {
    let arg = arg.strip_prefix('"').unwrap_or(arg);
    arg.strip_suffix('"').unwrap_or(arg)
}

impl<'r> TokenResolver<'r> {
    pub fn new(registry: &'r TokenRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `args`, where `args[0]` is the program name
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> ResolvedArguments<'r> {
        let registry = self.registry;
        let mut resolved = ResolvedArguments::empty(registry);
        let mut extras: VecDeque<String> = VecDeque::new();

        let mut i = 1;
        while i < args.len() {
            let arg = args[i].as_ref();
            if is_option(arg) {
                let key = registry.canonical(lookup_key(registry, arg));
                match registry.slot(key) {
                    Some(slot) => {
                        resolved.found.insert(key.to_string(), true);
                        if slot.has_value && i + 1 < args.len() {
                            i += 1;
                            resolved.values.insert(key.to_string(), args[i].as_ref().to_string());
                        }
                    }
                    None => extras.push_back(arg.to_string()),
                }
            } else {
                extras.push_back(strip_quotes(arg).to_string());
            }
            i += 1;
        }

        for key in registry.positional() {
            if extras.is_empty() {
                break;
            }
            let takes_value = registry.slot(key).map(|s| s.has_value).unwrap_or(false);
            if takes_value && !resolved.is_found(key) {
                if let Some(extra) = extras.pop_front() {
                    resolved.values.insert(key.clone(), extra);
                    resolved.found.insert(key.clone(), true);
                }
            }
        }

        if !extras.is_empty() {
            tracing::debug!(unassigned = ?extras, "Ignoring unassigned arguments");
        }

        resolved
    }
}

impl<'r> ResolvedArguments<'r> {
    fn empty(registry: &'r TokenRegistry) -> Self {
        Self {
            registry,
            values: HashMap::new(),
            found: HashMap::new(),
        }
    }

    fn is_found(&self, key: &str) -> bool {
        self.found.get(key).copied().unwrap_or(false)
    }

    /// Whether the option was given, by either spelling
    pub fn found(&self, token: &str) -> bool {
        self.is_found(self.registry.canonical(token))
    }

    /// Value of the option, or an empty string when it was not found
    pub fn get_value(&self, token: &str) -> String {
        self.value(token).unwrap_or_default().to_string()
    }

    /// Borrowing form of [`get_value`](Self::get_value); `None` when not found
    pub fn value(&self, token: &str) -> Option<&str> {
        let key = self.registry.canonical(token);
        if !self.is_found(key) {
            return None;
        }
        self.registry.slot(key)?;
        Some(self.values.get(key).map(String::as_str).unwrap_or(""))
    }
}
