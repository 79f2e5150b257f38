//! Linker flag construction.

use std::collections::HashMap;
use std::fmt;

/// Linker flags injected into the compiled binary.
///
/// Maps a flag key to an ordered list of values. Rendering emits one
/// `-key value` token pair per value, in append order within a key, or a
/// bare `-key` for keys registered without values. Ordering across distinct
/// keys is unspecified.
///
/// Built fresh for every environment, never persisted.
#[derive(Debug, Default)]
pub struct Ldflags(HashMap<String, Vec<String>>);

impl Ldflags {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under a key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Registers a key with no value, rendered as a bare `-key`.
    pub fn push_flag(&mut self, key: impl Into<String>) {
        self.0.entry(key.into()).or_default();
    }

    /// Renders the flags as a single space-joined token stream.
    pub fn render(&self) -> String {
        let mut tokens = Vec::new();
        for (key, values) in &self.0 {
            if values.is_empty() {
                tokens.push(format!("-{key}"));
            } else {
                for value in values {
                    tokens.push(format!("-{key} {value}"));
                }
            }
        }
        tokens.join(" ")
    }
}

impl fmt::Display for Ldflags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
