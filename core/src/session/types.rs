use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variable name to value, ordered by name
pub type Bindings = BTreeMap<String, f64>;

/// A suggested edit the UI can apply to a session with one click
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickButton {
    pub text: String,
    /// Bindings to overwrite
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: Bindings,
    /// Catalogs to import
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
    /// Hint tokens to activate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Marks the recommended action
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary: bool,
}

impl QuickButton {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn setting(mut self, name: &str, value: f64) -> Self {
        self.set.insert(name.to_string(), value);
        self
    }

    pub fn importing(mut self, library: &str) -> Self {
        self.libraries.push(library.to_string());
        self
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hints.push(hint.to_string());
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

/// Decoded session state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Imported catalog names, in import order
    pub libraries: Vec<String>,
    /// Active hint tokens
    pub hints: Vec<String>,
    pub variables: Bindings,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_hint(&self, hint: &str) -> bool {
        self.hints.iter().any(|h| h == hint)
    }

    /// Apply a quick button: overwrite bindings, then append any catalogs and
    /// hints not already present.
    pub fn apply(&mut self, button: &QuickButton) {
        for (name, value) in &button.set {
            self.variables.insert(name.clone(), *value);
        }

        for library in &button.libraries {
            if !self.libraries.contains(library) {
                self.libraries.push(library.clone());
            }
        }

        for hint in &button.hints {
            if !self.hints.contains(hint) {
                self.hints.push(hint.clone());
            }
        }
    }
}

/// Canonical encoding: catalogs, then hints, then bindings sorted by name
impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tokens = self
            .libraries
            .iter()
            .map(|library| format!("!{}", library))
            .chain(self.hints.iter().map(|hint| format!("@{}", hint)))
            .chain(
                self.variables
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value)),
            );

        for (i, token) in tokens.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token)?;
        }
        Ok(())
    }
}
