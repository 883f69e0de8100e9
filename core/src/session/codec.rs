//! Tokenizer for the session line.
//!
//! Grammar (whitespace separated, any order):
//! - `!name` imports a catalog
//! - `@token` activates a solver hint
//! - `name=number` binds a variable
//!
//! Malformed bindings are recorded and skipped; scanning never aborts.

use super::types::{QuickButton, Session};
use thiserror::Error;
use tracing::debug;

/// Recoverable decode error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Expected \"=\" after variable \"{variable}\" at {context}")]
    MissingEquals { variable: String, context: String },

    #[error("Expected number after \"=\"")]
    InvalidNumber { variable: String, text: String },
}

/// Decoded session plus every error met on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScript {
    pub session: Session,
    pub errors: Vec<ScriptError>,
}

const CONTEXT_WIDTH: usize = 5;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

struct Scanner {
    chars: Vec<char>,
    position: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|&c| accept(c)) {
            text.push(c);
            self.advance();
        }
        text
    }

    /// A few characters either side of the cursor, for error messages
    fn context(&self) -> String {
        let start = self.position.saturating_sub(CONTEXT_WIDTH);
        let end = (self.position + CONTEXT_WIDTH).min(self.chars.len());
        let before: String = self.chars[start..self.position].iter().collect();
        let after: String = self.chars[self.position..end].iter().collect();
        format!("...{}[here]{}...", before, after)
    }
}

/// Decode a session line.
pub fn parse_script(script: &str) -> ParsedScript {
    let mut scanner = Scanner::new(script.trim());
    let mut parsed = ParsedScript::default();

    loop {
        scanner.skip_whitespace();

        let Some(identifier) = scanner.peek() else {
            break;
        };

        match identifier {
            '!' => {
                scanner.advance();
                let library = scanner.read_while(is_name_char);
                parsed.session.libraries.push(library);
            }
            '@' => {
                scanner.advance();
                let hint = scanner.read_while(is_name_char);
                parsed.session.hints.push(hint);
            }
            _ => {
                let variable = scanner.read_while(is_name_char);
                scanner.skip_whitespace();

                // One character is always consumed so junk cannot stall the loop
                if scanner.advance() != Some('=') {
                    let context = scanner.context();
                    parsed.errors.push(ScriptError::MissingEquals { variable, context });
                    continue;
                }

                scanner.skip_whitespace();
                let text = scanner.read_while(is_number_char);
                match text.parse::<f64>() {
                    Ok(value) => {
                        parsed.session.variables.insert(variable, value);
                    }
                    Err(_) => {
                        parsed.errors.push(ScriptError::InvalidNumber { variable, text });
                    }
                }
            }
        }
    }

    debug!(
        "Parsed session: {} libraries, {} hints, {} variables, {} errors",
        parsed.session.libraries.len(),
        parsed.session.hints.len(),
        parsed.session.variables.len(),
        parsed.errors.len()
    );

    parsed
}

/// Apply a quick button to a session line and re-encode it.
///
/// Malformed tokens in the input do not survive the rewrite.
pub fn rewrite_script(script: &str, button: &QuickButton) -> String {
    let mut session = parse_script(script).session;
    session.apply(button);
    session.to_string()
}

impl std::str::FromStr for Session {
    type Err = Vec<ScriptError>;

    /// Strict decode: any malformed token fails the whole parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_script(s);
        if parsed.errors.is_empty() {
            Ok(parsed.session)
        } else {
            Err(parsed.errors)
        }
    }
}
