//! TurboSwift Tokenizer - converts source text into a flat token stream
//!
//! Tokens are plain strings classified by content: identifiers, symbols,
//! string literals (kept wrapped in their quote markers) and the `->` arrow.
//! No position information survives tokenization; Turbalance does its own
//! line tracking.
//!
//! Guarantees:
//! - Deterministic: same input always produces same token stream
//! - Total: every input tokenizes, including unterminated string literals

use serde::{Deserialize, Serialize};

/// Single-character symbols that always stand alone
pub const SYMBOLS: &[char] = &['{', '}', '(', ')', ':', '=', ',', '+', '-', '.', ';', '>'];

/// The only multi-character symbol
pub const ARROW: &str = "->";

const QUOTE: char = '"';

/// A token, carried as its source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Token(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for tokens produced from a `"..."` literal
    pub fn is_string_literal(&self) -> bool {
        self.0.len() >= 2 && self.0.starts_with(QUOTE) && self.0.ends_with(QUOTE)
    }

    /// The literal contents with the quote markers removed
    pub fn string_contents(&self) -> Option<&str> {
        if self.is_string_literal() {
            Some(&self.0[1..self.0.len() - 1])
        } else {
            None
        }
    }

    /// Unsigned decimal digits only; signs tokenize as separate symbols
    pub fn is_integer(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_symbol(&self) -> bool {
        self.0 == ARROW || (self.0.chars().count() == 1 && self.0.starts_with(SYMBOLS))
    }

    /// Anything that can name a field, method, contract or alias
    pub fn is_identifier(&self) -> bool {
        !self.is_symbol() && !self.is_string_literal() && !self.is_integer()
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tokenizer for TurboSwift source text
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    pending: String,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input text
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
            pending: String::new(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.advance() {
            if ch.is_whitespace() {
                self.flush(&mut tokens);
            } else if SYMBOLS.contains(&ch) {
                self.flush(&mut tokens);
                if ch == '-' && self.peek() == Some('>') {
                    self.advance();
                    tokens.push(Token::new(ARROW));
                } else {
                    tokens.push(Token::new(ch));
                }
            } else if ch == QUOTE {
                self.flush(&mut tokens);
                tokens.push(self.read_string());
            } else {
                self.pending.push(ch);
            }
        }
        self.flush(&mut tokens);

        tokens
    }

    // ── Character helpers ──────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    fn flush(&mut self, tokens: &mut Vec<Token>) {
        if !self.pending.is_empty() {
            tokens.push(Token(std::mem::take(&mut self.pending)));
        }
    }

    // ── String literals ────────────────────────────────────

    /// Reads verbatim up to the closing quote; end of input also closes the literal
    fn read_string(&mut self) -> Token {
        let mut value = String::from(QUOTE);
        while let Some(ch) = self.advance() {
            if ch == QUOTE {
                break;
            }
            value.push(ch);
        }
        value.push(QUOTE);
        Token(value)
    }
}

/// Convenience wrapper over [`Tokenizer`]
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).tokenize()
}
