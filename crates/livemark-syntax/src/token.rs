//! Tokens: the disambiguated units the container tree consumes.

use std::fmt;

/// A unit of meaning emitted by the [`Tokenizer`](crate::tokenizer::Tokenizer).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Three consecutive backticks, opening or closing a code block
    Fence,
    /// A single backtick, opening or closing a code span
    Backtick,
    /// Line feed
    Newline,
    /// A run of characters that are neither backticks nor line feeds
    Text(String),
    /// Sentinel emitted once, after every other token of the stream
    EndOfStream,
}

impl Token {
    pub const FENCE: &'static str = "```";
    pub const BACKTICK: &'static str = "`";
    pub const NEWLINE: &'static str = "\n";

    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    /// The literal characters this token stands for.
    ///
    /// `EndOfStream` has no characters and returns an empty string.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Fence => Self::FENCE,
            Token::Backtick => Self::BACKTICK,
            Token::Newline => Self::NEWLINE,
            Token::Text(text) => text.as_str(),
            Token::EndOfStream => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
