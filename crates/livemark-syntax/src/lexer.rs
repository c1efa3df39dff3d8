//! # Lexer - Splitting One Fragment Into Lexemes
//!
//! This module is the first half of tokenization: it breaks a single arrival
//! fragment into raw lexemes using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Lexemes Are Not Tokens
//!
//! A lexeme only knows about the fragment it came from. A fragment ending in
//! two backticks produces a `Backticks` lexeme of length two, even though the
//! next fragment may start with the third backtick of a fence. Merging
//! lexemes across fragment boundaries is the job of the
//! [`Tokenizer`](crate::tokenizer::Tokenizer).
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the fragment appears in exactly one lexeme:
//!
//! ```
//! use livemark_syntax::lexer::lex;
//!
//! let fragment = "a `b`\n``";
//! let reconstructed: String = lex(fragment).iter().map(|l| l.text).collect();
//! assert_eq!(fragment, reconstructed);
//! ```
//!
//! Only three things matter to the tokenizer:
//! - runs of `` ` `` → [`Lexeme::Backticks`]
//! - `\n` → [`Lexeme::Newline`]
//! - everything else → [`Lexeme::Text`], grouped into runs

use logos::Logos;

/// Lexeme kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// One or more consecutive backticks
    #[regex("`+")]
    Backticks,

    /// Line feed
    #[token("\n")]
    Newline,

    /// Any run of characters that are neither backticks nor line feeds
    #[regex(r"[^`\n]+")]
    Text,
}

/// A lexeme with its kind and text slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexed<'a> {
    pub kind: Lexeme,
    pub text: &'a str,
}

impl Lexed<'_> {
    /// Number of characters in the lexeme.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Lex one fragment into a sequence of lexemes.
///
/// Guarantees that all bytes from the fragment appear in the output.
pub fn lex(fragment: &str) -> Vec<Lexed<'_>> {
    let mut lexemes = Vec::new();
    let mut lexer = Lexeme::lexer(fragment);

    while let Some(result) = lexer.next() {
        // Logos error means an unrecognized byte sequence - treat as text
        let kind = result.unwrap_or(Lexeme::Text);
        lexemes.push(Lexed {
            kind,
            text: lexer.slice(),
        });
    }

    lexemes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lexed(kind: Lexeme, text: &str) -> Lexed<'_> {
        Lexed { kind, text }
    }

    #[test]
    fn lex_empty_fragment() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text_is_one_run() {
        assert_eq!(
            lex("hello, world"),
            vec![lexed(Lexeme::Text, "hello, world")]
        );
    }

    #[test]
    fn lex_backtick_runs_are_grouped() {
        assert_eq!(
            lex("a``b````"),
            vec![
                lexed(Lexeme::Text, "a"),
                lexed(Lexeme::Backticks, "``"),
                lexed(Lexeme::Text, "b"),
                lexed(Lexeme::Backticks, "````"),
            ]
        );
    }

    #[test]
    fn lex_newlines_are_separate() {
        assert_eq!(
            lex("\n\nx"),
            vec![
                lexed(Lexeme::Newline, "\n"),
                lexed(Lexeme::Newline, "\n"),
                lexed(Lexeme::Text, "x"),
            ]
        );
    }

    #[test]
    fn carriage_return_is_text() {
        assert_eq!(
            lex("a\r\n"),
            vec![lexed(Lexeme::Text, "a\r"), lexed(Lexeme::Newline, "\n")]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let tokens = lex("héllo ✓`");
        assert_eq!(
            tokens,
            vec![
                lexed(Lexeme::Text, "héllo ✓"),
                lexed(Lexeme::Backticks, "`"),
            ]
        );
        assert_eq!(tokens[0].len(), 7);
    }
}
