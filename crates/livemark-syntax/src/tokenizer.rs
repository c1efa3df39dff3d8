//! # Tokenizer - Reassembling Fragments Into Tokens
//!
//! Model output arrives in fragments that can split a marker anywhere. The
//! tokenizer keeps a small look-ahead of unresolved characters so that a
//! fence delivered as `` ` `` + ` `` ` or `` ` `` + `` ` `` + `` ` `` still
//! comes out as exactly one [`Token::Fence`].
//!
//! ## Resolution Rules
//!
//! | Pending state | Next input | Emitted |
//! |---------------|------------|---------|
//! | 2 backticks | backtick | `Fence` |
//! | 1 backtick | other / end | `Backtick` |
//! | 2 backticks | other / end | `Backtick`, `Backtick` |
//! | text run | backtick, `\n`, end | `Text(run)` |
//!
//! A pending backtick run and a pending text run never coexist: whichever
//! one is interrupted gets flushed first.
//!
//! ```
//! use livemark_syntax::{Token, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.feed("``");
//! assert_eq!(tokenizer.drain().count(), 0);
//!
//! tokenizer.feed("`js");
//! tokenizer.finish();
//! let tokens: Vec<Token> = tokenizer.drain().collect();
//! assert_eq!(
//!     tokens,
//!     vec![Token::Fence, Token::text("js"), Token::EndOfStream]
//! );
//! ```

use std::collections::VecDeque;
use std::collections::vec_deque::Drain;

use crate::lexer::{Lexeme, lex};
use crate::token::Token;

/// Backticks needed to form a fence.
const FENCE_LEN: usize = 3;

/// Streaming tokenizer for one input stream.
#[derive(Debug, Default)]
pub struct Tokenizer {
    /// Backticks seen but not yet resolved (0..FENCE_LEN)
    backticks: usize,
    /// Text run not yet interrupted
    text: String,
    /// Completed tokens waiting to be drained
    queue: VecDeque<Token>,
    finished: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one fragment, queueing every token it completes.
    pub fn feed(&mut self, fragment: &str) {
        if self.finished {
            log::warn!(
                "ignoring {} bytes fed after end of stream",
                fragment.len()
            );
            return;
        }

        for lexeme in lex(fragment) {
            match lexeme.kind {
                Lexeme::Backticks => {
                    self.flush_text();
                    for _ in 0..lexeme.text.len() {
                        self.push_backtick();
                    }
                }
                Lexeme::Newline => {
                    self.flush_backticks();
                    self.flush_text();
                    self.emit(Token::Newline);
                }
                Lexeme::Text => {
                    self.flush_backticks();
                    self.text.push_str(lexeme.text);
                }
            }
        }
    }

    /// Signal end of stream.
    ///
    /// Pending characters are flushed best-effort before `EndOfStream` is
    /// queued. Calling this twice is a no-op.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.flush_backticks();
        self.flush_text();
        self.emit(Token::EndOfStream);
        self.finished = true;
    }

    /// Take every completed token, in arrival order.
    pub fn drain(&mut self) -> Drain<'_, Token> {
        self.queue.drain(..)
    }

    /// Characters observed but not yet resolved into a token.
    pub fn pending(&self) -> String {
        if self.backticks > 0 {
            Token::BACKTICK.repeat(self.backticks)
        } else {
            self.text.clone()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn push_backtick(&mut self) {
        self.backticks += 1;
        if self.backticks == FENCE_LEN {
            self.backticks = 0;
            self.emit(Token::Fence);
        }
    }

    fn flush_backticks(&mut self) {
        for _ in 0..std::mem::take(&mut self.backticks) {
            self.emit(Token::Backtick);
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.emit(Token::Text(text));
        }
    }

    fn emit(&mut self, token: Token) {
        log::trace!("token {token:?}");
        self.queue.push_back(token);
    }
}

/// Tokenize a complete input in one go, including the `EndOfStream` sentinel.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.feed(input);
    tokenizer.finish();
    tokenizer.drain().collect()
}

/// Tokenize an input delivered as the given fragments.
pub fn tokenize_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = Vec::new();
    for fragment in fragments {
        tokenizer.feed(fragment);
        tokens.extend(tokenizer.drain());
    }
    tokenizer.finish();
    tokens.extend(tokenizer.drain());
    tokens
}
