//! # livemark-syntax
//!
//! Incremental document trees for text that is still arriving: the reply of
//! a language model, delivered a few characters at a time.
//!
//! ## What Problem Does This Solve?
//!
//! A streamed reply has to be shown while it is being written. That rules out
//! parsing the whole message at the end, and it means markers arrive broken
//! up: the three backticks of a code fence can show up as `` ` `` in one
//! fragment and ` `` ` in the next. This crate turns such a stream into a
//! tree of paragraphs, inline code spans and fenced code blocks that grows in
//! place, so a renderer only ever has to append.
//!
//! ## Architecture Overview
//!
//! ```text
//! Fragments → Lexer → Lexemes → Tokenizer → Tokens → Tree → Containers
//!             (Logos)           (look-ahead)         (push-down automaton)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Splits one fragment into backtick runs, newlines and text runs. It knows
//! nothing about neighbouring fragments.
//!
//! ### 2. Tokenizer ([`tokenizer`] module)
//!
//! Carries unresolved backticks and text across fragment boundaries and
//! emits [`Token`]s only once they are certain:
//!
//! ```text
//! "``" + "`js\n" → [Fence, Text("js"), Newline]
//! ```
//!
//! ### 3. Tree ([`tree`] module)
//!
//! Routes each token to the container on top of the active stack. Each
//! container kind has its own rule and answers with a [`Transition`]
//! (absorbed, enter a new child, or exit); the tree is the only thing that
//! moves the stack.
//!
//! ```text
//! "`hello`" → ROOT
//!               PARAGRAPH (open)
//!                 CODE_SPAN  "`" "hello" "`"
//! ```
//!
//! ### 4. Observation ([`observable`], [`render`] modules)
//!
//! Container content is an append-only [`Collection`] and code block labels
//! are single-assignment [`Slot`]s. Renderers subscribe to both and redraw
//! on append, independently of enter/exit. For one-shot views there is
//! [`render::outline`], [`render::plain_text`] and [`Tree::to_syntax`], which
//! freezes the tree into a Rowan CST.
//!
//! ## Module Structure
//!
//! ```text
//! livemark-syntax/
//! ├── lib.rs           # This file - public API and end-to-end tests
//! ├── lexer.rs         # Logos-based fragment lexer
//! ├── token.rs         # Token enum
//! ├── tokenizer.rs     # Streaming tokenizer
//! ├── observable.rs    # Collection and Slot
//! ├── stream.rs        # Tokenizer + Tree for one message, replay
//! ├── render.rs        # Outline and plain-text renderings
//! ├── syntax_kind.rs   # SyntaxKind enum and Rowan integration
//! └── tree/
//!     ├── mod.rs       # Tree driver, TreeError
//!     ├── container.rs # Container rules and Transition
//!     ├── stack.rs     # Active container stack
//!     └── sink.rs      # Rowan snapshot builder
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use livemark_syntax::{Stream, render};
//!
//! let mut stream = Stream::new();
//! for fragment in ["Run `carg", "o test`:\n``", "`sh\ncargo test\n``", "`\n"] {
//!     stream.feed(fragment).unwrap();
//! }
//! stream.finish().unwrap();
//!
//! assert_eq!(
//!     render::plain_text(stream.tree(), render::DEFAULT_LABEL),
//!     "Run `cargo test`:\n[sh]\ncargo test\n"
//! );
//! ```

pub mod lexer;
pub mod observable;
pub mod render;
pub mod stream;
pub mod syntax_kind;
pub mod token;
pub mod tokenizer;
pub mod tree;

pub use observable::{Collection, Slot};
pub use stream::{Stream, StreamError};
pub use syntax_kind::{LivemarkLang, SyntaxKind, SyntaxNode};
pub use token::Token;
pub use tokenizer::{Tokenizer, tokenize};
pub use tree::{Container, ContainerId, ContainerKind, Item, Transition, Tree, TreeError};
