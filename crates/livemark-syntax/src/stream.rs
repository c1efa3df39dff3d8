//! # Stream - One Tokenizer Plus One Tree
//!
//! A [`Stream`] is the unit of work for a single message: fragments go in,
//! tokens are drained straight into the tree, and the tree is available for
//! rendering between any two fragments.
//!
//! Streams share nothing, so any number can be fed interleaved.
//!
//! ```
//! use livemark_syntax::{ContainerId, ContainerKind, Stream};
//!
//! let mut stream = Stream::new();
//! for fragment in ["Try `c", "argo` or:\n``", "`sh\ncargo run\n``", "`"] {
//!     stream.feed(fragment).unwrap();
//! }
//! stream.finish().unwrap();
//!
//! let tree = stream.tree();
//! let kinds: Vec<_> = tree
//!     .children(ContainerId::ROOT)
//!     .map(|id| tree.container(id).unwrap().kind())
//!     .collect();
//! assert_eq!(kinds, vec![ContainerKind::Paragraph, ContainerKind::CodeBlock]);
//! ```

use thiserror::Error;

use crate::tokenizer::Tokenizer;
use crate::tree::{Tree, TreeError};

/// Fragment size used when replaying a finished message.
pub const DEFAULT_REPLAY_CHUNK: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("stream has already finished")]
    Finished,

    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[derive(Debug, Default)]
pub struct Stream {
    tokenizer: Tokenizer,
    tree: Tree,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-tokenize a complete message by feeding it in `chunk_size`
    /// character fragments, the same path a live reply takes.
    pub fn replay(text: &str, chunk_size: usize) -> Result<Self, StreamError> {
        let mut stream = Self::new();
        for fragment in chunks(text, chunk_size) {
            stream.feed(fragment)?;
        }
        stream.finish()?;
        Ok(stream)
    }

    /// Consume one fragment and route every token it completes.
    pub fn feed(&mut self, fragment: &str) -> Result<(), StreamError> {
        if self.tokenizer.is_finished() {
            return Err(StreamError::Finished);
        }
        self.tokenizer.feed(fragment);
        self.pump()
    }

    /// Flush pending characters and end the stream.
    ///
    /// Open containers are left open.
    pub fn finish(&mut self) -> Result<(), StreamError> {
        if self.tokenizer.is_finished() {
            return Err(StreamError::Finished);
        }
        self.tokenizer.finish();
        self.pump()
    }

    fn pump(&mut self) -> Result<(), StreamError> {
        for token in self.tokenizer.drain() {
            self.tree.push(token)?;
        }
        Ok(())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access for registering subscribers.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Characters received but not yet part of the tree.
    pub fn pending(&self) -> String {
        self.tokenizer.pending()
    }

    pub fn is_finished(&self) -> bool {
        self.tokenizer.is_finished()
    }
}

/// Split `text` into fragments of at most `size` characters.
///
/// Never splits inside a UTF-8 scalar value. A size of zero is treated as one.
pub fn chunks(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
