//! # Tree - The Incremental Container Tree
//!
//! The tree is a push-down automaton over [`Token`]s. It owns every
//! container (in an arena addressed by [`ContainerId`]) and the
//! [`ContainerStack`] of containers that are currently open.
//!
//! ## The Driver Loop
//!
//! [`Tree::push`] hands each token to the container on top of the stack and
//! carries out the [`Transition`] it returns:
//!
//! ```text
//! Absorbed            → nothing to do
//! Enter { c, replay } → attach c to the receiver, push it, replay the token into it
//! Exit                → pop back to the parent
//! ```
//!
//! This is the only place the stack changes. Containers never see it.
//!
//! ## End Of Stream
//!
//! [`Token::EndOfStream`] is never given to a container. The tree stops
//! accepting tokens and leaves whatever is open as it is, so a truncated
//! reply renders as an unterminated code block rather than being silently
//! closed. The one change is that a code block still on its header line
//! takes what it collected so far as its label.
//!
//! ```
//! use livemark_syntax::{ContainerKind, Token, Tree};
//!
//! let mut tree = Tree::new();
//! for token in [Token::Fence, Token::text("js"), Token::EndOfStream] {
//!     tree.push(token).unwrap();
//! }
//!
//! let block = tree.container(tree.active()).unwrap();
//! assert_eq!(block.kind(), ContainerKind::CodeBlock);
//! assert!(block.is_open());
//! assert_eq!(block.label(), Some("js"));
//! ```

mod container;
mod sink;
mod stack;

pub use container::{Container, ContainerId, ContainerKind, Item, Transition};
pub use sink::Sink;
pub use stack::ContainerStack;

use thiserror::Error;

use crate::syntax_kind::SyntaxNode;
use crate::token::Token;

/// Internal invariant violations of one tree.
///
/// These are fatal to the stream that produced them and to nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("exit signalled while only the root container is open")]
    StackUnderflow,

    #[error("tree is unusable after an earlier invariant violation")]
    Poisoned,

    #[error("no container {0} in this tree")]
    UnknownContainer(ContainerId),
}

/// A live document tree for one stream.
#[derive(Debug)]
pub struct Tree {
    containers: Vec<Container>,
    stack: ContainerStack,
    ended: bool,
    poisoned: bool,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            containers: vec![Container::root()],
            stack: ContainerStack::new(ContainerId::ROOT),
            ended: false,
            poisoned: false,
        }
    }

    /// Route one token to the active container.
    ///
    /// Tokens after `EndOfStream` are ignored.
    pub fn push(&mut self, token: Token) -> Result<(), TreeError> {
        if self.poisoned {
            return Err(TreeError::Poisoned);
        }
        if self.ended {
            log::warn!("ignoring {token:?} after end of stream");
            return Ok(());
        }
        if token == Token::EndOfStream {
            self.end();
            return Ok(());
        }

        let mut next = Some(token);
        while let Some(token) = next.take() {
            let active = self.stack.top();
            log::trace!("{active} <- {token:?}");

            match self.containers[active.0].push_token(token) {
                Transition::Absorbed => {}
                Transition::Enter { container, replay } => {
                    self.enter(active, *container);
                    next = replay;
                }
                Transition::Exit => self.exit()?,
            }
        }

        Ok(())
    }

    fn enter(&mut self, parent: ContainerId, container: Container) {
        let id = ContainerId(self.containers.len());
        log::debug!("enter {:?} {id} under {parent}", container.kind());
        self.containers.push(container);
        self.containers[parent.0].attach(id);
        self.stack.push(id);
    }

    fn exit(&mut self) -> Result<(), TreeError> {
        match self.stack.pop() {
            Ok(id) => {
                log::debug!("exit {:?} {id}", self.containers[id.0].kind());
                self.containers[id.0].close();
                Ok(())
            }
            Err(err) => {
                log::error!("{err}; abandoning this tree");
                self.poisoned = true;
                Err(err)
            }
        }
    }

    fn end(&mut self) {
        log::debug!("end of stream with {} containers open", self.stack.depth());
        self.ended = true;
        for &id in self.stack.as_slice() {
            self.containers[id.0].settle_header();
        }
    }

    pub fn root(&self) -> &Container {
        &self.containers[ContainerId::ROOT.0]
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0)
    }

    /// The container currently receiving tokens.
    pub fn active(&self) -> ContainerId {
        self.stack.top()
    }

    /// Open containers from the root down to the active one.
    pub fn active_path(&self) -> &[ContainerId] {
        self.stack.as_slice()
    }

    /// Number of containers, including the root.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// True while nothing but the root exists.
    pub fn is_empty(&self) -> bool {
        self.containers.len() == 1
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Children of `id` that are containers, in content order.
    pub fn children(&self, id: ContainerId) -> impl Iterator<Item = ContainerId> + '_ {
        self.container(id)
            .into_iter()
            .flat_map(|c| c.content().iter())
            .filter_map(|item| match item {
                Item::Container(child) => Some(*child),
                Item::Text(_) => None,
            })
    }

    /// Observe the content of `id`, including everything already appended.
    pub fn subscribe(
        &mut self,
        id: ContainerId,
        subscriber: impl FnMut(&Item) + 'static,
    ) -> Result<(), TreeError> {
        self.containers
            .get_mut(id.0)
            .ok_or(TreeError::UnknownContainer(id))?
            .subscribe(subscriber);
        Ok(())
    }

    /// Observe the label of code block `id` once it is known.
    pub fn subscribe_label(
        &mut self,
        id: ContainerId,
        subscriber: impl FnOnce(&String) + 'static,
    ) -> Result<bool, TreeError> {
        let container = self
            .containers
            .get_mut(id.0)
            .ok_or(TreeError::UnknownContainer(id))?;
        Ok(container.subscribe_label(subscriber))
    }

    /// Freeze the current state into a Rowan syntax tree.
    pub fn to_syntax(&self) -> SyntaxNode {
        Sink::new(self).finish()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
