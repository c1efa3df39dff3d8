//! Containers and their token-consumption rules.
//!
//! Each container decides for itself what a token means. It never touches
//! the active stack; it reports what should happen through a [`Transition`]
//! and the [`Tree`](super::Tree) driver carries it out.
//!
//! | Active | `Fence` | `Backtick` | `Newline` | `Text` |
//! |--------|---------|------------|-----------|--------|
//! | Root | enter code block | enter paragraph, replay | ignored | enter paragraph, replay |
//! | Paragraph | enter code block | enter code span | exit | append |
//! | Code block, header | flush prebuffer if any, empty label, exit | prebuffer | set label, start body | prebuffer |
//! | Code block, body | exit | append | append | append |
//! | Code span | append | append, exit | append | append |

use std::fmt;

use crate::observable::{Collection, Slot};
use crate::token::Token;

/// Handle of a container inside its [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(pub(crate) usize);

impl ContainerId {
    pub const ROOT: ContainerId = ContainerId(0);
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Root,
    Paragraph,
    CodeSpan,
    CodeBlock,
}

/// One entry of a container's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text(String),
    Container(ContainerId),
}

impl Item {
    pub fn text(text: impl Into<String>) -> Self {
        Item::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Item::Text(text) => Some(text),
            Item::Container(_) => None,
        }
    }
}

/// What the driver must do after a container consumed a token.
#[derive(Debug)]
pub enum Transition {
    /// The token was fully consumed.
    Absorbed,
    /// Attach `container` to the receiving container, make it the new
    /// receiver, then hand it `replay` if present.
    Enter {
        container: Box<Container>,
        replay: Option<Token>,
    },
    /// Return to the parent container.
    Exit,
}

impl Transition {
    fn enter(container: Container) -> Self {
        Transition::Enter {
            container: Box::new(container),
            replay: None,
        }
    }

    fn enter_and_replay(container: Container, token: Token) -> Self {
        Transition::Enter {
            container: Box::new(container),
            replay: Some(token),
        }
    }
}

#[derive(Debug)]
enum Rule {
    Root,
    Paragraph,
    CodeSpan,
    CodeBlock {
        /// Label characters collected before the first newline; `None` once
        /// the body has started.
        header: Option<String>,
        label: Slot<String>,
    },
}

/// A node of the incrementally built document tree.
#[derive(Debug)]
pub struct Container {
    rule: Rule,
    content: Collection<Item>,
    open: bool,
}

impl Container {
    fn new(rule: Rule) -> Self {
        Self {
            rule,
            content: Collection::new(),
            open: true,
        }
    }

    pub fn root() -> Self {
        Self::new(Rule::Root)
    }

    pub fn paragraph() -> Self {
        Self::new(Rule::Paragraph)
    }

    /// A code span, already showing its opening backtick.
    pub fn code_span() -> Self {
        let mut span = Self::new(Rule::CodeSpan);
        span.content.push(Item::text(Token::BACKTICK));
        span
    }

    pub fn code_block() -> Self {
        Self::new(Rule::CodeBlock {
            header: Some(String::new()),
            label: Slot::new(),
        })
    }

    pub fn kind(&self) -> ContainerKind {
        match self.rule {
            Rule::Root => ContainerKind::Root,
            Rule::Paragraph => ContainerKind::Paragraph,
            Rule::CodeSpan => ContainerKind::CodeSpan,
            Rule::CodeBlock { .. } => ContainerKind::CodeBlock,
        }
    }

    pub fn content(&self) -> &Collection<Item> {
        &self.content
    }

    /// The language label of a code block, once its header line is complete.
    pub fn label(&self) -> Option<&str> {
        match &self.rule {
            Rule::CodeBlock { label, .. } => label.get().map(String::as_str),
            _ => None,
        }
    }

    /// True while a code block is still collecting its header line.
    pub fn in_header(&self) -> bool {
        matches!(self.rule, Rule::CodeBlock { header: Some(_), .. })
    }

    /// False once the container's own closing token has been seen.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Visible text of this container's own text items.
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Item::as_text).collect()
    }

    /// Feed one token according to this container's rule.
    pub fn push_token(&mut self, token: Token) -> Transition {
        if token == Token::EndOfStream {
            // The driver stops before this reaches a container.
            return Transition::Absorbed;
        }

        match &mut self.rule {
            Rule::Root => match token {
                Token::Fence => Transition::enter(Container::code_block()),
                Token::Newline => Transition::Absorbed,
                token => Transition::enter_and_replay(Container::paragraph(), token),
            },
            Rule::Paragraph => match token {
                Token::Fence => Transition::enter(Container::code_block()),
                Token::Backtick => Transition::enter(Container::code_span()),
                Token::Newline => Transition::Exit,
                token => {
                    self.content.push(Item::text(token.as_str()));
                    Transition::Absorbed
                }
            },
            Rule::CodeSpan => {
                self.content.push(Item::text(token.as_str()));
                if token == Token::Backtick {
                    Transition::Exit
                } else {
                    Transition::Absorbed
                }
            }
            Rule::CodeBlock { header, label } => {
                let Some(prebuffer) = header else {
                    if token == Token::Fence {
                        return Transition::Exit;
                    }
                    self.content.push(Item::text(token.as_str()));
                    return Transition::Absorbed;
                };
                match token {
                    Token::Fence => {
                        // Fence-to-fence on one line: keep what was collected.
                        let text = std::mem::take(prebuffer);
                        if !text.is_empty() {
                            self.content.push(Item::Text(text));
                        }
                        // Closed before any language was named.
                        let _ = label.set(String::new());
                        *header = None;
                        Transition::Exit
                    }
                    Token::Newline => {
                        let text = std::mem::take(prebuffer);
                        log::debug!("code block label {text:?}");
                        if label.set(text).is_err() {
                            log::warn!("code block label already set");
                        }
                        *header = None;
                        Transition::Absorbed
                    }
                    token => {
                        prebuffer.push_str(token.as_str());
                        Transition::Absorbed
                    }
                }
            }
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Item) + 'static) {
        self.content.subscribe(subscriber);
    }

    /// Observe the code block label once it is known.
    ///
    /// Returns `false` for containers that never carry a label.
    pub fn subscribe_label(&mut self, subscriber: impl FnOnce(&String) + 'static) -> bool {
        match &mut self.rule {
            Rule::CodeBlock { label, .. } => {
                label.subscribe(subscriber);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn attach(&mut self, child: ContainerId) {
        self.content.push(Item::Container(child));
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    /// Settle the label of a code block whose header line never ended.
    ///
    /// The prebuffer becomes the label but is not flushed into content, and
    /// the block stays open.
    pub(crate) fn settle_header(&mut self) {
        if let Rule::CodeBlock {
            header: Some(prebuffer),
            label,
        } = &mut self.rule
            && !label.is_set()
        {
            let _ = label.set(prebuffer.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts(container: &Container) -> Vec<&str> {
        container
            .content()
            .iter()
            .filter_map(Item::as_text)
            .collect()
    }

    fn assert_absorbed(transition: Transition) {
        assert!(matches!(transition, Transition::Absorbed), "{transition:?}");
    }

    fn assert_exit(transition: Transition) {
        assert!(matches!(transition, Transition::Exit), "{transition:?}");
    }

    fn entered(transition: Transition) -> (Container, Option<Token>) {
        match transition {
            Transition::Enter { container, replay } => (*container, replay),
            other => panic!("expected Enter, got {other:?}"),
        }
    }

    #[test]
    fn root_ignores_newline() {
        assert_absorbed(Container::root().push_token(Token::Newline));
    }

    #[test]
    fn root_opens_paragraph_and_replays_text() {
        let (child, replay) = entered(Container::root().push_token(Token::text("hi")));
        assert_eq!(child.kind(), ContainerKind::Paragraph);
        assert_eq!(replay, Some(Token::text("hi")));
    }

    #[test]
    fn root_opens_paragraph_for_leading_backtick() {
        let (child, replay) = entered(Container::root().push_token(Token::Backtick));
        assert_eq!(child.kind(), ContainerKind::Paragraph);
        assert_eq!(replay, Some(Token::Backtick));
    }

    #[test]
    fn root_opens_code_block_directly() {
        let (child, replay) = entered(Container::root().push_token(Token::Fence));
        assert_eq!(child.kind(), ContainerKind::CodeBlock);
        assert_eq!(replay, None);
    }

    #[test]
    fn paragraph_appends_text_and_exits_on_newline() {
        let mut paragraph = Container::paragraph();
        assert_absorbed(paragraph.push_token(Token::text("a")));
        assert_absorbed(paragraph.push_token(Token::text("b")));
        assert_exit(paragraph.push_token(Token::Newline));
        assert_eq!(texts(&paragraph), vec!["a", "b"]);
    }

    #[test]
    fn paragraph_opens_nested_containers() {
        let mut paragraph = Container::paragraph();
        let (span, _) = entered(paragraph.push_token(Token::Backtick));
        let (block, _) = entered(paragraph.push_token(Token::Fence));
        assert_eq!(span.kind(), ContainerKind::CodeSpan);
        assert_eq!(block.kind(), ContainerKind::CodeBlock);
    }

    #[test]
    fn code_span_records_both_backticks() {
        let mut span = Container::code_span();
        assert_absorbed(span.push_token(Token::text("x")));
        assert_absorbed(span.push_token(Token::Newline));
        assert_exit(span.push_token(Token::Backtick));
        assert_eq!(texts(&span), vec!["`", "x", "\n", "`"]);
    }

    #[test]
    fn code_span_keeps_fence_as_text() {
        let mut span = Container::code_span();
        assert_absorbed(span.push_token(Token::Fence));
        assert_eq!(span.text(), "````");
    }

    #[test]
    fn code_block_header_becomes_label() {
        let mut block = Container::code_block();
        assert!(block.in_header());
        assert_absorbed(block.push_token(Token::text("js")));
        assert_eq!(block.label(), None);
        assert_absorbed(block.push_token(Token::Newline));
        assert!(!block.in_header());
        assert_eq!(block.label(), Some("js"));
        assert!(block.content().is_empty());
    }

    #[test]
    fn code_block_body_is_verbatim() {
        let mut block = Container::code_block();
        block.push_token(Token::Newline);
        for token in [Token::text("a"), Token::Backtick, Token::Newline] {
            assert_absorbed(block.push_token(token));
        }
        assert_exit(block.push_token(Token::Fence));
        assert_eq!(texts(&block), vec!["a", "`", "\n"]);
        assert_eq!(block.label(), Some(""));
    }

    #[test]
    fn one_line_block_flushes_prebuffer() {
        let mut block = Container::code_block();
        block.push_token(Token::text("inline"));
        block.push_token(Token::Backtick);
        assert_exit(block.push_token(Token::Fence));
        assert_eq!(texts(&block), vec!["inline`"]);
        assert_eq!(block.label(), Some(""));
    }

    #[test]
    fn empty_block_closes_with_empty_label() {
        let mut block = Container::code_block();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        block.subscribe_label(move |label| *sink.borrow_mut() = Some(label.clone()));

        assert_exit(block.push_token(Token::Fence));
        assert!(block.content().is_empty());
        assert!(!block.in_header());
        assert_eq!(block.label(), Some(""));
        assert_eq!(seen.borrow().as_deref(), Some(""));
    }

    #[test]
    fn label_is_unset_until_header_ends() {
        let mut block = Container::code_block();
        block.push_token(Token::text("j"));
        assert_eq!(block.label(), None);
    }

    #[test]
    fn settle_header_sets_label_without_content() {
        let mut block = Container::code_block();
        block.push_token(Token::text("js"));
        block.settle_header();
        assert_eq!(block.label(), Some("js"));
        assert!(block.content().is_empty());
        assert!(block.in_header());
    }

    #[test]
    fn only_code_blocks_carry_labels() {
        assert!(!Container::paragraph().subscribe_label(|_| {}));
        assert!(Container::code_block().subscribe_label(|_| {}));
    }
}
