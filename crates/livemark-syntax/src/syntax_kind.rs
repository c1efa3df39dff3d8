//! SyntaxKind enum for snapshots of the live container tree.
//!
//! Following the rust-analyzer model, tokens and nodes share a single enum.
//! A snapshot is taken with [`Tree::to_syntax`](crate::Tree::to_syntax).

/// All syntax kinds of a tree snapshot.
///
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (content items) ===
    /// Plain text content
    TEXT,
    /// Line ending inside a code span or code block
    NEWLINE,
    /// Single backtick delimiting a code span
    BACKTICK,
    /// Three backticks appearing as code span content
    FENCE,
    /// Language label of a code block
    LABEL,

    // === Composite Nodes (containers) ===
    /// Root document node
    ROOT,
    /// Paragraph block
    PARAGRAPH,
    /// Fenced code block
    CODE_BLOCK,
    /// Inline code span
    CODE_SPAN,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::LABEL as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Classify the text of one content item.
    pub fn of_text(text: &str) -> Self {
        match text {
            "\n" => Self::NEWLINE,
            "`" => Self::BACKTICK,
            "```" => Self::FENCE,
            _ => Self::TEXT,
        }
    }
}

impl From<crate::tree::ContainerKind> for SyntaxKind {
    fn from(kind: crate::tree::ContainerKind) -> Self {
        use crate::tree::ContainerKind;
        match kind {
            ContainerKind::Root => Self::ROOT,
            ContainerKind::Paragraph => Self::PARAGRAPH,
            ContainerKind::CodeBlock => Self::CODE_BLOCK,
            ContainerKind::CodeSpan => Self::CODE_SPAN,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LivemarkLang {}

impl rowan::Language for LivemarkLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::CODE_SPAN as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<LivemarkLang>;
