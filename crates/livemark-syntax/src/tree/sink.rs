//! Sink for freezing the live container tree into a Rowan green tree.

use rowan::GreenNodeBuilder;

use super::{ContainerId, Item, Tree};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Walks a [`Tree`] and builds an immutable Rowan syntax tree from it.
///
/// Code block labels become a leading `LABEL` token of the `CODE_BLOCK` node.
/// Open containers are included as they currently are.
pub struct Sink<'t> {
    builder: GreenNodeBuilder<'static>,
    tree: &'t Tree,
}

impl<'t> Sink<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tree,
        }
    }

    /// Consume the sink and build the syntax tree.
    pub fn finish(mut self) -> SyntaxNode {
        self.container(ContainerId::ROOT);
        SyntaxNode::new_root(self.builder.finish())
    }

    fn container(&mut self, id: ContainerId) {
        let tree = self.tree;
        let Some(container) = tree.container(id) else {
            return;
        };

        self.builder.start_node(SyntaxKind::from(container.kind()).into());
        if let Some(label) = container.label()
            && !label.is_empty()
        {
            self.builder.token(SyntaxKind::LABEL.into(), label);
        }
        for item in container.content() {
            match item {
                Item::Text(text) => self.builder.token(SyntaxKind::of_text(text).into(), text),
                Item::Container(child) => self.container(*child),
            }
        }
        self.builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    fn snapshot(input: &str) -> SyntaxNode {
        let mut tree = Tree::new();
        for token in tokenize(input) {
            tree.push(token).unwrap();
        }
        tree.to_syntax()
    }

    #[test]
    fn empty_tree_is_bare_root() {
        let node = snapshot("");
        assert_eq!(node.kind(), SyntaxKind::ROOT);
        assert_eq!(node.children().count(), 0);
    }

    #[test]
    fn paragraph_with_code_span() {
        let node = snapshot("run `ls` now\n");
        let paragraph = node.children().next().unwrap();
        assert_eq!(paragraph.kind(), SyntaxKind::PARAGRAPH);
        assert_eq!(paragraph.text().to_string(), "run `ls` now");

        let span = paragraph.children().next().unwrap();
        assert_eq!(span.kind(), SyntaxKind::CODE_SPAN);
        let kinds: Vec<_> = span.children_with_tokens().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::BACKTICK, SyntaxKind::TEXT, SyntaxKind::BACKTICK]
        );
    }

    #[test]
    fn code_block_label_is_first_token() {
        let node = snapshot("```rust\nfn main() {}\n```\n");
        let block = node.children().next().unwrap();
        assert_eq!(block.kind(), SyntaxKind::CODE_BLOCK);

        let first = block.first_token().unwrap();
        assert_eq!(first.kind(), SyntaxKind::LABEL);
        assert_eq!(first.text(), "rust");
        assert_eq!(block.text().to_string(), "rustfn main() {}\n");
    }
}
