//! Text renderings of a tree, for tests, debugging and terminal output.

use std::fmt::Write;

use crate::syntax_kind::SyntaxKind;
use crate::tree::{ContainerId, ContainerKind, Item, Tree};

/// Label shown for code blocks that did not name a language.
pub const DEFAULT_LABEL: &str = "Code";

/// Indented outline of every container and content item.
///
/// Containers still waiting for their closing token are marked `(open)`;
/// the root never closes and is never marked.
pub fn outline(tree: &Tree) -> String {
    let mut out = String::new();
    outline_container(tree, ContainerId::ROOT, 0, &mut out);
    out
}

fn outline_container(tree: &Tree, id: ContainerId, depth: usize, out: &mut String) {
    let Some(container) = tree.container(id) else {
        return;
    };
    let indent = "  ".repeat(depth);

    let _ = write!(out, "{indent}{:?}", SyntaxKind::from(container.kind()));
    if let Some(label) = container.label() {
        let _ = write!(out, " label={label:?}");
    }
    if container.kind() != ContainerKind::Root && container.is_open() {
        out.push_str(" (open)");
    }
    out.push('\n');

    for item in container.content() {
        match item {
            Item::Text(text) => {
                let _ = writeln!(out, "{indent}  {text:?}");
            }
            Item::Container(child) => outline_container(tree, *child, depth + 1, out),
        }
    }
}

/// The visible text of the tree.
///
/// Closed paragraphs end with a line break. Code blocks start on their own
/// line with a `[label]` header, falling back to `label_fallback` when the
/// block has no label yet.
pub fn plain_text(tree: &Tree, label_fallback: &str) -> String {
    let mut out = String::new();
    plain_container(tree, ContainerId::ROOT, label_fallback, &mut out);
    out
}

fn plain_container(tree: &Tree, id: ContainerId, label_fallback: &str, out: &mut String) {
    let Some(container) = tree.container(id) else {
        return;
    };

    let is_block = container.kind() == ContainerKind::CodeBlock;
    if is_block {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        let label = container
            .label()
            .filter(|label| !label.is_empty())
            .unwrap_or(label_fallback);
        let _ = writeln!(out, "[{label}]");
    }

    for item in container.content() {
        match item {
            Item::Text(text) => out.push_str(text),
            Item::Container(child) => plain_container(tree, *child, label_fallback, out),
        }
    }

    let closes_line = match container.kind() {
        ContainerKind::Paragraph => !container.is_open(),
        ContainerKind::CodeBlock => !out.ends_with('\n'),
        ContainerKind::Root | ContainerKind::CodeSpan => false,
    };
    if closes_line {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Stream;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn tree_of(input: &str) -> Tree {
        let mut stream = Stream::new();
        stream.feed(input).unwrap();
        stream.finish().unwrap();
        stream.into_tree()
    }

    #[test]
    fn outline_of_mixed_message() {
        let tree = tree_of("Hi `x`\n```js\nlet a;\n```\n");
        assert_snapshot!(outline(&tree), @r#"
        ROOT
          PARAGRAPH
            "Hi "
            CODE_SPAN
              "`"
              "x"
              "`"
          CODE_BLOCK label="js"
            "let a;"
            "\n"
        "#);
    }

    #[test]
    fn outline_marks_open_containers() {
        let tree = tree_of("```py\nx");
        assert_snapshot!(outline(&tree), @r#"
        ROOT
          CODE_BLOCK label="py" (open)
            "x"
        "#);
    }

    #[test]
    fn plain_text_of_mixed_message() {
        let tree = tree_of("Hi `x`\n```js\nlet a;\n```\n");
        assert_eq!(plain_text(&tree, DEFAULT_LABEL), "Hi `x`\n[js]\nlet a;\n");
    }

    #[test]
    fn plain_text_uses_fallback_label() {
        let tree = tree_of("```\nls\n```");
        assert_eq!(plain_text(&tree, "Shell"), "[Shell]\nls\n");
    }

    #[test]
    fn open_paragraph_has_no_trailing_break() {
        let tree = tree_of("still typing");
        assert_eq!(plain_text(&tree, DEFAULT_LABEL), "still typing");
    }

    #[test]
    fn code_block_inside_paragraph_starts_new_line() {
        let tree = tree_of("see ```sh\nls\n``` done\n");
        assert_eq!(
            plain_text(&tree, DEFAULT_LABEL),
            "see \n[sh]\nls\n done\n"
        );
    }
}
