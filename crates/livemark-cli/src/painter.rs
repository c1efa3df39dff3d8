use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{ContentStyle, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use livemark_syntax::{ContainerId, ContainerKind, Item, Tree};

/// Writes a tree to the terminal with code spans and code blocks styled.
///
/// Line breaks follow `render::plain_text`, so the two views only differ in
/// escape sequences.
pub struct Painter<'w, W: Write> {
    out: &'w mut W,
    label_fallback: &'w str,
    last: Option<char>,
}

impl<'w, W: Write> Painter<'w, W> {
    pub fn new(out: &'w mut W, label_fallback: &'w str) -> Self {
        Self {
            out,
            label_fallback,
            last: None,
        }
    }

    pub fn draw(&mut self, tree: &Tree) -> io::Result<()> {
        self.container(tree, ContainerId::ROOT, ContentStyle::new())
    }

    /// Clear the screen and draw the tree followed by the undecided tail.
    pub fn redraw(&mut self, tree: &Tree, pending: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        self.last = None;
        self.draw(tree)?;
        self.styled(pending, ContentStyle::new().dim())?;
        self.out.flush()
    }

    fn container(&mut self, tree: &Tree, id: ContainerId, style: ContentStyle) -> io::Result<()> {
        let Some(container) = tree.container(id) else {
            return Ok(());
        };

        let style = match container.kind() {
            ContainerKind::Root | ContainerKind::Paragraph => style,
            ContainerKind::CodeSpan => style.bold().yellow(),
            ContainerKind::CodeBlock => {
                if self.last.is_some_and(|c| c != '\n') {
                    self.plain("\n")?;
                }
                let label = container
                    .label()
                    .filter(|label| !label.is_empty())
                    .unwrap_or(self.label_fallback);
                self.styled(&format!("[{label}]"), ContentStyle::new().reverse())?;
                self.plain("\n")?;
                ContentStyle::new().cyan()
            }
        };

        for item in container.content() {
            match item {
                Item::Text(text) => self.styled(text, style)?,
                Item::Container(child) => self.container(tree, *child, style)?,
            }
        }

        let closes_line = match container.kind() {
            ContainerKind::Paragraph => !container.is_open(),
            ContainerKind::CodeBlock => self.last.is_some_and(|c| c != '\n'),
            ContainerKind::Root | ContainerKind::CodeSpan => false,
        };
        if closes_line {
            self.plain("\n")?;
        }
        Ok(())
    }

    fn plain(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))?;
        self.track(text);
        Ok(())
    }

    fn styled(&mut self, text: &str, style: ContentStyle) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        // Newlines go out unstyled so background attributes don't bleed.
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.plain("\n")?;
            }
            if !line.is_empty() {
                queue!(self.out, PrintStyledContent(style.apply(line)))?;
                self.track(line);
            }
        }
        Ok(())
    }

    fn track(&mut self, text: &str) {
        if let Some(c) = text.chars().last() {
            self.last = Some(c);
        }
    }
}
