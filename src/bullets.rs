//! Reconstruction of nested bullet lists from flat paragraph levels.

use crate::format::paragraph_html;
use crate::record::BulletNode;
use crate::Paragraph;

/// Stack machine turning a sequence of paragraphs into a bullet tree.
///
/// Each entry of the stack is an open list at one nesting depth. A paragraph at
/// level `n` needs exactly `n + 1` open lists: missing ones are opened, surplus
/// ones are closed into the last item of their parent list.
#[derive(Debug, Default)]
pub struct BulletListBuilder {
    stack: Vec<Vec<BulletNode>>,
    roots: Vec<BulletNode>,
}

impl BulletListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open lists.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Adds one paragraph. Returns `false` when the paragraph has no visible
    /// text, in which case neither the tree nor the stack changes.
    pub fn push_paragraph(&mut self, paragraph: &Paragraph) -> bool {
        let html = paragraph_html(paragraph);
        if html.trim().is_empty() {
            return false;
        }

        // the "no bullet" sentinel nests like level 0
        let target = paragraph.level.unwrap_or(0) as usize + 1;

        while self.stack.len() < target {
            self.stack.push(Vec::new());
        }
        while self.stack.len() > target {
            self.close_list();
        }

        if let Some(list) = self.stack.last_mut() {
            list.push(BulletNode::leaf(html));
        }
        true
    }

    /// Closes every open list and returns the top-level items.
    pub fn finish(mut self) -> Vec<BulletNode> {
        while !self.stack.is_empty() {
            self.close_list();
        }
        self.roots
    }

    fn close_list(&mut self) {
        let Some(items) = self.stack.pop() else {
            return;
        };
        if items.is_empty() {
            return;
        }

        match self.stack.last_mut() {
            Some(parent) => match parent.last_mut() {
                Some(owner) => owner.children.extend(items),
                // the parent level was skipped by an indentation jump
                None => parent.push(BulletNode { text: None, children: items }),
            },
            None => self.roots.extend(items),
        }
    }
}

/// Builds the bullet tree of one text frame.
pub fn build_bullet_tree<'a, I>(paragraphs: I) -> Vec<BulletNode>
where
    I: IntoIterator<Item = &'a Paragraph>,
{
    let mut builder = BulletListBuilder::new();
    for paragraph in paragraphs {
        builder.push_paragraph(paragraph);
    }
    builder.finish()
}
