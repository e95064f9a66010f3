//! Normalized per-slide output consumed by renderers.

use std::fmt;

/// A self-contained `data:` URI for an embedded image.
///
/// Built once from an [`crate::ImageBlob`] and carried around as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DataUri(String);

impl DataUri {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The MIME type between `data:` and `;base64,`.
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .unwrap_or("")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One item of a nested bullet list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletNode {
    /// Formatted text of the item. `None` marks a level that was opened only
    /// because a paragraph jumped more than one level deeper.
    pub text: Option<String>,
    pub children: Vec<BulletNode>,
}

impl BulletNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), children: Vec::new() }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(BulletNode::count).sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(BulletNode::depth).max().unwrap_or(0)
    }
}

/// A rendered table: escaped cell strings plus column width hints in percent.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<f64>,
}

impl TableGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }
}

/// Everything extracted from one slide.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideRecord {
    pub title: String,
    /// 1-based position in document order.
    pub slide_number: u32,
    pub bullets: Vec<BulletNode>,
    pub tables: Vec<TableGrid>,
    /// Master, layout and slide images without duplicates, first occurrence first.
    pub images: Vec<DataUri>,
    pub hyperlinks: Vec<String>,
}

impl SlideRecord {
    pub fn has_content(&self) -> bool {
        !self.bullets.is_empty() || !self.tables.is_empty() || !self.images.is_empty()
    }
}
