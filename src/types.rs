//! Read-only object model of a presentation package.
//!
//! The normalizers only ever borrow these types. [`crate::PptxContainer`] is one
//! way of building a [`ShapeTree`]; any other reader producing the same model
//! works just as well.

use crate::images;
use crate::record::DataUri;

/// The whole document: masters, layouts and slides in document order.
#[derive(Debug, Clone, Default)]
pub struct ShapeTree {
    pub masters: Vec<Container>,
    pub layouts: Vec<Layout>,
    pub slides: Vec<SlideSource>,
}

impl ShapeTree {
    /// The primary slide master, inherited by slides that have no layout.
    pub fn master(&self) -> Option<&Container> {
        self.masters.first()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// A master, layout or slide: an ordered shape list plus an optional background.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub name: String,
    pub shapes: Vec<ShapeNode>,
    pub background: Option<Fill>,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Index into [`ShapeTree::masters`].
    pub master: Option<usize>,
    pub container: Container,
}

#[derive(Debug, Clone, Default)]
pub struct SlideSource {
    /// Index into [`ShapeTree::layouts`].
    pub layout: Option<usize>,
    pub container: Container,
}

/// A single shape of a shape tree.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub name: String,
    pub placeholder: Option<PlaceholderKind>,
    pub fill: Option<Fill>,
    pub kind: ShapeKind,
}

impl ShapeNode {
    pub fn new(kind: ShapeKind) -> Self {
        Self { name: String::new(), placeholder: None, fill: None, kind }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderKind) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn is_title(&self) -> bool {
        self.placeholder.as_ref().is_some_and(PlaceholderKind::is_title)
    }

    /// Plain text of a text shape, paragraphs joined by `\n`. Empty for every other kind.
    pub fn text(&self) -> String {
        match &self.kind {
            ShapeKind::Text(frame) => frame.text(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ShapeKind {
    Text(TextFrame),
    Picture(Option<ImageBlob>),
    Group(Vec<ShapeNode>),
    Table(Table),
    /// Connectors, charts, diagrams and anything else without extractable content.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    Title,
    CenteredTitle,
    Subtitle,
    Body,
    Object,
    Picture,
    Table,
    Chart,
    Media,
    DateTime,
    Footer,
    SlideNumber,
    Header,
    Other(String),
}

impl PlaceholderKind {
    /// Maps the `type` attribute of `<p:ph>`. A placeholder without a type is a body placeholder.
    pub fn from_ooxml(value: Option<&str>) -> Self {
        match value {
            None | Some("body") => Self::Body,
            Some("title") => Self::Title,
            Some("ctrTitle") => Self::CenteredTitle,
            Some("subTitle") => Self::Subtitle,
            Some("obj") => Self::Object,
            Some("pic") => Self::Picture,
            Some("tbl") => Self::Table,
            Some("chart") => Self::Chart,
            Some("media") => Self::Media,
            Some("dt") => Self::DateTime,
            Some("ftr") => Self::Footer,
            Some("sldNum") => Self::SlideNumber,
            Some("hdr") => Self::Header,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenteredTitle)
    }
}

/// Visual fill of a shape or a container background.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    NoFill,
    /// RGB hex color when it is given literally, `None` for theme colors.
    Solid(Option<String>),
    Gradient,
    Pattern,
    Picture(Option<ImageBlob>),
}

impl Fill {
    pub fn picture(&self) -> Option<&ImageBlob> {
        match self {
            Fill::Picture(Some(blob)) => Some(blob),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub fn text(&self) -> String {
        join_paragraphs(&self.paragraphs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Indentation level, `None` when the paragraph explicitly has no bullet.
    pub level: Option<u32>,
}

impl Paragraph {
    pub fn new(level: u32, runs: Vec<Run>) -> Self {
        Self { runs, level: Some(level) }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formatting {
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Run {
    pub text: String,
    pub formatting: Formatting,
    pub hyperlink: Option<String>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column count from the table grid definition.
    pub columns: usize,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { paragraphs: vec![Paragraph::new(0, vec![Run::plain(text)])] }
    }

    pub fn text(&self) -> String {
        join_paragraphs(&self.paragraphs)
    }
}

/// Raw embedded image bytes and the extension of the media part they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub ext: String,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>, ext: impl Into<String>) -> Self {
        Self { bytes, ext: ext.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_data_uri(&self) -> DataUri {
        images::encode_data_uri(self)
    }
}

fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs.iter().map(Paragraph::text).collect::<Vec<_>>().join("\n")
}
