//! Normalizes PowerPoint slides into renderer-ready records.
//!
//! A presentation is read into a [`ShapeTree`] (masters, layouts and slides with
//! their shapes) and then turned into one [`SlideRecord`] per slide: a title,
//! nested bullet lists with inline HTML formatting, rendered tables, a
//! deduplicated list of image data URIs and the hyperlinks of interest.
//!
//! ```no_run
//! use pptx_digest::{normalize_document, ParserConfig};
//!
//! let bytes = std::fs::read("presentation.pptx")?;
//! for record in normalize_document(&bytes, &ParserConfig::default())? {
//!     println!("{}: {} bullet(s)", record.title, record.bullets.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bullets;
mod constants;
mod container;
mod format;
mod images;
mod parse_rels;
mod parse_xml;
mod parser_config;
mod presentation;
mod record;
mod slide;
mod table;
mod types;

pub use bullets::{build_bullet_tree, BulletListBuilder};
pub use container::PptxContainer;
pub use format::{escape_html, format_run, paragraph_html};
pub use images::{
    collect_background_image, collect_container_images, collect_shape_images, dedup_images, merge_images, mime_type,
};
pub use parser_config::{ParserConfig, ParserConfigBuilder};
pub use presentation::{InheritedImages, PresentationNormalizer};
pub use record::{BulletNode, DataUri, SlideRecord, TableGrid};
pub use slide::{find_title, normalize_slide, SlideInheritance};
pub use table::{column_widths, render_table};
pub use types::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing part: {0}")]
    MissingPart(String),

    #[error("Parse error: {0}")]
    ParseError(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reads a pptx package held in memory into its shape tree.
pub fn open_document(bytes: &[u8]) -> Result<ShapeTree> {
    PptxContainer::from_bytes(bytes)?.load_tree()
}

/// Reads a pptx package and normalizes every slide.
///
/// Either the whole document is normalized or an error is returned, there are
/// no partial results.
pub fn normalize_document(bytes: &[u8], config: &ParserConfig) -> Result<Vec<SlideRecord>> {
    let tree = PptxContainer::from_bytes(bytes)?.load_media(config.extract_images).load_tree()?;
    Ok(PresentationNormalizer::new(config.clone()).normalize(&tree))
}
