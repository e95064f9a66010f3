use crate::{Error, Result};
use roxmltree::Document;
use std::collections::HashMap;

/// A single `<Relationship>` of a part's `.rels` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URL, not a package part.
    pub external: bool,
}

/// Relationships of one part, keyed by id and kept in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
    by_id: HashMap<String, usize>,
}

impl Relationships {
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    pub fn of_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.entries.iter().filter(move |rel| rel.rel_type == rel_type)
    }

    fn push(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), self.entries.len());
        self.entries.push(rel);
    }
}

/// Parses relationship (`.rels`) XML data of a package part.
///
/// Relationships link resource ids used inside a part (`r:embed`, `r:id`) to
/// their targets: media files, layouts, masters, slides or external URLs.
///
/// # Errors
///
/// An error is returned if:
/// - The XML data is not valid UTF-8.
/// - Malformed or invalid XML structure is detected.
pub fn parse_rels(xml_data: &[u8]) -> Result<Relationships> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    if root.tag_name().name() != "Relationships" {
        return Err(Error::ParseError("relationship part without <Relationships> root"));
    }

    let mut relationships = Relationships::default();
    for rel in root.children().filter(|n| n.is_element() && n.tag_name().name() == "Relationship") {
        let (Some(id), Some(rel_type), Some(target)) =
            (rel.attribute("Id"), rel.attribute("Type"), rel.attribute("Target"))
        else {
            continue;
        };

        relationships.push(Relationship {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external: rel.attribute("TargetMode").is_some_and(|mode| mode.eq_ignore_ascii_case("External")),
        });
    }

    Ok(relationships)
}
