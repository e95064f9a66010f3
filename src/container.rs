use crate::constants::{
    HYPERLINK_REL_TYPE, IMAGE_REL_TYPE, PRESENTATION_PATH, SLIDE_LAYOUT_REL_TYPE, SLIDE_MASTER_REL_TYPE, SLIDE_REL_TYPE,
};
use crate::parse_rels::{parse_rels, Relationship, Relationships};
use crate::parse_xml::{parse_part_xml, parse_presentation_xml, PartResources};
use crate::{Container, Error, ImageBlob, Layout, Result, ShapeTree, SlideSource};
use std::{
    collections::HashMap,
    fs::File,
    io::{Cursor, Read, Seek},
    path::Path,
};
use zip::result::ZipError;

/// Reads a PowerPoint (pptx) package into a [`ShapeTree`].
///
/// A pptx file is a zip archive of XML parts. `PptxContainer` follows the
/// relationships from `ppt/presentation.xml` to the slides, from each slide to
/// its layout and from each layout to its master, and resolves the images and
/// hyperlinks each of these parts references.
///
/// # Example
///
/// ```no_run
/// use pptx_digest::PptxContainer;
/// use std::path::Path;
///
/// let mut container = PptxContainer::open(Path::new("presentation.pptx"))?;
/// let tree = container.load_tree()?;
/// println!("{} slides", tree.slide_count());
/// # Ok::<(), pptx_digest::Error>(())
/// ```
pub struct PptxContainer<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    load_media: bool,
    media: HashMap<String, Option<ImageBlob>>,
}

impl PptxContainer<File> {
    /// Opens a pptx file from disk.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl PptxContainer<Cursor<Vec<u8>>> {
    /// Opens a pptx package held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new(Cursor::new(bytes.into()))
    }
}

impl<R: Read + Seek> PptxContainer<R> {
    /// Wraps any seekable reader holding a pptx package.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Zip`] if the reader does not contain a zip archive.
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive, load_media: true, media: HashMap::new() })
    }

    /// Whether media parts are read at all. When disabled every picture and
    /// picture fill is loaded without its blob.
    pub fn load_media(mut self, load_media: bool) -> Self {
        self.load_media = load_media;
        self
    }

    /// Builds the complete shape tree of the presentation.
    ///
    /// Slides appear in the order of `<p:sldIdLst>`. Layouts and masters are
    /// loaded once, the first time a slide (or layout) refers to them.
    ///
    /// # Errors
    ///
    /// Fails if `ppt/presentation.xml` is missing, if a slide, layout or master
    /// part the presentation refers to is missing, or if any of them contains
    /// malformed XML.
    pub fn load_tree(&mut self) -> Result<ShapeTree> {
        let presentation_xml = self
            .read_optional(PRESENTATION_PATH)?
            .ok_or_else(|| Error::MissingPart(PRESENTATION_PATH.to_string()))?;
        let parts = parse_presentation_xml(&presentation_xml)?;
        let rels = self.load_rels(PRESENTATION_PATH)?;

        let mut builder = TreeBuilder::default();

        for rel_id in &parts.master_ids {
            if let Some(master_path) = target_path(PRESENTATION_PATH, &rels, rel_id, SLIDE_MASTER_REL_TYPE) {
                self.master_index(&mut builder, &master_path)?;
            }
        }

        for rel_id in &parts.slide_ids {
            let Some(slide_path) = target_path(PRESENTATION_PATH, &rels, rel_id, SLIDE_REL_TYPE) else {
                continue;
            };

            let (container, slide_rels) = self.load_part(&slide_path)?;
            let layout = match first_internal(&slide_rels, SLIDE_LAYOUT_REL_TYPE) {
                Some(rel) => Some(self.layout_index(&mut builder, &resolve_target(&slide_path, &rel.target))?),
                None => None,
            };

            builder.tree.slides.push(SlideSource { layout, container });
        }

        log::debug!(
            "loaded {} slide(s), {} layout(s), {} master(s)",
            builder.tree.slides.len(),
            builder.tree.layouts.len(),
            builder.tree.masters.len()
        );

        Ok(builder.tree)
    }

    /// Reads a file from the archive by its internal path.
    pub fn read_file_from_archive(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(path)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    fn read_optional(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.read_file_from_archive(path) {
            Ok(content) => Ok(Some(content)),
            Err(Error::Zip(ZipError::FileNotFound)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// A part without a `.rels` file simply has no relationships.
    fn load_rels(&mut self, part_path: &str) -> Result<Relationships> {
        match self.read_optional(&get_rels_path(part_path))? {
            Some(rels_data) => parse_rels(&rels_data),
            None => Ok(Relationships::default()),
        }
    }

    /// Loads a slide, layout or master part together with its relationships.
    fn load_part(&mut self, part_path: &str) -> Result<(Container, Relationships)> {
        let xml = self.read_optional(part_path)?.ok_or_else(|| Error::MissingPart(part_path.to_string()))?;
        let rels = self.load_rels(part_path)?;
        let resources = self.resources(part_path, &rels)?;

        let parsed = parse_part_xml(&xml, &resources)?;
        log::debug!("loaded part {}: {} shape(s)", part_path, parsed.shapes.len());

        let container = Container { name: part_path.to_string(), shapes: parsed.shapes, background: parsed.background };
        Ok((container, rels))
    }

    /// Resolves the images and hyperlinks a part refers to.
    fn resources(&mut self, part_path: &str, rels: &Relationships) -> Result<PartResources> {
        let mut resources = PartResources::default();

        for rel in rels.of_type(HYPERLINK_REL_TYPE) {
            resources.links.insert(rel.id.clone(), rel.target.clone());
        }

        if !self.load_media {
            return Ok(resources);
        }

        for rel in rels.of_type(IMAGE_REL_TYPE).filter(|rel| !rel.external) {
            let media_path = resolve_target(part_path, &rel.target);
            if let Some(blob) = self.media_blob(&media_path)? {
                resources.images.insert(rel.id.clone(), blob);
            }
        }

        Ok(resources)
    }

    /// Reads a media part once and caches it, masters and layouts share most of theirs.
    fn media_blob(&mut self, media_path: &str) -> Result<Option<ImageBlob>> {
        if let Some(cached) = self.media.get(media_path) {
            return Ok(cached.clone());
        }

        let blob = match self.read_optional(media_path)? {
            Some(bytes) => Some(ImageBlob::new(bytes, extension(media_path))),
            None => {
                log::warn!("dangling image relationship: {} does not exist", media_path);
                None
            }
        };

        self.media.insert(media_path.to_string(), blob.clone());
        Ok(blob)
    }

    fn master_index(&mut self, builder: &mut TreeBuilder, master_path: &str) -> Result<usize> {
        if let Some(&index) = builder.masters.get(master_path) {
            return Ok(index);
        }

        let (container, _) = self.load_part(master_path)?;
        let index = builder.tree.masters.len();
        builder.tree.masters.push(container);
        builder.masters.insert(master_path.to_string(), index);
        Ok(index)
    }

    fn layout_index(&mut self, builder: &mut TreeBuilder, layout_path: &str) -> Result<usize> {
        if let Some(&index) = builder.layouts.get(layout_path) {
            return Ok(index);
        }

        let (container, layout_rels) = self.load_part(layout_path)?;
        let master = match first_internal(&layout_rels, SLIDE_MASTER_REL_TYPE) {
            Some(rel) => Some(self.master_index(builder, &resolve_target(layout_path, &rel.target))?),
            None => {
                log::warn!("layout {} has no slide master", layout_path);
                None
            }
        };

        let index = builder.tree.layouts.len();
        builder.tree.layouts.push(Layout { master, container });
        builder.layouts.insert(layout_path.to_string(), index);
        Ok(index)
    }
}

#[derive(Default)]
struct TreeBuilder {
    tree: ShapeTree,
    masters: HashMap<String, usize>,
    layouts: HashMap<String, usize>,
}

fn first_internal<'a>(rels: &'a Relationships, rel_type: &'a str) -> Option<&'a Relationship> {
    rels.of_type(rel_type).find(|rel| !rel.external)
}

/// Looks up `rel_id` and checks it has the expected type.
fn target_path(part_path: &str, rels: &Relationships, rel_id: &str, rel_type: &str) -> Option<String> {
    match rels.get(rel_id) {
        Some(rel) if rel.rel_type == rel_type && !rel.external => Some(resolve_target(part_path, &rel.target)),
        _ => {
            log::warn!("dangling relationship {} in {}", rel_id, part_path);
            None
        }
    }
}

/// Constructs the path of the relationships file of a part.
///
/// `ppt/slides/slide1.xml` becomes `ppt/slides/_rels/slide1.xml.rels`.
pub fn get_rels_path(part_path: &str) -> String {
    let mut rels_path = part_path.to_string();
    match rels_path.rfind('/') {
        Some(pos) => rels_path.insert_str(pos + 1, "_rels/"),
        None => rels_path.insert_str(0, "_rels/"),
    }
    rels_path.push_str(".rels");
    rels_path
}

/// Resolves a relationship target against the directory of its source part.
///
/// Targets are relative (`../media/image1.png`) unless they start with `/`.
pub fn resolve_target(part_path: &str, target: &str) -> String {
    let mut segments: Vec<&str> = match target.strip_prefix('/') {
        Some(_) => Vec::new(),
        None => part_path.rsplit_once('/').map(|(dir, _)| dir.split('/').collect()).unwrap_or_default(),
    };

    for segment in target.trim_start_matches('/').split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}

fn extension(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default()
}
