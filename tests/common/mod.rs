#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const LOGO: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
pub const PHOTO: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Collects package parts and writes them into an in-memory zip archive.
#[derive(Default)]
pub struct PackageBuilder {
    files: Vec<(String, Vec<u8>)>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((path.to_string(), content.into()));
        self
    }

    pub fn without(mut self, path: &str) -> Self {
        self.files.retain(|(name, _)| name != path);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (path, content) in self.files {
            writer.start_file(path, options).unwrap();
            writer.write_all(&content).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }
}

/// A `.rels` part. Each entry is `(id, short type, target)`; targets starting
/// with `http` are marked external.
pub fn rels_xml(entries: &[(&str, &str, &str)]) -> String {
    let body: String = entries
        .iter()
        .map(|(id, rel_type, target)| {
            let mode = if target.starts_with("http") { r#" TargetMode="External""# } else { "" };
            format!(r#"<Relationship Id="{id}" Type="{REL_BASE}/{rel_type}" Target="{target}"{mode}/>"#)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{body}</Relationships>"#
    )
}

/// A slide, layout or master part with the given root element and shapes.
pub fn part_xml(root: &str, shapes: &str, background: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:{root} xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="{REL_BASE}" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>{background}<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld>
</p:{root}>"#
    )
}

pub fn title_sp(text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
    )
}

pub fn pic(rel_id: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>
<p:blipFill><a:blip r:embed="{rel_id}"/></p:blipFill><p:spPr/></p:pic>"#
    )
}

/// Two slides, stored as `slide1.xml` ("First") and `slide2.xml` ("Second"),
/// but listed in reverse order by the presentation. One master with a logo and
/// one layout shared by both slides.
pub fn sample_package() -> PackageBuilder {
    let presentation = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
  <p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst>
</p:presentation>"#;

    let first_body = r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/>
  <a:p><a:r><a:rPr b="1"/><a:t>Intro</a:t></a:r></a:p>
  <a:p><a:pPr lvl="1"/><a:r><a:rPr><a:hlinkClick r:id="rId4"/></a:rPr><a:t>Watch</a:t></a:r></a:p>
  <a:p><a:pPr lvl="1"/><a:r><a:rPr><a:hlinkClick r:id="rId5"/></a:rPr><a:t>Read</a:t></a:r></a:p>
</p:txBody></p:sp>"#;

    let table = r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="5" name="Table"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>
<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl>
  <a:tblGrid><a:gridCol w="1"/><a:gridCol w="1"/></a:tblGrid>
  <a:tr h="1"><a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>Name</a:t></a:r></a:p></a:txBody></a:tc><a:tc><a:txBody><a:bodyPr/><a:p/></a:txBody></a:tc></a:tr>
</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#;

    PackageBuilder::new()
        .file("ppt/presentation.xml", presentation)
        .file(
            "ppt/_rels/presentation.xml.rels",
            rels_xml(&[
                ("rId1", "slideMaster", "slideMasters/slideMaster1.xml"),
                ("rId2", "slide", "slides/slide1.xml"),
                ("rId3", "slide", "slides/slide2.xml"),
            ]),
        )
        .file("ppt/slideMasters/slideMaster1.xml", part_xml("sldMaster", &pic("rId2"), ""))
        .file(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            rels_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "image", "../media/logo.png"),
            ]),
        )
        .file("ppt/slideLayouts/slideLayout1.xml", part_xml("sldLayout", "", ""))
        .file(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            rels_xml(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]),
        )
        .file(
            "ppt/slides/slide1.xml",
            part_xml("sld", &format!("{}{}{}{}", title_sp("First"), first_body, pic("rId3"), pic("rId6")), ""),
        )
        .file(
            "ppt/slides/_rels/slide1.xml.rels",
            rels_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId3", "image", "../media/logo.png"),
                ("rId4", "hyperlink", "https://youtu.be/abc"),
                ("rId5", "hyperlink", "https://example.com/article"),
                ("rId6", "image", "../media/missing.png"),
            ]),
        )
        .file(
            "ppt/slides/slide2.xml",
            part_xml(
                "sld",
                &format!("{}{}", title_sp("Second"), table),
                r#"<p:bg><p:bgPr><a:blipFill><a:blip r:embed="rId2"/></a:blipFill><a:effectLst/></p:bgPr></p:bg>"#,
            ),
        )
        .file(
            "ppt/slides/_rels/slide2.xml.rels",
            rels_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "image", "../media/photo.jpeg"),
            ]),
        )
        .file("ppt/media/logo.png", LOGO)
        .file("ppt/media/photo.jpeg", PHOTO)
}
