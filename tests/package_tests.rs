mod common;

use common::{part_xml, sample_package, LOGO, PHOTO};
use pptx_digest::{
    normalize_document, open_document, BulletNode, Error, ImageBlob, ParserConfig, PptxContainer,
    PresentationNormalizer, ShapeKind,
};

#[test]
fn test_slide_order_follows_presentation_list() {
    let records = normalize_document(&sample_package().build(), &ParserConfig::default()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Second");
    assert_eq!(records[0].slide_number, 1);
    assert_eq!(records[1].title, "First");
    assert_eq!(records[1].slide_number, 2);
}

#[test]
fn test_tree_links_slides_layouts_and_masters() {
    let tree = open_document(&sample_package().build()).unwrap();

    assert_eq!(tree.masters.len(), 1);
    assert_eq!(tree.master().map(|master| master.name.as_str()), Some("ppt/slideMasters/slideMaster1.xml"));
    assert_eq!(tree.layouts.len(), 1);
    assert_eq!(tree.layouts[0].master, Some(0));
    assert!(tree.slides.iter().all(|slide| slide.layout == Some(0)));
    assert_eq!(tree.slides[1].container.name, "ppt/slides/slide1.xml");

    // the picture pointing at a missing media part has no blob
    let pictures: Vec<_> = tree.slides[1]
        .container
        .shapes
        .iter()
        .filter_map(|shape| match &shape.kind {
            ShapeKind::Picture(blob) => Some(blob.is_some()),
            _ => None,
        })
        .collect();
    assert_eq!(pictures, vec![true, false]);
}

#[test]
fn test_package_content_is_normalized() {
    let records = normalize_document(&sample_package().build(), &ParserConfig::default()).unwrap();
    let first = &records[1];

    assert_eq!(
        first.bullets,
        vec![BulletNode {
            text: Some("<strong>Intro</strong>".into()),
            children: vec![BulletNode::leaf("Watch"), BulletNode::leaf("Read")],
        }]
    );
    assert_eq!(first.hyperlinks, vec!["https://youtu.be/abc"]);

    let second = &records[0];
    assert_eq!(second.tables.len(), 1);
    assert_eq!(second.tables[0].rows, vec![vec!["Name", "&nbsp;"]]);
    assert!(second.bullets.is_empty());
}

#[test]
fn test_line_breaks_separate_words() {
    let slide = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/><a:p><a:r><a:t>Quarterly</a:t></a:r><a:br/><a:r><a:t>Results</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/><a:p><a:r><a:t>Revenue</a:t></a:r><a:br/><a:r><a:t>grew</a:t></a:r></a:p></p:txBody></p:sp>"#;
    let bytes = sample_package()
        .without("ppt/slides/slide1.xml")
        .file("ppt/slides/slide1.xml", part_xml("sld", slide, ""))
        .build();

    let records = normalize_document(&bytes, &ParserConfig::default()).unwrap();

    assert_eq!(records[1].title, "Quarterly\nResults");
    assert_eq!(records[1].bullets, vec![BulletNode::leaf("Revenue\ngrew")]);
}

#[test]
fn test_images_are_inherited_and_deduplicated() {
    let records = normalize_document(&sample_package().build(), &ParserConfig::default()).unwrap();
    let logo = ImageBlob::new(LOGO.to_vec(), "png").to_data_uri();
    let photo = ImageBlob::new(PHOTO.to_vec(), "jpeg").to_data_uri();

    // master logo first, then the slide background
    assert_eq!(records[0].images, vec![logo.clone(), photo]);
    // the slide's own copy of the logo collapses into the master's
    assert_eq!(records[1].images, vec![logo]);
    assert_eq!(records[0].images[1].mime_type(), "image/jpeg");
}

#[test]
fn test_image_extraction_can_be_disabled() {
    let config = ParserConfig::builder().extract_images(false).build();
    let records = normalize_document(&sample_package().build(), &config).unwrap();

    assert!(records.iter().all(|record| record.images.is_empty()));
    assert_eq!(records[1].hyperlinks.len(), 1);
}

#[test]
fn test_multi_threaded_matches_sequential() {
    let tree = PptxContainer::from_bytes(sample_package().build()).unwrap().load_tree().unwrap();
    let normalizer = PresentationNormalizer::default();

    assert_eq!(normalizer.normalize(&tree), normalizer.normalize_multi_threaded(&tree));
}

#[test]
fn test_non_zip_input_is_rejected() {
    assert!(matches!(open_document(b"definitely not a pptx"), Err(Error::Zip(_))));
    assert!(normalize_document(&[], &ParserConfig::default()).is_err());
}

#[test]
fn test_missing_presentation_part() {
    let bytes = sample_package().without("ppt/presentation.xml").build();
    assert!(matches!(open_document(&bytes), Err(Error::MissingPart(path)) if path == "ppt/presentation.xml"));
}

#[test]
fn test_missing_slide_part() {
    let bytes = sample_package().without("ppt/slides/slide2.xml").build();
    assert!(matches!(open_document(&bytes), Err(Error::MissingPart(_))));
}

#[test]
fn test_malformed_slide_xml() {
    let bytes = sample_package()
        .without("ppt/slides/slide1.xml")
        .file("ppt/slides/slide1.xml", "<p:sld><p:cSld>")
        .build();
    assert!(matches!(open_document(&bytes), Err(Error::Xml(_))));
}

#[cfg(feature = "serde")]
#[test]
fn test_records_serialize_to_json() {
    let records = normalize_document(&sample_package().build(), &ParserConfig::default()).unwrap();
    let json = serde_json::to_value(&records[1]).unwrap();

    assert_eq!(json["title"], "First");
    assert_eq!(json["slide_number"], 2);
    assert_eq!(json["bullets"][0]["children"][0]["text"], "Watch");
    assert!(json["images"][0].as_str().unwrap().starts_with("data:image/png;base64,"));
}
