use crate::bullets::build_bullet_tree;
use crate::images::{collect_background_image, collect_shape_images, merge_images};
use crate::parser_config::ParserConfig;
use crate::record::{DataUri, SlideRecord};
use crate::table::render_table;
use crate::{Container, Paragraph, ShapeKind, ShapeNode};

/// Images a slide inherits from its master and its layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideInheritance<'a> {
    pub master: &'a [DataUri],
    pub layout: &'a [DataUri],
}

/// Normalizes a single slide into a [`SlideRecord`].
///
/// The title is resolved before anything else so that body paragraphs repeating
/// it can be left out of the bullet list. The title shape itself never
/// contributes bullets.
///
/// # Arguments
///
/// - `slide`: the slide's shapes and background.
/// - `slide_number`: 1-based position of the slide in the document.
/// - `inherited`: pre-computed master and layout images.
/// - `config`: image, link and title handling options.
pub fn normalize_slide(
    slide: &Container,
    slide_number: u32,
    inherited: SlideInheritance<'_>,
    config: &ParserConfig,
) -> SlideRecord {
    let title_node = title_shape(&slide.shapes);
    let placeholder_title = title_node.and_then(title_text);
    let suppressed = if config.suppress_title_duplicates { placeholder_title.as_deref() } else { None };

    let mut bullets = Vec::new();
    let mut tables = Vec::new();
    let mut hyperlinks = Vec::new();
    let mut own_images = Vec::new();

    for shape in &slide.shapes {
        if config.extract_images {
            collect_shape_images(shape, &mut own_images);
        }

        match &shape.kind {
            ShapeKind::Text(frame) => {
                if !title_node.is_some_and(|title| std::ptr::eq(title, shape)) {
                    let body = frame.paragraphs.iter().filter(|paragraph| !repeats_title(paragraph, suppressed));
                    bullets.extend(build_bullet_tree(body));
                }
                collect_hyperlinks(&frame.paragraphs, config, &mut hyperlinks);
            }
            ShapeKind::Table(table) => {
                tables.push(render_table(table));
                let cells = table.rows.iter().flat_map(|row| row.cells.iter());
                collect_hyperlinks(cells.flat_map(|cell| cell.paragraphs.iter()), config, &mut hyperlinks);
            }
            ShapeKind::Picture(_) | ShapeKind::Group(_) | ShapeKind::Other => {}
        }
    }

    let images = if config.extract_images {
        collect_background_image(slide.background.as_ref(), &mut own_images);
        if config.inherit_images {
            merge_images(inherited.master, inherited.layout, own_images)
        } else {
            merge_images(&[], &[], own_images)
        }
    } else {
        Vec::new()
    };

    let title = placeholder_title.unwrap_or_else(|| format!("Slide {}", slide_number));

    log::debug!(
        "slide {} '{}': {} bullets, {} tables, {} images, {} links",
        slide_number,
        title,
        bullets.len(),
        tables.len(),
        images.len(),
        hyperlinks.len()
    );

    SlideRecord { title, slide_number, bullets, tables, images, hyperlinks }
}

/// Text of the first title placeholder, trimmed. `None` when there is no such
/// placeholder or it holds only whitespace.
pub fn find_title(shapes: &[ShapeNode]) -> Option<String> {
    title_shape(shapes).and_then(title_text)
}

fn title_shape(shapes: &[ShapeNode]) -> Option<&ShapeNode> {
    shapes.iter().find(|shape| shape.is_title())
}

fn title_text(shape: &ShapeNode) -> Option<String> {
    let title = shape.text().trim().to_string();
    (!title.is_empty()).then_some(title)
}

fn repeats_title(paragraph: &Paragraph, title: Option<&str>) -> bool {
    title.is_some_and(|title| paragraph.text().trim() == title)
}

fn collect_hyperlinks<'a>(
    paragraphs: impl IntoIterator<Item = &'a Paragraph>,
    config: &ParserConfig,
    hyperlinks: &mut Vec<String>,
) {
    let addresses = paragraphs
        .into_iter()
        .flat_map(|paragraph| paragraph.runs.iter())
        .filter_map(|run| run.hyperlink.as_deref())
        .filter(|address| config.is_link_of_interest(address));

    hyperlinks.extend(addresses.map(str::to_string));
}
