//! Image collection from shapes, fills and container backgrounds.

use crate::record::DataUri;
use crate::{Container, Fill, ImageBlob, ShapeKind, ShapeNode};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use indexmap::IndexSet;

/// Resolves the MIME type of an image from its extension.
///
/// Extensions known to the `image` crate get their canonical type (`jpg` becomes
/// `image/jpeg`), unknown ones fall back to `image/{ext}`. Without an extension the
/// bytes are sniffed.
pub fn mime_type(blob: &ImageBlob) -> String {
    let ext = blob.ext.trim_start_matches('.').to_ascii_lowercase();

    if ext.is_empty() {
        return image::guess_format(&blob.bytes)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());
    }
    if ext == "svg" {
        return "image/svg+xml".to_string();
    }

    match ImageFormat::from_extension(ext.as_str()) {
        Some(format) => format.to_mime_type().to_string(),
        None => format!("image/{}", ext),
    }
}

pub(crate) fn encode_data_uri(blob: &ImageBlob) -> DataUri {
    let payload = general_purpose::STANDARD.encode(&blob.bytes);
    DataUri::new(format!("data:{};base64,{}", mime_type(blob), payload))
}

fn push_blob(blob: &ImageBlob, images: &mut Vec<DataUri>) {
    if !blob.is_empty() {
        images.push(blob.to_data_uri());
    }
}

/// Appends every image of `shape` in encounter order: the picture itself, the
/// pictures of group children (depth-first, pre-order), then a picture fill.
pub fn collect_shape_images(shape: &ShapeNode, images: &mut Vec<DataUri>) {
    match &shape.kind {
        ShapeKind::Picture(Some(blob)) => push_blob(blob, images),
        ShapeKind::Group(children) => {
            for child in children {
                collect_shape_images(child, images);
            }
        }
        ShapeKind::Picture(None) | ShapeKind::Text(_) | ShapeKind::Table(_) | ShapeKind::Other => {}
    }

    if let Some(blob) = shape.fill.as_ref().and_then(Fill::picture) {
        push_blob(blob, images);
    }
}

/// Appends the picture of a background fill, if it has one.
pub fn collect_background_image(background: Option<&Fill>, images: &mut Vec<DataUri>) {
    if let Some(blob) = background.and_then(Fill::picture) {
        push_blob(blob, images);
    }
}

/// All images of a master or layout: its shapes in order, then its background.
pub fn collect_container_images(container: &Container) -> Vec<DataUri> {
    let mut images = Vec::new();
    for shape in &container.shapes {
        collect_shape_images(shape, &mut images);
    }
    collect_background_image(container.background.as_ref(), &mut images);
    images
}

/// Removes repeated images, keeping the first occurrence of each.
pub fn dedup_images<I>(images: I) -> Vec<DataUri>
where
    I: IntoIterator<Item = DataUri>,
{
    images.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Merges inherited and own images in master, layout, slide order without duplicates.
pub fn merge_images(master: &[DataUri], layout: &[DataUri], own: Vec<DataUri>) -> Vec<DataUri> {
    dedup_images(master.iter().cloned().chain(layout.iter().cloned()).chain(own))
}
