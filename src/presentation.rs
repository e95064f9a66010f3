use crate::images::collect_container_images;
use crate::parser_config::ParserConfig;
use crate::record::{DataUri, SlideRecord};
use crate::slide::{normalize_slide, SlideInheritance};
use crate::{ShapeTree, SlideSource};
use rayon::prelude::*;

/// Master and layout image sets of a document, computed once and shared by every slide.
#[derive(Debug, Clone, Default)]
pub struct InheritedImages {
    /// Indexed like [`ShapeTree::masters`].
    pub masters: Vec<Vec<DataUri>>,
    /// Indexed like [`ShapeTree::layouts`].
    pub layouts: Vec<Vec<DataUri>>,
}

impl InheritedImages {
    /// Walks every master and layout exactly once.
    pub fn compute(tree: &ShapeTree) -> Self {
        let masters = tree.masters.iter().map(collect_container_images).collect();
        let layouts = tree.layouts.iter().map(|layout| collect_container_images(&layout.container)).collect();
        Self { masters, layouts }
    }

    /// Resolves the master and layout images of a slide. A slide without a
    /// layout, or whose layout has no master, falls back to the primary master.
    pub fn for_slide(&self, tree: &ShapeTree, slide: &SlideSource) -> SlideInheritance<'_> {
        let layout_index = slide.layout.filter(|&index| index < self.layouts.len());
        let master_index = layout_index
            .and_then(|index| tree.layouts.get(index))
            .and_then(|layout| layout.master)
            .unwrap_or(0);

        SlideInheritance {
            master: self.masters.get(master_index).map(Vec::as_slice).unwrap_or(&[]),
            layout: layout_index.map(|index| self.layouts[index].as_slice()).unwrap_or(&[]),
        }
    }
}

/// Turns a [`ShapeTree`] into one [`SlideRecord`] per slide, in document order.
///
/// # Example
///
/// ```
/// use pptx_digest::{Container, ParserConfig, PresentationNormalizer, ShapeTree, SlideSource};
///
/// let tree = ShapeTree {
///     slides: vec![SlideSource { layout: None, container: Container::default() }],
///     ..ShapeTree::default()
/// };
/// let records = PresentationNormalizer::new(ParserConfig::default()).normalize(&tree);
/// assert_eq!(records[0].title, "Slide 1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PresentationNormalizer {
    pub config: ParserConfig,
}

impl PresentationNormalizer {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Normalizes all slides sequentially.
    pub fn normalize(&self, tree: &ShapeTree) -> Vec<SlideRecord> {
        let inherited = self.inherited_images(tree);

        tree.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| self.normalize_one(tree, &inherited, index, slide))
            .collect()
    }

    /// Normalizes all slides with Rayon.
    ///
    /// Master and layout images are still computed once, up front. Slides only
    /// read shared immutable data, so they are processed without locking and
    /// collected back in document order.
    pub fn normalize_multi_threaded(&self, tree: &ShapeTree) -> Vec<SlideRecord> {
        let inherited = self.inherited_images(tree);

        tree.slides
            .par_iter()
            .enumerate()
            .map(|(index, slide)| self.normalize_one(tree, &inherited, index, slide))
            .collect()
    }

    fn inherited_images(&self, tree: &ShapeTree) -> InheritedImages {
        if !self.config.extract_images || !self.config.inherit_images {
            return InheritedImages::default();
        }

        let inherited = InheritedImages::compute(tree);
        log::debug!(
            "inherited images: {} master(s), {} layout(s)",
            inherited.masters.len(),
            inherited.layouts.len()
        );
        inherited
    }

    fn normalize_one(
        &self,
        tree: &ShapeTree,
        inherited: &InheritedImages,
        index: usize,
        slide: &SlideSource,
    ) -> SlideRecord {
        let slide_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        normalize_slide(&slide.container, slide_number, inherited.for_slide(tree, slide), &self.config)
    }
}
