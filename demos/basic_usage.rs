//! Basic usage example for the pptx-digest crate
//!
//! Opens a PPTX file, normalizes every slide and prints a short digest of each.
//!
//! Run with: RUST_LOG=debug cargo run --example basic_usage <path/to/your/presentation.pptx>

use pptx_digest::{BulletNode, ParserConfig, PptxContainer, PresentationNormalizer, Result};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let pptx_path = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Usage: cargo run --example basic_usage <path/to/presentation.pptx>");
        return Ok(());
    };

    println!("Processing PPTX file: {}", pptx_path);

    let config = ParserConfig::builder()
        .extract_images(true)
        .link_domains(["youtube.com", "youtu.be", "vimeo.com"])
        .build();

    let mut container = PptxContainer::open(Path::new(pptx_path))?.load_media(config.extract_images);
    let tree = container.load_tree()?;
    println!("Found {} slides", tree.slide_count());

    let records = PresentationNormalizer::new(config).normalize_multi_threaded(&tree);

    for record in &records {
        println!("## {} ({})", record.title, record.slide_number);
        for node in &record.bullets {
            print_bullet(node, 0);
        }
        for table in &record.tables {
            println!("  [table {}x{}]", table.row_count(), table.column_count());
        }
        if !record.images.is_empty() {
            println!("  {} image(s)", record.images.len());
        }
        for link in &record.hyperlinks {
            println!("  link: {}", link);
        }
    }

    Ok(())
}

fn print_bullet(node: &BulletNode, depth: usize) {
    println!("{}- {}", "  ".repeat(depth + 1), node.text.as_deref().unwrap_or(""));
    for child in &node.children {
        print_bullet(child, depth + 1);
    }
}
