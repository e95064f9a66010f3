pub const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

pub const IMAGE_REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const HYPERLINK_REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
pub const SLIDE_REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const SLIDE_LAYOUT_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const SLIDE_MASTER_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";

/// Rendered in place of an empty table cell so HTML grids keep their shape.
pub const EMPTY_CELL: &str = "&nbsp;";

pub const DEFAULT_LINK_DOMAINS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Deepest paragraph level DrawingML allows (`lvl` ranges over 0..=8).
pub const MAX_LEVEL: u32 = 8;

/// Text of a run standing for a `<a:br>` line break.
pub const LINE_BREAK: &str = "\n";
