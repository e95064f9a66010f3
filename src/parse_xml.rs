use crate::constants::{A_NAMESPACE, LINE_BREAK, MAX_LEVEL, P_NAMESPACE, RELS_NAMESPACE, TABLE_URI};
use crate::types::{
    Fill, Formatting, ImageBlob, Paragraph, PlaceholderKind, Run, ShapeKind, ShapeNode, Table, TableCell, TableRow,
    TextFrame,
};
use crate::{Error, Result};
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// Media and hyperlink targets of one part, resolved from its relationships.
#[derive(Debug, Clone, Default)]
pub struct PartResources {
    /// Embedded images by relationship id.
    pub images: HashMap<String, ImageBlob>,
    /// Hyperlink addresses by relationship id.
    pub links: HashMap<String, String>,
}

impl PartResources {
    fn image(&self, rel_id: Option<&str>) -> Option<ImageBlob> {
        rel_id.and_then(|id| self.images.get(id)).cloned()
    }

    fn link(&self, rel_id: Option<&str>) -> Option<String> {
        rel_id.and_then(|id| self.links.get(id)).cloned()
    }
}

/// Shapes and background of a slide, layout or master part.
#[derive(Debug, Clone, Default)]
pub struct ParsedPart {
    pub shapes: Vec<ShapeNode>,
    pub background: Option<Fill>,
}

/// Parses the XML of a slide, slide layout or slide master into its shape tree.
///
/// All three part kinds share the `<p:cSld>` / `<p:spTree>` structure. Images and
/// hyperlinks are looked up in `resources`; ids that cannot be resolved leave
/// the corresponding picture or link empty.
///
/// # Errors
///
/// Parsing fails if:
/// - The provided XML data isn't valid UTF-8.
/// - The XML is malformed or misses the `<p:cSld>` or `<p:spTree>` element.
pub fn parse_part_xml(xml_data: &[u8], resources: &PartResources) -> Result<ParsedPart> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    let c_sld = child(root, P_NAMESPACE, "cSld").ok_or(Error::ParseError("no <p:cSld> element"))?;
    let sp_tree = child(c_sld, P_NAMESPACE, "spTree").ok_or(Error::ParseError("no <p:spTree> element"))?;

    let background = child(c_sld, P_NAMESPACE, "bg")
        .and_then(|bg| child(bg, P_NAMESPACE, "bgPr"))
        .and_then(|bg_pr| parse_fill(bg_pr, resources));

    Ok(ParsedPart { shapes: parse_shape_tree(sp_tree, resources), background })
}

/// Relationship ids of `ppt/presentation.xml`, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationParts {
    pub master_ids: Vec<String>,
    pub slide_ids: Vec<String>,
}

/// Reads the master list (`<p:sldMasterIdLst>`) and the slide list (`<p:sldIdLst>`)
/// of the presentation part. The slide list defines the slide order; part file
/// names do not.
pub fn parse_presentation_xml(xml_data: &[u8]) -> Result<PresentationParts> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    if !is_tag(&root, P_NAMESPACE, "presentation") {
        return Err(Error::ParseError("no <p:presentation> root"));
    }

    let rel_ids = |list: &str, entry: &str| -> Vec<String> {
        child(root, P_NAMESPACE, list)
            .map(|list_node| {
                children(list_node, P_NAMESPACE, entry)
                    .filter_map(|id_node| id_node.attribute((RELS_NAMESPACE, "id")))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    Ok(PresentationParts {
        master_ids: rel_ids("sldMasterIdLst", "sldMasterId"),
        slide_ids: rel_ids("sldIdLst", "sldId"),
    })
}

/// Parses the shape children of `<p:spTree>` or `<p:grpSp>`. Non-shape children
/// such as the group's own properties are skipped.
fn parse_shape_tree(tree_node: Node, resources: &PartResources) -> Vec<ShapeNode> {
    let mut shapes = Vec::new();

    for node in tree_node.children().filter(|n| n.is_element()) {
        let tag = node.tag_name();
        match (tag.namespace(), tag.name()) {
            (Some(P_NAMESPACE), "sp") => shapes.push(parse_sp(node, resources)),
            (Some(P_NAMESPACE), "pic") => shapes.push(parse_pic(node, resources)),
            (Some(P_NAMESPACE), "grpSp") => shapes.push(parse_group(node, resources)),
            (Some(P_NAMESPACE), "graphicFrame") => shapes.push(parse_graphic_frame(node, resources)),
            (Some(P_NAMESPACE), "cxnSp") | (Some(P_NAMESPACE), "contentPart") => {
                shapes.push(ShapeNode::new(ShapeKind::Other).with_name(shape_name(node, "nvCxnSpPr")))
            }
            _ => (),
        }
    }

    shapes
}

/// Parses an autoshape or text box (`<p:sp>`). Every such shape can hold text,
/// a missing `<p:txBody>` just yields an empty frame.
fn parse_sp(sp_node: Node, resources: &PartResources) -> ShapeNode {
    let paragraphs = child(sp_node, P_NAMESPACE, "txBody")
        .map(|tx_body| parse_paragraphs(tx_body, resources))
        .unwrap_or_default();

    ShapeNode {
        name: shape_name(sp_node, "nvSpPr"),
        placeholder: placeholder(sp_node, "nvSpPr"),
        fill: properties_fill(sp_node, "spPr", resources),
        kind: ShapeKind::Text(TextFrame { paragraphs }),
    }
}

/// Parses a picture (`<p:pic>`). Linked pictures (`r:link`) have no embedded
/// bytes and end up as a picture without blob.
fn parse_pic(pic_node: Node, resources: &PartResources) -> ShapeNode {
    let blob = child(pic_node, P_NAMESPACE, "blipFill")
        .and_then(|blip_fill| child(blip_fill, A_NAMESPACE, "blip"))
        .and_then(|blip| resources.image(blip.attribute((RELS_NAMESPACE, "embed"))));

    ShapeNode {
        name: shape_name(pic_node, "nvPicPr"),
        placeholder: placeholder(pic_node, "nvPicPr"),
        fill: properties_fill(pic_node, "spPr", resources),
        kind: ShapeKind::Picture(blob),
    }
}

fn parse_group(grp_node: Node, resources: &PartResources) -> ShapeNode {
    ShapeNode {
        name: shape_name(grp_node, "nvGrpSpPr"),
        placeholder: None,
        fill: properties_fill(grp_node, "grpSpPr", resources),
        kind: ShapeKind::Group(parse_shape_tree(grp_node, resources)),
    }
}

/// Parses a graphic frame. Only tables carry content we extract; charts,
/// diagrams and OLE objects become [`ShapeKind::Other`].
fn parse_graphic_frame(node: Node, resources: &PartResources) -> ShapeNode {
    let tbl_node = child(node, A_NAMESPACE, "graphic")
        .and_then(|graphic| child(graphic, A_NAMESPACE, "graphicData"))
        .filter(|data| data.attribute("uri") == Some(TABLE_URI))
        .and_then(|data| child(data, A_NAMESPACE, "tbl"));

    let kind = match tbl_node {
        Some(tbl) => ShapeKind::Table(parse_table(tbl, resources)),
        None => ShapeKind::Other,
    };

    ShapeNode {
        name: shape_name(node, "nvGraphicFramePr"),
        placeholder: placeholder(node, "nvGraphicFramePr"),
        fill: None,
        kind,
    }
}

/// Parses a table node (`<a:tbl>`): the column count from `<a:tblGrid>` and
/// every row (`<a:tr>`) with its cells (`<a:tc>`).
fn parse_table(tbl_node: Node, resources: &PartResources) -> Table {
    let columns = child(tbl_node, A_NAMESPACE, "tblGrid")
        .map(|grid| children(grid, A_NAMESPACE, "gridCol").count())
        .unwrap_or(0);

    let rows = children(tbl_node, A_NAMESPACE, "tr")
        .map(|tr_node| TableRow {
            cells: children(tr_node, A_NAMESPACE, "tc")
                .map(|tc_node| TableCell {
                    paragraphs: child(tc_node, A_NAMESPACE, "txBody")
                        .map(|tx_body| parse_paragraphs(tx_body, resources))
                        .unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    Table { columns, rows }
}

/// Parses every paragraph (`<a:p>`) of a text body.
fn parse_paragraphs(tx_body_node: Node, resources: &PartResources) -> Vec<Paragraph> {
    children(tx_body_node, A_NAMESPACE, "p").map(|p_node| parse_paragraph(p_node, resources)).collect()
}

/// Parses a paragraph: its level from `<a:pPr lvl>` and, in document order,
/// its runs (`<a:r>`), fields (`<a:fld>`) and line breaks (`<a:br>`).
/// A `<a:buNone>` marks a paragraph without bullet.
fn parse_paragraph(p_node: Node, resources: &PartResources) -> Paragraph {
    let p_pr = child(p_node, A_NAMESPACE, "pPr");

    let level = p_pr.and_then(|p_pr| p_pr.attribute("lvl")).and_then(|lvl| lvl.parse::<u32>().ok()).unwrap_or(0);
    let bullet_none = p_pr.is_some_and(|p_pr| child(p_pr, A_NAMESPACE, "buNone").is_some());

    let runs = p_node
        .children()
        .filter(|n| n.is_element() && n.tag_name().namespace() == Some(A_NAMESPACE))
        .filter_map(|run_node| match run_node.tag_name().name() {
            "r" | "fld" => Some(parse_run(run_node, resources)),
            "br" => Some(Run::plain(LINE_BREAK)),
            _ => None,
        })
        .collect();

    Paragraph { runs, level: if bullet_none { None } else { Some(level.min(MAX_LEVEL)) } }
}

/// Parses a single run or field: the text of `<a:t>` and from `<a:rPr>` the
/// _bold_ and _italic_ attributes plus a click hyperlink.
fn parse_run(r_node: Node, resources: &PartResources) -> Run {
    let mut formatting = Formatting::default();
    let mut hyperlink = None;

    if let Some(r_pr_node) = child(r_node, A_NAMESPACE, "rPr") {
        if let Some(b_attr) = r_pr_node.attribute("b") {
            formatting.bold = b_attr == "1" || b_attr.eq_ignore_ascii_case("true");
        }
        if let Some(i_attr) = r_pr_node.attribute("i") {
            formatting.italic = i_attr == "1" || i_attr.eq_ignore_ascii_case("true");
        }
        if let Some(click) = child(r_pr_node, A_NAMESPACE, "hlinkClick") {
            hyperlink = resources.link(click.attribute((RELS_NAMESPACE, "id")));
        }
    }

    let text = child(r_node, A_NAMESPACE, "t").and_then(|t_node| t_node.text()).unwrap_or_default().to_string();

    Run { text, formatting, hyperlink }
}

fn properties_fill(shape_node: Node, properties: &str, resources: &PartResources) -> Option<Fill> {
    child(shape_node, P_NAMESPACE, properties).and_then(|props| parse_fill(props, resources))
}

/// Reads the fill of a properties element (`<p:spPr>`, `<p:grpSpPr>`, `<p:bgPr>`).
fn parse_fill(props_node: Node, resources: &PartResources) -> Option<Fill> {
    props_node.children().filter(|n| n.is_element() && n.tag_name().namespace() == Some(A_NAMESPACE)).find_map(
        |fill_node| match fill_node.tag_name().name() {
            "noFill" => Some(Fill::NoFill),
            "solidFill" => {
                let rgb = child(fill_node, A_NAMESPACE, "srgbClr").and_then(|clr| clr.attribute("val"));
                Some(Fill::Solid(rgb.map(str::to_string)))
            }
            "gradFill" => Some(Fill::Gradient),
            "pattFill" => Some(Fill::Pattern),
            "blipFill" => {
                let embed =
                    child(fill_node, A_NAMESPACE, "blip").and_then(|blip| blip.attribute((RELS_NAMESPACE, "embed")));
                Some(Fill::Picture(resources.image(embed)))
            }
            _ => None,
        },
    )
}

fn shape_name(shape_node: Node, non_visual: &str) -> String {
    child(shape_node, P_NAMESPACE, non_visual)
        .and_then(|nv| child(nv, P_NAMESPACE, "cNvPr"))
        .and_then(|c_nv_pr| c_nv_pr.attribute("name"))
        .unwrap_or_default()
        .to_string()
}

fn placeholder(shape_node: Node, non_visual: &str) -> Option<PlaceholderKind> {
    child(shape_node, P_NAMESPACE, non_visual)
        .and_then(|nv| child(nv, P_NAMESPACE, "nvPr"))
        .and_then(|nv_pr| child(nv_pr, P_NAMESPACE, "ph"))
        .map(|ph| PlaceholderKind::from_ooxml(ph.attribute("type")))
}

fn is_tag(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(namespace)
}

fn child<'a, 'input>(node: Node<'a, 'input>, namespace: &str, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_tag(n, namespace, name))
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_tag(n, namespace, name))
}
