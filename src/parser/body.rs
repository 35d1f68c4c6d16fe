//! WordprocessingML body parsing.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::model::{
    Alignment, Anchor, Block, Drawing, Paragraph, Run, Table, TableCell, TableRow, TextStyle,
};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const WPD_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Structural content of the main document part.
#[derive(Debug, Default)]
pub(crate) struct Body {
    pub blocks: Vec<Block>,
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
}

pub(crate) fn parse_body(xml: &str) -> Result<Body> {
    let doc = roxmltree::Document::parse(xml)?;
    let body_node = wml(doc.root_element(), "body")
        .ok_or_else(|| Error::MissingPart("w:body".to_string()))?;

    let mut body = Body::default();
    for node in body_node.children().filter(|n| n.is_element()) {
        if is_wml(node, "p") {
            body.blocks.push(Block::Paragraph(body.paragraphs.len()));
            body.paragraphs.push(parse_paragraph(node));
        } else if is_wml(node, "tbl") {
            body.blocks.push(Block::Table(body.tables.len()));
            body.tables.push(parse_table(node));
        } else {
            body.blocks
                .push(Block::Unknown(node.tag_name().name().to_string()));
        }
    }

    Ok(body)
}

fn is_wml(node: Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn is_ns(node: Node, ns: &str, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(ns)
}

fn wml<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_wml(*n, name))
}

fn wml_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_wml(*n, name))
}

fn wml_val<'a, 'input>(node: Node<'a, 'input>) -> Option<&'a str> {
    node.attribute((WML_NS, "val"))
}

fn parse_paragraph(node: Node) -> Paragraph {
    let alignment = wml(node, "pPr")
        .and_then(|ppr| wml(ppr, "jc"))
        .and_then(wml_val)
        .map(Alignment::from_jc)
        .unwrap_or_default();

    let runs = node
        .children()
        .flat_map(|child| {
            if is_wml(child, "r") {
                vec![child]
            } else if is_wml(child, "hyperlink") {
                wml_children(child, "r").collect()
            } else {
                Vec::new()
            }
        })
        .map(parse_run)
        .collect();

    Paragraph { alignment, runs }
}

fn parse_run(node: Node) -> Run {
    let style = wml(node, "rPr").map(parse_run_properties).unwrap_or_default();

    let mut text = String::new();
    for child in node.children().filter(|n| n.is_element()) {
        if is_wml(child, "t") {
            text.push_str(child.text().unwrap_or_default());
        } else if is_wml(child, "tab") {
            text.push('\t');
        } else if is_wml(child, "br") || is_wml(child, "cr") {
            text.push('\n');
        }
    }

    let drawings = node
        .descendants()
        .filter(|n| is_wml(*n, "drawing"))
        .map(parse_drawing)
        .collect();

    Run {
        text,
        style,
        drawings,
    }
}

fn parse_run_properties(rpr: Node) -> TextStyle {
    TextStyle {
        bold: wml(rpr, "b").map(toggle_value),
        italic: wml(rpr, "i").map(toggle_value),
        // A bare <w:u/> names no line style
        underline: wml(rpr, "u").and_then(wml_val).map(|v| v != "none"),
        font_size: wml(rpr, "sz")
            .and_then(wml_val)
            .and_then(|v| v.parse::<f32>().ok())
            .map(|half_points| half_points / 2.0),
    }
}

/// `<w:b/>` switches on; `w:val` of `0`, `false` or `off` switches off.
fn toggle_value(node: Node) -> bool {
    !matches!(wml_val(node), Some("0" | "false" | "off"))
}

fn parse_drawing(drawing: Node) -> Drawing {
    let embed = drawing
        .descendants()
        .find(|n| is_ns(*n, DML_NS, "blip"))
        .and_then(|blip| blip.attribute((REL_NS, "embed")))
        .map(str::to_string);

    let anchor = drawing
        .descendants()
        .find(|n| is_ns(*n, WPD_NS, "anchor"))
        .map(|anchor| Anchor {
            horizontal: position_offset(anchor, "positionH"),
            vertical: position_offset(anchor, "positionV"),
        });

    Drawing { embed, anchor }
}

fn position_offset(anchor: Node, axis: &str) -> Option<String> {
    anchor
        .descendants()
        .find(|n| is_ns(*n, WPD_NS, axis))?
        .descendants()
        .find(|n| is_ns(*n, WPD_NS, "posOffset"))?
        .text()
        .map(str::to_string)
}

fn parse_table(node: Node) -> Table {
    let rows = wml_children(node, "tr")
        .map(|tr| {
            TableRow::new(
                wml_children(tr, "tc")
                    .map(|tc| {
                        let paragraphs = wml_children(tc, "p").map(parse_paragraph).collect();
                        TableCell::with_content(paragraphs)
                    })
                    .collect(),
            )
        })
        .collect();

    Table { rows }
}
