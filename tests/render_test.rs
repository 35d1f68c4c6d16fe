//! End-to-end rendering of DOCX packages built in memory.

mod common;

use common::{anchored_drawing, inline_drawing, page_body, DocxBuilder};
use docx_html::render::{self, RenderOptions};
use docx_html::{parse_bytes, DocxHtml, Error, FontCatalog};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

fn html_of(data: &[u8]) -> String {
    let doc = parse_bytes(data).unwrap();
    render::to_html(&doc, &RenderOptions::default()).unwrap()
}

#[test]
fn test_empty_body() {
    let html = html_of(&DocxBuilder::new().build());
    assert_eq!(page_body(&html), "");
    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n"));
    assert!(html.contains("<title>Converted Document</title>"));
}

#[test]
fn test_paragraphs_and_tables_stay_interleaved() {
    let data = DocxBuilder::new()
        .paragraph("first")
        .body("<w:tbl><w:tr><w:tc><w:p><w:r><w:t>t1</w:t></w:r></w:p></w:tc></w:tr></w:tbl>")
        .paragraph("second")
        .body("<w:tbl><w:tr><w:tc><w:p><w:r><w:t>t2</w:t></w:r></w:p></w:tc></w:tr></w:tbl>")
        .paragraph("third")
        .build();
    let html = html_of(&data);
    let body = page_body(&html);

    let positions: Vec<usize> = ["first", "t1", "second", "t2", "third"]
        .iter()
        .map(|s| body.find(&format!(">{}<", s)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(body.matches("<table>").count(), 2);
}

#[test]
fn test_centered_bold_hello() {
    let data = DocxBuilder::new()
        .body(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Hello</w:t></w:r></w:p>"#)
        .build();
    let html = html_of(&data);
    assert_eq!(
        page_body(&html),
        "<div class=\"paragraph\"><div style=\"text-align: center;\"><span style=\"font-weight: bold\">Hello</span></div></div>"
    );
}

#[test]
fn test_alignment_wrappers() {
    let data = DocxBuilder::new()
        .body(r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>r</w:t></w:r></w:p>"#)
        .body(r#"<w:p><w:pPr><w:jc w:val="both"/></w:pPr><w:r><w:t>j</w:t></w:r></w:p>"#)
        .body(r#"<w:p><w:r><w:t>l</w:t></w:r></w:p>"#)
        .build();
    let html = html_of(&data);
    let body = page_body(&html);
    assert!(body.contains("<div style=\"text-align: right;\"><span style=\"\">r</span>"));
    assert!(body.contains("<div><span style=\"\">j</span>"));
    assert!(body.contains("<div><span style=\"\">l</span>"));
}

#[test]
fn test_full_style_declaration_list() {
    let data = DocxBuilder::new()
        .body(r#"<w:p><w:r><w:rPr><w:b/><w:i/><w:u w:val="single"/><w:sz w:val="24"/></w:rPr><w:t>styled</w:t></w:r></w:p>"#)
        .build();
    let html = html_of(&data);
    assert!(html.contains(
        "<span style=\"font-weight: bold; font-style: italic; text-decoration: underline; font-size: 12pt\">styled</span>"
    ));
}

#[test]
fn test_whitespace_run_emits_no_span() {
    let data = DocxBuilder::new()
        .body(r#"<w:p><w:r><w:t xml:space="preserve">   </w:t></w:r></w:p>"#)
        .build();
    let html = html_of(&data);
    assert_eq!(
        page_body(&html),
        "<div class=\"paragraph\"><div></div></div>"
    );
}

#[test]
fn test_anchored_image_is_positioned() {
    let data = DocxBuilder::new()
        .image("rId5", "image1.png", PNG)
        .body(&format!(
            "<w:p><w:r>{}</w:r></w:p>",
            anchored_drawing("rId5", 914_400, 457_200)
        ))
        .build();
    let html = html_of(&data);
    assert!(html.contains(&format!(
        "<div class=\"image-container\" style=\"position: absolute; left: 1in; top: 0.5in;\"><img src=\"{}\" alt=\"Document Image\"/></div>",
        PNG_URI
    )));
}

#[test]
fn test_image_renders_before_text_in_same_run() {
    let data = DocxBuilder::new()
        .image("rId5", "image1.png", PNG)
        .body(&format!(
            "<w:p><w:r><w:t>after</w:t>{}</w:r></w:p>",
            inline_drawing("rId5")
        ))
        .build();
    let html = html_of(&data);
    let img = html.find("<img").unwrap();
    let text = html.find(">after<").unwrap();
    assert!(img < text);
    assert!(html.contains("<div class=\"image-container\"><img"));
}

#[test]
fn test_table_cell_image_is_never_positioned() {
    let data = DocxBuilder::new()
        .image("rId5", "image1.png", PNG)
        .body(&format!(
            "<w:tbl><w:tr><w:tc><w:p><w:r>{}</w:r></w:p></w:tc></w:tr></w:tbl>",
            anchored_drawing("rId5", 914_400, 914_400)
        ))
        .build();
    let html = html_of(&data);
    assert!(!html.contains("position: absolute"));
    assert!(html.contains(&format!(
        "<td><div class=\"image-container\"><img src=\"{}\" alt=\"Table Cell Image\"/></div></td>",
        PNG_URI
    )));
}

#[test]
fn test_missing_image_part_is_skipped() {
    let data = DocxBuilder::new()
        .dangling_image("rId7", "gone.png")
        .body(&format!(
            "<w:p><w:r>{}<w:t>caption</w:t></w:r></w:p>",
            inline_drawing("rId7")
        ))
        .build();
    let doc = parse_bytes(&data).unwrap();
    let result = render::to_html_with_stats(&doc, &RenderOptions::default()).unwrap();

    assert!(!result.content.contains("<img"));
    assert!(result.content.contains("<span style=\"\">caption</span>"));
    assert_eq!(result.stats.missing_image_count, 1);
}

#[test]
fn test_undecodable_image_leaves_rest_of_document() {
    let damaged = PNG.repeat(64);
    let data = DocxBuilder::new()
        .paragraph("before")
        .damaged_image("rId5", "image1.png", &damaged)
        .image("rId6", "image2.png", PNG)
        .body(&format!(
            "<w:p><w:r>{}{}<w:t>cap</w:t></w:r></w:p>",
            inline_drawing("rId5"),
            inline_drawing("rId6")
        ))
        .paragraph("after")
        .build();
    let doc = parse_bytes(&data).unwrap();
    let result = render::to_html_with_stats(&doc, &RenderOptions::default()).unwrap();

    assert_eq!(result.stats.image_count, 1);
    assert_eq!(result.stats.missing_image_count, 1);

    let body = page_body(&result.content);
    let before = body.find(">before<").unwrap();
    let image = body.find(&format!("<img src=\"{}\"", PNG_URI)).unwrap();
    let caption = body.find(">cap<").unwrap();
    let after = body.find(">after<").unwrap();
    assert!(before < image && image < caption && caption < after);
    assert_eq!(body.matches("<img").count(), 1);
}

#[test]
fn test_bare_underline_emits_no_declaration() {
    let data = DocxBuilder::new()
        .body(r#"<w:p><w:r><w:rPr><w:u/></w:rPr><w:t>plain</w:t></w:r></w:p>"#)
        .build();
    let html = html_of(&data);
    assert!(html.contains("<span style=\"\">plain</span>"));
}

#[test]
fn test_empty_image_part_still_embeds() {
    let data = DocxBuilder::new()
        .image("rId5", "blank.png", b"")
        .body(&format!("<w:p><w:r>{}</w:r></w:p>", inline_drawing("rId5")))
        .build();
    let html = html_of(&data);
    assert!(html.contains("<img src=\"data:image/png;base64,\" alt=\"Document Image\"/>"));
}

#[test]
fn test_unknown_subtype_falls_back_to_png() {
    let data = DocxBuilder::new()
        .image("rId5", "image1.emf", b"emf")
        .body(&format!("<w:p><w:r>{}</w:r></w:p>", inline_drawing("rId5")))
        .build();
    let html = html_of(&data);
    assert!(html.contains("src=\"data:image/png;base64,ZW1m\""));
}

#[test]
fn test_jpeg_subtype_is_kept() {
    let data = DocxBuilder::new()
        .image("rId5", "photo.jpeg", b"jpg")
        .body(&format!("<w:p><w:r>{}</w:r></w:p>", inline_drawing("rId5")))
        .build();
    let html = html_of(&data);
    assert!(html.contains("src=\"data:image/jpeg;base64,anBn\""));
}

#[test]
fn test_metadata_title_and_author() {
    let data = DocxBuilder::new()
        .core("Board Minutes", "R. Analyst")
        .paragraph("x")
        .build();
    let doc = parse_bytes(&data).unwrap();
    assert!(doc.metadata.created.is_some());

    let html = render::to_html(&doc, &RenderOptions::default()).unwrap();
    assert!(html.contains("<title>Board Minutes</title>"));
    assert!(html.contains("<meta name=\"author\" content=\"R. Analyst\">"));
}

#[test]
fn test_parallel_and_sequential_agree() {
    let mut builder = DocxBuilder::new().image("rId5", "image1.png", PNG);
    for i in 0..40 {
        builder = builder.paragraph(&format!("p{}", i)).body(&format!(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>c{}</w:t>{}</w:r></w:p></w:tc></w:tr></w:tbl>",
            i,
            inline_drawing("rId5")
        ));
    }
    let doc = parse_bytes(&builder.build()).unwrap();

    let parallel = render::to_html_with_stats(&doc, &RenderOptions::default()).unwrap();
    let sequential =
        render::to_html_with_stats(&doc, &RenderOptions::default().sequential()).unwrap();
    assert_eq!(parallel.content, sequential.content);
    assert_eq!(parallel.stats, sequential.stats);
    assert_eq!(parallel.stats.table_count, 40);
    assert_eq!(parallel.stats.image_count, 40);
    // sectPr appended by the builder
    assert_eq!(parallel.stats.skipped_node_count, 1);
}

#[test]
fn test_font_embedding() {
    let fonts = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(fonts.path().join("sans")).unwrap();
    std::fs::write(fonts.path().join("sans/Body-Regular.ttf"), b"font").unwrap();

    let data = DocxBuilder::new().paragraph("hello").build();
    let html = DocxHtml::new()
        .with_font_dir(fonts.path())
        .with_font("Body-Regular.ttf")
        .parse_bytes(&data)
        .unwrap()
        .to_html()
        .unwrap();

    assert!(html.starts_with("<style>\n@font-face { font-family: 'Body-Regular'; src: url(data:font/ttf;base64,Zm9udA==) format('truetype'); }"));
    assert!(html.contains("body { font-family: 'Body-Regular', Arial, sans-serif;"));
    assert!(html.contains("</style>\n<!DOCTYPE html>"));
}

#[test]
fn test_unknown_font_is_pass_through() {
    let data = DocxBuilder::new().paragraph("hello").build();
    let doc = parse_bytes(&data).unwrap();

    let plain = render::to_html(&doc, &RenderOptions::default()).unwrap();
    let with_unknown = render::to_html(
        &doc,
        &RenderOptions::new()
            .with_font_catalog(FontCatalog::new())
            .with_font("Missing.ttf"),
    )
    .unwrap();
    assert_eq!(plain, with_unknown);
}

#[test]
fn test_unreadable_font_fails() {
    let mut catalog = FontCatalog::new();
    catalog.insert("Broken.ttf", "/definitely/not/here/Broken.ttf");

    let doc = parse_bytes(&DocxBuilder::new().paragraph("x").build()).unwrap();
    let result = render::to_html(
        &doc,
        &RenderOptions::new()
            .with_font_catalog(catalog)
            .with_font("Broken.ttf"),
    );
    assert!(matches!(result, Err(Error::FontRead(_))));
}

#[test]
fn test_html_special_characters_are_escaped() {
    let data = DocxBuilder::new()
        .paragraph("Fish &amp; Chips &lt;3")
        .build();
    let html = html_of(&data);
    assert!(html.contains("<span style=\"\">Fish &amp; Chips &lt;3</span>"));
}

#[test]
fn test_text_output() {
    let data = DocxBuilder::new()
        .paragraph("Heading")
        .body("<w:tbl><w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr></w:tbl>")
        .build();
    let result = DocxHtml::new().parse_bytes(&data).unwrap();
    assert_eq!(result.to_text(), "Heading\n\na\tb");
}
