//! Parts of an empty Letter-sized `.docx` package with the `Normal` and
//! `TableGrid` styles, used when no template is available.

use crate::docx::package::Document;
use crate::docx::xml::Element;
use chrono::{SecondsFormat, Utc};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/><w:unhideWhenUsed/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:uiPriority w:val="59"/><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style></w:styles>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>docx-invoice</Application></Properties>"#;

/// Text width of a Letter page with one-inch margins, in twentieths of a point.
pub const TEXT_WIDTH_TWIPS: u32 = 8640;

fn core_properties_xml() -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>Invoice</dc:title><dc:creator>docx-invoice</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#
    )
}

fn section_properties() -> Element {
    Element::new("w:sectPr")
        .with_child(
            Element::new("w:pgSz")
                .with_attr("w:w", "12240")
                .with_attr("w:h", "15840"),
        )
        .with_child(
            Element::new("w:pgMar")
                .with_attr("w:top", "1440")
                .with_attr("w:right", "1440")
                .with_attr("w:bottom", "1440")
                .with_attr("w:left", "1440")
                .with_attr("w:header", "720")
                .with_attr("w:footer", "720")
                .with_attr("w:gutter", "0"),
        )
}

/// An empty document: a body holding only the section properties.
pub fn blank_document() -> Document {
    document_with_body(Vec::new())
}

/// A new package whose body holds `blocks` (`w:p` / `w:tbl` elements)
/// followed by the section properties.
pub fn document_with_body(blocks: Vec<Element>) -> Document {
    let mut body = Element::new("w:body");
    for block in blocks {
        body.push(block);
    }
    body.push(section_properties());

    let root = Element::new("w:document")
        .with_attr("xmlns:w", W_NS)
        .with_attr("xmlns:r", R_NS)
        .with_child(body);

    let parts = vec![
        ("[Content_Types].xml".to_string(), CONTENT_TYPES_XML.as_bytes().to_vec()),
        ("_rels/.rels".to_string(), PACKAGE_RELS_XML.as_bytes().to_vec()),
        ("word/document.xml".to_string(), Vec::new()),
        ("word/_rels/document.xml.rels".to_string(), DOCUMENT_RELS_XML.as_bytes().to_vec()),
        ("word/styles.xml".to_string(), STYLES_XML.as_bytes().to_vec()),
        ("docProps/core.xml".to_string(), core_properties_xml().into_bytes()),
        ("docProps/app.xml".to_string(), APP_XML.as_bytes().to_vec()),
    ];

    Document::from_parts(root, parts)
}

/// A `w:tbl` with the `TableGrid` style, `rows` × `cols` empty cells and
/// evenly split column widths.
pub fn grid_table(rows: usize, cols: usize) -> Element {
    let col_width = (TEXT_WIDTH_TWIPS / cols.max(1) as u32).to_string();

    let mut grid = Element::new("w:tblGrid");
    for _ in 0..cols {
        grid.push(Element::new("w:gridCol").with_attr("w:w", col_width.as_str()));
    }

    let mut table = Element::new("w:tbl")
        .with_child(
            Element::new("w:tblPr")
                .with_child(Element::new("w:tblStyle").with_attr("w:val", "TableGrid"))
                .with_child(
                    Element::new("w:tblW")
                        .with_attr("w:w", "0")
                        .with_attr("w:type", "auto"),
                )
                .with_child(Element::new("w:tblLook").with_attr("w:val", "04A0")),
        )
        .with_child(grid);

    for _ in 0..rows {
        let mut tr = Element::new("w:tr");
        for _ in 0..cols {
            tr.push(
                Element::new("w:tc")
                    .with_child(
                        Element::new("w:tcPr").with_child(
                            Element::new("w:tcW")
                                .with_attr("w:w", col_width.as_str())
                                .with_attr("w:type", "dxa"),
                        ),
                    )
                    .with_child(Element::new("w:p")),
            );
        }
        table.push(tr);
    }
    table
}
