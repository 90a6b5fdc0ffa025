use crate::docx::blocks::{Cell, Paragraph, Run};
use crate::docx::xml::Element;

const P_PR_ORDER: &[&str] = &[
    "w:pStyle",
    "w:keepNext",
    "w:keepLines",
    "w:pageBreakBefore",
    "w:framePr",
    "w:widowControl",
    "w:numPr",
    "w:suppressLineNumbers",
    "w:pBdr",
    "w:shd",
    "w:tabs",
    "w:suppressAutoHyphens",
    "w:kinsoku",
    "w:wordWrap",
    "w:overflowPunct",
    "w:topLinePunct",
    "w:autoSpaceDE",
    "w:autoSpaceDN",
    "w:bidi",
    "w:adjustRightInd",
    "w:snapToGrid",
    "w:spacing",
    "w:ind",
    "w:contextualSpacing",
    "w:mirrorIndents",
    "w:suppressOverlap",
    "w:jc",
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

const R_PR_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
];

const TC_PR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:tcW",
    "w:gridSpan",
    "w:hMerge",
    "w:vMerge",
    "w:tcBorders",
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
];

const TC_BORDERS_ORDER: &[&str] = &[
    "w:top",
    "w:start",
    "w:left",
    "w:bottom",
    "w:end",
    "w:right",
    "w:insideH",
    "w:insideV",
    "w:tl2br",
    "w:tr2bl",
];

pub const WHITE: &str = "FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl Paragraph<'_> {
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.element_mut()
            .leading_child_or_insert("w:pPr")
            .set_ordered_child(
                Element::new("w:jc").with_attr("w:val", alignment.as_str()),
                P_PR_ORDER,
            );
    }
}

impl Run<'_> {
    fn properties(&mut self) -> &mut Element {
        self.element_mut().leading_child_or_insert("w:rPr")
    }

    /// Sets the Latin, complex-script-neutral and East Asian font slots.
    pub fn set_font_name(&mut self, name: &str) {
        let fonts = self.properties().ordered_child_or_insert("w:rFonts", R_PR_ORDER);
        fonts.set_attr("w:ascii", name);
        fonts.set_attr("w:hAnsi", name);
        fonts.set_attr("w:eastAsia", name);
    }

    /// Font size in points; stored as half-points.
    pub fn set_font_size(&mut self, points: u32) {
        self.properties().set_ordered_child(
            Element::new("w:sz").with_attr("w:val", (points * 2).to_string()),
            R_PR_ORDER,
        );
    }

    pub fn set_bold(&mut self, bold: bool) {
        let b = Element::new("w:b");
        let b = if bold { b } else { b.with_attr("w:val", "0") };
        self.properties().set_ordered_child(b, R_PR_ORDER);
    }

    pub fn set_color(&mut self, hex: &str) {
        self.properties().set_ordered_child(
            Element::new("w:color").with_attr("w:val", hex.to_ascii_uppercase()),
            R_PR_ORDER,
        );
    }
}

impl Cell<'_> {
    fn properties(&mut self) -> &mut Element {
        self.element_mut().leading_child_or_insert("w:tcPr")
    }

    /// Single-line borders on all four sides; `size` is in eighths of a point.
    pub fn set_borders(&mut self, color: &str, size: u32) {
        let borders = self
            .properties()
            .ordered_child_or_insert("w:tcBorders", TC_PR_ORDER);
        for side in ["w:top", "w:left", "w:bottom", "w:right"] {
            borders.set_ordered_child(
                Element::new(side)
                    .with_attr("w:val", "single")
                    .with_attr("w:sz", size.to_string())
                    .with_attr("w:space", "0")
                    .with_attr("w:color", color),
                TC_BORDERS_ORDER,
            );
        }
    }

    pub fn set_shading(&mut self, fill: &str) {
        self.properties().set_ordered_child(
            Element::new("w:shd")
                .with_attr("w:val", "clear")
                .with_attr("w:color", "auto")
                .with_attr("w:fill", fill.to_ascii_uppercase()),
            TC_PR_ORDER,
        );
    }

    /// Applies a font face and size to every run in the cell.
    pub fn set_font(&mut self, name: &str, points: u32) {
        for mut paragraph in self.paragraphs() {
            for mut run in paragraph.runs() {
                run.set_font_name(name);
                run.set_font_size(points);
            }
        }
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        for mut paragraph in self.paragraphs() {
            paragraph.set_alignment(alignment);
        }
    }
}
