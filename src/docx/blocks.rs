//! Borrowing views over the WordprocessingML body: paragraphs, runs, tables,
//! rows and cells. Each view wraps a `&mut Element` owned by the document
//! tree, so edits land directly in the parsed part.

use crate::docx::xml::{Element, Node};

/// Anything whose visible text can be read and replaced as a whole.
pub trait TextContainer {
    fn text(&self) -> String;

    /// Replaces the content with `text` in a single unformatted run.
    fn set_text(&mut self, text: &str);
}

/// A body-level block in document order.
pub enum Block<'a> {
    Paragraph(Paragraph<'a>),
    Table(Table<'a>),
}

pub struct Paragraph<'a> {
    element: &'a mut Element,
}

pub struct Run<'a> {
    element: &'a mut Element,
}

pub struct Table<'a> {
    element: &'a mut Element,
}

pub struct Row<'a> {
    element: &'a mut Element,
}

pub struct Cell<'a> {
    element: &'a mut Element,
}

impl<'a> Paragraph<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &*self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Element {
        &mut *self.element
    }

    /// Direct runs of the paragraph (runs nested in hyperlinks are skipped).
    pub fn runs(&mut self) -> impl Iterator<Item = Run<'_>> {
        self.element.children_named_mut("w:r").map(Run::new)
    }

    pub fn add_run(&mut self, text: &str) -> Run<'_> {
        Run::new(self.element.push_mut(build_run(text)))
    }
}

impl TextContainer for Paragraph<'_> {
    fn text(&self) -> String {
        paragraph_text(&*self.element)
    }

    fn set_text(&mut self, text: &str) {
        self.element.retain_elements(|e| e.name == "w:pPr");
        self.element.children.retain(|node| matches!(node, Node::Element(_)));
        self.element.push(build_run(text));
    }
}

impl<'a> Run<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &*self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Element {
        &mut *self.element
    }

    pub fn text(&self) -> String {
        run_text(&*self.element)
    }

    pub fn set_text(&mut self, text: &str) {
        write_run_text(&mut *self.element, text);
    }
}

impl<'a> Table<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &*self.element
    }

    pub fn row_count(&self) -> usize {
        self.element.children_named("w:tr").count()
    }

    pub fn rows(&mut self) -> impl Iterator<Item = Row<'_>> {
        self.element.children_named_mut("w:tr").map(Row::new)
    }

    pub fn row(&mut self, index: usize) -> Option<Row<'_>> {
        self.rows().nth(index)
    }

    /// Appends a row with one empty cell per grid column. Column widths from
    /// `w:tblGrid` are copied onto the new cells.
    pub fn add_row(&mut self) -> Row<'_> {
        let widths: Vec<Option<String>> = match self.element.child("w:tblGrid") {
            Some(grid) => grid
                .children_named("w:gridCol")
                .map(|col| col.attr("w:w").map(str::to_string))
                .collect(),
            None => vec![None; self.last_row_cell_count()],
        };

        let mut tr = Element::new("w:tr");
        for width in widths {
            let mut tc = Element::new("w:tc");
            if let Some(width) = width {
                tc.push(
                    Element::new("w:tcPr").with_child(
                        Element::new("w:tcW")
                            .with_attr("w:w", width)
                            .with_attr("w:type", "dxa"),
                    ),
                );
            }
            tc.push(Element::new("w:p"));
            tr.push(tc);
        }

        Row::new(self.element.push_mut(tr))
    }

    /// Removes the row at `index`; returns `false` when it does not exist.
    pub fn remove_row(&mut self, index: usize) -> bool {
        self.element.remove_nth("w:tr", index).is_some()
    }

    fn last_row_cell_count(&self) -> usize {
        self.element
            .children_named("w:tr")
            .last()
            .map(|tr| tr.children_named("w:tc").count())
            .unwrap_or(0)
    }
}

impl<'a> Row<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn cell_count(&self) -> usize {
        self.element.children_named("w:tc").count()
    }

    pub fn cells(&mut self) -> impl Iterator<Item = Cell<'_>> {
        self.element.children_named_mut("w:tc").map(Cell::new)
    }

    pub fn cell(&mut self, index: usize) -> Option<Cell<'_>> {
        self.cells().nth(index)
    }
}

impl<'a> Cell<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &*self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Element {
        &mut *self.element
    }

    pub fn paragraphs(&mut self) -> impl Iterator<Item = Paragraph<'_>> {
        self.element.children_named_mut("w:p").map(Paragraph::new)
    }

    /// Drops all content except the cell properties, leaving one empty
    /// paragraph (a cell must contain at least one).
    pub fn clear(&mut self) {
        self.element.retain_elements(|e| e.name == "w:tcPr");
        self.element.children.retain(|node| matches!(node, Node::Element(_)));
        self.element.push(Element::new("w:p"));
    }
}

impl TextContainer for Cell<'_> {
    fn text(&self) -> String {
        self.element
            .children_named("w:p")
            .map(paragraph_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.element.retain_elements(|e| e.name == "w:tcPr");
        self.element.children.retain(|node| matches!(node, Node::Element(_)));
        self.element
            .push(Element::new("w:p").with_child(build_run(text)));
    }
}

fn paragraph_text(paragraph: &Element) -> String {
    let mut text = String::new();
    for child in paragraph.elements() {
        match child.name.as_str() {
            "w:r" => text.push_str(&run_text(child)),
            "w:hyperlink" => {
                for run in child.children_named("w:r") {
                    text.push_str(&run_text(run));
                }
            }
            _ => {}
        }
    }
    text
}

fn run_text(run: &Element) -> String {
    let mut text = String::new();
    for child in run.elements() {
        match child.name.as_str() {
            "w:t" => {
                for node in &child.children {
                    if let Node::Text(t) = node {
                        text.push_str(t);
                    }
                }
            }
            "w:tab" | "w:ptab" => text.push('\t'),
            "w:br" => match child.attr("w:type") {
                None | Some("textWrapping") => text.push('\n'),
                Some(_) => {}
            },
            "w:cr" => text.push('\n'),
            "w:noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }
    text
}

fn build_run(text: &str) -> Element {
    let mut run = Element::new("w:r");
    write_run_text(&mut run, text);
    run
}

/// Rewrites the run content, keeping `w:rPr`. Tabs and line breaks become
/// `w:tab` and `w:br` elements.
fn write_run_text(run: &mut Element, text: &str) {
    run.retain_elements(|e| e.name == "w:rPr");
    run.children.retain(|node| matches!(node, Node::Element(_)));

    let mut pending = String::new();
    for ch in text.chars() {
        match ch {
            '\t' => {
                flush_text(run, &mut pending);
                run.push(Element::new("w:tab"));
            }
            '\n' | '\r' => {
                flush_text(run, &mut pending);
                run.push(Element::new("w:br"));
            }
            _ => pending.push(ch),
        }
    }
    flush_text(run, &mut pending);
}

fn flush_text(run: &mut Element, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let mut t = Element::new("w:t");
    if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
        t.set_attr("xml:space", "preserve");
    }
    run.push(t.with_text(std::mem::take(pending)));
}
