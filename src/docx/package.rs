use crate::docx::blocks::{Block, Paragraph, Table};
use crate::docx::xml::{self, Element, Node};
use crate::utils::error::{InvoiceError, Result};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
}

/// A `.docx` package: every zip entry is kept as-is except the main
/// document part, which is parsed into an editable tree.
#[derive(Debug, Clone)]
pub struct Document {
    entries: Vec<PackageEntry>,
    root: Element,
}

impl Document {
    /// Assembles a package from loose parts; `root` becomes the main part.
    pub fn from_parts(root: Element, parts: Vec<(String, Vec<u8>)>) -> Self {
        let mut entries: Vec<PackageEntry> = parts
            .into_iter()
            .map(|(name, data)| PackageEntry {
                name,
                data,
                is_dir: false,
            })
            .collect();
        if !entries.iter().any(|e| e.name == MAIN_DOCUMENT_PART) {
            entries.push(PackageEntry {
                name: MAIN_DOCUMENT_PART.to_string(),
                data: Vec::new(),
                is_dir: false,
            });
        }
        Self { entries, root }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());
        let mut root = None;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            let is_dir = file.is_dir();

            let mut data = Vec::new();
            if !is_dir {
                file.read_to_end(&mut data)?;
            }

            if name == MAIN_DOCUMENT_PART {
                let text = std::str::from_utf8(&data).map_err(|e| {
                    InvoiceError::document(format!("{} is not valid UTF-8: {}", name, e))
                })?;
                root = Some(xml::parse(text)?);
                data.clear();
            }

            entries.push(PackageEntry { name, data, is_dir });
        }

        let root = root.ok_or_else(|| {
            InvoiceError::document(format!("package has no {} part", MAIN_DOCUMENT_PART))
        })?;
        if root.child("w:body").is_none() {
            return Err(InvoiceError::document("main document part has no w:body"));
        }

        tracing::debug!("Loaded document package with {} parts", entries.len());
        Ok(Self { entries, root })
    }

    /// Serializes the whole package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let document_xml = xml::write(&self.root)?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
                continue;
            }
            zip.start_file(entry.name.as_str(), options)?;
            if entry.name == MAIN_DOCUMENT_PART {
                zip.write_all(&document_xml)?;
            } else {
                zip.write_all(&entry.data)?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.name != MAIN_DOCUMENT_PART)
            .map(|e| e.data.as_slice())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.child("w:body")
    }

    pub fn body_mut(&mut self) -> Result<&mut Element> {
        self.root
            .child_mut("w:body")
            .ok_or_else(|| InvoiceError::document("main document part has no w:body"))
    }

    /// Body-level paragraphs and tables in document order.
    pub fn blocks(&mut self) -> impl Iterator<Item = Block<'_>> {
        self.root
            .children_named_mut("w:body")
            .flat_map(|body| body.children.iter_mut())
            .filter_map(|node| match node {
                Node::Element(e) => match e.name.as_str() {
                    "w:p" => Some(Block::Paragraph(Paragraph::new(e))),
                    "w:tbl" => Some(Block::Table(Table::new(e))),
                    _ => None,
                },
                Node::Text(_) => None,
            })
    }

    pub fn paragraphs(&mut self) -> impl Iterator<Item = Paragraph<'_>> {
        self.blocks().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&mut self) -> impl Iterator<Item = Table<'_>> {
        self.blocks().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    pub fn table(&mut self, index: usize) -> Option<Table<'_>> {
        self.tables().nth(index)
    }

    pub fn table_count(&self) -> usize {
        self.body()
            .map(|body| body.children_named("w:tbl").count())
            .unwrap_or(0)
    }
}
