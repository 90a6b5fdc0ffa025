use crate::docx::{Block, Document, TextContainer};
use crate::domain::model::{render_value, InvoiceRequest};
use serde_json::{Map, Value};

pub const LATE_FEE_LABEL_TOKEN: &str = "{{LATE FEE:}}";
pub const LATE_FEE_AMOUNT_TOKEN: &str = "[latefee]";
pub const LATE_FEE_LABEL: &str = "LATE FEE";

/// Token → replacement pairs applied in insertion order. Re-inserting an
/// existing token replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionMap {
    entries: Vec<(String, String)>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    pub fn extend_from_json(&mut self, section: &Map<String, Value>) {
        for (token, value) in section {
            self.insert(token.as_str(), render_value(value));
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every occurrence of every token in `text`, in map order.
    /// Returns `None` when nothing matched.
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut result: Option<String> = None;
        for (token, value) in self.iter() {
            if token.is_empty() {
                continue;
            }
            let current = result.as_deref().unwrap_or(text);
            if current.contains(token) {
                result = Some(current.replace(token, value));
            }
        }
        result
    }
}

/// Merges `client_info`, `invoice_details` and `financials` (later sections
/// win on collision) and resolves the late-fee tokens.
pub fn build_substitutions(request: &InvoiceRequest) -> SubstitutionMap {
    let mut map = SubstitutionMap::new();
    map.extend_from_json(&request.client_info);
    map.extend_from_json(&request.invoice_details);
    map.extend_from_json(&request.financials);

    if request.apply_late_fee {
        map.insert(LATE_FEE_LABEL_TOKEN, LATE_FEE_LABEL);
    } else {
        map.insert(LATE_FEE_LABEL_TOKEN, "");
        map.insert(LATE_FEE_AMOUNT_TOKEN, "");
    }

    tracing::debug!("Built substitution map with {} tokens", map.len());
    map
}

/// Substitutes tokens in every body paragraph and every table cell.
/// Returns how many paragraphs and cells were rewritten.
pub fn replace_placeholders(doc: &mut Document, map: &SubstitutionMap) -> usize {
    let mut rewritten = 0;

    for block in doc.blocks() {
        match block {
            Block::Paragraph(mut paragraph) => {
                if let Some(text) = map.apply(&paragraph.text()) {
                    paragraph.set_text(&text);
                    rewritten += 1;
                }
            }
            Block::Table(mut table) => {
                for mut row in table.rows() {
                    for mut cell in row.cells() {
                        if let Some(text) = map.apply(&cell.text()) {
                            cell.set_text(&text);
                            rewritten += 1;
                        }
                    }
                }
            }
        }
    }

    tracing::debug!("Replaced placeholders in {} paragraphs/cells", rewritten);
    rewritten
}
