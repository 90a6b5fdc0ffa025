use crate::core::substitution::LATE_FEE_LABEL;
use crate::core::FONT_FAMILY;
use crate::docx::style::WHITE;
use crate::docx::{Alignment, Document, TextContainer};
use crate::utils::error::{InvoiceError, Result};

pub const FINANCIAL_TABLE_INDEX: usize = 1;
pub const LATE_FEE_ROW: usize = 3;
pub const LATE_FEE_COLOR: &str = "D95132";

const BORDER_SIZE: u32 = 4;
const FONT_SIZE: u32 = 10;
const VALUE_COLUMN: usize = 1;

/// Styles the financial summary table and highlights the late-fee label
/// when one is shown. Must run after placeholder substitution.
pub fn style_financial_table(doc: &mut Document, apply_late_fee: bool) -> Result<()> {
    let mut table = doc
        .table(FINANCIAL_TABLE_INDEX)
        .ok_or_else(|| InvoiceError::styling("template has no financial summary table"))?;

    for (index, mut row) in table.rows().enumerate() {
        for mut cell in row.cells() {
            cell.set_borders(WHITE, BORDER_SIZE);
            cell.set_font(FONT_FAMILY, FONT_SIZE);
        }
        let mut value = row.cell(VALUE_COLUMN).ok_or_else(|| {
            InvoiceError::styling(format!("financial row {} has no value column", index))
        })?;
        value.set_alignment(Alignment::Right);
    }

    if apply_late_fee {
        highlight_late_fee(&mut table)?;
    }
    Ok(())
}

fn highlight_late_fee(table: &mut crate::docx::Table<'_>) -> Result<()> {
    let mut row = table
        .row(LATE_FEE_ROW)
        .ok_or_else(|| InvoiceError::styling("financial table has no late-fee row"))?;
    let mut cell = row
        .cell(0)
        .ok_or_else(|| InvoiceError::styling("late-fee row has no label cell"))?;

    let text = cell.text();
    if !text.contains(LATE_FEE_LABEL) {
        tracing::debug!("Late-fee label not present, skipping highlight");
        return Ok(());
    }

    cell.clear();
    if let Some(mut paragraph) = cell.paragraphs().next() {
        let mut run = paragraph.add_run(&text);
        run.set_color(LATE_FEE_COLOR);
        run.set_font_name(FONT_FAMILY);
    }
    Ok(())
}
