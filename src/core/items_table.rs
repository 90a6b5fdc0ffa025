use crate::core::format::{format_currency, format_quantity};
use crate::core::FONT_FAMILY;
use crate::docx::style::WHITE;
use crate::docx::{Alignment, Document, TextContainer};
use crate::domain::model::LineItem;
use crate::utils::error::{InvoiceError, Result};

pub const ITEMS_TABLE_INDEX: usize = 0;
pub const ITEM_FILL: &str = "DDEFD5";
pub const ITEM_BORDER_SIZE: u32 = 6;
pub const ITEM_FONT_SIZE: u32 = 10;

const PLACEHOLDER_ROW: usize = 1;
const COLUMN_ALIGNMENT: [Alignment; 4] = [
    Alignment::Left,
    Alignment::Right,
    Alignment::Center,
    Alignment::Right,
];

/// Replaces the placeholder row of the items table with one styled row per
/// item. Afterwards the table holds the header row plus `items.len()` rows.
pub fn rebuild_items_table(doc: &mut Document, items: &[LineItem]) -> Result<()> {
    let mut table = doc.table(ITEMS_TABLE_INDEX).ok_or_else(|| {
        InvoiceError::document("template has no line-items table")
    })?;

    for mut row in table.rows() {
        for mut cell in row.cells() {
            cell.set_borders(WHITE, ITEM_BORDER_SIZE);
        }
    }

    while table.row_count() > PLACEHOLDER_ROW + 1 {
        table.remove_row(PLACEHOLDER_ROW + 1);
    }

    for item in items {
        let values = [
            item.description.clone(),
            format_currency(item.unit_price),
            format_quantity(item.quantity),
            format_currency(item.total),
        ];

        let mut row = table.add_row();
        if row.cell_count() < values.len() {
            return Err(InvoiceError::document(format!(
                "line-items table needs {} columns, found {}",
                values.len(),
                row.cell_count()
            )));
        }

        for (column, mut cell) in row.cells().enumerate() {
            if let Some(value) = values.get(column) {
                cell.set_text(value);
            }
            cell.set_shading(ITEM_FILL);
            cell.set_borders(WHITE, ITEM_BORDER_SIZE);
            cell.set_font(FONT_FAMILY, ITEM_FONT_SIZE);
            cell.set_alignment(
                COLUMN_ALIGNMENT
                    .get(column)
                    .copied()
                    .unwrap_or(Alignment::Left),
            );
        }
    }

    if table.row_count() > PLACEHOLDER_ROW {
        table.remove_row(PLACEHOLDER_ROW);
    }

    tracing::debug!(
        "Rebuilt line-items table: {} item rows",
        table.row_count().saturating_sub(1)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::blank::{document_with_body, grid_table};
    use crate::docx::xml::Element;
    use crate::docx::{Cell, Table};

    fn item(description: &str, unit_price: f64, quantity: f64, total: f64) -> LineItem {
        LineItem {
            description: description.to_string(),
            unit_price,
            quantity,
            total,
        }
    }

    fn items_template(extra_rows: usize) -> Document {
        let mut element = grid_table(2 + extra_rows, 4);
        {
            let mut table = Table::new(&mut element);
            let header = ["DESCRIPTION", "UNIT PRICE", "QUANTITY", "TOTAL"];
            let mut row = table.row(0).unwrap();
            for (i, text) in header.iter().enumerate() {
                row.cell(i).unwrap().set_text(text);
            }
            let mut row = table.row(1).unwrap();
            row.cell(0).unwrap().set_text("{{service_description}}");
        }
        document_with_body(vec![element])
    }

    fn cell_xml<'a>(cell: &'a Cell<'_>, name: &str) -> Option<&'a Element> {
        cell.element().child("w:tcPr").and_then(|pr| pr.child(name))
    }

    #[test]
    fn test_rows_follow_item_count() {
        for n in [0, 1, 3] {
            let mut doc = items_template(0);
            let items: Vec<LineItem> = (0..n)
                .map(|i| item(&format!("Item {}", i), 100.0, 1.0, 100.0))
                .collect();

            rebuild_items_table(&mut doc, &items).unwrap();
            assert_eq!(doc.table(0).unwrap().row_count(), n + 1);
        }
    }

    #[test]
    fn test_stale_rows_are_dropped() {
        let mut doc = items_template(3);
        rebuild_items_table(&mut doc, &[item("Design", 10.0, 1.0, 10.0)]).unwrap();

        let mut table = doc.table(0).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().cell(0).unwrap().text(), "DESCRIPTION");
        assert_eq!(table.row(1).unwrap().cell(0).unwrap().text(), "Design");
    }

    #[test]
    fn test_cell_values_and_styles() {
        let mut doc = items_template(0);
        rebuild_items_table(
            &mut doc,
            &[item("Logo design", 1_500_000.0, 1.5, 2_250_000.0)],
        )
        .unwrap();

        let mut table = doc.table(0).unwrap();
        let mut row = table.row(1).unwrap();
        let texts: Vec<String> = row.cells().map(|c| c.text()).collect();
        assert_eq!(
            texts,
            vec!["Logo design", "Rp 1.500.000", "1.5", "Rp 2.250.000"]
        );

        let cell = row.cell(2).unwrap();
        let shading = cell_xml(&cell, "w:shd").unwrap();
        assert_eq!(shading.attr("w:fill"), Some("DDEFD5"));
        let top = cell_xml(&cell, "w:tcBorders")
            .and_then(|b| b.child("w:top"))
            .unwrap();
        assert_eq!(top.attr("w:color"), Some("FFFFFF"));
        assert_eq!(top.attr("w:sz"), Some("6"));

        let paragraph = cell.element().child("w:p").unwrap();
        let jc = paragraph.child("w:pPr").and_then(|p| p.child("w:jc")).unwrap();
        assert_eq!(jc.attr("w:val"), Some("center"));
        let run_pr = paragraph.child("w:r").and_then(|r| r.child("w:rPr")).unwrap();
        assert_eq!(run_pr.child("w:rFonts").unwrap().attr("w:ascii"), Some("Courier New"));
        assert_eq!(run_pr.child("w:sz").unwrap().attr("w:val"), Some("20"));
    }

    #[test]
    fn test_header_gets_white_borders() {
        let mut doc = items_template(0);
        rebuild_items_table(&mut doc, &[]).unwrap();

        let mut table = doc.table(0).unwrap();
        let mut header = table.row(0).unwrap();
        let cell = header.cell(0).unwrap();
        let left = cell_xml(&cell, "w:tcBorders")
            .and_then(|b| b.child("w:left"))
            .unwrap();
        assert_eq!(left.attr("w:color"), Some("FFFFFF"));
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let mut doc = document_with_body(vec![]);
        let err = rebuild_items_table(&mut doc, &[]).unwrap_err();
        assert!(matches!(err, InvoiceError::DocumentError { .. }));
    }

    #[test]
    fn test_narrow_table_is_an_error() {
        let mut doc = document_with_body(vec![grid_table(2, 3)]);
        let err = rebuild_items_table(&mut doc, &[item("x", 1.0, 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, InvoiceError::DocumentError { .. }));
    }
}
