//! The line item table.
//!
//! The header row is white bold text on the header background and repeats
//! when the table continues onto another page. Body rows are black on white
//! with a full grid; rate and amount are right aligned.

use crate::invoice::{format_currency, LineItem};
use crate::sinks::pdf::blocks::{Alignment, Block, Cell, CellRange, CellStyle, Table};
use crate::sinks::pdf::colour::colours;
use crate::sinks::pdf::config::{inches, InvoiceStyle};
use crate::sinks::pdf::fonts::FontWeight;

pub const ITEM_HEADINGS: [&str; 4] = ["ITEM", "DESCRIPTION", "RATE", "AMOUNT"];

pub fn items_table_blocks(style: &InvoiceStyle, items: &[LineItem]) -> Vec<Block> {
    let header: Vec<Cell> = ITEM_HEADINGS.iter().map(|&h| Cell::from(h)).collect();
    let rows: Vec<Vec<Cell>> = std::iter::once(header)
        .chain(items.iter().enumerate().map(|(i, item)| {
            vec![
                Cell::from((i + 1).to_string()),
                Cell::from(item.description()),
                Cell::from(format_currency(item.rate())),
                Cell::from(format_currency(item.amount())),
            ]
        }))
        .collect();

    let table = Table::new(rows)
        .with_column_widths(style.item_column_widths_in.map(inches))
        .with_repeat_rows(1)
        .with_rule(CellRange::row(0), CellStyle::Background(style.header_background))
        .with_rule(CellRange::row(0), CellStyle::TextColour(colours::WHITE))
        .with_rule(CellRange::ALL, CellStyle::Align(Alignment::Left))
        .with_rule(CellRange::new((2, 1), (-1, -1)), CellStyle::Align(Alignment::Right))
        .with_rule(CellRange::row(0), CellStyle::Weight(FontWeight::Bold))
        .with_rule(
            CellRange::row(0),
            CellStyle::FontSize(style.font_size_table_header_pt),
        )
        .with_rule(CellRange::row(0), CellStyle::BottomPadding(12.0))
        .with_rule(CellRange::rows_from(1), CellStyle::Background(colours::WHITE))
        .with_rule(CellRange::rows_from(1), CellStyle::TextColour(colours::BLACK))
        .with_rule(
            CellRange::ALL,
            CellStyle::Grid {
                width: 1.0,
                colour: colours::BLACK,
            },
        )
        .with_rule(CellRange::rows_from(1), CellStyle::Weight(FontWeight::Regular))
        .with_rule(
            CellRange::rows_from(1),
            CellStyle::FontSize(style.font_size_table_pt),
        );

    vec![table.into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(items: &[LineItem]) -> Table {
        match items_table_blocks(&InvoiceStyle::default(), items).pop() {
            Some(Block::Table(table)) => table,
            _ => panic!("expected a table"),
        }
    }

    #[test]
    fn rows_are_numbered_and_formatted() {
        let table = table(&[
            LineItem::new("Consulting", dec!(100)),
            LineItem::new("Hosting", dec!(1234.5)),
        ]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.rows[0],
            ITEM_HEADINGS.iter().map(|&h| Cell::from(h)).collect::<Vec<_>>()
        );
        assert_eq!(
            table.rows[2],
            vec![
                Cell::from("2"),
                Cell::from("Hosting"),
                Cell::from("$1,234.50"),
                Cell::from("$1,234.50"),
            ]
        );
    }

    #[test]
    fn header_and_body_styles() {
        let table = table(&[LineItem::new("Consulting", dec!(100))]);

        let header = table.cell_style(2, 0);
        assert_eq!(header.background, Some(colours::NAVY));
        assert_eq!(header.text.colour, colours::WHITE);
        assert_eq!(header.text.weight, FontWeight::Bold);
        assert_eq!(header.text.alignment, Alignment::Left);

        let description = table.cell_style(1, 1);
        assert_eq!(description.background, Some(colours::WHITE));
        assert_eq!(description.text.colour, colours::BLACK);
        assert_eq!(description.text.alignment, Alignment::Left);
        assert_eq!(description.text.size, 10.0);

        assert_eq!(table.cell_style(0, 1).text.alignment, Alignment::Left);
        assert_eq!(table.cell_style(2, 1).text.alignment, Alignment::Right);
        assert_eq!(table.cell_style(3, 1).text.alignment, Alignment::Right);
    }

    #[test]
    fn column_widths_are_fixed() {
        let table = table(&[LineItem::new("Consulting", dec!(100))]);
        assert_eq!(
            table.column_widths,
            vec![Some(36.0), Some(216.0), Some(108.0), Some(108.0)]
        );
        assert_eq!(table.repeat_rows, 1);
    }
}
