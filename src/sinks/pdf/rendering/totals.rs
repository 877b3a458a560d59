use crate::invoice::format_currency;
use crate::sinks::pdf::blocks::{Alignment, Block, Cell, CellRange, CellStyle, Table};
use crate::sinks::pdf::config::{inches, InvoiceStyle};
use crate::sinks::pdf::fonts::FontWeight;
use rust_decimal::Decimal;

pub fn totals_blocks(
    style: &InvoiceStyle,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
) -> Vec<Block> {
    let rows = vec![
        vec![Cell::from("Sub Total:"), Cell::from(format_currency(subtotal))],
        vec![Cell::from("Sales Tax:"), Cell::from(format_currency(tax))],
        vec![Cell::from("TOTAL:"), Cell::from(format_currency(total))],
    ];

    let table = Table::new(rows)
        .with_column_widths(style.totals_column_widths_in.map(inches))
        .with_rule(CellRange::ALL, CellStyle::Align(Alignment::Right))
        .with_rule(CellRange::ALL, CellStyle::FontSize(style.font_size_body_pt))
        .with_rule(CellRange::row(-1), CellStyle::Weight(FontWeight::Bold))
        .with_rule(
            CellRange::row(-1),
            CellStyle::FontSize(style.font_size_table_header_pt),
        )
        .with_rule(CellRange::row(-1), CellStyle::TopPadding(12.0))
        .spaced(6.0, 0.0);

    vec![table.into()]
}
