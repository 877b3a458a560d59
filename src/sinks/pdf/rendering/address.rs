//! Billing address and payment details, side by side.

use crate::sinks::pdf::blocks::{
    Alignment, Block, Cell, CellRange, CellStyle, Table, VerticalAlignment,
};
use crate::sinks::pdf::colour::colours;
use crate::sinks::pdf::config::{inches, InvoiceStyle};
use crate::sinks::pdf::fonts::FontWeight;

/// Space kept to the right of each section.
const GUTTER: f32 = 30.0;

/// A boxed single-column table with a bold heading row.
fn boxed_section<S: AsRef<str>>(
    style: &InvoiceStyle,
    heading: &str,
    lines: &[S],
    width: f32,
) -> Table {
    let rows: Vec<Vec<Cell>> = std::iter::once(heading)
        .chain(lines.iter().map(AsRef::as_ref))
        .map(|line| vec![Cell::from(line)])
        .collect();

    Table::new(rows)
        .with_column_widths([width])
        .aligned(Alignment::Left)
        .with_rule(CellRange::ALL, CellStyle::FontSize(style.font_size_body_pt))
        .with_rule(CellRange::row(0), CellStyle::Weight(FontWeight::Bold))
        .with_rule(CellRange::row(0), CellStyle::BottomPadding(8.0))
        .with_rule(
            CellRange::ALL,
            CellStyle::Box {
                width: 0.5,
                colour: colours::BLACK,
            },
        )
}

pub fn address_and_payment_blocks<S: AsRef<str>>(
    style: &InvoiceStyle,
    bill_to: &[S],
    payment: &[S],
) -> Vec<Block> {
    let column = inches(style.address_column_width_in);
    let bill_to = boxed_section(style, "BILL TO:", bill_to, column - GUTTER);
    let payment = boxed_section(style, "PAYMENT INFORMATION:", payment, column - GUTTER);

    let table = Table::new(vec![vec![bill_to.into(), payment.into()]])
        .with_column_widths([column, column])
        .with_rule(CellRange::ALL, CellStyle::VerticalAlign(VerticalAlignment::Top))
        .with_rule(CellRange::ALL, CellStyle::LeftPadding(0.0))
        .with_rule(CellRange::ALL, CellStyle::RightPadding(GUTTER))
        .spaced(0.0, 20.0);

    vec![table.into()]
}
