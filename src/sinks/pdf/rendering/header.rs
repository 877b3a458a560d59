//! Invoice header rendering.
//!
//! The company name is centred in large type at the top of the first page,
//! followed by a smaller "INVOICE" label and the invoice number and date.

use crate::sinks::pdf::blocks::{Alignment, Block, Paragraph, TextStyle};
use crate::sinks::pdf::config::InvoiceStyle;
use crate::sinks::pdf::fonts::FontWeight;

pub fn header_blocks(style: &InvoiceStyle, company_name: &str) -> Vec<Block> {
    let title = TextStyle::new(FontWeight::Bold, style.font_size_title_pt)
        .aligned(Alignment::Centre)
        .spaced(0.0, 30.0);
    let label = TextStyle::new(FontWeight::Bold, style.font_size_label_pt).spaced(0.0, 20.0);

    vec![
        Paragraph::new(company_name, title).into(),
        Paragraph::new("INVOICE", label).into(),
    ]
}

pub fn invoice_info_blocks(style: &InvoiceStyle, number: &str, date: &str) -> Vec<Block> {
    let info = TextStyle::new(FontWeight::Regular, style.font_size_body_pt).spaced(0.0, 12.0);

    vec![
        Paragraph::new(format!("Invoice Number: {number}"), info).into(),
        Paragraph::new(format!("Date: {date}"), info).into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_title_then_label() {
        let blocks = header_blocks(&InvoiceStyle::default(), "Acme Co");
        let [Block::Paragraph(title), Block::Paragraph(label)] = blocks.as_slice() else {
            panic!("expected two paragraphs");
        };
        assert_eq!(title.text, "Acme Co");
        assert_eq!(title.style.alignment, Alignment::Centre);
        assert!(title.style.size > label.style.size);
        assert_eq!(label.text, "INVOICE");
        assert_eq!(label.style.alignment, Alignment::Left);
    }

    #[test]
    fn info_lines_are_normal_weight() {
        let blocks = invoice_info_blocks(&InvoiceStyle::default(), "INV-1", "March 05, 2024");
        let texts: Vec<&str> = blocks
            .iter()
            .map(|b| match b {
                Block::Paragraph(p) => {
                    assert_eq!(p.style.weight, FontWeight::Regular);
                    p.text.as_str()
                }
                Block::Table(_) => panic!("expected paragraphs"),
            })
            .collect();
        assert_eq!(texts, vec!["Invoice Number: INV-1", "Date: March 05, 2024"]);
    }
}
