use crate::sinks::pdf::blocks::{Block, Paragraph, TextStyle};
use crate::sinks::pdf::config::InvoiceStyle;
use crate::sinks::pdf::fonts::FontWeight;

pub fn terms_blocks(style: &InvoiceStyle, terms: &str) -> Vec<Block> {
    let text = TextStyle::new(FontWeight::Regular, style.font_size_body_pt).spaced(30.0, 30.0);

    vec![
        Paragraph::new("TERMS AND CONDITIONS:", text).into(),
        Paragraph::new(terms, text).into(),
    ]
}
