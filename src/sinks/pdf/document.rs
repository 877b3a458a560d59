//! Serializing laid out pages with `pdf-writer`.
//!
//! Object layout: catalog, page tree, document info, one Type1 font object per
//! [`FontWeight`], then a page object and content stream per page. Every page
//! shares the same font resources.

use crate::sinks::pdf::fonts::{encode_win_ansi, FontWeight};
use crate::sinks::pdf::layout::{DrawOp, PageGeometry, PageLayout};
use chrono::{Datelike, Local, Timelike};
use indicatif::ProgressBar;
use pdf_writer::types::LineCapStyle;
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// Document properties shown by PDF viewers.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

fn now() -> Date {
    let now = Local::now();
    Date::new(now.year().clamp(0, 9999) as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
}

fn content_stream(layout: &PageLayout) -> Vec<u8> {
    let mut content = Content::new();
    content.set_line_cap(LineCapStyle::ProjectingSquareCap);

    for op in layout.ops.iter() {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                colour,
            } => {
                content
                    .set_fill_rgb(colour.r, colour.g, colour.b)
                    .rect(*x, *y, *width, *height)
                    .fill_nonzero();
            }
            DrawOp::Line {
                from,
                to,
                width,
                colour,
            } => {
                content
                    .set_stroke_rgb(colour.r, colour.g, colour.b)
                    .set_line_width(*width)
                    .move_to(from.0, from.1)
                    .line_to(to.0, to.1)
                    .stroke();
            }
            DrawOp::Text {
                text,
                weight,
                size,
                colour,
                x,
                baseline,
            } => {
                content.set_fill_rgb(colour.r, colour.g, colour.b);
                content.begin_text();
                content
                    .set_font(Name(weight.resource_name()), *size)
                    .set_text_matrix([1.0, 0.0, 0.0, 1.0, *x, *baseline])
                    .show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
        }
    }

    content.finish()
}

/// Render pages into the bytes of a PDF file.
pub fn write_pdf(
    pages: &[PageLayout],
    geometry: PageGeometry,
    info: &Info,
    progress: &ProgressBar,
) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(FontWeight, Ref)> = FontWeight::all()
        .iter()
        .map(|&weight| (weight, alloc.bump()))
        .collect();
    let page_ids: Vec<(Ref, Ref)> = pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(page_ids.len() as i32);

    for &(weight, font_id) in font_ids.iter() {
        pdf.type1_font(font_id)
            .base_font(Name(weight.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    progress.set_length(pages.len() as u64);
    for (layout, &(page_id, content_id)) in pages.iter().zip(page_ids.iter()) {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for &(weight, font_id) in font_ids.iter() {
                fonts.pair(Name(weight.resource_name()), font_id);
            }
        }
        page.finish();

        pdf.stream(content_id, &content_stream(layout));
        progress.inc(1);
    }

    let mut document_info = pdf.document_info(info_id);
    if let Some(title) = &info.title {
        document_info.title(TextStr(title));
    }
    if let Some(author) = &info.author {
        document_info.author(TextStr(author));
    }
    if let Some(creator) = &info.creator {
        document_info.creator(TextStr(creator));
    }
    document_info.producer(TextStr(concat!("invoice-book v", env!("CARGO_PKG_VERSION"))));
    document_info.creation_date(now());
    document_info.finish();

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::colour::colours;
    use crate::sinks::pdf::layout::LETTER;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn writes_text_with_both_fonts() {
        let page = PageLayout {
            ops: vec![
                DrawOp::Text {
                    text: "Acme Co".to_string(),
                    weight: FontWeight::Bold,
                    size: 24.0,
                    colour: colours::BLACK,
                    x: 72.0,
                    baseline: 700.0,
                },
                DrawOp::FillRect {
                    x: 72.0,
                    y: 600.0,
                    width: 100.0,
                    height: 20.0,
                    colour: colours::NAVY,
                },
            ],
        };
        let bytes = write_pdf(&[page], LETTER, &Info::default(), &ProgressBar::hidden());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"(Acme Co) Tj"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"/Count 1"));
    }

    #[test]
    fn writes_document_info() {
        let info = Info {
            title: Some("Invoice INV-1".to_string()),
            author: Some("Acme Co".to_string()),
            creator: None,
        };
        let bytes = write_pdf(
            &[PageLayout::default()],
            LETTER,
            &info,
            &ProgressBar::hidden(),
        );
        assert!(contains(&bytes, b"(Invoice INV-1)"));
        assert!(contains(&bytes, b"/Author (Acme Co)"));
    }
}
