//! Invoice PDF rendering.
//!
//! [`InvoicePdf`] collects the blocks for each invoice section and lays them
//! out when [`InvoicePdf::generate`] is called. Sections have a fixed order
//! (see [`Section`]); each may be added at most once and never after a later
//! section. Generating consumes the builder, so a document is written exactly
//! once.
//!
//! ## Layout
//!
//! Block construction lives in [`rendering`], page flow in [`layout`] and the
//! final serialization in [`document`]. Text is set in the standard Helvetica
//! fonts so the output needs no embedded font data.

mod blocks;
mod colour;
mod config;
mod document;
mod fonts;
mod layout;
mod rendering;

pub use config::InvoiceStyle;

use blocks::Block;
use config::RenderStats;

use crate::invoice::{format_date, InvoiceData, LineItem};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use layout::{layout_blocks, PageLayout};
use rust_decimal::Decimal;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default output file name.
pub const DEFAULT_OUTFILE: &str = "generated_invoice.pdf";

/// The parts of an invoice, in the order they appear.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Header,
    InvoiceInfo,
    AddressAndPayment,
    Items,
    Totals,
    Terms,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::InvoiceInfo => "invoice info",
            Section::AddressAndPayment => "address and payment",
            Section::Items => "items",
            Section::Totals => "totals",
            Section::Terms => "terms",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot add the {section} section after the {after} section")]
    OutOfOrder { section: Section, after: Section },
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct InvoicePdf {
    outfile: PathBuf,
    style: InvoiceStyle,
    blocks: Vec<Block>,
    last_section: Option<Section>,
    info: document::Info,
}

impl InvoicePdf {
    pub fn new<P: AsRef<Path>>(outfile: P, style: InvoiceStyle) -> InvoicePdf {
        InvoicePdf {
            outfile: outfile.as_ref().to_path_buf(),
            style,
            blocks: Vec::default(),
            last_section: None,
            info: document::Info {
                creator: Some(concat!("invoice-book v", env!("CARGO_PKG_VERSION")).to_string()),
                ..document::Info::default()
            },
        }
    }

    /// The blocks added so far, in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn append(&mut self, section: Section, blocks: Vec<Block>) -> Result<(), BuildError> {
        if let Some(after) = self.last_section {
            if section <= after {
                return Err(BuildError::OutOfOrder { section, after });
            }
        }
        log::debug!("adding {} block(s) for the {section} section", blocks.len());
        self.last_section = Some(section);
        self.blocks.extend(blocks);
        Ok(())
    }

    pub fn add_header(&mut self, company_name: &str) -> Result<(), BuildError> {
        let blocks = rendering::header_blocks(&self.style, company_name);
        self.append(Section::Header, blocks)?;
        self.info.author = Some(company_name.to_string());
        Ok(())
    }

    pub fn add_invoice_info(&mut self, number: &str, date: NaiveDate) -> Result<(), BuildError> {
        let blocks = rendering::invoice_info_blocks(&self.style, number, &format_date(date));
        self.append(Section::InvoiceInfo, blocks)?;
        self.info.title = Some(format!("Invoice {number}"));
        Ok(())
    }

    pub fn add_address_and_payment_info<S: AsRef<str>>(
        &mut self,
        bill_to: &[S],
        payment: &[S],
    ) -> Result<(), BuildError> {
        let blocks = rendering::address_and_payment_blocks(&self.style, bill_to, payment);
        self.append(Section::AddressAndPayment, blocks)
    }

    pub fn add_items_table(&mut self, items: &[LineItem]) -> Result<(), BuildError> {
        let blocks = rendering::items_table_blocks(&self.style, items);
        self.append(Section::Items, blocks)
    }

    pub fn add_totals(
        &mut self,
        subtotal: Decimal,
        tax: Decimal,
        total: Decimal,
    ) -> Result<(), BuildError> {
        let blocks = rendering::totals_blocks(&self.style, subtotal, tax, total);
        self.append(Section::Totals, blocks)
    }

    pub fn add_terms(&mut self, terms: &str) -> Result<(), BuildError> {
        let blocks = rendering::terms_blocks(&self.style, terms);
        self.append(Section::Terms, blocks)
    }

    fn layout(&self) -> Vec<PageLayout> {
        layout_blocks(&self.blocks, self.style.geometry())
    }

    /// Lay out the document and write it to the output file.
    pub fn generate(self) -> Result<RenderStats, BuildError> {
        self.generate_with_progress(&ProgressBar::hidden())
    }

    pub fn generate_with_progress(self, progress: &ProgressBar) -> Result<RenderStats, BuildError> {
        let pages = self.layout();
        log::info!(
            "laid out {} block(s) onto {} page(s)",
            self.blocks.len(),
            pages.len()
        );

        let bytes = document::write_pdf(&pages, self.style.geometry(), &self.info, progress);
        std::fs::write(&self.outfile, &bytes).map_err(|source| BuildError::Io {
            path: self.outfile.clone(),
            source,
        })?;
        log::info!("wrote {} bytes to {}", bytes.len(), self.outfile.display());

        Ok(RenderStats {
            page_count: pages.len(),
            bytes_written: bytes.len() as u64,
        })
    }
}

/// Build every section of `invoice` in order and write the PDF.
pub fn render_invoice<P: AsRef<Path>>(
    invoice: &InvoiceData,
    style: &InvoiceStyle,
    outfile: P,
    progress: &ProgressBar,
) -> Result<RenderStats, BuildError> {
    let totals = invoice.totals();

    let mut pdf = InvoicePdf::new(outfile, style.clone());
    pdf.add_header(invoice.company_name())?;
    pdf.add_invoice_info(invoice.invoice_number(), invoice.issue_date())?;
    pdf.add_address_and_payment_info(&invoice.bill_to().lines(), &invoice.payment().lines())?;
    pdf.add_items_table(invoice.items())?;
    pdf.add_totals(totals.subtotal(), totals.tax(), totals.total())?;
    pdf.add_terms(invoice.terms())?;
    pdf.generate_with_progress(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::tests::acme_invoice;
    use rust_decimal_macros::dec;

    fn temp_outfile(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("invoice-book-{}-{name}.pdf", std::process::id()))
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn sections_must_be_added_in_order() {
        let mut pdf = InvoicePdf::new("unused.pdf", InvoiceStyle::default());
        pdf.add_header("Acme Co").expect("header comes first");
        pdf.add_items_table(&[LineItem::new("Consulting", dec!(100))])
            .expect("sections may be skipped");

        let err = pdf
            .add_invoice_info("INV-1", NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"))
            .expect_err("info cannot follow items");
        assert!(matches!(
            err,
            BuildError::OutOfOrder {
                section: Section::InvoiceInfo,
                after: Section::Items
            }
        ));

        // rejected calls leave the document untouched
        assert_eq!(pdf.blocks().len(), 3);
    }

    #[test]
    fn sections_cannot_repeat() {
        let mut pdf = InvoicePdf::new("unused.pdf", InvoiceStyle::default());
        pdf.add_terms("Net 30").expect("can add terms");
        assert!(pdf.add_terms("Net 60").is_err());
        assert!(pdf.add_header("Acme Co").is_err());
    }

    #[test]
    fn acme_invoice_blocks_follow_section_order() {
        let invoice = acme_invoice();
        let totals = invoice.totals();
        let mut pdf = InvoicePdf::new("unused.pdf", InvoiceStyle::default());
        pdf.add_header(invoice.company_name()).expect("header");
        pdf.add_invoice_info(invoice.invoice_number(), invoice.issue_date())
            .expect("info");
        pdf.add_address_and_payment_info(&invoice.bill_to().lines(), &invoice.payment().lines())
            .expect("address");
        pdf.add_items_table(invoice.items()).expect("items");
        pdf.add_totals(totals.subtotal(), totals.tax(), totals.total())
            .expect("totals");
        pdf.add_terms(invoice.terms()).expect("terms");

        let kinds: Vec<&str> = pdf
            .blocks()
            .iter()
            .map(|block| match block {
                Block::Paragraph(_) => "p",
                Block::Table(_) => "t",
            })
            .collect();
        assert_eq!(kinds, vec!["p", "p", "p", "p", "t", "t", "t", "p", "p"]);

        let pages = pdf.layout();
        assert_eq!(pages.len(), 1);
        let texts: Vec<&str> = pages[0].texts().collect();
        assert_eq!(texts.iter().filter(|&&t| t == "Consulting").count(), 1);
        assert_eq!(texts.iter().filter(|&&t| t == "$100.00").count(), 3);
        assert!(texts.contains(&"$10.00"));
        assert!(texts.contains(&"$110.00"));
        assert!(texts.contains(&"Date: March 05, 2024"));
        assert!(texts.contains(&"ITEM"));
        assert!(texts.contains(&"PAYMENT INFORMATION:"));

        let position = |needle: &str| {
            texts
                .iter()
                .position(|&t| t == needle)
                .unwrap_or_else(|| panic!("missing {needle}"))
        };
        assert!(position("Acme Co") < position("INVOICE"));
        assert!(position("INVOICE") < position("Invoice Number: INV-01234"));
        assert!(position("Invoice Number: INV-01234") < position("BILL TO:"));
        assert!(position("BILL TO:") < position("DESCRIPTION"));
        assert!(position("DESCRIPTION") < position("Sub Total:"));
        assert!(position("Sub Total:") < position("TERMS AND CONDITIONS:"));
        assert!(position("TERMS AND CONDITIONS:") < position("Net 30"));
    }

    #[test]
    fn large_amounts_are_never_split() {
        let mut pdf = InvoicePdf::new("unused.pdf", InvoiceStyle::default());
        pdf.add_items_table(&[LineItem::new("Consulting", dec!(1000000))])
            .expect("items");
        pdf.add_totals(dec!(1000000), dec!(100000), dec!(1100000))
            .expect("totals");

        let pages = pdf.layout();
        let texts: Vec<&str> = pages[0].texts().collect();
        assert_eq!(&texts[..4], &["ITEM", "DESCRIPTION", "RATE", "AMOUNT"]);
        assert_eq!(texts.iter().filter(|&&t| t == "$1,000,000.00").count(), 3);
        assert!(texts.contains(&"$100,000.00"));
        assert!(texts.contains(&"$1,100,000.00"));
    }

    #[test]
    fn can_render_acme_invoice() {
        let outfile = temp_outfile("acme");
        let stats = render_invoice(
            &acme_invoice(),
            &InvoiceStyle::default(),
            &outfile,
            &ProgressBar::hidden(),
        )
        .expect("can render invoice");

        let bytes = std::fs::read(&outfile).expect("output file exists");
        let _ = std::fs::remove_file(&outfile);
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.bytes_written, bytes.len() as u64);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"(Consulting) Tj"));
        assert!(contains(&bytes, b"($110.00) Tj"));
        assert!(contains(&bytes, b"(Invoice INV-01234)"));
    }

    #[test]
    fn empty_document_still_generates() {
        let outfile = temp_outfile("empty");
        let stats = InvoicePdf::new(&outfile, InvoiceStyle::default())
            .generate()
            .expect("can generate empty document");
        let bytes = std::fs::read(&outfile).expect("output file exists");
        let _ = std::fs::remove_file(&outfile);
        assert_eq!(stats.page_count, 1);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let outfile = std::env::temp_dir()
            .join(format!("invoice-book-missing-{}", std::process::id()))
            .join("nested")
            .join("invoice.pdf");
        let err = InvoicePdf::new(&outfile, InvoiceStyle::default())
            .generate()
            .expect_err("parent directory does not exist");
        match err {
            BuildError::Io { path, .. } => assert_eq!(path, outfile),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn long_invoices_span_pages() {
        let items: Vec<LineItem> = (0..60)
            .map(|i| LineItem::new(format!("Service {i}"), dec!(10)))
            .collect();
        let mut pdf = InvoicePdf::new("unused.pdf", InvoiceStyle::default());
        pdf.add_items_table(&items).expect("items");
        let pages = pdf.layout();
        assert!(pages.len() >= 2);
        for page in pages.iter() {
            assert_eq!(page.texts().next(), Some("ITEM"));
        }
    }
}
