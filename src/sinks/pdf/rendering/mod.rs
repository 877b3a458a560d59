//! Block construction for each invoice section.
//!
//! Every function here turns a piece of invoice data and the [`InvoiceStyle`]
//! into the blocks for one section. None of them touch the document; the
//! builder in [`crate::sinks::pdf`] decides where the blocks go.
//!
//! [`InvoiceStyle`]: crate::sinks::pdf::InvoiceStyle

mod address;
mod header;
mod items;
mod terms;
mod totals;

pub use address::address_and_payment_blocks;
pub use header::{header_blocks, invoice_info_blocks};
pub use items::items_table_blocks;
pub use terms::terms_blocks;
pub use totals::totals_blocks;
