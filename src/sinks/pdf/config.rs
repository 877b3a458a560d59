use crate::sinks::pdf::colour::{colours, Colour};
use crate::sinks::pdf::layout::{PageGeometry, LETTER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const POINTS_PER_INCH: f32 = 72.0;

/// Styling for the rendered invoice.
///
/// All lengths ending in `_in` are inches, all lengths ending in `_pt` are
/// points. Missing keys in a style file fall back to the defaults. The page
/// itself is always US Letter with one inch margins; only typography, colours
/// and column widths can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvoiceStyle {
    /// Company name at the top of the first page
    pub font_size_title_pt: f32,
    /// The "INVOICE" label
    pub font_size_label_pt: f32,
    /// Invoice info, addresses, totals and terms
    pub font_size_body_pt: f32,
    /// Item table body rows
    pub font_size_table_pt: f32,
    /// Item table header row and the grand total
    pub font_size_table_header_pt: f32,
    /// Background of the item table header row
    pub header_background: Colour,
    /// Item table columns: index, description, rate, amount
    pub item_column_widths_in: [f32; 4],
    /// Totals table columns: label, value
    pub totals_column_widths_in: [f32; 2],
    /// Width of each half of the address / payment block
    pub address_column_width_in: f32,
}

impl Default for InvoiceStyle {
    fn default() -> Self {
        InvoiceStyle {
            font_size_title_pt: 24.0,
            font_size_label_pt: 18.0,
            font_size_body_pt: 12.0,
            font_size_table_pt: 10.0,
            font_size_table_header_pt: 12.0,
            header_background: colours::NAVY,
            item_column_widths_in: [0.5, 3.0, 1.5, 1.5],
            totals_column_widths_in: [5.5, 1.0],
            address_column_width_in: 3.0,
        }
    }
}

impl InvoiceStyle {
    /// Load a style from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InvoiceStyle> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style file {}", path.display()))?;
        let style: InvoiceStyle = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse style file {}", path.display()))?;
        log::debug!("loaded invoice style from {}", path.display());
        Ok(style)
    }

    pub fn geometry(&self) -> PageGeometry {
        LETTER
    }
}

/// Converts a length in inches to points.
pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

/// Statistics from rendering a PDF, used for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Size of the written file
    pub bytes_written: u64,
}
