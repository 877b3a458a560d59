//! Built-in font metrics.
//!
//! Invoices are set in the standard Type1 fonts Helvetica and Helvetica-Bold.
//! Every PDF reader ships these, so nothing is embedded and no font files need
//! to be located at runtime. Text is written with `WinAnsiEncoding`, and the
//! advance widths below are the Adobe metrics for printable ASCII in units of
//! 1/1000 em.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Name of the base font in the PDF.
    pub fn base_font(self) -> &'static [u8] {
        match self {
            FontWeight::Regular => b"Helvetica",
            FontWeight::Bold => b"Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            FontWeight::Regular => b"F1",
            FontWeight::Bold => b"F2",
        }
    }

    pub fn all() -> &'static [FontWeight] {
        &[FontWeight::Regular, FontWeight::Bold]
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            FontWeight::Regular => &HELVETICA_WIDTHS,
            FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// Ascender height as a fraction of the font size.
pub const ASCENT: f32 = 0.718;
/// Descender depth (positive) as a fraction of the font size.
pub const DESCENT: f32 = 0.207;

// glyphs outside printable ASCII are measured as a digit
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(weight: FontWeight, c: char) -> u16 {
    match c as u32 {
        code @ 0x20..=0x7E => weight.widths()[(code - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when set at `size` points.
pub fn width_of_text(text: &str, weight: FontWeight, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(weight, c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Encode text as WinAnsi bytes, replacing anything unrepresentable with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => match c {
                '€' => 0x80,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '\t' => b' ',
                _ => b'?',
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_measure_text() {
        // "Hi" in Helvetica: H = 722, i = 222
        assert!((width_of_text("Hi", FontWeight::Regular, 10.0) - 9.44).abs() < 1e-4);
        // bold is wider
        assert!(
            width_of_text("invoice", FontWeight::Bold, 12.0)
                > width_of_text("invoice", FontWeight::Regular, 12.0)
        );
        assert_eq!(width_of_text("", FontWeight::Bold, 12.0), 0.0);
    }

    #[test]
    fn digits_share_a_width() {
        let a = width_of_text("$1,111.11", FontWeight::Regular, 10.0);
        let b = width_of_text("$9,999.99", FontWeight::Regular, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn can_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Acme Co"), b"Acme Co".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("€5 ✓"), vec![0x80, b'5', b' ', b'?']);
    }
}
