//! Document blocks and the style descriptors attached to them.
//!
//! A document is an ordered list of [`Block`]s. Paragraphs carry a single
//! [`TextStyle`]; tables carry a list of [`CellRule`]s which are applied in
//! order over rectangular cell ranges, later rules overriding earlier ones.

use crate::sinks::pdf::colour::{colours, Colour};
use crate::sinks::pdf::fonts::FontWeight;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Centre,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    Middle,
    #[default]
    Bottom,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f32,
    pub alignment: Alignment,
    pub colour: Colour,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    pub fn new(weight: FontWeight, size: f32) -> TextStyle {
        TextStyle {
            weight,
            size,
            alignment: Alignment::Left,
            colour: colours::BLACK,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> TextStyle {
        self.alignment = alignment;
        self
    }

    pub fn spaced(mut self, before: f32, after: f32) -> TextStyle {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn leading(&self) -> f32 {
        self.size * 1.2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
}

impl Paragraph {
    pub fn new<S: ToString>(text: S, style: TextStyle) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Table(Box<Table>),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Table> for Cell {
    fn from(value: Table) -> Self {
        Cell::Table(Box::new(value))
    }
}

/// A rectangle of cells given as `(column, row)` corners, inclusive.
///
/// Negative indices count from the end, so `(-1, -1)` is the bottom-right cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: (isize, isize),
    pub end: (isize, isize),
}

impl CellRange {
    pub const ALL: CellRange = CellRange::new((0, 0), (-1, -1));

    pub const fn new(start: (isize, isize), end: (isize, isize)) -> CellRange {
        CellRange { start, end }
    }

    pub const fn row(row: isize) -> CellRange {
        CellRange::new((0, row), (-1, row))
    }

    pub const fn cell(column: isize, row: isize) -> CellRange {
        CellRange::new((column, row), (column, row))
    }

    /// Rows from `row` to the last one.
    pub const fn rows_from(row: isize) -> CellRange {
        CellRange::new((0, row), (-1, -1))
    }

    fn resolve(index: isize, len: usize) -> isize {
        if index < 0 {
            len as isize + index
        } else {
            index
        }
    }

    pub fn contains(&self, column: usize, row: usize, columns: usize, rows: usize) -> bool {
        let (c, r) = (column as isize, row as isize);
        let c0 = Self::resolve(self.start.0, columns);
        let c1 = Self::resolve(self.end.0, columns);
        let r0 = Self::resolve(self.start.1, rows);
        let r1 = Self::resolve(self.end.1, rows);
        c >= c0 && c <= c1 && r >= r0 && r <= r1
    }
}

/// Closed set of table style commands.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CellStyle {
    Background(Colour),
    TextColour(Colour),
    Weight(FontWeight),
    FontSize(f32),
    Align(Alignment),
    VerticalAlign(VerticalAlignment),
    TopPadding(f32),
    BottomPadding(f32),
    LeftPadding(f32),
    RightPadding(f32),
    /// Lines around every cell in the range.
    Grid { width: f32, colour: Colour },
    /// A line around the outside of the range.
    Box { width: f32, colour: Colour },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellRule {
    pub range: CellRange,
    pub style: CellStyle,
}

/// Effective style of a single cell once all rules are applied.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedCellStyle {
    pub background: Option<Colour>,
    pub text: TextStyle,
    pub vertical_alignment: VerticalAlignment,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    pub padding_right: f32,
}

impl Default for ResolvedCellStyle {
    fn default() -> Self {
        ResolvedCellStyle {
            background: None,
            text: TextStyle::new(FontWeight::Regular, 10.0),
            vertical_alignment: VerticalAlignment::default(),
            padding_top: 3.0,
            padding_bottom: 3.0,
            padding_left: 6.0,
            padding_right: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    /// Fixed column widths in points; `None` sizes the column to its content.
    pub column_widths: Vec<Option<f32>>,
    pub rules: Vec<CellRule>,
    /// Leading rows repeated at the top of each page the table continues onto.
    pub repeat_rows: usize,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Table {
        let columns = rows.iter().map(Vec::len).max().unwrap_or_default();
        Table {
            rows,
            column_widths: vec![None; columns],
            rules: Vec::default(),
            repeat_rows: 0,
            alignment: Alignment::Centre,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn with_column_widths<I: IntoIterator<Item = f32>>(mut self, widths: I) -> Table {
        self.column_widths = widths.into_iter().map(Some).collect();
        self
    }

    pub fn with_rule(mut self, range: CellRange, style: CellStyle) -> Table {
        self.rules.push(CellRule { range, style });
        self
    }

    pub fn with_repeat_rows(mut self, rows: usize) -> Table {
        self.repeat_rows = rows;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Table {
        self.alignment = alignment;
        self
    }

    pub fn spaced(mut self, before: f32, after: f32) -> Table {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_style(&self, column: usize, row: usize) -> ResolvedCellStyle {
        let (columns, rows) = (self.column_count(), self.row_count());
        let mut style = ResolvedCellStyle::default();
        for rule in self
            .rules
            .iter()
            .filter(|rule| rule.range.contains(column, row, columns, rows))
        {
            match rule.style {
                CellStyle::Background(colour) => style.background = Some(colour),
                CellStyle::TextColour(colour) => style.text.colour = colour,
                CellStyle::Weight(weight) => style.text.weight = weight,
                CellStyle::FontSize(size) => style.text.size = size,
                CellStyle::Align(alignment) => style.text.alignment = alignment,
                CellStyle::VerticalAlign(alignment) => style.vertical_alignment = alignment,
                CellStyle::TopPadding(v) => style.padding_top = v,
                CellStyle::BottomPadding(v) => style.padding_bottom = v,
                CellStyle::LeftPadding(v) => style.padding_left = v,
                CellStyle::RightPadding(v) => style.padding_right = v,
                CellStyle::Grid { .. } | CellStyle::Box { .. } => {}
            }
        }
        style
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for Block {
    fn from(value: Paragraph) -> Self {
        Block::Paragraph(value)
    }
}

impl From<Table> for Block {
    fn from(value: Table) -> Self {
        Block::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_resolve_negative_indices() {
        let range = CellRange::new((2, 1), (-1, -1));
        assert!(range.contains(2, 1, 4, 3));
        assert!(range.contains(3, 2, 4, 3));
        assert!(!range.contains(1, 1, 4, 3));
        assert!(!range.contains(2, 0, 4, 3));

        assert!(CellRange::row(0).contains(3, 0, 4, 3));
        assert!(!CellRange::row(0).contains(0, 1, 4, 3));
        assert!(CellRange::cell(-1, -1).contains(1, 2, 2, 3));
    }

    #[test]
    fn later_rules_override_earlier_ones() {
        let table = Table::new(vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]])
            .with_rule(CellRange::ALL, CellStyle::Align(Alignment::Left))
            .with_rule(CellRange::new((1, 1), (-1, -1)), CellStyle::Align(Alignment::Right))
            .with_rule(CellRange::row(0), CellStyle::Weight(FontWeight::Bold));

        assert_eq!(table.cell_style(0, 1).text.alignment, Alignment::Left);
        assert_eq!(table.cell_style(1, 1).text.alignment, Alignment::Right);
        assert_eq!(table.cell_style(1, 0).text.weight, FontWeight::Bold);
        assert_eq!(table.cell_style(1, 1).text.weight, FontWeight::Regular);
    }

    #[test]
    fn unstyled_cells_use_defaults() {
        let table = Table::new(vec![vec!["x".into()]]);
        let style = table.cell_style(0, 0);
        assert_eq!(style, ResolvedCellStyle::default());
        assert_eq!(table.column_widths, vec![None]);
    }
}
