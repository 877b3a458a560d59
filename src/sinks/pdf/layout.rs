//! Flowing blocks onto pages.
//!
//! Blocks are placed top to bottom inside the frame left by the page margins.
//! Paragraphs are broken into lines with [`wrap_text`] and may continue onto the
//! next page between lines; tables are measured up front and may continue
//! between rows, repeating their `repeat_rows` leading rows on each new page.
//! Space before a block is dropped when the block starts a page.
//!
//! The output is a list of [`PageLayout`]s holding absolute drawing operations
//! in PDF user space (origin at the bottom-left corner of the page).

use crate::sinks::pdf::blocks::{
    Alignment, Block, Cell, CellStyle, Paragraph, ResolvedCellStyle, Table, TextStyle,
    VerticalAlignment,
};
use crate::sinks::pdf::colour::Colour;
use crate::sinks::pdf::fonts::{width_of_text, FontWeight, ASCENT, DESCENT};

/// Page size and margins, in points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

/// US Letter with one inch margins.
pub const LETTER: PageGeometry = PageGeometry {
    width: 612.0,
    height: 792.0,
    margin: 72.0,
};

impl PageGeometry {
    pub fn frame_left(&self) -> f32 {
        self.margin
    }

    pub fn frame_top(&self) -> f32 {
        self.height - self.margin
    }

    pub fn frame_bottom(&self) -> f32 {
        self.margin
    }

    pub fn frame_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        weight: FontWeight,
        size: f32,
        colour: Colour,
        x: f32,
        baseline: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colour: Colour,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        colour: Colour,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words wider than a whole line are split
/// between characters.
pub fn wrap_text(text: &str, weight: FontWeight, size: f32, max_width: f32) -> Vec<String> {
    wrap(text, weight, size, max_width, true)
}

/// Like [`wrap_text`], but only ever breaks at whitespace. A word wider than
/// `max_width` gets a line to itself and overflows it.
pub fn wrap_words(text: &str, weight: FontWeight, size: f32, max_width: f32) -> Vec<String> {
    wrap(text, weight, size, max_width, false)
}

fn wrap(
    text: &str,
    weight: FontWeight,
    size: f32,
    max_width: f32,
    split_long_words: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        let mut line = String::new();
        for word in hard_line.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if width_of_text(&candidate, weight, size) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !split_long_words || width_of_text(word, weight, size) <= max_width {
                line = word.to_string();
            } else {
                for c in word.chars() {
                    line.push(c);
                    if width_of_text(&line, weight, size) > max_width && line.chars().count() > 1
                    {
                        line.pop();
                        lines.push(std::mem::take(&mut line));
                        line.push(c);
                    }
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Distance from the top of a line box to its baseline.
fn baseline_offset(style: &TextStyle) -> f32 {
    (style.leading() + (ASCENT - DESCENT) * style.size) / 2.0
}

fn aligned_x(alignment: Alignment, left: f32, available: f32, width: f32) -> f32 {
    match alignment {
        Alignment::Left => left,
        Alignment::Centre => left + (available - width) / 2.0,
        Alignment::Right => left + available - width,
    }
}

fn push_line(ops: &mut Vec<DrawOp>, line: &str, style: &TextStyle, left: f32, width: f32, top: f32) {
    if line.is_empty() {
        return;
    }
    let line_width = width_of_text(line, style.weight, style.size);
    ops.push(DrawOp::Text {
        text: line.to_string(),
        weight: style.weight,
        size: style.size,
        colour: style.colour,
        x: aligned_x(style.alignment, left, width, line_width),
        baseline: top - baseline_offset(style),
    });
}

#[derive(Debug)]
enum CellContent {
    Lines(Vec<String>),
    Table(Box<MeasuredTable>),
}

#[derive(Debug)]
struct MeasuredCell {
    style: ResolvedCellStyle,
    content: CellContent,
    content_width: f32,
    content_height: f32,
}

#[derive(Debug)]
struct MeasuredTable {
    widths: Vec<f32>,
    heights: Vec<f32>,
    cells: Vec<Vec<MeasuredCell>>,
}

impl MeasuredTable {
    fn width(&self) -> f32 {
        self.widths.iter().sum()
    }

    fn height(&self) -> f32 {
        self.heights.iter().sum()
    }
}

fn natural_cell_width(table: &Table, column: usize, row: usize) -> f32 {
    let style = table.cell_style(column, row);
    let padding = style.padding_left + style.padding_right;
    match table.rows[row].get(column) {
        Some(Cell::Text(text)) => {
            text.split('\n')
                .map(|line| width_of_text(line, style.text.weight, style.text.size))
                .fold(0.0, f32::max)
                + padding
        }
        Some(Cell::Table(nested)) => measure_table(nested).width() + padding,
        None => padding,
    }
}

fn measure_table(table: &Table) -> MeasuredTable {
    let columns = table.column_count();
    let widths: Vec<f32> = (0..columns)
        .map(|column| match table.column_widths[column] {
            Some(width) => width,
            None => (0..table.row_count())
                .map(|row| natural_cell_width(table, column, row))
                .fold(0.0, f32::max),
        })
        .collect();

    let mut heights = Vec::with_capacity(table.row_count());
    let mut cells = Vec::with_capacity(table.row_count());
    for (ri, row) in table.rows.iter().enumerate() {
        let mut measured_row = Vec::with_capacity(columns);
        for (ci, width) in widths.iter().enumerate() {
            let style = table.cell_style(ci, ri);
            let inner_width = width - style.padding_left - style.padding_right;
            let (content, content_width, content_height) = match row.get(ci) {
                Some(Cell::Text(text)) => {
                    let lines = if table.column_widths[ci].is_some() {
                        wrap_words(text, style.text.weight, style.text.size, inner_width)
                    } else {
                        text.split('\n').map(ToString::to_string).collect()
                    };
                    let height = lines.len() as f32 * style.text.leading();
                    (CellContent::Lines(lines), inner_width, height)
                }
                Some(Cell::Table(nested)) => {
                    let nested = measure_table(nested);
                    let (w, h) = (nested.width(), nested.height());
                    (CellContent::Table(Box::new(nested)), w, h)
                }
                None => (CellContent::Lines(Vec::new()), inner_width, 0.0),
            };
            measured_row.push(MeasuredCell {
                style,
                content,
                content_width,
                content_height,
            });
        }
        let height = measured_row
            .iter()
            .map(|cell| cell.content_height + cell.style.padding_top + cell.style.padding_bottom)
            .fold(0.0, f32::max);
        heights.push(height);
        cells.push(measured_row);
    }

    MeasuredTable {
        widths,
        heights,
        cells,
    }
}

fn stroke_rect(ops: &mut Vec<DrawOp>, (x0, y0, x1, y1): (f32, f32, f32, f32), width: f32, colour: Colour) {
    let corners = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
    for i in 0..4 {
        ops.push(DrawOp::Line {
            from: corners[i],
            to: corners[(i + 1) % 4],
            width,
            colour,
        });
    }
}

/// Draw the given rows of a table with its top-left corner at `(left, top)`.
fn draw_rows(
    ops: &mut Vec<DrawOp>,
    table: &Table,
    measured: &MeasuredTable,
    rows: &[usize],
    left: f32,
    top: f32,
) {
    // cell rectangles as (x0, bottom, x1, top), keyed by table coordinates
    let mut rects: Vec<(usize, usize, (f32, f32, f32, f32))> = Vec::new();
    let mut y = top;
    for &ri in rows {
        let height = measured.heights[ri];
        let mut x = left;
        for (ci, width) in measured.widths.iter().enumerate() {
            rects.push((ci, ri, (x, y - height, x + width, y)));
            x += width;
        }
        y -= height;
    }

    for &(ci, ri, (x0, y0, x1, y1)) in rects.iter() {
        if let Some(colour) = measured.cells[ri][ci].style.background {
            ops.push(DrawOp::FillRect {
                x: x0,
                y: y0,
                width: x1 - x0,
                height: y1 - y0,
                colour,
            });
        }
    }

    for &(ci, ri, (x0, y0, x1, y1)) in rects.iter() {
        let cell = &measured.cells[ri][ci];
        let style = &cell.style;
        let inner_left = x0 + style.padding_left;
        let inner_width = (x1 - x0) - style.padding_left - style.padding_right;
        let inner_top = y1 - style.padding_top;
        let inner_bottom = y0 + style.padding_bottom;
        let content_top = match style.vertical_alignment {
            VerticalAlignment::Top => inner_top,
            VerticalAlignment::Bottom => inner_bottom + cell.content_height,
            VerticalAlignment::Middle => {
                (inner_top + inner_bottom + cell.content_height) / 2.0
            }
        };

        match (&cell.content, table.rows[ri].get(ci)) {
            (CellContent::Lines(lines), _) => {
                let mut line_top = content_top;
                for line in lines {
                    push_line(ops, line, &style.text, inner_left, inner_width, line_top);
                    line_top -= style.text.leading();
                }
            }
            (CellContent::Table(nested_measured), Some(Cell::Table(nested))) => {
                let nested_left = aligned_x(
                    nested.alignment,
                    inner_left,
                    inner_width,
                    cell.content_width,
                );
                let all_rows: Vec<usize> = (0..nested.row_count()).collect();
                draw_rows(ops, nested, nested_measured, &all_rows, nested_left, content_top);
            }
            (CellContent::Table(_), _) => {}
        }
    }

    let (columns, row_count) = (table.column_count(), table.row_count());
    for rule in table.rules.iter() {
        let in_range = |&&(ci, ri, _): &&(usize, usize, (f32, f32, f32, f32))| {
            rule.range.contains(ci, ri, columns, row_count)
        };
        match rule.style {
            CellStyle::Grid { width, colour } => {
                for &(_, _, rect) in rects.iter().filter(in_range) {
                    stroke_rect(ops, rect, width, colour);
                }
            }
            CellStyle::Box { width, colour } => {
                let bounds = rects.iter().filter(in_range).fold(
                    None,
                    |acc: Option<(f32, f32, f32, f32)>, &(_, _, (x0, y0, x1, y1))| {
                        Some(match acc {
                            None => (x0, y0, x1, y1),
                            Some((a0, b0, a1, b1)) => (a0.min(x0), b0.min(y0), a1.max(x1), b1.max(y1)),
                        })
                    },
                );
                if let Some(bounds) = bounds {
                    stroke_rect(ops, bounds, width, colour);
                }
            }
            _ => {}
        }
    }
}

struct Flow {
    geometry: PageGeometry,
    pages: Vec<PageLayout>,
    current: PageLayout,
    y: f32,
    at_top: bool,
}

impl Flow {
    fn new(geometry: PageGeometry) -> Flow {
        Flow {
            geometry,
            pages: Vec::new(),
            current: PageLayout::default(),
            y: geometry.frame_top(),
            at_top: true,
        }
    }

    fn remaining(&self) -> f32 {
        self.y - self.geometry.frame_bottom()
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = self.geometry.frame_top();
        self.at_top = true;
    }

    fn space(&mut self, before: f32) {
        if !self.at_top {
            self.y -= before;
        }
    }

    fn end_block(&mut self, after: f32) {
        self.y = (self.y - after).max(self.geometry.frame_bottom());
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let style = &paragraph.style;
        let width = self.geometry.frame_width();
        let lines = wrap_text(&paragraph.text, style.weight, style.size, width);
        self.space(style.space_before);
        for line in lines {
            if self.remaining() < style.leading() && !self.at_top {
                self.new_page();
            }
            push_line(
                &mut self.current.ops,
                &line,
                style,
                self.geometry.frame_left(),
                width,
                self.y,
            );
            self.y -= style.leading();
            self.at_top = false;
        }
        self.end_block(style.space_after);
    }

    fn table(&mut self, table: &Table) {
        let measured = measure_table(table);
        let left = aligned_x(
            table.alignment,
            self.geometry.frame_left(),
            self.geometry.frame_width(),
            measured.width(),
        );
        let row_count = table.row_count();
        let repeat = table.repeat_rows.min(row_count);

        self.space(table.space_before);
        let mut next = 0;
        let mut first_chunk = true;
        while next < row_count {
            let header: Vec<usize> = if first_chunk {
                Vec::new()
            } else {
                (0..repeat).collect()
            };
            let mut height: f32 = header.iter().map(|&r| measured.heights[r]).sum();
            let mut rows = Vec::new();
            for r in next..row_count {
                let row_height = measured.heights[r];
                if height + row_height <= self.remaining() || (rows.is_empty() && self.at_top) {
                    rows.push(r);
                    height += row_height;
                } else {
                    break;
                }
            }

            let only_header = first_chunk
                && !rows.is_empty()
                && rows.iter().all(|&r| r < repeat)
                && next + rows.len() < row_count;
            if rows.is_empty() || (only_header && !self.at_top) {
                self.new_page();
                continue;
            }

            next += rows.len();
            let drawn: Vec<usize> = header.into_iter().chain(rows).collect();
            draw_rows(&mut self.current.ops, table, &measured, &drawn, left, self.y);
            self.y -= height;
            self.at_top = false;
            first_chunk = false;
            if next < row_count {
                self.new_page();
            }
        }
        self.end_block(table.space_after);
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            let page = std::mem::take(&mut self.current);
            self.pages.push(page);
        }
        self.pages
    }
}

/// Lay out `blocks` in order, returning at least one page.
pub fn layout_blocks(blocks: &[Block], geometry: PageGeometry) -> Vec<PageLayout> {
    let mut flow = Flow::new(geometry);
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => flow.paragraph(paragraph),
            Block::Table(table) => flow.table(table),
        }
    }
    flow.finish()
}
