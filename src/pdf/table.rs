use std::ops::Range;

use pdf_writer::Content;

use crate::error::Error;
use crate::markup::parse_spans;
use crate::model::Table;
use crate::style::{Alignment, Style, StyleRegistry};

use super::layout::{TextBox, TextLine, build_lines, lines_height, render_lines, set_fill, set_stroke};

const CELL_PAD_X: f32 = 6.0;
const HEADER_PAD_Y: f32 = 6.0;
const BODY_PAD_Y: f32 = 4.0;
const GRID_WIDTH: f32 = 0.5;

/// Background treatment of one table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowBand {
    /// The header row: header background, never part of the alternation.
    Header,
    Base,
    Alternate,
}

/// Band of the row at `index`, counted over the whole table with the header
/// at 0. Even data-row indices get the alternate background.
pub fn band_for(index: usize, banding: bool) -> RowBand {
    match index {
        0 => RowBand::Header,
        i if banding && i % 2 == 0 => RowBand::Alternate,
        _ => RowBand::Base,
    }
}

#[derive(Clone, Debug)]
pub struct RowLayout {
    pub height: f32,
    pub band: RowBand,
    pub(crate) cells: Vec<Vec<TextLine>>,
}

/// Column widths and measured rows of a table at a given usable width.
/// The header is repeated at the top of every page the table spans.
#[derive(Clone, Debug)]
pub struct TableLayout {
    pub col_widths: Vec<f32>,
    pub header: RowLayout,
    pub rows: Vec<RowLayout>,
    header_style: Style,
    cell_style: Style,
    band_color: [u8; 3],
    grid_color: [u8; 3],
}

/// Ratios × usable width. The last column takes the floating-point
/// remainder so the widths sum to `usable_width`.
pub fn column_widths(ratios: &[f32], usable_width: f32) -> Vec<f32> {
    let mut widths: Vec<f32> = ratios.iter().map(|r| r * usable_width).collect();
    if let Some((last, rest)) = widths.split_last_mut() {
        let used: f32 = rest.iter().sum();
        *last = usable_width - used;
    }
    widths
}

fn layout_row(
    cells: &[String],
    col_widths: &[f32],
    style: &Style,
    pad_y: f32,
    band: RowBand,
) -> RowLayout {
    let mut max_h: f32 = 0.0;
    let cells: Vec<Vec<TextLine>> = cells
        .iter()
        .zip(col_widths)
        .map(|(text, col_w)| {
            let text_w = (col_w - 2.0 * CELL_PAD_X).max(0.0);
            let lines = build_lines(&parse_spans(text, style.bold), style.font_size, text_w);
            max_h = max_h.max(lines_height(&lines, style.leading));
            lines
        })
        .collect();
    RowLayout {
        height: max_h + 2.0 * pad_y,
        band,
        cells,
    }
}

impl TableLayout {
    pub fn build(table: &Table, usable_width: f32, registry: &StyleRegistry) -> Result<Self, Error> {
        if usable_width.is_nan() || usable_width <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "usable width {usable_width:.1}pt is not positive"
            )));
        }
        let header_style = registry.resolve(&table.header_style)?;
        let cell_style = registry.resolve(&table.cell_style)?;
        let col_widths = column_widths(table.col_ratios(), usable_width);

        let header = layout_row(
            table.headers(),
            &col_widths,
            &header_style,
            HEADER_PAD_Y,
            RowBand::Header,
        );
        let rows: Vec<RowLayout> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(di, cells)| {
                layout_row(
                    cells,
                    &col_widths,
                    &cell_style,
                    BODY_PAD_Y,
                    band_for(di + 1, table.banding()),
                )
            })
            .collect();

        log::debug!(
            "TABLE cols={} rows={} header_h={:.2} body_h={:.2}",
            col_widths.len(),
            rows.len(),
            header.height,
            rows.iter().map(|r| r.height).sum::<f32>()
        );

        Ok(Self {
            col_widths,
            header,
            rows,
            header_style,
            cell_style,
            band_color: table.band_color,
            grid_color: table.grid_color,
        })
    }

    pub fn header_height(&self) -> f32 {
        self.header.height
    }

    pub fn row_heights(&self) -> Vec<f32> {
        self.rows.iter().map(|r| r.height).collect()
    }

    /// Header plus every data row.
    pub fn total_height(&self) -> f32 {
        self.header.height + self.rows.iter().map(|r| r.height).sum::<f32>()
    }

    fn background(&self, band: RowBand) -> Option<[u8; 3]> {
        match band {
            RowBand::Header => self.header_style.background,
            RowBand::Alternate => Some(self.band_color),
            RowBand::Base => self.cell_style.background,
        }
    }

    fn paint_row(&self, content: &mut Content, row: &RowLayout, left: f32, top: f32, pad_y: f32) {
        let style = match row.band {
            RowBand::Header => &self.header_style,
            _ => &self.cell_style,
        };
        let row_bottom = top - row.height;
        let table_w: f32 = self.col_widths.iter().sum();

        if let Some(bg) = self.background(row.band) {
            content.save_state();
            set_fill(content, bg);
            content.rect(left, row_bottom, table_w, row.height);
            content.fill_nonzero();
            content.restore_state();
        }

        let mut cell_x = left;
        for (lines, col_w) in row.cells.iter().zip(&self.col_widths) {
            render_lines(
                content,
                lines,
                &TextBox {
                    x: cell_x + CELL_PAD_X,
                    width: (col_w - 2.0 * CELL_PAD_X).max(0.0),
                    top: top - pad_y,
                    leading: style.leading,
                    font_size: style.font_size,
                    color: style.text_color,
                    alignment: match style.alignment {
                        // Cells are never justified.
                        Alignment::Justify => Alignment::Left,
                        other => other,
                    },
                },
            );
            cell_x += col_w;
        }

        content.save_state();
        content.set_line_width(GRID_WIDTH);
        set_stroke(content, self.grid_color);
        let mut cell_x = left;
        for col_w in &self.col_widths {
            content.rect(cell_x, row_bottom, *col_w, row.height);
            cell_x += col_w;
        }
        content.stroke();
        content.restore_state();
    }

    /// Draw the header followed by data rows `rows`, starting at PDF y `top`.
    pub(crate) fn paint_slice(&self, content: &mut Content, rows: Range<usize>, left: f32, top: f32) {
        self.paint_row(content, &self.header, left, top, HEADER_PAD_Y);
        let mut row_top = top - self.header.height;
        for row in &self.rows[rows] {
            self.paint_row(content, row, left, row_top, BODY_PAD_Y);
            row_top -= row.height;
        }
    }
}
