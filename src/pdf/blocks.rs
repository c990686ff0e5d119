use pdf_writer::Content;

use crate::error::Error;
use crate::markup::{parse_spans, plain_text};
use crate::model::{Block, PageGeometry};
use crate::style::{Style, StyleRegistry};

use super::layout::{TextBox, TextLine, build_lines, lines_height, render_lines, set_fill, set_stroke};
use super::paginate::{Extent, Fragment, FragmentKind};
use super::table::TableLayout;

/// Note boxes are this much narrower than the content area, centered.
const NOTE_INSET: f32 = 4.0;
const NOTE_PAD_X: f32 = 10.0;
const NOTE_PAD_Y: f32 = 8.0;
const NOTE_BORDER_WIDTH: f32 = 1.0;

/// A block after measurement, kept for painting once its page is known.
pub(crate) enum Laid {
    Text {
        lines: Vec<TextLine>,
        style: Style,
        /// (level, plain title) for headings.
        outline: Option<(u8, String)>,
    },
    Note {
        lines: Vec<TextLine>,
        style: Style,
    },
    Rule {
        thickness: f32,
        color: [u8; 3],
    },
    Spacer,
    Table(TableLayout),
    /// Page breaks and keep-together containers: no ink of their own.
    Marker,
}

fn wrap(text: &str, style: &Style, width: f32) -> Vec<TextLine> {
    build_lines(&parse_spans(text, style.bold), style.font_size, width.max(0.0))
}

fn text_extent(lines: &[TextLine], style: &Style, padding: f32) -> Extent {
    Extent::Atomic {
        height: style.space_before + lines_height(lines, style.leading) + padding + style.space_after,
        leading_space: style.space_before,
    }
}

fn check_length(what: &str, value: f32) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidLayout(format!("{what} {value} is not a non-negative length")))
    }
}

/// Measure `block` at `width`, appending its layout (and its members', for a
/// group) to `laid`. Returns the block's id, which is its index in `laid`.
pub(crate) fn measure(
    block: &Block,
    width: f32,
    registry: &StyleRegistry,
    laid: &mut Vec<Laid>,
) -> Result<(usize, Extent), Error> {
    let id = laid.len();
    let extent = match block {
        Block::Heading { level, text, style } => {
            let style = registry.resolve(style)?;
            let lines = wrap(text, &style, width - style.left_indent);
            let extent = text_extent(&lines, &style, 0.0);
            laid.push(Laid::Text {
                lines,
                style,
                outline: Some((*level, plain_text(text))),
            });
            extent
        }
        Block::Paragraph { text, style } => {
            let style = registry.resolve(style)?;
            let lines = wrap(text, &style, width - style.left_indent);
            let extent = text_extent(&lines, &style, 0.0);
            laid.push(Laid::Text {
                lines,
                style,
                outline: None,
            });
            extent
        }
        Block::NoteBox { text, style } => {
            let style = registry.resolve(style)?;
            let text_w = width - NOTE_INSET - 2.0 * NOTE_PAD_X - style.left_indent;
            let lines = wrap(text, &style, text_w);
            let extent = text_extent(&lines, &style, 2.0 * NOTE_PAD_Y);
            laid.push(Laid::Note { lines, style });
            extent
        }
        Block::Rule { thickness, color } => {
            check_length("rule thickness", *thickness)?;
            laid.push(Laid::Rule {
                thickness: *thickness,
                color: *color,
            });
            Extent::Atomic {
                height: *thickness,
                leading_space: 0.0,
            }
        }
        Block::Spacer { height } => {
            check_length("spacer height", *height)?;
            laid.push(Laid::Spacer);
            Extent::Atomic {
                height: *height,
                leading_space: *height,
            }
        }
        Block::Table(table) => {
            let layout = TableLayout::build(table, width, registry)?;
            let extent = Extent::Rows {
                header: layout.header_height(),
                rows: layout.row_heights(),
            };
            laid.push(Laid::Table(layout));
            extent
        }
        Block::PageBreak => {
            laid.push(Laid::Marker);
            Extent::PageBreak
        }
        Block::KeepTogether(members) => {
            laid.push(Laid::Marker);
            let mut extents = Vec::with_capacity(members.len());
            for member in members {
                extents.push(measure(member, width, registry, laid)?);
            }
            Extent::Group(extents)
        }
    };
    debug_assert_eq!(block.is_atomic(), matches!(extent, Extent::Atomic { .. }));
    Ok((id, extent))
}

fn fill_rect(content: &mut Content, color: [u8; 3], x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    set_fill(content, color);
    content.rect(x, y, w, h);
    content.fill_nonzero();
    content.restore_state();
}

/// Paint one placed fragment onto its page.
pub(crate) fn paint(content: &mut Content, laid: &Laid, frag: &Fragment, geometry: &PageGeometry) {
    let left = geometry.margin_left;
    let usable_w = geometry.usable_width();
    let top = geometry.content_top() - frag.offset - frag.space_before;

    match laid {
        Laid::Text { lines, style, .. } => {
            let text_h = lines_height(lines, style.leading);
            if let Some(bg) = style.background {
                fill_rect(content, bg, left, top - text_h, usable_w, text_h);
            }
            render_lines(
                content,
                lines,
                &TextBox {
                    x: left + style.left_indent,
                    width: usable_w - style.left_indent,
                    top,
                    leading: style.leading,
                    font_size: style.font_size,
                    color: style.text_color,
                    alignment: style.alignment,
                },
            );
        }
        Laid::Note { lines, style } => {
            let box_x = left + NOTE_INSET / 2.0;
            let box_w = usable_w - NOTE_INSET;
            let box_h = lines_height(lines, style.leading) + 2.0 * NOTE_PAD_Y;
            if let Some(bg) = style.background {
                fill_rect(content, bg, box_x, top - box_h, box_w, box_h);
            }
            if let Some(border) = style.border_color {
                content.save_state();
                content.set_line_width(NOTE_BORDER_WIDTH);
                set_stroke(content, border);
                content.rect(box_x, top - box_h, box_w, box_h);
                content.stroke();
                content.restore_state();
            }
            let indent = NOTE_PAD_X + style.left_indent;
            render_lines(
                content,
                lines,
                &TextBox {
                    x: box_x + indent,
                    width: box_w - 2.0 * NOTE_PAD_X - style.left_indent,
                    top: top - NOTE_PAD_Y,
                    leading: style.leading,
                    font_size: style.font_size,
                    color: style.text_color,
                    alignment: style.alignment,
                },
            );
        }
        Laid::Rule { thickness, color } => {
            if *thickness > 0.0 {
                let y = top - thickness / 2.0;
                content.save_state();
                content.set_line_width(*thickness);
                set_stroke(content, *color);
                content.move_to(left, y);
                content.line_to(left + usable_w, y);
                content.stroke();
                content.restore_state();
            }
        }
        Laid::Table(layout) => {
            let rows = match &frag.kind {
                FragmentKind::Rows { rows, .. } => rows.clone(),
                FragmentKind::Whole => 0..layout.rows.len(),
            };
            layout.paint_slice(content, rows, left, top);
        }
        Laid::Spacer | Laid::Marker => {}
    }
}
