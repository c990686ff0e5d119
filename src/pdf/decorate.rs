use pdf_writer::Content;

use crate::model::{CM, PageGeometry};
use crate::style::Alignment;

use super::layout::{render_label, set_stroke};

/// A drawing command in PDF page space (origin bottom-left, points).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: [u8; 3],
    },
    Text {
        /// Anchor point; `anchor` says which edge of the text sits on it.
        x: f32,
        baseline: f32,
        text: String,
        font_size: f32,
        bold: bool,
        color: [u8; 3],
        anchor: Alignment,
    },
}

impl DrawOp {
    pub(crate) fn paint(&self, content: &mut Content) {
        match self {
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                content.save_state();
                content.set_line_width(*width);
                set_stroke(content, *color);
                content.move_to(from.0, from.1);
                content.line_to(to.0, to.1);
                content.stroke();
                content.restore_state();
            }
            DrawOp::Text {
                x,
                baseline,
                text,
                font_size,
                bold,
                color,
                anchor,
            } => render_label(content, text, *x, *baseline, *font_size, *bold, *color, *anchor),
        }
    }
}

const RULE_GAP: f32 = 0.5 * CM; // header rule sits this far above the content area
const HEADER_TEXT_RISE: f32 = 0.2 * CM;
const FOOTER_BASELINE: f32 = 1.2 * CM;
const HEADER_FONT_SIZE: f32 = 7.0;
const FOOTER_FONT_SIZE: f32 = 8.0;
const RULE_WIDTH: f32 = 0.5;
const RULE_COLOR: [u8; 3] = [0xcb, 0xd5, 0xe0];
const MUTED: [u8; 3] = [0x71, 0x80, 0x96];

/// Running header/footer painted on every page: a rule above the content
/// area carrying the header text (left) and date (right), and a centered
/// "<label> N" in the bottom margin. Lives entirely in the margins, so it
/// never takes content space.
#[derive(Clone, Debug, PartialEq)]
pub struct PageDecorator {
    pub header_text: String,
    pub date: String,
    pub page_label: String,
}

impl PageDecorator {
    pub fn new(
        header_text: impl Into<String>,
        date: impl Into<String>,
        page_label: impl Into<String>,
    ) -> Self {
        Self {
            header_text: header_text.into(),
            date: date.into(),
            page_label: page_label.into(),
        }
    }

    pub fn paint(&self, page_number: usize, geometry: &PageGeometry) -> Vec<DrawOp> {
        let left = geometry.margin_left;
        let right = geometry.page_width - geometry.margin_right;
        let rule_y = geometry.content_top() + RULE_GAP;
        let text_y = rule_y + HEADER_TEXT_RISE;
        // Stay inside the bottom margin even when it is narrow.
        let footer_y = FOOTER_BASELINE.min(geometry.margin_bottom * 0.6);

        let mut ops = vec![DrawOp::Line {
            from: (left, rule_y),
            to: (right, rule_y),
            width: RULE_WIDTH,
            color: RULE_COLOR,
        }];
        for (text, x, anchor) in [
            (&self.header_text, left, Alignment::Left),
            (&self.date, right, Alignment::Right),
        ] {
            if !text.is_empty() {
                ops.push(DrawOp::Text {
                    x,
                    baseline: text_y,
                    text: text.clone(),
                    font_size: HEADER_FONT_SIZE,
                    bold: false,
                    color: MUTED,
                    anchor,
                });
            }
        }
        ops.push(DrawOp::Text {
            x: geometry.page_width / 2.0,
            baseline: footer_y,
            text: format!("{} {page_number}", self.page_label).trim().to_string(),
            font_size: FOOTER_FONT_SIZE,
            bold: false,
            color: MUTED,
            anchor: Alignment::Center,
        });
        ops
    }
}
