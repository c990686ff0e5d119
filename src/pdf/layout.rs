use pdf_writer::{Content, Name, Str};

use crate::fonts::{font, to_winansi_bytes};
use crate::markup::{Span, is_break_space, split_words};
use crate::style::Alignment;

/// Fraction of the font size between the top of a line box and its baseline.
pub(crate) const ASCENDER_RATIO: f32 = 0.75;

#[derive(Clone, Debug)]
pub(crate) struct WordChunk {
    pub(crate) text: String,
    pub(crate) bold: bool,
    pub(crate) x_offset: f32, // x relative to line start
    pub(crate) width: f32,
    /// Continues the previous chunk without a space; never stretched apart.
    pub(crate) attached: bool,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TextLine {
    pub(crate) chunks: Vec<WordChunk>,
    pub(crate) total_width: f32,
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Wrap spans into lines at word boundaries.
/// No space is inserted between spans unless the preceding text ended with
/// whitespace or the new span starts with it ("<b>bold</b>, x" → "bold," not "bold ,").
/// A word wider than `max_width` gets a line of its own and overflows it.
/// Always returns at least one (possibly empty) line.
pub(crate) fn build_lines(spans: &[Span], font_size: f32, max_width: f32) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let mut prev_space_w: f32 = 0.0;

    for span in spans {
        let entry = font(span.bold);
        let space_w = entry.space_width(font_size);
        let starts_with_ws = span.text.starts_with(is_break_space);

        for (i, word) in split_words(&span.text).enumerate() {
            let ww = entry.word_width(word, font_size);

            let need_space =
                !current_chunks.is_empty() && (i > 0 || starts_with_ws || prev_ended_with_ws);

            // The space belongs to whichever span holds the whitespace character.
            let effective_space_w = if i > 0 || starts_with_ws {
                space_w
            } else {
                prev_space_w
            };

            let proposed_x = if need_space {
                current_x + effective_space_w
            } else {
                current_x
            };

            if !current_chunks.is_empty() && proposed_x + ww > max_width {
                lines.push(finish_line(&mut current_chunks));
                current_x = 0.0;
            } else {
                current_x = proposed_x;
            }

            let attached = !need_space && !current_chunks.is_empty();
            current_chunks.push(WordChunk {
                text: word.to_string(),
                bold: span.bold,
                x_offset: current_x,
                width: ww,
                attached,
            });
            current_x += ww;
        }

        if !span.text.is_empty() {
            prev_ended_with_ws = span.text.ends_with(is_break_space);
            prev_space_w = space_w;
        }
    }

    if !current_chunks.is_empty() {
        lines.push(finish_line(&mut current_chunks));
    }

    if lines.is_empty() {
        lines.push(TextLine::default());
    }
    lines
}

/// Height of `lines` at a given leading.
pub(crate) fn lines_height(lines: &[TextLine], leading: f32) -> f32 {
    lines.len() as f32 * leading
}

pub(crate) fn set_fill(content: &mut Content, [r, g, b]: [u8; 3]) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

pub(crate) fn set_stroke(content: &mut Content, [r, g, b]: [u8; 3]) {
    content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

pub(crate) struct TextBox {
    pub(crate) x: f32,
    pub(crate) width: f32,
    /// PDF y of the top of the first line box.
    pub(crate) top: f32,
    pub(crate) leading: f32,
    pub(crate) font_size: f32,
    pub(crate) color: [u8; 3],
    pub(crate) alignment: Alignment,
}

/// Draw pre-built lines with the box's alignment. Justified paragraphs keep
/// their last line left-aligned.
pub(crate) fn render_lines(content: &mut Content, lines: &[TextLine], tb: &TextBox) {
    if lines.iter().all(|l| l.chunks.is_empty()) {
        return;
    }

    content.save_state();
    set_fill(content, tb.color);
    content.begin_text();

    let mut cur_bold: Option<bool> = None;
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;
    let last_line_idx = lines.len().saturating_sub(1);
    let first_baseline = tb.top - tb.font_size * ASCENDER_RATIO;

    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline - line_num as f32 * tb.leading;

        let gaps = line.chunks.iter().skip(1).filter(|c| !c.attached).count();
        let is_justified =
            tb.alignment == Alignment::Justify && line_num != last_line_idx && gaps > 0;

        let line_start_x = match tb.alignment {
            Alignment::Center => tb.x + (tb.width - line.total_width) / 2.0,
            Alignment::Right => tb.x + tb.width - line.total_width,
            Alignment::Left | Alignment::Justify => tb.x,
        };

        let extra_per_gap = if is_justified {
            ((tb.width - line.total_width) / gaps as f32).max(0.0)
        } else {
            0.0
        };

        let mut stretch = 0.0_f32;
        for (chunk_idx, chunk) in line.chunks.iter().enumerate() {
            if chunk_idx > 0 && !chunk.attached {
                stretch += extra_per_gap;
            }
            if cur_bold != Some(chunk.bold) {
                content.set_font(Name(font(chunk.bold).pdf_name.as_bytes()), tb.font_size);
                cur_bold = Some(chunk.bold);
            }

            let x = line_start_x + chunk.x_offset + stretch;
            content.next_line(x - td_x, y - td_y);
            td_x = x;
            td_y = y;
            content.show(Str(&to_winansi_bytes(&chunk.text)));
        }
    }

    content.end_text();
    content.restore_state();
}

/// Draw a single string anchored at `x` according to `anchor`
/// (left edge, center, or right edge).
pub(crate) fn render_label(
    content: &mut Content,
    text: &str,
    x: f32,
    baseline: f32,
    font_size: f32,
    bold: bool,
    color: [u8; 3],
    anchor: Alignment,
) {
    if text.is_empty() {
        return;
    }
    let entry = font(bold);
    let width = entry.word_width(text, font_size);
    let start_x = match anchor {
        Alignment::Center => x - width / 2.0,
        Alignment::Right => x - width,
        Alignment::Left | Alignment::Justify => x,
    };
    content.save_state();
    set_fill(content, color);
    content.begin_text();
    content.set_font(Name(entry.pdf_name.as_bytes()), font_size);
    content.next_line(start_x, baseline);
    content.show(Str(&to_winansi_bytes(text)));
    content.end_text();
    content.restore_state();
}
