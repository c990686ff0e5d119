use std::sync::OnceLock;

use pdf_writer::{Name, Pdf, Ref};

/// Metrics for one of the two standard fonts the engine draws with.
/// No font files are read: Helvetica and Helvetica-Bold are base-14 fonts
/// every PDF viewer provides.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static str,
    pub(crate) base_font: &'static str,
    widths_1000: Vec<f32>,
}

impl FontEntry {
    /// Width of a single character in 1000-units, measured as the byte
    /// `to_winansi_bytes` draws for it.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = drawn_byte(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

static REGULAR: OnceLock<FontEntry> = OnceLock::new();
static BOLD: OnceLock<FontEntry> = OnceLock::new();

pub(crate) fn font(bold: bool) -> &'static FontEntry {
    if bold {
        BOLD.get_or_init(|| FontEntry {
            pdf_name: "F2",
            base_font: "Helvetica-Bold",
            widths_1000: winansi_widths(&HELVETICA_BOLD_ASCII),
        })
    } else {
        REGULAR.get_or_init(|| FontEntry {
            pdf_name: "F1",
            base_font: "Helvetica",
            widths_1000: winansi_widths(&HELVETICA_ASCII),
        })
    }
}

/// Both fonts, in resource order.
pub(crate) fn all_fonts() -> [&'static FontEntry; 2] {
    [font(false), font(true)]
}

/// Write the Type1 font dictionary for `entry`.
pub(crate) fn write_font(pdf: &mut Pdf, font_ref: Ref, entry: &FontEntry) {
    pdf.type1_font(font_ref)
        .base_font(Name(entry.base_font.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
}

// AFM advance widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Widths at 1000 units/em for WinAnsi bytes 32..=255. The upper half is
/// approximated from the letter shapes it maps to.
fn winansi_widths(ascii: &[u16; 95]) -> Vec<f32> {
    let at = |c: u8| ascii[(c - 32) as usize] as f32;
    (32u8..=255u8)
        .map(|b| match b {
            32..=126 => at(b),
            0x85 | 0x89 | 0x97 => 1000.0, // ellipsis, per mille, em dash
            0x91 | 0x92 => 222.0,
            0x93 | 0x94 => 333.0,
            0x95 => 350.0,               // bullet
            0x96 => 556.0,               // en dash
            0xA0 => at(b' '),            // no-break space
            0xC0..=0xC5 => at(b'A'),
            0xC6 => 1000.0,
            0xC7 => at(b'C'),
            0xC8..=0xCB => at(b'E'),
            0xCC..=0xCF => at(b'I'),
            0xD1 => at(b'N'),
            0xD2..=0xD6 | 0xD8 => at(b'O'),
            0xD9..=0xDC => at(b'U'),
            0xDD => at(b'Y'),
            0xE0..=0xE5 => at(b'a'),
            0xE7 => at(b'c'),
            0xE8..=0xEB => at(b'e'),
            0xEC..=0xEF => at(b'i'),
            0xF1 => at(b'n'),
            0xF2..=0xF6 | 0xF8 => at(b'o'),
            0xF9..=0xFC => at(b'u'),
            0xFD | 0xFF => at(b'y'),
            _ => 556.0,
        })
        .collect()
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars().map(drawn_byte).collect()
}

fn drawn_byte(c: char) -> u8 {
    match char_to_winansi(c) {
        0 => b'?',
        b => b,
    }
}
