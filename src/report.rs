//! The report look: palette, styles layered on the sample sheet, and the
//! small block builders reports are assembled from.

use crate::error::Error;
use crate::model::{Block, Table};
use crate::style::{Alignment, StyleAttributes, StyleRegistry, WHITE};

pub const PRIMARY: [u8; 3] = [0x1a, 0x36, 0x5d];
pub const SECONDARY: [u8; 3] = [0x2b, 0x6c, 0xb0];
pub const ACCENT: [u8; 3] = [0xe5, 0x3e, 0x3e];
pub const TABLE_HEADER: [u8; 3] = [0x2b, 0x6c, 0xb0];
pub const TABLE_ALT: [u8; 3] = [0xf7, 0xfa, 0xfc];
pub const NOTE_BG: [u8; 3] = [0xff, 0xff, 0xf0];
pub const NOTE_BORDER: [u8; 3] = [0xd6, 0x9e, 0x2e];
pub const BORDER: [u8; 3] = [0xcb, 0xd5, 0xe0];
pub const TEXT: [u8; 3] = [0x2d, 0x37, 0x48];
pub const MUTED: [u8; 3] = [0x71, 0x80, 0x96];

/// `StyleRegistry::sample()` plus the report's own styles.
pub fn report_styles() -> Result<StyleRegistry, Error> {
    let mut reg = StyleRegistry::sample();

    reg.define(
        "CustomTitle",
        StyleAttributes {
            font_size: Some(22.0),
            leading: Some(26.0),
            text_color: Some(PRIMARY),
            space_after: Some(6.0),
            ..Default::default()
        },
        Some("Title"),
    )?;
    reg.define(
        "CustomSubtitle",
        StyleAttributes {
            font_size: Some(11.0),
            text_color: Some(MUTED),
            space_after: Some(4.0),
            ..Default::default()
        },
        Some("Normal"),
    )?;
    reg.define(
        "CustomH1",
        StyleAttributes {
            font_size: Some(16.0),
            leading: Some(19.2),
            text_color: Some(PRIMARY),
            space_before: Some(20.0),
            space_after: Some(8.0),
            ..Default::default()
        },
        Some("Heading1"),
    )?;
    reg.define(
        "CustomH2",
        StyleAttributes {
            font_size: Some(12.0),
            leading: Some(14.4),
            text_color: Some(SECONDARY),
            space_before: Some(14.0),
            space_after: Some(6.0),
            ..Default::default()
        },
        Some("Heading2"),
    )?;
    reg.define(
        "CustomBody",
        StyleAttributes {
            font_size: Some(9.0),
            leading: Some(13.0),
            text_color: Some(TEXT),
            alignment: Some(Alignment::Justify),
            space_before: Some(0.0),
            space_after: Some(6.0),
            ..Default::default()
        },
        Some("BodyText"),
    )?;
    reg.define(
        "CustomNote",
        StyleAttributes {
            background: Some(NOTE_BG),
            border_color: Some(NOTE_BORDER),
            ..Default::default()
        },
        Some("Note"),
    )?;
    reg.define(
        "CustomAction",
        StyleAttributes {
            font_size: Some(9.0),
            leading: Some(13.0),
            text_color: Some(ACCENT),
            space_after: Some(8.0),
            ..Default::default()
        },
        Some("BodyText"),
    )?;
    reg.define(
        "Footer",
        StyleAttributes {
            font_size: Some(8.0),
            text_color: Some(MUTED),
            alignment: Some(Alignment::Center),
            ..Default::default()
        },
        Some("Normal"),
    )?;
    reg.define(
        "CustomTableHeader",
        StyleAttributes {
            text_color: Some(WHITE),
            background: Some(TABLE_HEADER),
            ..Default::default()
        },
        Some("TableHeader"),
    )?;

    Ok(reg)
}

/// 4 pt gap, 1 pt border-colored rule, 8 pt gap.
pub fn horizontal_rule() -> Vec<Block> {
    vec![Block::spacer(4.0), Block::rule(1.0, BORDER), Block::spacer(8.0)]
}

pub fn note_box(text: impl Into<String>) -> Block {
    Block::note(text, "CustomNote")
}

/// Banded table in the report colors. `ratios` may be empty for equal columns.
pub fn data_table(headers: &[&str], rows: &[&[&str]], ratios: &[f32]) -> Result<Block, Error> {
    let mut table = Table::from_strs(headers, rows)?.with_styles("CustomTableHeader", "TableCell");
    if !ratios.is_empty() {
        table = table.with_ratios(ratios)?;
    }
    table.band_color = TABLE_ALT;
    table.grid_color = BORDER;
    Ok(Block::Table(table))
}

/// A section heading that is never left alone at the bottom of a page.
pub fn section(title: impl Into<String>, first: Block) -> Block {
    Block::KeepTogether(vec![Block::heading(2, title, "CustomH2"), first])
}
