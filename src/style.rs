use std::collections::HashMap;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Attributes a style sets explicitly. `None` means "inherit from the parent"
/// (or fall back to the root defaults when there is no parent).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleAttributes {
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub text_color: Option<[u8; 3]>,
    pub background: Option<[u8; 3]>,
    pub border_color: Option<[u8; 3]>,
    pub alignment: Option<Alignment>,
    pub leading: Option<f32>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub left_indent: Option<f32>,
}

impl StyleAttributes {
    /// Child wins on conflict; anything the child leaves unset comes from `parent`.
    fn merged_over(&self, parent: &StyleAttributes) -> StyleAttributes {
        StyleAttributes {
            font_size: self.font_size.or(parent.font_size),
            bold: self.bold.or(parent.bold),
            text_color: self.text_color.or(parent.text_color),
            background: self.background.or(parent.background),
            border_color: self.border_color.or(parent.border_color),
            alignment: self.alignment.or(parent.alignment),
            leading: self.leading.or(parent.leading),
            space_before: self.space_before.or(parent.space_before),
            space_after: self.space_after.or(parent.space_after),
            left_indent: self.left_indent.or(parent.left_indent),
        }
    }
}

const DEFAULT_FONT_SIZE: f32 = 10.0;
const DEFAULT_LEADING_RATIO: f32 = 1.2;

/// A fully resolved style: every attribute has a concrete value.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub name: String,
    pub parent: Option<String>,
    pub font_size: f32,
    pub bold: bool,
    pub text_color: [u8; 3],
    pub background: Option<[u8; 3]>,
    pub border_color: Option<[u8; 3]>,
    pub alignment: Alignment,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
}

impl Style {
    fn from_flat(name: &str, parent: Option<&str>, attrs: &StyleAttributes) -> Self {
        let font_size = attrs.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        Style {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            font_size,
            bold: attrs.bold.unwrap_or(false),
            text_color: attrs.text_color.unwrap_or(BLACK),
            background: attrs.background,
            border_color: attrs.border_color,
            alignment: attrs.alignment.unwrap_or(Alignment::Left),
            leading: attrs
                .leading
                .unwrap_or(font_size * DEFAULT_LEADING_RATIO),
            space_before: attrs.space_before.unwrap_or(0.0),
            space_after: attrs.space_after.unwrap_or(0.0),
            left_indent: attrs.left_indent.unwrap_or(0.0),
        }
    }
}

struct Entry {
    parent: Option<String>,
    // Already merged with the whole parent chain at define time.
    flat: StyleAttributes,
}

/// Named styles with single-parent inheritance, flattened when defined.
#[derive(Default)]
pub struct StyleRegistry {
    entries: HashMap<String, Entry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base sheet every report starts from.
    pub fn sample() -> Self {
        let mut reg = Self::new();
        let defs: [(&str, Option<&str>, StyleAttributes); 9] = [
            (
                "Normal",
                None,
                StyleAttributes {
                    font_size: Some(10.0),
                    leading: Some(12.0),
                    ..Default::default()
                },
            ),
            (
                "BodyText",
                Some("Normal"),
                StyleAttributes {
                    space_before: Some(6.0),
                    ..Default::default()
                },
            ),
            (
                "Title",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(18.0),
                    leading: Some(22.0),
                    bold: Some(true),
                    alignment: Some(Alignment::Center),
                    space_after: Some(6.0),
                    ..Default::default()
                },
            ),
            (
                "Heading1",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(18.0),
                    leading: Some(21.6),
                    bold: Some(true),
                    space_after: Some(6.0),
                    ..Default::default()
                },
            ),
            (
                "Heading2",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(14.0),
                    leading: Some(16.8),
                    bold: Some(true),
                    space_before: Some(12.0),
                    space_after: Some(6.0),
                    ..Default::default()
                },
            ),
            (
                "Heading3",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(12.0),
                    leading: Some(14.4),
                    bold: Some(true),
                    space_before: Some(12.0),
                    space_after: Some(6.0),
                    ..Default::default()
                },
            ),
            (
                "TableCell",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(8.0),
                    leading: Some(11.0),
                    text_color: Some([0x2d, 0x37, 0x48]),
                    ..Default::default()
                },
            ),
            (
                "TableHeader",
                Some("TableCell"),
                StyleAttributes {
                    bold: Some(true),
                    text_color: Some(WHITE),
                    background: Some([0x2b, 0x6c, 0xb0]),
                    ..Default::default()
                },
            ),
            (
                "Note",
                Some("Normal"),
                StyleAttributes {
                    font_size: Some(9.0),
                    leading: Some(13.0),
                    text_color: Some([0x74, 0x42, 0x10]),
                    background: Some([0xff, 0xff, 0xf0]),
                    border_color: Some([0xd6, 0x9e, 0x2e]),
                    left_indent: Some(8.0),
                    ..Default::default()
                },
            ),
        ];
        for (name, parent, attrs) in defs {
            // Names are distinct and parents precede children.
            let defined = reg.define(name, attrs, parent);
            debug_assert!(defined.is_ok(), "sample style sheet: {defined:?}");
        }
        reg
    }

    pub fn define(
        &mut self,
        name: &str,
        attrs: StyleAttributes,
        parent: Option<&str>,
    ) -> Result<Style, Error> {
        if self.entries.contains_key(name) {
            return Err(Error::DuplicateStyle(name.to_string()));
        }

        let flat = match parent {
            None => attrs,
            Some(parent_name) => {
                self.check_chain(name, parent_name)?;
                let parent_entry = self
                    .entries
                    .get(parent_name)
                    .ok_or_else(|| Error::UnknownStyle(parent_name.to_string()))?;
                attrs.merged_over(&parent_entry.flat)
            }
        };

        let style = Style::from_flat(name, parent, &flat);
        log::debug!(
            "define style {name} (parent {:?}): {:.1}pt/{:.1}pt",
            parent,
            style.font_size,
            style.leading
        );
        self.entries.insert(
            name.to_string(),
            Entry {
                parent: parent.map(str::to_string),
                flat,
            },
        );
        Ok(style)
    }

    /// Walk the would-be parent chain; reaching `name` again means a cycle.
    fn check_chain(&self, name: &str, parent: &str) -> Result<(), Error> {
        let mut chain: Vec<&str> = vec![name];
        let mut current = Some(parent);
        while let Some(id) = current {
            if chain.contains(&id) {
                return Err(Error::CyclicInheritance {
                    name: name.to_string(),
                    parent: parent.to_string(),
                });
            }
            chain.push(id);
            current = self.entries.get(id).and_then(|e| e.parent.as_deref());
        }
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Style, Error> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| Error::UnknownStyle(name.to_string()))?;
        Ok(Style::from_flat(name, entry.parent.as_deref(), &entry.flat))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
