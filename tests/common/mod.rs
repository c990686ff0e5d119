#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use flowpdf::{
    Block, DrawOp, FragmentKind, LaidOutPage, PageGeometry, StyleAttributes, StyleRegistry,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 200pt wide page whose content area is exactly `usable_height` tall
/// (20pt margins all round, so 160pt usable width).
pub fn geometry(usable_height: f32) -> PageGeometry {
    PageGeometry::new(200.0, usable_height + 40.0, 20.0, 20.0, 20.0, 20.0)
        .expect("valid test geometry")
}

/// Sample sheet plus `Fixed`: 10pt text on a 12pt leading, no spacing,
/// so a one-line paragraph is exactly 12pt tall.
pub fn registry() -> StyleRegistry {
    let mut reg = StyleRegistry::sample();
    reg.define(
        "Fixed",
        StyleAttributes {
            font_size: Some(10.0),
            leading: Some(12.0),
            space_before: Some(0.0),
            space_after: Some(0.0),
            ..Default::default()
        },
        None,
    )
    .expect("define Fixed");
    reg
}

pub fn line(text: &str) -> Block {
    Block::paragraph(text, "Fixed")
}

pub fn no_decoration(_: usize, _: &PageGeometry) -> Vec<DrawOp> {
    Vec::new()
}

/// Decorator that remembers every page number it was called with.
#[derive(Default)]
pub struct Recorder {
    pub calls: RefCell<Vec<usize>>,
}

impl Recorder {
    pub fn paint(&self, page: usize, _: &PageGeometry) -> Vec<DrawOp> {
        self.calls.borrow_mut().push(page);
        Vec::new()
    }
}

/// Data-row ranges of block `block` on each page it appears on.
pub fn row_ranges(pages: &[LaidOutPage], block: usize) -> Vec<(usize, std::ops::Range<usize>, bool)> {
    let mut out = Vec::new();
    for page in pages {
        for frag in page.fragments.iter().filter(|f| f.block == block) {
            if let FragmentKind::Rows { rows, continued } = &frag.kind {
                out.push((page.number, rows.clone(), *continued));
            }
        }
    }
    out
}

/// Scratch directory for files a test writes, under cargo's test tmpdir.
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::create_dir_all(&dir).expect("create test output dir");
    dir
}
