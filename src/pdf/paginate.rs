use std::ops::Range;

use crate::config::{OverflowPolicy, RenderConfig};
use crate::error::Error;
use crate::model::{Block, PageGeometry};
use crate::style::StyleRegistry;

use super::blocks::{Laid, measure};
use super::decorate::{DrawOp, PageDecorator};

/// Slack for comparing accumulated heights.
const EPSILON: f32 = 1e-3;

/// Vertical footprint of a measured block, all the paginator needs to know.
#[derive(Clone, Debug, PartialEq)]
pub enum Extent {
    /// Never split across pages. `leading_space` (space-before, or a whole
    /// spacer) is dropped when the block lands at the top of a page.
    Atomic { height: f32, leading_space: f32 },
    /// A table: a repeatable header plus rows that may only break between rows.
    Rows { header: f32, rows: Vec<f32> },
    /// Blocks kept on one page when they fit on one. Members carry their ids.
    Group(Vec<(usize, Extent)>),
    PageBreak,
}

impl Extent {
    pub fn height(&self, at_page_top: bool) -> f32 {
        match self {
            Extent::Atomic {
                height,
                leading_space,
            } => {
                if at_page_top {
                    height - leading_space
                } else {
                    *height
                }
            }
            Extent::Rows { header, rows } => header + rows.iter().sum::<f32>(),
            Extent::Group(members) => members
                .iter()
                .enumerate()
                .map(|(i, (_, e))| e.height(at_page_top && i == 0))
                .sum(),
            Extent::PageBreak => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// The whole block.
    Whole,
    /// The table header followed by data rows `rows`.
    Rows { rows: Range<usize>, continued: bool },
}

/// One row position inside a table fragment, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowSlot {
    Header,
    Data(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Block id: position in document order, with keep-together members
    /// numbered right after their group.
    pub block: usize,
    /// Distance from the top of the content area to the top of this slot.
    pub offset: f32,
    /// Vertical space consumed, including `space_before`.
    pub height: f32,
    /// Space-before applied inside the slot (0 at the top of a page).
    pub space_before: f32,
    pub kind: FragmentKind,
}

impl Fragment {
    pub fn row_slots(&self) -> Vec<RowSlot> {
        match &self.kind {
            FragmentKind::Whole => Vec::new(),
            FragmentKind::Rows { rows, .. } => std::iter::once(RowSlot::Header)
                .chain(rows.clone().map(RowSlot::Data))
                .collect(),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.offset + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutPage {
    /// 1-based, no gaps.
    pub number: usize,
    pub fragments: Vec<Fragment>,
    /// Running header/footer produced for this page at flush time.
    pub decorations: Vec<DrawOp>,
    pub geometry: PageGeometry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    /// Accepting blocks.
    Open,
    /// The next block did not fit; the page is about to be flushed.
    Full,
}

/// Running state of the single top-to-bottom pass: the current page, its
/// remaining height, and the pages already flushed. `decorate` is called
/// once per page at flush with the page number and geometry.
pub struct PaginatorState<D>
where
    D: Fn(usize, &PageGeometry) -> Vec<DrawOp>,
{
    geometry: PageGeometry,
    decorate: D,
    policy: OverflowPolicy,
    state: PageState,
    page_number: usize,
    remaining: f32,
    fragments: Vec<Fragment>,
    pages: Vec<LaidOutPage>,
}

impl<D> PaginatorState<D>
where
    D: Fn(usize, &PageGeometry) -> Vec<DrawOp>,
{
    pub fn new(geometry: PageGeometry, policy: OverflowPolicy, decorate: D) -> Result<Self, Error> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            decorate,
            policy,
            state: PageState::Open,
            page_number: 1,
            remaining: geometry.usable_height(),
            fragments: Vec::new(),
            pages: Vec::new(),
        })
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn remaining_height(&self) -> f32 {
        self.remaining
    }

    pub fn is_page_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn pages(&self) -> &[LaidOutPage] {
        &self.pages
    }

    fn fits(&self, height: f32) -> bool {
        height <= self.remaining + EPSILON
    }

    pub fn place(&mut self, block: usize, extent: &Extent) -> Result<(), Error> {
        match extent {
            Extent::Atomic {
                height,
                leading_space,
            } => self.place_whole(block, *height, *leading_space, FragmentKind::Whole),
            Extent::Rows { header, rows } => self.place_rows(block, *header, rows),
            Extent::Group(members) => self.place_group(members),
            Extent::PageBreak => {
                if !self.is_page_empty() {
                    log::debug!("block {block}: page break on page {}", self.page_number);
                    self.state = PageState::Full;
                    self.flush();
                }
                Ok(())
            }
        }
    }

    fn place_whole(
        &mut self,
        block: usize,
        height: f32,
        leading_space: f32,
        kind: FragmentKind,
    ) -> Result<(), Error> {
        let leading_space = leading_space.max(0.0).min(height.max(0.0));
        if !self.is_page_empty() && !self.fits(height) {
            log::debug!(
                "block {block}: {height:.2}pt does not fit in {:.2}pt on page {}",
                self.remaining,
                self.page_number
            );
            self.state = PageState::Full;
            self.flush();
        }

        let (height, space_before) = if self.is_page_empty() {
            (height - leading_space, 0.0)
        } else {
            (height, leading_space)
        };
        if self.is_page_empty() {
            if height <= 0.0 {
                // Nothing left once the leading space is dropped.
                return Ok(());
            }
            if !self.fits(height) {
                self.overflow(block, height)?;
            }
        }
        self.push(block, height, space_before, kind);
        Ok(())
    }

    fn place_rows(&mut self, block: usize, header: f32, rows: &[f32]) -> Result<(), Error> {
        if rows.is_empty() {
            return self.place_whole(
                block,
                header,
                0.0,
                FragmentKind::Rows {
                    rows: 0..0,
                    continued: false,
                },
            );
        }

        let mut next = 0usize;
        while next < rows.len() {
            // Header height is reserved on every page the table touches.
            let avail = self.remaining - header;
            let mut used = 0.0f32;
            let mut end = next;
            while end < rows.len() && used + rows[end] <= avail + EPSILON {
                used += rows[end];
                end += 1;
            }

            if end == next {
                if !self.is_page_empty() {
                    log::debug!(
                        "block {block}: no row from {next} fits in {:.2}pt, deferring to page {}",
                        self.remaining,
                        self.page_number + 1
                    );
                    self.state = PageState::Full;
                    self.flush();
                    continue;
                }
                // A single row taller than an empty page.
                self.overflow(block, header + rows[next])?;
                used = rows[next];
                end = next + 1;
            }

            self.push(
                block,
                header + used,
                0.0,
                FragmentKind::Rows {
                    rows: next..end,
                    continued: next > 0,
                },
            );
            next = end;

            if next < rows.len() {
                log::debug!(
                    "block {block}: table split after row {next} on page {}",
                    self.page_number
                );
                self.state = PageState::Full;
                self.flush();
            }
        }
        Ok(())
    }

    fn place_group(&mut self, members: &[(usize, Extent)]) -> Result<(), Error> {
        let at_top = self.is_page_empty();
        let total: f32 = members
            .iter()
            .enumerate()
            .map(|(i, (_, e))| e.height(at_top && i == 0))
            .sum();

        if !at_top && !self.fits(total) {
            let fresh: f32 = members
                .iter()
                .enumerate()
                .map(|(i, (_, e))| e.height(i == 0))
                .sum();
            if fresh <= self.geometry.usable_height() + EPSILON {
                log::debug!(
                    "keep-together group of {} blocks ({total:.2}pt) moves to page {}",
                    members.len(),
                    self.page_number + 1
                );
                self.state = PageState::Full;
                self.flush();
            } else {
                log::debug!(
                    "keep-together group of {} blocks is taller than a page, flowing it",
                    members.len()
                );
            }
        }

        for (id, extent) in members {
            self.place(*id, extent)?;
        }
        Ok(())
    }

    fn overflow(&self, block: usize, height: f32) -> Result<(), Error> {
        let available = self.geometry.usable_height();
        match self.policy {
            OverflowPolicy::Reject => Err(Error::Overflow {
                block,
                height,
                available,
            }),
            OverflowPolicy::Tolerate => {
                log::warn!(
                    "block {block} is {height:.1}pt tall but a page holds {available:.1}pt; letting it overflow"
                );
                Ok(())
            }
        }
    }

    fn push(&mut self, block: usize, height: f32, space_before: f32, kind: FragmentKind) {
        let offset = self.geometry.usable_height() - self.remaining;
        log::debug!(
            "place block {block} on page {} at {offset:.2}pt ({height:.2}pt)",
            self.page_number
        );
        self.fragments.push(Fragment {
            block,
            offset,
            height,
            space_before,
            kind,
        });
        self.remaining -= height;
        if self.remaining <= EPSILON {
            self.remaining = self.remaining.max(0.0);
            self.state = PageState::Full;
        }
    }

    /// Finish the current page: decorate it and open the next one.
    pub fn flush(&mut self) {
        let number = self.page_number;
        let decorations = (self.decorate)(number, &self.geometry);
        log::debug!(
            "flush page {number}: {} fragments, {:.2}pt unused",
            self.fragments.len(),
            self.remaining
        );
        self.pages.push(LaidOutPage {
            number,
            fragments: std::mem::take(&mut self.fragments),
            decorations,
            geometry: self.geometry,
        });
        self.page_number += 1;
        self.remaining = self.geometry.usable_height();
        self.state = PageState::Open;
    }

    /// Flush the last page, whatever it holds, and hand over every page.
    pub fn finish(mut self) -> Vec<LaidOutPage> {
        self.flush();
        self.pages
    }
}

/// The paginated result of one layout pass. Immutable once built.
pub struct Document {
    pages: Vec<LaidOutPage>,
    geometry: PageGeometry,
    laid: Vec<Laid>,
}

impl Document {
    pub fn pages(&self) -> &[LaidOutPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Number of block ids assigned during layout.
    pub fn block_count(&self) -> usize {
        self.laid.len()
    }

    pub(crate) fn laid(&self, block: usize) -> Option<&Laid> {
        self.laid.get(block)
    }
}

/// Lay `blocks` out with the running header/footer described by `config`.
pub fn paginate(
    blocks: &[Block],
    geometry: &PageGeometry,
    registry: &StyleRegistry,
    config: &RenderConfig,
) -> Result<Document, Error> {
    let decorator = PageDecorator::new(&config.header_text, &config.date, &config.page_label);
    paginate_with(blocks, geometry, registry, config.overflow, |n, g| {
        decorator.paint(n, g)
    })
}

/// Lay `blocks` out in one pass, measuring each block only when it is
/// reached, with a caller-supplied page decorator.
pub fn paginate_with<D>(
    blocks: &[Block],
    geometry: &PageGeometry,
    registry: &StyleRegistry,
    policy: OverflowPolicy,
    decorate: D,
) -> Result<Document, Error>
where
    D: Fn(usize, &PageGeometry) -> Vec<DrawOp>,
{
    let mut state = PaginatorState::new(*geometry, policy, decorate)?;
    let width = geometry.usable_width();
    let mut laid: Vec<Laid> = Vec::new();

    for block in blocks {
        let (id, extent) = measure(block, width, registry, &mut laid)?;
        state.place(id, &extent)?;
    }

    let pages = state.finish();
    log::debug!("laid out {} blocks on {} pages", laid.len(), pages.len());
    Ok(Document {
        pages,
        geometry: *geometry,
        laid,
    })
}
