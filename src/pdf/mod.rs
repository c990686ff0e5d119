mod blocks;
mod decorate;
mod layout;
mod paginate;
mod table;

use pdf_writer::types::PageMode;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::config::RenderConfig;
use crate::fonts::{all_fonts, write_font};

use blocks::Laid;

pub use decorate::{DrawOp, PageDecorator};
pub use paginate::{
    Document, Extent, Fragment, FragmentKind, LaidOutPage, PageState, PaginatorState, RowSlot,
    paginate, paginate_with,
};
pub use table::{RowBand, RowLayout, TableLayout, band_for, column_widths};

struct OutlineEntry {
    title: String,
    level: u8,
    page: usize,
    x: f32,
    y: f32,
}

/// Headings up to `depth`, in reading order, with where they landed.
fn collect_outline(doc: &Document, depth: u8) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    for (page_idx, page) in doc.pages().iter().enumerate() {
        for frag in &page.fragments {
            if let Some(Laid::Text {
                outline: Some((level, title)),
                ..
            }) = doc.laid(frag.block)
            {
                if *level <= depth && !title.is_empty() {
                    entries.push(OutlineEntry {
                        title: title.clone(),
                        level: *level,
                        page: page_idx,
                        x: page.geometry.margin_left,
                        y: page.geometry.content_top() - frag.offset - frag.space_before,
                    });
                }
            }
        }
    }
    entries
}

/// Write the bookmark tree rooted at `outline_id`. A heading nests under the
/// closest earlier heading of a lower level.
fn write_outline(
    pdf: &mut Pdf,
    outline_id: Ref,
    entries: &[OutlineEntry],
    page_ids: &[Ref],
    alloc: &mut dyn FnMut() -> Ref,
) {
    let n = entries.len();
    let refs: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut parents: Vec<Option<usize>> = Vec::with_capacity(n);
    let mut stack: Vec<usize> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        while let Some(&top) = stack.last() {
            if entries[top].level >= entry.level {
                stack.pop();
            } else {
                break;
            }
        }
        parents.push(stack.last().copied());
        stack.push(i);
    }

    let mut roots: Vec<usize> = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    // Children always follow their parent, so a reverse sweep sees them first.
    let mut descendants = vec![0i32; n];
    for i in (0..n).rev() {
        descendants[i] = children[i].iter().map(|c| 1 + descendants[*c]).sum();
    }

    if let (Some(first), Some(last)) = (roots.first(), roots.last()) {
        pdf.outline(outline_id)
            .first(refs[*first])
            .last(refs[*last])
            .count(n as i32);
    }

    for (i, entry) in entries.iter().enumerate() {
        let siblings = match parents[i] {
            Some(p) => &children[p],
            None => &roots,
        };
        let pos = siblings.iter().position(|s| *s == i).unwrap_or(0);

        let mut item = pdf.outline_item(refs[i]);
        item.title(TextStr(&entry.title));
        item.parent(parents[i].map(|p| refs[p]).unwrap_or(outline_id));
        if pos > 0 {
            item.prev(refs[siblings[pos - 1]]);
        }
        if let Some(next) = siblings.get(pos + 1) {
            item.next(refs[*next]);
        }
        if let (Some(first), Some(last)) = (children[i].first(), children[i].last()) {
            item.first(refs[*first]);
            item.last(refs[*last]);
            item.count(descendants[i]);
        }
        item.dest()
            .page(page_ids[entry.page])
            .xyz(entry.x, entry.y, None);
    }
}

/// Serialize a paginated document. Output depends only on `doc` and
/// `config`: no timestamps or random ids are written.
pub(crate) fn write_pdf(doc: &Document, config: &RenderConfig) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts = all_fonts();
    let font_pairs: Vec<(&str, Ref)> = fonts
        .iter()
        .map(|entry| {
            let font_ref = alloc();
            write_font(&mut pdf, font_ref, entry);
            (entry.pdf_name, font_ref)
        })
        .collect();

    let n = doc.page_count();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in doc.pages().iter().enumerate() {
        let mut content = Content::new();
        for op in &page.decorations {
            op.paint(&mut content);
        }
        for frag in &page.fragments {
            if let Some(laid) = doc.laid(frag.block) {
                blocks::paint(&mut content, laid, frag, &page.geometry);
            }
        }
        let raw = content.finish();
        if config.compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[i], raw.as_slice());
        }
    }

    let outline = if config.outline_depth > 0 {
        collect_outline(doc, config.outline_depth)
    } else {
        Vec::new()
    };
    let outline_id = if outline.is_empty() {
        None
    } else {
        let id = alloc();
        write_outline(&mut pdf, id, &outline, &page_ids, &mut alloc);
        Some(id)
    };

    {
        let mut catalog = pdf.catalog(catalog_id);
        catalog.pages(pages_id);
        if let Some(id) = outline_id {
            catalog.outlines(id);
            catalog.page_mode(PageMode::UseOutlines);
        }
    }
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for (i, page) in doc.pages().iter().enumerate() {
        let g = &page.geometry;
        let mut page_writer = pdf.page(page_ids[i]);
        page_writer
            .media_box(Rect::new(0.0, 0.0, g.page_width, g.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page_writer.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    {
        let mut info = pdf.document_info(info_id);
        info.producer(TextStr("flowpdf"));
        if let Some(title) = &config.title {
            info.title(TextStr(title));
        }
    }

    log::debug!(
        "serialized {n} pages, {} bookmarks, compress={}",
        outline.len(),
        config.compress
    );
    pdf.finish()
}
