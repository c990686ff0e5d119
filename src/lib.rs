mod config;
mod error;
mod fonts;
mod markup;
mod model;
mod pdf;
pub mod report;
mod style;

pub use config::{OverflowPolicy, RenderConfig};
pub use error::Error;
pub use markup::{Span, parse_spans, plain_text};
pub use model::{A4, Block, CM, DEFAULT_BAND_COLOR, DEFAULT_GRID_COLOR, PageGeometry, Table};
pub use pdf::{
    Document, DrawOp, Extent, Fragment, FragmentKind, LaidOutPage, PageDecorator, PageState,
    PaginatorState, RowBand, RowLayout, RowSlot, TableLayout, band_for, column_widths, paginate,
    paginate_with,
};
pub use style::{Alignment, BLACK, Style, StyleAttributes, StyleRegistry, WHITE};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Lay out and serialize `blocks` with default settings.
pub fn render(
    blocks: &[Block],
    geometry: &PageGeometry,
    registry: &StyleRegistry,
) -> Result<Vec<u8>, Error> {
    render_with(blocks, geometry, registry, &RenderConfig::default())
}

pub fn render_with(
    blocks: &[Block],
    geometry: &PageGeometry,
    registry: &StyleRegistry,
    config: &RenderConfig,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let doc = paginate(blocks, geometry, registry, config)?;
    let t_layout = t0.elapsed();

    let bytes = render_document(&doc, config);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, serialize={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.page_count(),
        bytes.len(),
    );

    Ok(bytes)
}

/// Serialize an already paginated document.
pub fn render_document(doc: &Document, config: &RenderConfig) -> Vec<u8> {
    pdf::write_pdf(doc, config)
}

/// Render to `path`. The document is built in memory first, so a layout
/// error leaves no file behind; a failed write removes the partial file.
pub fn render_to_file(
    blocks: &[Block],
    geometry: &PageGeometry,
    registry: &StyleRegistry,
    config: &RenderConfig,
    path: &Path,
) -> Result<(), Error> {
    let bytes = render_with(blocks, geometry, registry, config)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let written = writer.write_all(&bytes).and_then(|()| writer.flush());
    drop(writer);

    if let Err(e) = written {
        log::error!("Writing {} failed: {e}", path.display());
        if let Err(rm) = std::fs::remove_file(path) {
            log::warn!("Could not remove partial output {}: {rm}", path.display());
        }
        return Err(Error::Output(e));
    }

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
