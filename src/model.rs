use crate::error::Error;

/// Points per centimetre.
pub const CM: f32 = 72.0 / 2.54;
/// ISO A4 in points.
pub const A4: (f32, f32) = (595.2756, 841.8898);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin_top: f32,
        margin_bottom: f32,
        margin_left: f32,
        margin_right: f32,
    ) -> Result<Self, Error> {
        let geometry = Self {
            page_width,
            page_height,
            margin_top,
            margin_bottom,
            margin_left,
            margin_right,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// A4 with 2.5 cm top and 2 cm left/right/bottom margins.
    pub fn a4() -> Self {
        Self {
            page_width: A4.0,
            page_height: A4.1,
            margin_top: 2.5 * CM,
            margin_bottom: 2.0 * CM,
            margin_left: 2.0 * CM,
            margin_right: 2.0 * CM,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn usable_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// PDF y coordinate of the top edge of the content area.
    pub fn content_top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    pub fn validate(&self) -> Result<(), Error> {
        let dims = [
            self.page_width,
            self.page_height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if dims.iter().any(|d| !d.is_finite()) {
            return Err(Error::InvalidLayout(
                "page geometry contains a non-finite value".into(),
            ));
        }
        if dims[2..].iter().any(|m| *m < 0.0) {
            return Err(Error::InvalidLayout("page margins must not be negative".into()));
        }
        if self.usable_width() <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "usable width {:.1}pt is not positive",
                self.usable_width()
            )));
        }
        if self.usable_height() <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "usable height {:.1}pt is not positive",
                self.usable_height()
            )));
        }
        Ok(())
    }
}

pub const DEFAULT_BAND_COLOR: [u8; 3] = [0xf7, 0xfa, 0xfc];
pub const DEFAULT_GRID_COLOR: [u8; 3] = [0xcb, 0xd5, 0xe0];

/// A validated table: every row has the header's cell count and the
/// column ratios are positive and sum to 1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_ratios: Vec<f32>,
    banding: bool,
    pub cell_style: String,
    pub header_style: String,
    pub band_color: [u8; 3],
    pub grid_color: [u8; 3],
}

impl Table {
    /// Equal-width columns, banding on.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, Error> {
        if headers.is_empty() {
            return Err(Error::InvalidLayout("table has no columns".into()));
        }
        for (ri, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(Error::ColumnMismatch {
                    row: ri,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }
        let n = headers.len();
        Ok(Self {
            headers,
            rows,
            col_ratios: vec![1.0 / n as f32; n],
            banding: true,
            cell_style: String::from("TableCell"),
            header_style: String::from("TableHeader"),
            band_color: DEFAULT_BAND_COLOR,
            grid_color: DEFAULT_GRID_COLOR,
        })
    }

    /// Convenience for literal data.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Result<Self, Error> {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Relative column widths; normalized so they sum to 1.0.
    pub fn with_ratios(mut self, ratios: &[f32]) -> Result<Self, Error> {
        if ratios.len() != self.headers.len() {
            return Err(Error::InvalidLayout(format!(
                "{} column ratios given for {} columns",
                ratios.len(),
                self.headers.len()
            )));
        }
        if let Some(bad) = ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(Error::InvalidLayout(format!(
                "column ratio {bad} is not positive"
            )));
        }
        let total: f32 = ratios.iter().sum();
        self.col_ratios = ratios.iter().map(|r| r / total).collect();
        Ok(self)
    }

    pub fn with_banding(mut self, banding: bool) -> Self {
        self.banding = banding;
        self
    }

    pub fn with_styles(mut self, header_style: &str, cell_style: &str) -> Self {
        self.header_style = header_style.to_string();
        self.cell_style = cell_style.to_string();
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn col_ratios(&self) -> &[f32] {
        &self.col_ratios
    }

    pub fn banding(&self) -> bool {
        self.banding
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One unit of report content, in reading order.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        style: String,
    },
    Paragraph {
        text: String,
        style: String,
    },
    Table(Table),
    NoteBox {
        text: String,
        style: String,
    },
    Rule {
        thickness: f32,
        color: [u8; 3],
    },
    Spacer {
        height: f32,
    },
    PageBreak,
    /// Blocks that must land on the same page when they can.
    KeepTogether(Vec<Block>),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>, style: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
            style: style.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>, style: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            style: style.into(),
        }
    }

    pub fn note(text: impl Into<String>, style: impl Into<String>) -> Self {
        Block::NoteBox {
            text: text.into(),
            style: style.into(),
        }
    }

    pub fn rule(thickness: f32, color: [u8; 3]) -> Self {
        Block::Rule { thickness, color }
    }

    pub fn spacer(height: f32) -> Self {
        Block::Spacer { height }
    }

    /// Headings, paragraphs, note boxes, rules and spacers never split.
    pub fn is_atomic(&self) -> bool {
        !matches!(self, Block::Table(_) | Block::PageBreak | Block::KeepTogether(_))
    }
}
