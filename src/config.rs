/// What to do with a block that cannot fit even on an empty page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Place the block anyway and let it run past the bottom margin.
    #[default]
    Tolerate,
    /// Abort the render with [`crate::Error::Overflow`].
    Reject,
}

impl OverflowPolicy {
    fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "tolerate" | "overflow" => Some(Self::Tolerate),
            "reject" | "fail" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Render-wide settings that are not part of the content itself.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Left-aligned text on the running header rule.
    pub header_text: String,
    /// Right-aligned date on the running header rule.
    pub date: String,
    /// Prefix of the centered footer label, e.g. "Page" gives "Page 3".
    pub page_label: String,
    /// Title written to the PDF info dictionary.
    pub title: Option<String>,
    pub overflow: OverflowPolicy,
    /// Deflate page content streams.
    pub compress: bool,
    /// Headings up to this level become bookmarks. 0 disables the outline.
    pub outline_depth: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header_text: String::new(),
            date: String::new(),
            page_label: String::from("Page"),
            title: None,
            overflow: OverflowPolicy::Tolerate,
            compress: true,
            outline_depth: 2,
        }
    }
}

impl RenderConfig {
    /// Defaults overlaid with `FLOWPDF_OVERFLOW` (tolerate|reject) and
    /// `FLOWPDF_COMPRESS` (0|1).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var("FLOWPDF_OVERFLOW") {
            match OverflowPolicy::parse(&val) {
                Some(policy) => config.overflow = policy,
                None => log::warn!("Ignoring FLOWPDF_OVERFLOW={val:?}"),
            }
        }
        if let Ok(val) = std::env::var("FLOWPDF_COMPRESS") {
            let val = val.trim().to_ascii_lowercase();
            config.compress = !matches!(val.as_str(), "0" | "false" | "no" | "off");
        }
        config
    }

    pub fn with_header(mut self, header_text: impl Into<String>, date: impl Into<String>) -> Self {
        self.header_text = header_text.into();
        self.date = date.into();
        self
    }
}
