//! Inline markup accepted in block text: `<b>…</b>` and a handful of
//! HTML entities. Anything else is literal text.

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&nbsp;", '\u{a0}'),
];

/// Split `text` into runs of equal weight. `base_bold` is the style's weight;
/// `<b>` only ever turns bold on.
pub fn parse_spans(text: &str, base_bold: bool) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut rest = text;

    let flush = |spans: &mut Vec<Span>, current: &mut String, bold: bool| {
        if current.is_empty() {
            return;
        }
        match spans.last_mut() {
            Some(last) if last.bold == bold => last.text.push_str(current),
            _ => spans.push(Span {
                text: current.clone(),
                bold,
            }),
        }
        current.clear();
    };

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if starts_with_tag(rest, "<b>") {
                flush(&mut spans, &mut current, base_bold || depth > 0);
                depth += 1;
                rest = &rest[3..];
                continue;
            }
            if starts_with_tag(rest, "</b>") {
                flush(&mut spans, &mut current, base_bold || depth > 0);
                depth = depth.saturating_sub(1);
                rest = &rest[4..];
                continue;
            }
        } else if ch == '&' {
            if let Some((entity, decoded)) = ENTITIES.iter().find(|(e, _)| rest.starts_with(e)) {
                current.push(*decoded);
                rest = &rest[entity.len()..];
                continue;
            }
        }
        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    flush(&mut spans, &mut current, base_bold || depth > 0);
    spans
}

fn starts_with_tag(s: &str, tag: &str) -> bool {
    s.get(..tag.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(tag))
}

/// Whitespace that may end a line. A non-breaking space never does.
pub(crate) fn is_break_space(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}'
}

/// Words of `text` separated by breakable whitespace.
pub(crate) fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_break_space).filter(|w| !w.is_empty())
}

/// Plain text with markup stripped, for bookmarks and logging.
pub fn plain_text(text: &str) -> String {
    parse_spans(text, false)
        .into_iter()
        .map(|s| s.text)
        .collect::<String>()
        .replace('\u{a0}', " ")
}
