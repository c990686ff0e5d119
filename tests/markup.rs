use flowpdf::{Span, parse_spans, plain_text};

fn span(text: &str, bold: bool) -> Span {
    Span {
        text: text.to_string(),
        bold,
    }
}

#[test]
fn bold_tags_split_spans() {
    assert_eq!(
        parse_spans("Total: <b>42</b> items", false),
        vec![span("Total: ", false), span("42", true), span(" items", false)]
    );
}

#[test]
fn tags_are_case_insensitive_and_may_end_the_text() {
    assert_eq!(
        parse_spans("a <B>b</B>", false),
        vec![span("a ", false), span("b", true)]
    );
    assert_eq!(parse_spans("trailing <b>", false), vec![span("trailing ", false)]);
}

#[test]
fn bold_base_style_stays_bold() {
    assert_eq!(parse_spans("x <b>y</b> z", true), vec![span("x y z", true)]);
}

#[test]
fn entities_are_decoded() {
    assert_eq!(
        parse_spans("R&amp;D &lt;tag&gt; &quot;q&quot; it&#39;s", false),
        vec![span("R&D <tag> \"q\" it's", false)]
    );
    assert_eq!(parse_spans("5&nbsp;%", false), vec![span("5\u{a0}%", false)]);
}

#[test]
fn unknown_markup_is_literal() {
    assert_eq!(
        parse_spans("<i>x</i> & y", false),
        vec![span("<i>x</i> & y", false)]
    );
}

#[test]
fn plain_text_strips_markup() {
    assert_eq!(plain_text("<b>1.</b> Scope&nbsp;&amp; aims"), "1. Scope & aims");
    assert_eq!(plain_text(""), "");
}
