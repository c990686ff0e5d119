mod common;

use flowpdf::{Alignment, Error, StyleAttributes, StyleRegistry};

fn attrs(font_size: f32) -> StyleAttributes {
    StyleAttributes {
        font_size: Some(font_size),
        ..Default::default()
    }
}

#[test]
fn child_overrides_and_inherits_from_parent() {
    let mut reg = StyleRegistry::new();
    reg.define(
        "Base",
        StyleAttributes {
            font_size: Some(10.0),
            text_color: Some([1, 2, 3]),
            alignment: Some(Alignment::Justify),
            space_after: Some(6.0),
            ..Default::default()
        },
        None,
    )
    .unwrap();
    let child = reg.define("Child", attrs(14.0), Some("Base")).unwrap();

    assert_eq!(child.font_size, 14.0);
    assert_eq!(child.text_color, [1, 2, 3]);
    assert_eq!(child.alignment, Alignment::Justify);
    assert_eq!(child.space_after, 6.0);
    assert_eq!(child.parent.as_deref(), Some("Base"));
    assert_eq!(reg.resolve("Child").unwrap(), child);
}

#[test]
fn inheritance_is_flattened_through_the_whole_chain() {
    let mut reg = StyleRegistry::new();
    reg.define(
        "A",
        StyleAttributes {
            bold: Some(true),
            leading: Some(20.0),
            ..Default::default()
        },
        None,
    )
    .unwrap();
    reg.define("B", attrs(9.0), Some("A")).unwrap();
    reg.define("C", StyleAttributes::default(), Some("B")).unwrap();

    let c = reg.resolve("C").unwrap();
    assert!(c.bold);
    assert_eq!(c.font_size, 9.0);
    assert_eq!(c.leading, 20.0);
}

#[test]
fn unset_leading_follows_font_size() {
    let mut reg = StyleRegistry::new();
    let style = reg.define("Plain", attrs(10.0), None).unwrap();
    assert!((style.leading - 12.0).abs() < 1e-4);
    assert_eq!(style.text_color, flowpdf::BLACK);
    assert_eq!(style.alignment, Alignment::Left);
}

#[test]
fn duplicate_name_is_rejected() {
    let mut reg = StyleRegistry::new();
    reg.define("Body", attrs(9.0), None).unwrap();
    let err = reg.define("Body", attrs(11.0), None).unwrap_err();
    assert!(matches!(err, Error::DuplicateStyle(name) if name == "Body"));
    assert_eq!(reg.resolve("Body").unwrap().font_size, 9.0);
}

#[test]
fn unknown_names_are_reported() {
    let mut reg = StyleRegistry::new();
    assert!(matches!(reg.resolve("Nope"), Err(Error::UnknownStyle(name)) if name == "Nope"));

    let err = reg.define("Child", attrs(9.0), Some("Ghost")).unwrap_err();
    assert!(matches!(err, Error::UnknownStyle(name) if name == "Ghost"));
    assert!(!reg.contains("Child"));
}

#[test]
fn self_parent_is_a_cycle() {
    let mut reg = StyleRegistry::new();
    let err = reg.define("Loop", attrs(9.0), Some("Loop")).unwrap_err();
    assert!(matches!(
        err,
        Error::CyclicInheritance { name, parent } if name == "Loop" && parent == "Loop"
    ));
    assert!(reg.is_empty());
}

#[test]
fn sample_sheet_has_the_standard_styles() {
    let reg = StyleRegistry::sample();
    for name in [
        "Normal",
        "BodyText",
        "Title",
        "Heading1",
        "Heading2",
        "Heading3",
        "TableCell",
        "TableHeader",
        "Note",
    ] {
        assert!(reg.contains(name), "missing {name}");
    }
    assert_eq!(reg.len(), 9);

    let header = reg.resolve("TableHeader").unwrap();
    assert!(header.bold);
    assert_eq!(header.font_size, 8.0);
    assert_eq!(header.leading, 11.0);
    assert_eq!(header.text_color, flowpdf::WHITE);
}

#[test]
fn report_sheet_layers_on_the_sample() {
    let reg = flowpdf::report::report_styles().unwrap();

    let body = reg.resolve("CustomBody").unwrap();
    assert_eq!(body.font_size, 9.0);
    assert_eq!(body.leading, 13.0);
    assert_eq!(body.alignment, Alignment::Justify);
    assert_eq!(body.text_color, flowpdf::report::TEXT);

    let note = reg.resolve("CustomNote").unwrap();
    assert_eq!(note.left_indent, 8.0);
    assert_eq!(note.border_color, Some(flowpdf::report::NOTE_BORDER));

    let h1 = reg.resolve("CustomH1").unwrap();
    assert!(h1.bold);
    assert_eq!(h1.space_before, 20.0);
    assert_eq!(h1.text_color, flowpdf::report::PRIMARY);

    assert!(reg.contains("Footer"));
    assert!(reg.contains("Heading3"));
}
