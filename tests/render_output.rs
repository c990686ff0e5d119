mod common;

use flowpdf::report::{data_table, horizontal_rule, note_box, report_styles, section};
use flowpdf::{
    Block, Error, OverflowPolicy, PageGeometry, RenderConfig, StyleRegistry, render,
    render_document, render_to_file, render_with,
};

fn object_f32(obj: &lopdf::Object) -> f32 {
    match obj {
        lopdf::Object::Integer(i) => *i as f32,
        lopdf::Object::Real(r) => *r as f32,
        other => panic!("not a number: {other:?}"),
    }
}

fn media_boxes(bytes: &[u8]) -> Vec<(f32, f32)> {
    let doc = lopdf::Document::load_mem(bytes).expect("parse generated pdf");
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_dictionary(*id).expect("page dictionary");
            let mb = page
                .get(b"MediaBox")
                .and_then(|o| o.as_array())
                .expect("media box");
            let n: Vec<f32> = mb.iter().map(object_f32).collect();
            (n[2] - n[0], n[3] - n[1])
        })
        .collect()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn sample_report() -> Vec<Block> {
    let mut blocks = vec![
        Block::paragraph("Quarterly report", "CustomTitle"),
        Block::paragraph("Prepared for the board", "CustomSubtitle"),
    ];
    blocks.extend(horizontal_rule());
    for chapter in 1..=3 {
        blocks.push(Block::heading(1, format!("{chapter}. Chapter"), "CustomH1"));
        blocks.push(Block::paragraph(
            "Lorem ipsum dolor sit amet, <b>consectetur</b> adipiscing elit. ".repeat(12),
            "CustomBody",
        ));
        let rows: Vec<[String; 3]> = (0..25)
            .map(|i| [format!("item {i}"), format!("{}", i * 7), "ok".to_string()])
            .collect();
        let row_refs: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect();
        let row_slices: Vec<&[&str]> = row_refs.iter().map(Vec::as_slice).collect();
        blocks.push(section(
            format!("{chapter}.1 Figures"),
            data_table(&["Item", "Amount", "Status"], &row_slices, &[3.0, 1.0, 1.0]).unwrap(),
        ));
        blocks.push(note_box("<b>Note:</b> figures are provisional."));
        blocks.push(Block::paragraph("Follow up next quarter.", "CustomAction"));
    }
    blocks
}

#[test]
fn pages_parse_back_with_a4_media_box() {
    common::init_logger();
    let registry = report_styles().unwrap();
    let geometry = PageGeometry::a4();
    let config = RenderConfig::default().with_header("Quarterly report", "2024-06-30");

    let doc = flowpdf::paginate(&sample_report(), &geometry, &registry, &config).unwrap();
    assert!(doc.page_count() > 1);

    let bytes = render_with(&sample_report(), &geometry, &registry, &config).unwrap();
    let boxes = media_boxes(&bytes);
    assert_eq!(boxes.len(), doc.page_count());
    for (w, h) in boxes {
        assert!((w - 595.2756).abs() < 0.01);
        assert!((h - 841.8898).abs() < 0.01);
    }
}

#[test]
fn a_paginated_document_serializes_like_a_direct_render() {
    let registry = report_styles().unwrap();
    let geometry = PageGeometry::a4();
    let config = RenderConfig::default().with_header("Quarterly report", "2024-06-30");

    let doc = flowpdf::paginate(&sample_report(), &geometry, &registry, &config).unwrap();
    let bytes = render_document(&doc, &config);
    assert_eq!(bytes, render_with(&sample_report(), &geometry, &registry, &config).unwrap());
    assert_eq!(media_boxes(&bytes).len(), doc.page_count());
}

#[test]
fn output_is_byte_identical_across_runs() {
    let registry = report_styles().unwrap();
    let geometry = PageGeometry::a4();
    let a = render(&sample_report(), &geometry, &registry).unwrap();
    let b = render(&sample_report(), &geometry, &registry).unwrap();
    assert_eq!(a, b);
}

#[test]
fn uncompressed_streams_show_footer_labels() {
    let registry = common::registry();
    let blocks: Vec<Block> = (0..7).map(|i| common::line(&format!("row{i}"))).collect();
    let config = RenderConfig {
        compress: false,
        page_label: "Pagina".into(),
        ..RenderConfig::default()
    };

    let bytes = render_with(&blocks, &common::geometry(40.0), &registry, &config).unwrap();
    assert!(contains(&bytes, b"(Pagina 1)"));
    assert!(contains(&bytes, b"(Pagina 3)"));
    assert!(!contains(&bytes, b"(Pagina 4)"));
    assert!(contains(&bytes, b"(row6)"));
    assert!(!contains(&bytes, b"/FlateDecode"));

    let compressed = render(&blocks, &common::geometry(40.0), &registry).unwrap();
    assert!(contains(&compressed, b"/FlateDecode"));
}

#[test]
fn headings_become_bookmarks() {
    let registry = report_styles().unwrap();
    let geometry = PageGeometry::a4();
    let bytes = render(&sample_report(), &geometry, &registry).unwrap();
    assert!(contains(&bytes, b"/Outlines"));
    assert!(contains(&bytes, b"/UseOutlines"));

    let config = RenderConfig {
        outline_depth: 0,
        ..RenderConfig::default()
    };
    let bytes = render_with(&sample_report(), &geometry, &registry, &config).unwrap();
    assert!(!contains(&bytes, b"/Outlines"));
}

#[test]
fn title_goes_into_document_info() {
    let config = RenderConfig {
        title: Some("Annual summary".into()),
        ..RenderConfig::default()
    };
    let bytes = render_with(
        &[common::line("x")],
        &common::geometry(40.0),
        &common::registry(),
        &config,
    )
    .unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let info_id = doc
        .trailer
        .get(b"Info")
        .and_then(|o| o.as_reference())
        .unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    let title = info.get(b"Title").and_then(|o| o.as_str()).unwrap();
    assert_eq!(title, b"Annual summary");
}

#[test]
fn empty_document_renders_one_page() {
    let bytes = render(&[], &PageGeometry::a4(), &StyleRegistry::sample()).unwrap();
    assert_eq!(media_boxes(&bytes).len(), 1);
}

#[test]
fn render_to_file_writes_the_same_bytes() {
    let registry = common::registry();
    let blocks = vec![common::line("hello"), common::line("world")];
    let geometry = common::geometry(100.0);
    let config = RenderConfig::default();
    let path = common::output_dir("render_to_file").join("out.pdf");

    render_to_file(&blocks, &geometry, &registry, &config, &path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, render_with(&blocks, &geometry, &registry, &config).unwrap());
}

#[test]
fn unwritable_destination_is_an_output_error() {
    let path = common::output_dir("unwritable")
        .join("missing-dir")
        .join("out.pdf");
    let err = render_to_file(
        &[common::line("x")],
        &common::geometry(40.0),
        &common::registry(),
        &RenderConfig::default(),
        &path,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Output(_)));
    assert!(!path.exists());
}

#[test]
fn layout_error_leaves_no_file() {
    let path = common::output_dir("layout_error").join("out.pdf");
    let _ = std::fs::remove_file(&path);
    let config = RenderConfig {
        overflow: OverflowPolicy::Reject,
        ..RenderConfig::default()
    };
    let err = render_to_file(
        &[Block::spacer(10.0), Block::rule(80.0, [0, 0, 0])],
        &common::geometry(40.0),
        &common::registry(),
        &config,
        &path,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Overflow { block: 1, .. }));
    assert!(!path.exists());
}
