use flowpdf::{Alignment, CM, DrawOp, PageDecorator, PageGeometry};

#[test]
fn header_rule_sits_above_content_area() {
    let geometry = PageGeometry::a4();
    let ops = PageDecorator::new("Annual report", "2024-06-30", "Page").paint(3, &geometry);

    let DrawOp::Line { from, to, width, .. } = &ops[0] else {
        panic!("first op should be the header rule, got {:?}", ops[0]);
    };
    assert!((from.1 - (geometry.page_height - 2.0 * CM)).abs() < 1e-3);
    assert_eq!(from.1, to.1);
    assert_eq!(from.0, geometry.margin_left);
    assert_eq!(to.0, geometry.page_width - geometry.margin_right);
    assert_eq!(*width, 0.5);

    let texts: Vec<(&str, Alignment, f32)> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text,
                anchor,
                baseline,
                ..
            } => Some((text.as_str(), *anchor, *baseline)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 3);
    assert_eq!((texts[0].0, texts[0].1), ("Annual report", Alignment::Left));
    assert_eq!((texts[1].0, texts[1].1), ("2024-06-30", Alignment::Right));
    assert_eq!((texts[2].0, texts[2].1), ("Page 3", Alignment::Center));
    assert!((texts[2].2 - 1.2 * CM).abs() < 1e-3);
    assert!(texts[2].2 < geometry.margin_bottom);
}

#[test]
fn empty_header_text_draws_nothing_for_it() {
    let ops = PageDecorator::new("", "", "Page").paint(1, &PageGeometry::a4());
    let labels: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Page 1"]);
}

#[test]
fn decoration_is_a_pure_function_of_its_inputs() {
    let decorator = PageDecorator::new("R", "D", "Page");
    let geometry = PageGeometry::a4();
    assert_eq!(decorator.paint(7, &geometry), decorator.paint(7, &geometry));
    assert_ne!(decorator.paint(7, &geometry), decorator.paint(8, &geometry));
}
