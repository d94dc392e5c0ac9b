//! End-to-end tests: spec + values -> annotations -> pages

use form_fill::{
    create_annotations, DrawCall, FillError, PageFormat, PageRenderer, RenderOptions, Spec,
    ValueSet,
};
use lopdf::Document;
use pdf_core::units::MM;
use pretty_assertions::assert_eq;
use std::io::Write;

const SPEC: &str = r#"[
    [1, "WriteString", 0, 76, 210.2],
    [145, "SpacePounds", 1, 79, 93.0, 5.5, 18]
]"#;

const VALUES: &str = r#"{"ct600": {"1": "Test Co", "145": 11218.0}}"#;

/// Decoded content stream of the only page of a rendered buffer
fn page_content(bytes: &[u8]) -> String {
    let doc = Document::load_mem(bytes).expect("Failed to reload PDF");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let content = doc.get_page_content(pages[&1]).unwrap();
    String::from_utf8_lossy(&content).into_owned()
}

#[test]
fn test_end_to_end_scenario() {
    let spec = Spec::from_json(SPEC).unwrap();
    let values = ValueSet::from_json(VALUES).unwrap();
    let annotations = create_annotations(&values, &spec);
    let renderer = PageRenderer::default();

    assert_eq!(annotations.pages(), vec![0, 1]);

    let page0 = renderer.preview(&annotations, 0).unwrap();
    assert_eq!(page0, vec![DrawCall::new(76.0 * MM, 210.2 * MM, "Test Co")]);

    let page1 = renderer.preview(&annotations, 1).unwrap();
    assert_eq!(page1.len(), 18);
    let text: String = page1.iter().map(|call| call.text.as_str()).collect();
    assert_eq!(text, format!("{:>18}", 11218));
    for (i, call) in page1.iter().enumerate() {
        assert_eq!(call.x, (79.0 + 5.5 * i as f64) * MM);
        assert_eq!(call.y, 93.0 * MM);
    }
}

#[test]
fn test_rendered_pages_contain_text() {
    let spec = Spec::from_json(SPEC).unwrap();
    let values = ValueSet::from_json(VALUES).unwrap();
    let annotations = create_annotations(&values, &spec);

    let pages = PageRenderer::default().render_all(&annotations).unwrap();
    assert_eq!(pages.len(), 2);

    let (page, bytes) = &pages[0];
    assert_eq!(*page, 0);
    assert!(bytes.starts_with(b"%PDF-"));
    let content = page_content(bytes);
    assert!(content.contains("/F1 12 Tf"));
    // "Test Co"
    assert!(content.contains("<5465737420436F> Tj"));

    let content = page_content(&pages[1].1);
    assert_eq!(content.matches(" Tj").count(), 18);
}

#[test]
fn test_all_operators() {
    let spec = Spec::from_json(
        r#"[
            [1, "WriteString", 0, 10, 10],
            [2, "WriteNumber", 0, 10, 20],
            [3, "WriteBool", 0, 10, 30],
            [4, "SpaceString", 0, 10, 40, 5],
            [5, "WritePounds", 0, 10, 50],
            [6, "WriteMoney", 0, 10, 60],
            [7, "SpacePounds", 0, 10, 70, 5, 6],
            [8, "SpaceZeroPadNumber", 0, 10, 80, 5, 4],
            [9, "SpaceMoney", 0, 10, 90, 50, 90, 5, 4],
            [10, "WriteSpaceDate", 0, 10, 100, 30, 100, 50, 100, 5],
            [11, "WriteSpaceSortCode", 0, 10, 110, 30, 110, 50, 110, 5]
        ]"#,
    )
    .unwrap();
    let values = ValueSet::from_json(
        r#"{"ct600": {
            "1": "Name",
            "2": 42,
            "3": true,
            "4": "AB",
            "5": 123.45,
            "6": 142.1,
            "7": 748.0,
            "8": 6,
            "9": 100.0,
            "10": "2020-03-25",
            "11": "123465"
        }}"#,
    )
    .unwrap();
    let annotations = create_annotations(&values, &spec);

    let calls = PageRenderer::default().preview(&annotations, 0).unwrap();
    let texts: Vec<&str> = calls.iter().map(|call| call.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Name", "42", "X", "A", "B", "123", "142.10", " ", " ", " ", "7", "4", "8", "0",
            "0", "0", "6", " ", "1", "0", "0", "0", "0", "2", "5", "0", "3", "2", "0", "2", "0",
            "1", "2", "3", "4", "6", "5",
        ]
    );
}

#[test]
fn test_operators_never_leave_their_page() {
    let spec = Spec::from_json(
        r#"[
            [1, "WriteString", 0, 10, 10],
            [1, "WriteString", 3, 10, 10],
            [2, "WriteBool", 2, 10, 10],
            [3, "SpaceString", 3, 10, 10, 5]
        ]"#,
    )
    .unwrap();
    let values = ValueSet::from_pairs([
        (3, "abc".into()),
        (1, "x".into()),
        (2, true.into()),
        (99, "ignored".into()),
    ]);
    let annotations = create_annotations(&values, &spec);

    assert_eq!(annotations.pages(), vec![0, 2, 3]);
    for (page, list) in annotations.iter() {
        assert!(list.iter().all(|a| a.operator.page() == page));
    }

    let page3 = PageRenderer::default().preview(&annotations, 3).unwrap();
    let texts: Vec<&str> = page3.iter().map(|call| call.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c", "x"]);
}

#[test]
fn test_unknown_operator_in_spec() {
    let result = Spec::from_json(r#"[[1, "WriteString", 0, 1, 2], [2, "WriteFoo", 0, 1, 2]]"#);
    assert!(matches!(result, Err(FillError::UnknownOperator(name)) if name == "WriteFoo"));
}

#[test]
fn test_spec_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SPEC.as_bytes()).unwrap();

    let spec = Spec::from_path(file.path()).unwrap();
    assert_eq!(spec.len(), 2);

    let missing = Spec::from_path(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(FillError::Io(_))));
}

#[test]
fn test_letter_options() {
    let spec = Spec::from_json(SPEC).unwrap();
    let values = ValueSet::from_json(VALUES).unwrap();
    let annotations = create_annotations(&values, &spec);
    let renderer = PageRenderer::new(RenderOptions {
        page_size: PageFormat::Letter,
        font: "Courier".to_string(),
        font_size: 9.0,
    })
    .unwrap();

    let bytes = renderer.render_page(&annotations, 0).unwrap();
    let content = page_content(&bytes);
    assert!(content.contains("/F1 9 Tf"));
}
