mod common;

use common::{Op, RecordingRenderer};
use textide_pdf::{Align, Settings, compose};

/// n input lines; the recording renderer wraps newline-only, so this yields
/// exactly n wrapped lines.
fn lines_text(n: usize) -> String {
    (1..=n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// A4 portrait, 12pt body, 20mm margins: cursor advances 6mm per line and a
// page break triggers once the cursor passes 277mm, so 43 lines fit per page
// (40 on page 1 when the header claims 20mm).

#[test]
fn body_starts_at_top_margin_without_header() {
    let settings = Settings::default();
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, "hello", &settings);

    let texts = doc.texts(0);
    assert_eq!(texts, vec![("hello", 20.0, 20.0, Align::Left)]);
}

#[test]
fn header_reserves_twenty_mm_before_body() {
    let mut settings = Settings::default();
    settings.header_text = "Quarterly report".to_string();
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, "hello", &settings);

    let texts = doc.texts(0);
    assert_eq!(texts[0], ("Quarterly report", 20.0, 20.0, Align::Left));
    // Rule across the usable width, 10mm below the header text.
    assert!(doc.pages[0].contains(&Op::Line {
        x1: 20.0,
        y1: 30.0,
        x2: 190.0,
        y2: 30.0,
    }));
    // Body starts another 10mm below the rule: 20mm reserved in total.
    assert_eq!(texts[1], ("hello", 20.0, 40.0, Align::Left));
}

#[test]
fn header_is_not_repeated_on_later_pages() {
    let mut settings = Settings::default();
    settings.header_text = "CONFIDENTIAL".to_string();
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, &lines_text(60), &settings);

    assert_eq!(doc.pages.len(), 2);
    assert!(doc.texts(0).iter().any(|(t, ..)| *t == "CONFIDENTIAL"));
    assert!(doc.texts(1).iter().all(|(t, ..)| *t != "CONFIDENTIAL"));
    // Page 2 body resumes at the plain top margin, not below a header.
    assert_eq!(doc.texts(1)[0], ("line 41", 20.0, 20.0, Align::Left));
}

#[test]
fn full_page_stays_single_then_one_more_line_overflows() {
    let settings = Settings::default();

    let mut exact = RecordingRenderer::new();
    compose(&mut exact, &lines_text(43), &settings);
    assert_eq!(exact.pages.len(), 1);

    let mut overflow = RecordingRenderer::new();
    compose(&mut overflow, &lines_text(44), &settings);
    assert_eq!(overflow.pages.len(), 2);
    // The overflow line lands at the top margin of page 2.
    assert_eq!(overflow.texts(1), vec![("line 44", 20.0, 20.0, Align::Left)]);
}

#[test]
fn line_numbers_count_wrapped_lines_across_pages() {
    let mut settings = Settings::default();
    settings.line_numbers = true;
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, &lines_text(45), &settings);

    // Labels are right-aligned 5mm inside the margin, in 8pt.
    let texts = doc.texts(0);
    assert_eq!(texts[0], ("1", 15.0, 20.0, Align::Right));
    assert_eq!(texts[1], ("line 1", 20.0, 20.0, Align::Left));
    let label_pos = doc.pages[0]
        .iter()
        .position(|op| matches!(op, Op::Text { text, .. } if text == "1"))
        .unwrap();
    assert_eq!(doc.pages[0][label_pos - 1], Op::SetFontSize(8.0));
    // Body size and color are restored before the line text itself.
    assert_eq!(doc.pages[0][label_pos + 1], Op::SetTextColor([0, 0, 0]));
    assert_eq!(doc.pages[0][label_pos + 2], Op::SetFontSize(12.0));

    // Numbering continues across the page break instead of resetting.
    let page2 = doc.texts(1);
    assert_eq!(page2[0], ("44", 15.0, 20.0, Align::Right));
    assert_eq!(page2[1], ("line 44", 20.0, 20.0, Align::Left));
}

#[test]
fn page_numbers_use_the_final_total_on_every_page() {
    let mut settings = Settings::default();
    settings.page_numbers = true;
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, &lines_text(44), &settings);

    // Stamped centered, 10mm above the bottom edge, as the last draw on each
    // page even though page 1 was laid out before the total was known.
    let (text, x, y, align) = *doc.texts(0).last().unwrap();
    assert_eq!((text, x, y, align), ("Page 1 of 2", 105.0, 287.0, Align::Center));
    let (text, x, y, align) = *doc.texts(1).last().unwrap();
    assert_eq!((text, x, y, align), ("Page 2 of 2", 105.0, 287.0, Align::Center));
}

#[test]
fn page_numbers_disabled_leaves_pages_unstamped() {
    let settings = Settings::default();
    let mut doc = RecordingRenderer::new();
    compose(&mut doc, &lines_text(44), &settings);

    for page in 0..2 {
        assert!(
            doc.texts(page)
                .iter()
                .all(|(t, ..)| !t.starts_with("Page "))
        );
    }
}
