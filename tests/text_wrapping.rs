use textide_pdf::{DocumentRenderer, PdfRenderer, Settings};

// The default renderer measures with the approximate Helvetica table at 12pt:
// 'a' advances 6.672pt and a space 3.336pt, against 56.69pt for a 20mm line.

fn renderer() -> PdfRenderer {
    PdfRenderer::new(&Settings::default()).expect("renderer")
}

#[test]
fn short_text_stays_on_one_line() {
    let doc = renderer();
    let lines = doc.split_text_to_size("hello world", 170.0);
    assert_eq!(lines, vec!["hello world".to_string()]);
}

#[test]
fn words_wrap_at_the_measured_width() {
    let doc = renderer();
    let lines = doc.split_text_to_size("aaa bbb ccc", 20.0);
    assert_eq!(lines, vec!["aaa bbb".to_string(), "ccc".to_string()]);
}

#[test]
fn a_word_wider_than_the_line_is_broken_by_characters() {
    let doc = renderer();
    let lines = doc.split_text_to_size(&"a".repeat(30), 20.0);
    let pieces: Vec<usize> = lines.iter().map(|l| l.len()).collect();
    assert_eq!(pieces, vec![8, 8, 8, 6]);
    assert_eq!(lines.join(""), "a".repeat(30));
}

#[test]
fn newlines_are_preserved_as_line_breaks() {
    let doc = renderer();
    let lines = doc.split_text_to_size("a\n\nb", 170.0);
    assert_eq!(
        lines,
        vec!["a".to_string(), String::new(), "b".to_string()]
    );
}

#[test]
fn empty_text_yields_a_single_empty_line() {
    let doc = renderer();
    assert_eq!(doc.split_text_to_size("", 170.0), vec![String::new()]);
}
