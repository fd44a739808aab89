use textide_pdf::Stats;

#[test]
fn empty_text_has_no_words_or_lines() {
    let s = Stats::of("");
    assert_eq!(s.chars, 0);
    assert_eq!(s.words, 0);
    assert_eq!(s.lines, 0);
}

#[test]
fn whitespace_runs_separate_words() {
    assert_eq!(Stats::of("a b  c").words, 3);
    assert_eq!(Stats::of("  padded  ").words, 1);
    assert_eq!(Stats::of("   ").words, 0);
}

#[test]
fn chars_count_the_raw_text() {
    assert_eq!(Stats::of("a b  c").chars, 6);
    assert_eq!(Stats::of("héllo").chars, 5);
}

#[test]
fn lines_count_newline_separated_segments() {
    assert_eq!(Stats::of("one").lines, 1);
    assert_eq!(Stats::of("one\ntwo").lines, 2);
    // A trailing newline opens a final empty segment.
    assert_eq!(Stats::of("one\ntwo\n").lines, 3);
}
