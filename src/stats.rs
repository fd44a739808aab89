/// Character, word, and line counts for an editor buffer or input file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl Stats {
    pub fn of(text: &str) -> Self {
        let chars = text.chars().count();
        let words = if text.trim().is_empty() {
            0
        } else {
            text.split_whitespace().count()
        };
        // Counts newline-separated segments, so trailing newlines add a line.
        let lines = if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        };
        Stats { chars, words, lines }
    }
}
