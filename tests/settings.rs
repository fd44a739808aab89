use std::path::Path;

use textide_pdf::{DEFAULT_FILENAME, Settings};

#[test]
fn blank_filename_falls_back_to_default() {
    let mut settings = Settings::default();
    settings.set_filename("");
    assert_eq!(settings.filename, DEFAULT_FILENAME);
    settings.set_filename("   ");
    assert_eq!(settings.filename, DEFAULT_FILENAME);
    settings.set_filename("report");
    assert_eq!(settings.filename, "report");
}

#[test]
fn default_filename_adopts_the_input_stem() {
    let mut settings = Settings::default();
    settings.apply_input_stem(Path::new("notes/meeting-notes.txt"));
    assert_eq!(settings.filename, "meeting-notes");
}

#[test]
fn customized_filename_is_left_untouched() {
    let mut settings = Settings::default();
    settings.set_filename("my-report");
    settings.apply_input_stem(Path::new("meeting-notes.txt"));
    assert_eq!(settings.filename, "my-report");
}

#[test]
fn output_path_appends_the_pdf_extension() {
    let mut settings = Settings::default();
    assert_eq!(settings.output_path(), Path::new("document.pdf"));
    settings.set_filename("report");
    assert_eq!(settings.output_path(), Path::new("report.pdf"));
}
