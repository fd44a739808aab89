mod error;
mod fonts;
mod layout;
mod pdf;
mod settings;
mod stats;

pub use error::Error;
pub use layout::{Align, DocumentRenderer, MARGIN, compose};
pub use pdf::PdfRenderer;
pub use settings::{DEFAULT_FILENAME, FontFamily, Orientation, PageDimensions, PageSize, Settings};
pub use stats::Stats;

use std::path::Path;
use std::time::Instant;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Render text into PDF bytes with the given settings.
pub fn render(text: &str, settings: &Settings) -> Result<Vec<u8>, Error> {
    let mut doc = PdfRenderer::new(settings)?;
    layout::compose(&mut doc, text, settings);
    doc.finish()
}

/// Render text into an embeddable `data:` URI, the preview form.
pub fn render_data_uri(text: &str, settings: &Settings) -> Result<String, Error> {
    let bytes = render(text, settings)?;
    Ok(format!(
        "data:application/pdf;base64,{}",
        BASE64.encode(&bytes)
    ))
}

pub fn convert_text_to_pdf(input: &Path, output: &Path, settings: &Settings) -> Result<(), Error> {
    let t0 = Instant::now();

    let text = std::fs::read_to_string(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    let t_read = t0.elapsed();

    let bytes = render(&text, settings)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    let counts = Stats::of(&text);
    log::info!(
        "Converted {} chars / {} words / {} lines: read={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        counts.chars,
        counts.words,
        counts.lines,
        t_read.as_secs_f64() * 1000.0,
        (t_render - t_read).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
