use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use textide_pdf::{Error, FontFamily, Orientation, PageSize, Settings, Stats};

#[derive(Parser, Debug)]
#[command(name = "textide-pdf", version, about = "Convert plain text into a paginated PDF document")]
struct Cli {
    /// Input text file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output path; defaults to <FILENAME>.pdf in the working directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output filename, without extension. When left at the default, a file
    /// input's own name (extension stripped) is adopted instead.
    #[arg(long, default_value = textide_pdf::DEFAULT_FILENAME)]
    filename: String,

    /// Body font family
    #[arg(long, value_enum, default_value_t = FontFamily::Helvetica)]
    font: FontFamily,

    /// Embed this TTF/OTF file as the body font instead of a built-in family
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Body font size in points
    #[arg(long, default_value_t = 12.0)]
    font_size: f32,

    #[arg(long, value_enum, default_value_t = PageSize::A4)]
    page_size: PageSize,

    #[arg(long, value_enum, default_value_t = Orientation::Portrait)]
    orientation: Orientation,

    /// Header text drawn on the first page
    #[arg(long, default_value = "")]
    header: String,

    /// Stamp "Page i of N" on every page
    #[arg(long)]
    page_numbers: bool,

    /// Number each wrapped output line in the margin
    #[arg(long)]
    line_numbers: bool,

    /// Print the preview data URI to stdout instead of writing a file
    #[arg(long)]
    data_uri: bool,

    /// Print character/word/line counts and exit without rendering
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("conversion failed: {e}");
            eprintln!("error: failed to generate PDF; check your content and options");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut settings = Settings::default();
    settings.set_filename(&cli.filename);
    settings.font = cli.font;
    settings.font_file = cli.font_file;
    settings.font_size = cli.font_size;
    settings.page_size = cli.page_size;
    settings.orientation = cli.orientation;
    settings.header_text = cli.header;
    settings.page_numbers = cli.page_numbers;
    settings.line_numbers = cli.line_numbers;

    let input = cli.input.filter(|p| p.as_os_str() != "-");
    let text = match &input {
        Some(path) => {
            settings.apply_input_stem(path);
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if cli.stats {
        let counts = Stats::of(&text);
        println!(
            "{} characters, {} words, {} lines",
            counts.chars, counts.words, counts.lines
        );
        return Ok(());
    }

    if cli.data_uri {
        println!("{}", textide_pdf::render_data_uri(&text, &settings)?);
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(|| settings.output_path());
    match &input {
        Some(path) => textide_pdf::convert_text_to_pdf(path, &output, &settings)?,
        None => {
            let bytes = textide_pdf::render(&text, &settings)?;
            std::fs::write(&output, &bytes)?;
        }
    }
    log::info!("wrote {}", output.display());

    Ok(())
}
