//! texassist CLI - inspect autocomplete, insertion and caret mapping

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;

use texassist::{
    core::autocomplete::match_candidate,
    core::insertion::insert,
    is_inside_math_mode, map_offset_to_visual_position, AssistConfig, AssistError, AssistResult,
    AutocompleteMatcher, Category, EditBuffer, LayoutMetrics, MonospaceMeasure, SymbolCatalog,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texassist")]
#[command(version)]
#[command(about = "texassist - LaTeX input assistance from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Extra JSON catalog appended to the configured one
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List suggestions for the command before the cursor
    Suggest {
        /// Text before the cursor (reads stdin if omitted)
        text: Option<String>,
    },

    /// Insert a template and report the new text and cursor
    Insert {
        /// Template to insert, e.g. '\frac{a}{b}'
        template: String,

        /// Buffer contents (reads stdin if omitted)
        #[arg(short, long)]
        text: Option<String>,

        /// Cursor offset in UTF-16 units (defaults to end of text)
        #[arg(long)]
        cursor: Option<usize>,

        /// Replace the partial command before the cursor, like accepting a suggestion
        #[arg(long)]
        replace_candidate: bool,

        #[arg(long, value_enum, default_value_t = CategoryArg::Latex)]
        category: CategoryArg,
    },

    /// Report whether the end of the text is inside math mode
    MathMode {
        /// Text before the offset (reads stdin if omitted)
        text: Option<String>,
    },

    /// Map an offset to its visual position using monospace metrics
    Position {
        /// Input file (reads stdin if omitted)
        input: Option<String>,

        /// Offset in UTF-16 units (defaults to end of text)
        #[arg(long)]
        offset: Option<usize>,

        /// Override the configured container width
        #[arg(long)]
        width: Option<f64>,

        /// Derive line height and character width from a font size (px)
        #[arg(long)]
        font_size: Option<f64>,
    },

    /// Print the catalog
    Catalog {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Latex,
    Markdown,
    Question,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Latex => Category::Latex,
            CategoryArg::Markdown => Category::Markdown,
            CategoryArg::Question => Category::Question,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("TEXASSIST_LOG"))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> AssistResult<()> {
    let config = match &cli.config {
        Some(path) => AssistConfig::load(path)?,
        None => AssistConfig::default(),
    };
    let mut catalog = config.build_catalog()?;
    if let Some(path) = &cli.catalog {
        let extra = SymbolCatalog::load(path)?;
        catalog = Arc::new(catalog.as_ref().clone().chain(extra.iter().cloned())?);
    }
    let matcher = AutocompleteMatcher::new(Arc::clone(&catalog)).with_limit(config.suggestions.max_suggestions);

    match &cli.command {
        Commands::Suggest { text } => {
            let text = text_or_stdin(text.as_deref())?;
            let suggestions = match_candidate(&text)
                .map(|candidate| matcher.suggestions_for(candidate))
                .unwrap_or_default();
            if cli.json {
                print_json(&suggestions)?;
            } else if suggestions.is_empty() {
                println!("(no suggestions)");
            } else {
                for (i, s) in suggestions.iter().enumerate() {
                    println!("{:>3}  {:<24} {} [{}]", i, s.text, s.description, s.category);
                }
            }
        }

        Commands::Insert {
            template,
            text,
            cursor,
            replace_candidate,
            category,
        } => {
            let text = text_or_stdin(text.as_deref())?;
            let buffer = match cursor {
                Some(cursor) => EditBuffer::new(text, *cursor)?,
                None => EditBuffer::at_end(text),
            };
            let range = if *replace_candidate {
                match_candidate(buffer.text_before_cursor()).map(|candidate| {
                    let len = candidate.encode_utf16().count();
                    buffer.cursor() - len..buffer.cursor()
                })
            } else {
                None
            };
            let edit = insert(template, (*category).into(), &buffer, range);
            if cli.json {
                print_json(&edit)?;
            } else {
                println!("{}", edit.new_text);
                println!("cursor: {}", edit.new_cursor_offset);
            }
        }

        Commands::MathMode { text } => {
            let text = text_or_stdin(text.as_deref())?;
            let inside = is_inside_math_mode(&text);
            if cli.json {
                print_json(&inside)?;
            } else {
                println!("{}", if inside { "math" } else { "text" });
            }
        }

        Commands::Position {
            input,
            offset,
            width,
            font_size,
        } => {
            let text = match input {
                Some(path) => fs::read_to_string(path)?,
                None => text_or_stdin(None)?,
            };
            let mut metrics = config.layout_metrics();
            if let Some(size) = font_size {
                if !(size.is_finite() && *size > 0.0) {
                    return Err(AssistError::config(format!("--font-size must be positive, got {}", size)));
                }
                metrics = LayoutMetrics {
                    padding_left_px: metrics.padding_left_px,
                    padding_top_px: metrics.padding_top_px,
                    popup_gap_px: metrics.popup_gap_px,
                    ..LayoutMetrics::for_font_size(*size, metrics.container_width_px)
                };
            }
            if let Some(width) = width {
                metrics.container_width_px = *width;
            }
            let len = text.encode_utf16().count();
            let offset = offset.unwrap_or(len);
            if offset > len {
                return Err(AssistError::out_of_range(offset, len));
            }
            let mut measure = MonospaceMeasure::new(metrics.average_char_width_px, metrics.line_height_px);
            let position = match map_offset_to_visual_position(&text, offset, &mut measure, &metrics) {
                Ok(position) => position,
                Err(never) => match never {},
            };
            if cli.json {
                print_json(&position)?;
            } else {
                println!(
                    "line {} (logical {}), column {} -> x {:.1}px, y {:.1}px",
                    position.line_index,
                    position.logical_line,
                    position.column,
                    position.column_offset_px,
                    position.line_top_px
                );
            }
        }

        Commands::Catalog { category } => {
            let entries: Vec<_> = match category {
                Some(category) => catalog.by_category((*category).into()).collect(),
                None => catalog.iter().collect(),
            };
            if cli.json {
                print_json(&entries)?;
            } else {
                for e in entries {
                    println!("{:<24} {:<10} {}", e.text, e.category, e.description);
                }
            }
        }
    }

    Ok(())
}

fn text_or_stdin(text: Option<&str>) -> AssistResult<String> {
    match text {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            // trailing newline from shells is not part of the buffer
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AssistResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AssistError::IoError {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}
