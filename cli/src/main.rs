//! docx-html CLI - re-render Word documents as self-contained HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docx_html::{
    parse_file, parse_file_with_options, render, Document, DocxParser, FontCatalog, JsonFormat,
    ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "docx-html")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Re-render DOCX documents as self-contained HTML", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output HTML file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    font: FontArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct FontArgs {
    /// Font file to embed (e.g. "Roboto-Regular.ttf")
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Directory searched recursively for .ttf files
    #[arg(
        long,
        value_name = "DIR",
        env = "DOCX_HTML_FONT_DIR",
        default_value = "fonts"
    )]
    font_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert DOCX to HTML
    Convert {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with .html)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        font: FontArgs,

        /// Override the page title
        #[arg(long)]
        title: Option<String>,

        /// Render blocks sequentially
        #[arg(long)]
        sequential: bool,

        /// Print rendering statistics
        #[arg(long)]
        stats: bool,
    },

    /// Convert DOCX to plain text
    Text {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert DOCX structure to JSON
    Json {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List fonts available for embedding
    Fonts {
        /// Directory searched recursively for .ttf files
        #[arg(
            value_name = "DIR",
            env = "DOCX_HTML_FONT_DIR",
            default_value = "fonts"
        )]
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

struct ConvertArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    font: FontArgs,
    title: Option<String>,
    sequential: bool,
    stats: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            font,
            title,
            sequential,
            stats,
        }) => cmd_convert(ConvertArgs {
            input: &input,
            output: output.as_deref(),
            font,
            title,
            sequential,
            stats,
        }),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Fonts { dir }) => {
            cmd_fonts(&dir);
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(ConvertArgs {
                    input: &input,
                    output: cli.output.as_deref(),
                    font: cli.font,
                    title: None,
                    sequential: false,
                    stats: false,
                })
            } else {
                println!("{}", "Usage: docx-html <FILE> [OUTPUT]".yellow());
                println!("       docx-html --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("html")
}

fn cmd_convert(args: ConvertArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let output = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(args.input));

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading DOCX...");
    let doc = parse_file(args.input)?;
    pb.inc(1);

    if args.font.font.is_some() {
        pb.set_message("Discovering fonts...");
    }
    let options = render_options(&args);

    pb.set_message("Rendering HTML...");
    let result = render::to_html_with_stats(&doc, &options)?;
    pb.inc(1);

    fs::write(&output, &result.content)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    println!("{} {}", "Saved to".green(), output.display());

    if args.stats {
        let stats = &result.stats;
        println!();
        println!("{}", "Rendering Statistics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
        println!("{}: {}", "Tables".bold(), stats.table_count);
        println!(
            "{}: {} ({} positioned)",
            "Images".bold(),
            stats.image_count,
            stats.positioned_image_count
        );
        if stats.missing_image_count > 0 {
            println!(
                "{}: {}",
                "Missing images".yellow().bold(),
                stats.missing_image_count
            );
        }
        println!("{}: {}", "Skipped nodes".bold(), stats.skipped_node_count);
        println!("{}: {}", "Words".bold(), stats.word_count);
    }

    Ok(())
}

fn render_options(args: &ConvertArgs<'_>) -> RenderOptions {
    let mut options = RenderOptions::new()
        .with_stats(args.stats)
        .with_parallel(!args.sequential);

    if let Some(ref name) = args.font.font {
        let fonts = FontCatalog::discover(&args.font.font_dir);
        log::debug!(
            "Found {} fonts under {} for {}",
            fonts.len(),
            args.font.font_dir.display(),
            name
        );
        options = options.with_font_catalog(fonts).with_font(name.clone());
    }
    if let Some(ref title) = args.title {
        options = options.with_title(title.clone());
    }
    options
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new().structure_only())?;
    write_or_print(output, &render::to_text(&doc))
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_or_print(output, &render::to_json(&doc, format)?)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let parser = DocxParser::open(input)?;
    let parts = parser.part_count();
    let doc = parser.parse()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Package parts".bold(), parts);
    print_metadata(&doc);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let words = text.split_whitespace().count();
    let chars = text.chars().filter(|c| !c.is_whitespace()).count();

    println!("{}: {}", "Paragraphs".bold(), doc.paragraphs.len());
    println!("{}: {}", "Tables".bold(), doc.tables.len());
    println!("{}: {}", "Images".bold(), doc.image_count());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);

    Ok(())
}

fn print_metadata(doc: &Document) {
    let meta = &doc.metadata;
    let fields = [
        ("Title", meta.title.as_deref()),
        ("Author", meta.author.as_deref()),
        ("Subject", meta.subject.as_deref()),
        ("Keywords", meta.keywords.as_deref()),
        ("Last modified by", meta.last_modified_by.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label.bold(), value);
        }
    }
    if let Some(ref created) = meta.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = meta.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }
}

fn cmd_fonts(dir: &Path) {
    let catalog = FontCatalog::discover(dir);

    if catalog.is_empty() {
        println!("{} {}", "No .ttf fonts found under".yellow(), dir.display());
        return;
    }

    println!("{}", "Available Fonts".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (name, path) in catalog.iter() {
        println!("  {} {}", name.bold(), path.display().to_string().dimmed());
    }
    println!("\n{} fonts", catalog.len());
}

fn cmd_version() {
    println!(
        "{} {}",
        "docx-html".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("DOCX to self-contained HTML renderer");
    println!();
    println!("License: MIT");
}
