//! blockdoc CLI - block document rendering tool

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use blockdoc::{
    Blockdoc, BlockdocResult, Diagnostic, Document, JsonFormat, MemorySink, RenderStats,
};

#[derive(Parser)]
#[command(name = "blockdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render block editor documents to HTML, Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every rendering command.
#[derive(Args, Clone)]
struct RenderArgs {
    /// Treat the first table row as a header even when `withHeadings` is false
    #[arg(long)]
    legacy_headings: bool,

    /// Prefix for CSS classes in HTML output
    #[arg(long, value_name = "PREFIX", env = "BLOCKDOC_CLASS_PREFIX")]
    class_prefix: Option<String>,
}

impl RenderArgs {
    fn builder(&self) -> Blockdoc {
        let mut builder = Blockdoc::new();
        if self.legacy_headings {
            builder = builder.with_legacy_headings();
        }
        if let Some(prefix) = &self.class_prefix {
            builder = builder.with_class_prefix(prefix.clone());
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML
    Html {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a document to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a document to plain text
    Text {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a document to a JSON render tree
    Json {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show document information and diagnostics
    Info {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render documents to all formats (HTML, Markdown, text, JSON)
    Convert {
        /// Input JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            render,
        } => cmd_render(&input, output.as_deref(), &render, |r| Ok(r.to_html())),
        Commands::Markdown {
            input,
            output,
            render,
        } => cmd_render(&input, output.as_deref(), &render, |r| Ok(r.to_markdown())),
        Commands::Text {
            input,
            output,
            render,
        } => cmd_render(&input, output.as_deref(), &render, |r| Ok(r.to_text())),
        Commands::Json {
            input,
            output,
            compact,
            render,
        } => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_render(&input, output.as_deref(), &render, |r| r.to_json(format))
        }
        Commands::Info { input } => cmd_info(&input),
        Commands::Convert {
            inputs,
            output,
            render,
        } => cmd_convert(&inputs, output.as_deref(), &render),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a document from a file, or from stdin when the path is `-`.
fn read_document(input: &Path) -> blockdoc::Result<Document> {
    if input.as_os_str() == "-" {
        blockdoc::parse_reader(io::stdin().lock())
    } else {
        blockdoc::parse_file(input)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render<F>(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
    serialize: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&BlockdocResult) -> blockdoc::Result<String>,
{
    let doc = read_document(input)?;
    let result = args.builder().render(doc);
    let content = serialize(&result)?;
    write_output(output, &content)
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("blockdoc_output"));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering...");

    let outcomes: Vec<(&PathBuf, blockdoc::Result<RenderStats>)> = inputs
        .par_iter()
        .map(|input| {
            let outcome = convert_one(input, &output_dir, args);
            pb.inc(1);
            (input, outcome)
        })
        .collect();

    pb.finish_with_message("Done!");

    let mut total = RenderStats::new();
    let mut failures = Vec::new();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(stats) => total.merge(&stats),
            Err(e) => failures.push((input, e.to_string())),
        }
    }

    println!("\n{} {}", "Output directory:".green().bold(), output_dir.display());
    println!(
        "{} {} documents, {} blocks, {} words",
        "Rendered:".green().bold(),
        inputs.len() - failures.len(),
        total.block_count,
        total.word_count
    );
    if total.unknown_count > 0 || total.placeholder_count > 0 {
        println!(
            "  {} unknown blocks skipped, {} placeholders",
            total.unknown_count, total.placeholder_count
        );
    }
    for (input, error) in &failures {
        eprintln!("  {} {}: {}", "✗".red(), input.display(), error);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} documents failed", failures.len(), inputs.len()).into())
    }
}

fn convert_one(input: &Path, output_dir: &Path, args: &RenderArgs) -> blockdoc::Result<RenderStats> {
    let doc = read_document(input)?;
    let result = args.builder().render(doc);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    fs::write(output_dir.join(format!("{}.html", stem)), result.to_html())?;
    fs::write(output_dir.join(format!("{}.md", stem)), result.to_markdown())?;
    fs::write(output_dir.join(format!("{}.txt", stem)), result.to_text())?;
    fs::write(
        output_dir.join(format!("{}.json", stem)),
        result.to_json(JsonFormat::Pretty)?,
    )?;

    log::info!(
        "Rendered {} ({} blocks) into {}",
        input.display(),
        result.stats().block_count,
        output_dir.display()
    );
    Ok(result.stats().clone())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_document(input)?;
    let sink = Arc::new(MemorySink::new());
    let result = Blockdoc::new().with_sink(sink.clone()).render(doc);
    let meta = &result.document().meta;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref version) = meta.version {
        println!("{}: {}", "Editor version".bold(), version);
    }
    if let Some(ref time) = meta.time {
        println!("{}: {}", "Saved".bold(), time.to_rfc3339());
    }

    let stats = result.stats();
    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    for (label, count) in [
        ("Paragraphs", stats.paragraph_count),
        ("Headings", stats.heading_count),
        ("Images", stats.image_count),
        ("Quotes", stats.quote_count),
        ("Lists", stats.list_count),
        ("List items", stats.list_item_count),
        ("Checklists", stats.checklist_count),
        ("Code", stats.code_count),
        ("Tables", stats.table_count),
        ("Unknown", stats.unknown_count),
    ] {
        if count > 0 {
            println!("  {}: {}", label, count);
        }
    }
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    let diagnostics = sink.take();
    if !diagnostics.is_empty() {
        println!();
        println!("{}", "Diagnostics".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::UnknownBlock { index, kind, .. } => {
                    println!("  #{} unknown block type '{}'", index, kind)
                }
                Diagnostic::InvalidBlock {
                    index,
                    kind,
                    reason,
                } => println!("  #{} {} block: {}", index, kind, reason),
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "blockdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Block document rendering tool");
    println!();
    println!("License: {}", "MIT".dimmed());
}
