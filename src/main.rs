//! svgcascade - SVG style cascade tool

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use svgcascade::style::{Style, WriteFlags};
use svgcascade::{CascadeConfig, Document, Error, Result};

#[derive(Parser)]
#[command(name = "svgcascade")]
#[command(version, about = "Parse, cascade and serialize SVG presentation styles", long_about = None)]
#[command(after_help = "EXAMPLES:
    svgcascade normalize 'fill:rgb(255, 0, 0);stroke-dasharray:1 2'
    svgcascade cascade --parent 'font-weight:700' --child 'font-weight:bolder'
    svgcascade resolve drawing.svg --json")]
struct Cli {
    /// Log what the cascade ignores or falls back on
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a declaration list and print it in canonical form
    Normalize {
        /// Declarations, as in a `style` attribute
        css: String,
    },
    /// Cascade a child style under a parent style
    Cascade {
        #[arg(long, default_value = "")]
        parent: String,
        #[arg(long, default_value = "")]
        child: String,
        /// Print only what differs from the parent
        #[arg(long)]
        diff: bool,
    },
    /// Resolve every element of an SVG file
    Resolve {
        /// SVG file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Cascade configuration (JSON)
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "svgcascade=debug" } else { "svgcascade=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Normalize { css } => {
            println!("{}", Style::from_css(&css).write(WriteFlags::IF_SET));
        }
        Command::Cascade {
            parent,
            child,
            diff,
        } => {
            let parent = Style::from_css(&parent);
            let mut child = Style::from_css(&child);
            child.cascade(&parent);
            let out = if diff {
                child.write_if_diff(Some(&parent))
            } else {
                child.write(WriteFlags::IF_SET)
            };
            println!("{out}");
        }
        Command::Resolve { file, config, json } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => CascadeConfig::default(),
            };
            let content = std::fs::read_to_string(&file)?;
            let mut doc = Document::from_svg_with_config(&content, config)?;
            doc.resolve_all();
            let elements = describe(&doc);
            if json {
                let out = serde_json::to_string_pretty(&elements)
                    .map_err(|e| Error::Config(e.to_string()))?;
                println!("{out}");
            } else {
                for element in &elements {
                    print_element(element);
                }
            }
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<CascadeConfig> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

/// One resolved element as printed by `resolve`.
#[derive(Serialize)]
struct ResolvedElement {
    node: u32,
    depth: usize,
    tag: String,
    id: Option<String>,
    /// Properties the element sets itself.
    style: String,
    font_size: f64,
    fill: String,
    stroke: String,
    opacity: f64,
}

fn describe(doc: &Document) -> Vec<ResolvedElement> {
    let mut elements = Vec::new();
    let mut stack = vec![(doc.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = doc.node(id) else {
            continue;
        };
        let style = node.style();
        elements.push(ResolvedElement {
            node: id.0,
            depth,
            tag: node.tag.clone(),
            id: node.attribute("id").map(str::to_string),
            style: style.write(WriteFlags::IF_SET),
            font_size: style.font_size.value.computed,
            fill: style.fill.value_string(),
            stroke: style.stroke.value_string(),
            opacity: style.opacity.value.to_f64(),
        });
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
    elements
}

fn print_element(element: &ResolvedElement) {
    let indent = "  ".repeat(element.depth);
    let id = element
        .id
        .as_deref()
        .map(|id| format!("#{id}"))
        .unwrap_or_default();
    println!(
        "{indent}<{}{id}> fill={} stroke={} font-size={}px opacity={}",
        element.tag, element.fill, element.stroke, element.font_size, element.opacity
    );
    if !element.style.is_empty() {
        println!("{indent}  {}", element.style);
    }
}
