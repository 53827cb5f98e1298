use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};

use clap::{Args, Parser, Subcommand};
use pathflow::{
    ConfigError, FlowOptions, InputKind, LayoutConfig, ParseError, build_flow_from_bytes, decode_text,
    extract_resources, layout_outline, parse_annotations, parse_outline,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid layout config: {0}")]
    Config(#[from] ConfigError),
    #[error("no annotation entry named `{0}`")]
    UnknownName(String),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pathflow", about = "Lay out learning-path outlines as node-link diagrams")]
struct Cli {
    /// Log pipeline diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[arg(long, global = true, env = "PATHFLOW_NODE_WIDTH", default_value_t = pathflow::config::DEFAULT_NODE_WIDTH)]
    node_width: f64,

    #[arg(long, global = true, env = "PATHFLOW_NODE_HEIGHT", default_value_t = pathflow::config::DEFAULT_NODE_HEIGHT)]
    node_height: f64,

    #[arg(
        long,
        global = true,
        env = "PATHFLOW_HORIZONTAL_FACTOR",
        default_value_t = pathflow::config::DEFAULT_HORIZONTAL_FACTOR
    )]
    horizontal_factor: f64,
}

impl LayoutArgs {
    fn to_config(&self) -> Result<LayoutConfig, ConfigError> {
        let config = LayoutConfig {
            node_width: self.node_width,
            node_height: self.node_height,
            horizontal_factor: self.horizontal_factor,
            ..LayoutConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct OutlineArgs {
    #[arg(long, default_value = "-", help = "Outline file path, or - for stdin")]
    outline: String,

    #[arg(long, help = "Annotation file with `name,(description)` lines")]
    annotations: Option<String>,

    #[arg(long, env = "PATHFLOW_COMPLETED", value_delimiter = ',', help = "Ids already completed")]
    completed: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the render payload as JSON.
    Layout {
        #[command(flatten)]
        input: OutlineArgs,

        #[arg(long, default_value_t = false)]
        pretty: bool,

        #[arg(long, default_value_t = false, help = "Print layout stats instead of the payload")]
        stats: bool,
    },
    /// Print one node's description split into body text and links.
    Resources {
        #[arg(long)]
        annotations: String,

        name: String,

        #[arg(long, default_value_t = false, help = "Keep links exactly as written")]
        raw: bool,
    },
    /// Print the completion percentage.
    Progress {
        #[command(flatten)]
        input: OutlineArgs,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let options = FlowOptions { layout: cli.layout.to_config()?, ..FlowOptions::default() };

    match cli.command {
        Command::Layout { input, pretty, stats } => {
            if stats {
                run_stats(&input, &options)
            } else {
                run_layout(&input, &options, pretty)
            }
        }
        Command::Resources { annotations, name, raw } => run_resources(&annotations, &name, raw),
        Command::Progress { input } => run_progress(&input, &options),
    }
}

fn run_layout(input: &OutlineArgs, options: &FlowOptions, pretty: bool) -> Result<(), CliError> {
    let payload = flow(input, options)?;
    println!("{}", payload.to_json(pretty)?);
    Ok(())
}

fn run_stats(input: &OutlineArgs, options: &FlowOptions) -> Result<(), CliError> {
    let bytes = read_input(&input.outline)?;
    let outline = parse_outline(decode_text(InputKind::Outline, &bytes)?);
    let layout = layout_outline(&outline, &options.layout);
    let rendered = serde_json::to_string_pretty(&serde_json::json!({
        "parse": outline.stats,
        "layout": layout.stats,
    }))?;
    println!("{rendered}");
    Ok(())
}

fn run_resources(path: &str, name: &str, raw: bool) -> Result<(), CliError> {
    let bytes = read_input(path)?;
    let descriptions = parse_annotations(decode_text(InputKind::Annotations, &bytes)?);
    let description = descriptions
        .get(name)
        .ok_or_else(|| CliError::UnknownName(name.to_owned()))?;
    let bundle = extract_resources(description);
    let bundle = if raw { bundle } else { bundle.normalized() };
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

fn run_progress(input: &OutlineArgs, options: &FlowOptions) -> Result<(), CliError> {
    let payload = flow(input, options)?;
    println!(
        "{:.1}% ({}/{})",
        payload.progress(),
        payload.completed_count(),
        payload.nodes.len()
    );
    Ok(())
}

fn flow(input: &OutlineArgs, options: &FlowOptions) -> Result<pathflow::FlowPayload, CliError> {
    let outline = read_input(&input.outline)?;
    let annotations = input.annotations.as_deref().map(read_input).transpose()?;
    let completed: HashSet<String> = input
        .completed
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let payload = build_flow_from_bytes(Some(outline.as_slice()), annotations.as_deref(), &completed, options)?;
    tracing::info!(nodes = payload.nodes.len(), edges = payload.edges.len(), "built roadmap payload");
    Ok(payload)
}

fn read_input(path: &str) -> Result<Vec<u8>, CliError> {
    let read_err = |source: io::Error| CliError::Read { path: path.to_owned(), source };
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        fs::read(path).map_err(read_err)
    }
}
