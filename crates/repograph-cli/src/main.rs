mod settings;

use anyhow::{Context, Result, bail};
use clap::Parser;
use repograph_core::{PathEntry, RepositoryData, ThemePreference, ViewMode};
use repograph_events::EventBus;
use repograph_graph::{
    GraphViewController, UsageResolver, build_repository, format_file_size, to_visualization_data,
};
use serde::Deserialize;
use settings::AppSettings;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listing or repository JSON document, `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Repository owner, for plain listings
    #[arg(long, default_value = "local")]
    owner: String,

    /// Repository name, for plain listings (defaults to the input file stem)
    #[arg(long)]
    repo: Option<String>,

    /// View mode: structure or dependencies
    #[arg(short, long)]
    mode: Option<ViewMode>,

    /// Theme: light, dark or system
    #[arg(short, long)]
    theme: Option<ThemePreference>,

    /// Resolve the system theme to dark
    #[arg(long)]
    system_dark: bool,

    /// Path to select before publishing
    #[arg(short, long)]
    select: Option<String>,

    /// Node id to activate as if clicked
    #[arg(long)]
    activate: Option<String>,

    /// Usage metadata: none, heuristic or heuristic:<seed>
    #[arg(short, long)]
    usage: Option<UsageResolver>,

    /// Emit the flat node/link listing instead of the graph snapshot
    #[arg(long)]
    flat: bool,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    #[arg(short, long)]
    verbose: bool,
}

/// Accepted input shapes, tried in order.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Repository(RepositoryData),
    /// Recursive git tree response
    GitTree { tree: Vec<PathEntry> },
    Entries(Vec<PathEntry>),
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }
}

fn repo_name(args: &Args) -> String {
    args.repo.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| *stem != "-")
            .unwrap_or("repository")
            .to_string()
    })
}

fn into_repository(document: InputDocument, args: &Args, usage: &UsageResolver) -> RepositoryData {
    match document {
        InputDocument::Repository(data) => data,
        InputDocument::GitTree { tree: entries } | InputDocument::Entries(entries) => {
            build_repository(args.owner.clone(), repo_name(args), &entries, usage)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = args.config.clone().or_else(AppSettings::default_path);
    let mut settings = match &settings_path {
        Some(path) => AppSettings::load_from(path),
        None => AppSettings::load(),
    };

    if let Some(mode) = args.mode {
        settings.default_mode = mode;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(usage) = &args.usage {
        settings.usage = usage.to_string();
    }
    let usage = args.usage.clone().unwrap_or_else(|| settings.usage_resolver());

    let content = read_input(&args.input)?;
    let document: InputDocument = serde_json::from_str(&content)
        .with_context(|| format!("{:?} is not a listing or repository document", args.input))?;
    let data = into_repository(document, &args, &usage);

    let bus = EventBus::new();
    let mut controller =
        GraphViewController::new(settings.layout.clone()).with_event_bus(bus.clone());
    controller.set_on_node_activated(|node| {
        tracing::info!(
            "Activated {} ({}, {}, used in {} files)",
            node.path,
            node.node_type,
            format_file_size(node.size),
            node.used_in.as_ref().map_or(0, Vec::len)
        );
    });

    controller.set_theme(settings.theme.resolve(args.system_dark));
    controller.load(data);
    controller.set_mode(settings.default_mode);
    if let Some(path) = &args.select {
        controller.select(Some(path.clone()));
    }
    if let Some(id) = &args.activate
        && !controller.activate_node(id)
    {
        tracing::warn!("Node {:?} is synthetic or unknown, nothing activated", id);
    }

    for event in bus.drain() {
        tracing::debug!("{}", event.to_log_line());
    }

    let pretty = args.pretty || settings.pretty_output;
    let json = if args.flat {
        let Some(data) = controller.data() else {
            bail!("No repository data loaded");
        };
        to_json(&to_visualization_data(data), pretty)?
    } else {
        to_json(&*controller.snapshot(), pretty)?
    };

    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {:?}", path))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    if args.save_config {
        let Some(path) = settings_path else {
            bail!("No settings path available, pass --config");
        };
        settings
            .save_to(&path)
            .with_context(|| format!("Failed to save settings to {:?}", path))?;
        tracing::info!("Saved settings to {:?}", path);
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
