use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cliplist_registry::{refresh_clips, Clip, ClipRegistry, Identifier, ReloadNotifier};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => execute_init(args),
        Commands::Add(args) => execute_add(args),
        Commands::Remove(args) => execute_remove(args),
        Commands::List(args) => execute_list(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Curate an enum-backed audio clip registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh, empty registry file.
    Init(InitArgs),
    /// Append a clip name to the registry.
    Add(NameArgs),
    /// Delete a clip name from the registry.
    Remove(NameArgs),
    /// Print the declared clip names in file order.
    List(ListArgs),
}

#[derive(Args)]
struct InitArgs {
    /// Path of the registry file to create.
    file: PathBuf,
    /// Name of the declared enumeration type.
    #[arg(long, default_value = "ClipName")]
    type_name: String,
}

#[derive(Args)]
struct NameArgs {
    /// Path of the registry file.
    file: PathBuf,
    /// The clip name.
    name: String,
}

#[derive(Args)]
struct ListArgs {
    /// Path of the registry file.
    file: PathBuf,
    /// Optional JSON store of per-clip playback parameters, reconciled
    /// against the registry before printing.
    #[arg(long)]
    clips: Option<PathBuf>,
}

/// Stands in for the consumer that recompiles the generated type; here
/// it only reports which file changed.
struct LogReload;

impl ReloadNotifier for LogReload {
    fn reload(&self, path: &Path) -> Result<()> {
        tracing::info!("registry changed, reload {}", path.display());
        Ok(())
    }
}

fn open_registry(file: PathBuf) -> ClipRegistry {
    ClipRegistry::open(file).with_notifier(Box::new(LogReload))
}

fn execute_init(args: InitArgs) -> Result<()> {
    let registry = open_registry(args.file);
    registry.create(&args.type_name)?;
    println!("Created registry {}", registry.path().display());
    Ok(())
}

fn execute_add(args: NameArgs) -> Result<()> {
    let registry = open_registry(args.file);
    registry.add(&args.name)?;
    println!("Added clip {}", args.name);
    Ok(())
}

fn execute_remove(args: NameArgs) -> Result<()> {
    let registry = open_registry(args.file);
    let name = Identifier::new(args.name)?;
    registry.remove(&name)?;
    println!("Removed clip {name}");
    Ok(())
}

fn execute_list(args: ListArgs) -> Result<()> {
    let registry = open_registry(args.file);
    let names = registry.names()?;

    match args.clips {
        None => {
            for name in &names {
                println!("{name}");
            }
        }
        Some(store_path) => {
            let previous = load_clip_store(&store_path)?;
            let clips = refresh_clips(&previous, &names);
            save_clip_store(&store_path, &clips)?;
            for clip in &clips {
                let source = clip
                    .source
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "<no source>".to_string());
                println!(
                    "{}  volume {:.2}  pitch {:.2}  {}",
                    clip.name, clip.volume, clip.pitch, source
                );
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ClipStoreData {
    clips: Vec<Clip>,
}

fn load_clip_store(path: &Path) -> Result<Vec<Clip>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read clip store {}", path.display()))?;
    let data: ClipStoreData = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid clip store", path.display()))?;
    Ok(data.clips)
}

fn save_clip_store(path: &Path, clips: &[Clip]) -> Result<()> {
    let data = ClipStoreData {
        clips: clips.to_vec(),
    };
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write clip store {}", path.display()))?;
    Ok(())
}
