//! Lala - Main entrypoint.
//!
//! Loads a JSON tree file and renders, lists or searches it. Configuration is
//! read before logging is initialised so that the log section applies.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lala_lib::config::{ConfigLoader, LalaConfig, LogConfig, ENV_PREFIX};
use lala_lib::error::{
    report, set_error_reporter, ErrorContext, LalaError, LalaResult, TracingErrorReporter,
};
use lala_lib::{HashTree, RenderOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Lala.
#[derive(Parser, Debug)]
#[clap(name = "lala", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print a tree loaded from a JSON file
    Render {
        /// JSON file describing the tree
        file: PathBuf,
    },

    /// List the child keys at a path
    List {
        /// JSON file describing the tree
        file: PathBuf,

        /// Keys to descend through, outermost first
        path: Vec<String>,
    },

    /// Find the subtree stored under a key at any depth
    Search {
        /// JSON file describing the tree
        file: PathBuf,

        /// Key to look for
        key: String,
    },

    /// Print key, leaf and depth counts
    Stats {
        /// JSON file describing the tree
        file: PathBuf,
    },

    /// Print a built-in sample tree
    Demo,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> LalaResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| LalaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn load_tree(file: &Path) -> LalaResult<HashTree<String>> {
    let text = std::fs::read_to_string(file)?;
    let tree = HashTree::from_json_str(&text)?;
    info!(file = %file.display(), keys = tree.total_keys(), "tree loaded");
    Ok(tree)
}

/// Builds the tree printed by `lala demo`.
fn demo_tree() -> HashTree<String> {
    let owned = |keys: &[&str]| keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();

    let mut tree = HashTree::from_keys(owned(&["Produce", "Dairy", "Bakery"]));
    tree.add_path_values(owned(&["Produce", "Fruit"]), owned(&["apple", "pear", "plum"]));
    tree.add_path_values(owned(&["Produce", "Vegetables"]), owned(&["leek", "kale"]));
    tree.add_values("Dairy".to_string(), owned(&["milk", "butter"]));
    tree.set_path(owned(&["Dairy", "Cheese"]), owned(&["brie", "gouda"]));
    tree.add_values("Bakery".to_string(), owned(&["sourdough", "bagel"]));
    tree
}

fn run(command: Command, config: &LalaConfig) -> LalaResult<()> {
    let options = RenderOptions::from(&config.render);

    match command {
        Command::Render { file } => {
            println!("{}", load_tree(&file)?.render(options));
            Ok(())
        }
        Command::List { file, path } => {
            let tree = load_tree(&file)?;
            let mut keys = tree
                .list_path(&path)
                .ok_or_else(|| LalaError::Custom(format!("Path not found: {}", path.join(" / "))))?;
            keys.sort_unstable();
            for key in keys {
                println!("{key}");
            }
            Ok(())
        }
        Command::Search { file, key } => {
            let tree = load_tree(&file)?;
            match tree.search(key.as_str()) {
                Some(found) if found.is_empty() => println!("{key} (leaf)"),
                Some(found) => println!("{key}\n{}", found.render(options)),
                None => {
                    return Err(LalaError::Custom(format!("Key not found: {key}")));
                }
            }
            Ok(())
        }
        Command::Stats { file } => {
            let stats = load_tree(&file)?.stats();
            println!("keys:   {}", stats.enters);
            println!("leaves: {}", stats.leaves);
            println!("depth:  {}", stats.max_depth);
            Ok(())
        }
        Command::Demo => {
            println!("{}", demo_tree().render(options));
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = LalaConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LalaError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    let config = match ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load() {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&LogConfig::default());
            set_error_reporter(Arc::new(TracingErrorReporter));
            report(ErrorContext::new(e.into(), "config"));
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        process::exit(1);
    }
    set_error_reporter(Arc::new(TracingErrorReporter));

    if let Err(e) = run(args.command, &config) {
        report(ErrorContext::new(e, "cli"));
        process::exit(1);
    }
}
