//! Dexter - A terminal Pokédex with asynchronous artwork loading
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dexter::images::{Delivery, FetchOptions, HttpSource, ImageCache, ImageFetcher, Slot};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => dexter::app::run(),
        Command::List => {
            list_catalog();
            Ok(())
        }
        Command::Fetch { url } => fetch_cli(&url),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    List,
    Fetch { url: String },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "list" | "ls" => Ok(Command::List),
        "fetch" => {
            let url = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing image URL"))?
                .clone();
            Ok(Command::Fetch { url })
        }
        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'dexter --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = dexter::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
◓ Dexter - A terminal Pokédex

USAGE:
    dexter                             Launch TUI
    dexter [COMMAND]

COMMANDS:
    list                               Print the catalog
    fetch <url>                        Download and decode one image
      Examples:
        dexter fetch https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/25.png

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    j/↓ k/↑       Move between cards
    PgDn/PgUp     Move a page
    g/G           Jump to top/bottom
    t             Next theme
    ?             Help
    q             Quit

CONFIG:
    {}
"#,
        dexter::LOGO,
        config_path
    );
}

fn print_version() {
    println!("dexter {}", dexter::VERSION);
}

fn list_catalog() {
    for pokemon in dexter::catalog() {
        println!(
            "#{:03} {:<12} {:<10} {}",
            pokemon.number,
            pokemon.display_name(),
            pokemon.display_kind(),
            pokemon.image_url
        );
    }
}

fn fetch_cli(url: &str) -> Result<()> {
    let config = dexter::Config::load()?;
    let rt = tokio::runtime::Runtime::new()?;

    let fetcher = ImageFetcher::with_runtime(
        ImageCache::new(),
        HttpSource::new()?,
        FetchOptions::from(&config),
        rt.handle().clone(),
    );
    let slot = Slot::new();

    rt.block_on(async {
        match fetcher.request(slot.bind(url)).outcome().await {
            Delivery::Delivered => {
                if let Some(image) = slot.image() {
                    println!("✅ {} ({}x{})", url, image.width(), image.height());
                }
                Ok(())
            }
            Delivery::Stale => Ok(()),
            Delivery::Failed(e) => Err(anyhow::anyhow!("Failed to load {url}: {e}")),
        }
    })
}
