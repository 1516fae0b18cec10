//! Command-line interface for secnum
//! Adds hierarchical index labels to the headings of a rendered HTML file.
//!
//! Usage:
//!   secnum `<path>` [--config `<file>`] [--styles `<spec>`] [--output `<path>`]
//!   secnum - < page.html                                      - Read from stdin
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then the command-line flags. `--styles` and `--start-level` apply as
//! per-document overrides, the way a host pipeline would pass them.

use clap::{Arg, ArgAction, ArgMatches, Command};
use secnum::{index_document, IndexingSettings, RenderedDocument};
use secnum_config::Loader;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_tracing();

    let matches = Command::new("secnum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Add hierarchical index labels to headings in rendered HTML")
        .arg(
            Arg::new("path")
                .help("Path to the HTML file ('-' reads stdin)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("styles")
                .long("styles")
                .short('s')
                .help("Style specification for this document (e.g. \"{1} {a} {i}\")"),
        )
        .arg(
            Arg::new("start-level")
                .long("start-level")
                .value_parser(clap::value_parser!(u32))
                .help("Heading depth mapped to the first numbering level"),
        )
        .arg(
            Arg::new("connector")
                .long("connector")
                .help("Text joining per-level index fragments"),
        )
        .arg(
            Arg::new("global-prefix")
                .long("global-prefix")
                .help("Text before the composed index"),
        )
        .arg(
            Arg::new("global-suffix")
                .long("global-suffix")
                .help("Text after the composed index"),
        )
        .arg(
            Arg::new("allow-html")
                .long("allow-html")
                .action(ArgAction::SetTrue)
                .help("Insert the index as raw HTML instead of escaped text"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the indexed HTML to a file instead of stdout"),
        )
        .get_matches();

    let settings = load_settings(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let content = read_input(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let mut document = RenderedDocument::new(path.as_str(), content);
    if let Some(spec) = matches.get_one::<String>("styles") {
        document = document.with_index_styles(spec.as_str());
    }
    if let Some(start_level) = matches.get_one::<u32>("start-level") {
        document = document.with_start_level(*start_level);
    }

    index_document(&settings, &mut document).unwrap_or_else(|e| {
        eprintln!("Indexing error: {}", e);
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(output) => {
            std::fs::write(output, &document.content).unwrap_or_else(|e| {
                eprintln!("Error writing {}: {}", output, e);
                std::process::exit(1);
            });
        }
        None => print!("{}", document.content),
    }
}

/// Layer defaults, the optional config file, and flag overrides.
///
/// Invoking the binary is the enable signal, so `indexing.enable` is forced
/// on regardless of what the config file says.
fn load_settings(matches: &ArgMatches) -> Result<IndexingSettings, String> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };

    loader = loader
        .set_override("indexing.enable", true)
        .map_err(|e| e.to_string())?;
    if let Some(connector) = matches.get_one::<String>("connector") {
        loader = loader
            .set_override("indexing.connector", connector.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(prefix) = matches.get_one::<String>("global-prefix") {
        loader = loader
            .set_override("indexing.global_prefix", prefix.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(suffix) = matches.get_one::<String>("global-suffix") {
        loader = loader
            .set_override("indexing.global_suffix", suffix.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("allow-html") {
        loader = loader
            .set_override("indexing.allow_html", true)
            .map_err(|e| e.to_string())?;
    }

    let config = loader.build().map_err(|e| e.to_string())?;
    Ok(config.indexing.into_settings())
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries the indexed HTML.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
