//! UI Resolver CLI
//!
//! Usage:
//!   ui-resolver [OPTIONS] <TREE>
//!
//! Options:
//!   -t, --tokens <FILE>        Token source file (TOML), repeatable
//!       --translations <FILE>  Translation file (TOML, one table per locale)
//!   -l, --locale <TAG>         Locale for text placeholders
//!   -c, --config <FILE>        Resolver configuration (TOML)
//!       --static               Resolve without placeholder substitution
//!       --compact              Print compact JSON
//!   -v, --verbose              Increase log output (-v, -vv, -vvv)
//!   -h, --help                 Print help

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use ui_resolver::logging::{init_logging, LoggingConfig};
use ui_resolver::{
    FileLoader, Locale, NoopTranslations, ResolveConfig, Resolver, TokenSource, TranslationMap,
    TranslationSource, TreeRoot,
};

#[derive(Parser)]
#[command(name = "ui-resolver")]
#[command(about = "Resolve declarative UI element trees into typed UI trees")]
struct Cli {
    /// Element tree file (JSON)
    tree: PathBuf,

    /// Token source file (TOML); may be given several times
    #[arg(short, long = "tokens", value_name = "FILE")]
    tokens: Vec<PathBuf>,

    /// Translation file (TOML, one table per locale)
    #[arg(long, value_name = "FILE")]
    translations: Option<PathBuf>,

    /// Locale for text placeholders (defaults to the configured locale)
    #[arg(short, long, value_name = "TAG")]
    locale: Option<String>,

    /// Resolver configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolve without placeholder substitution
    #[arg(long = "static")]
    static_only: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Increase log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    let config = match &cli.config {
        Some(path) => ResolveConfig::from_file(path).unwrap_or_else(|e| {
            fail(format!("loading config '{}': {}", path.display(), e))
        }),
        None => ResolveConfig::default(),
    };

    let content = fs::read_to_string(&cli.tree)
        .unwrap_or_else(|e| fail(format!("reading tree '{}': {}", cli.tree.display(), e)));
    let tree = TreeRoot::from_json_str(&content)
        .unwrap_or_else(|e| fail(format!("parsing tree '{}': {}", cli.tree.display(), e)));

    let base_path = cli
        .tree
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let locale = cli
        .locale
        .as_deref()
        .map(Locale::new)
        .unwrap_or_else(|| config.default_locale.clone());
    let resolver = Resolver::new()
        .with_loader(FileLoader::with_base_path(base_path))
        .with_config(config);

    let result = if cli.static_only {
        resolver.resolve_static(&tree)
    } else {
        let sources: Vec<TokenSource> = cli
            .tokens
            .iter()
            .map(|path| {
                TokenSource::from_file(path).unwrap_or_else(|e| {
                    fail(format!("loading token source '{}': {}", path.display(), e))
                })
            })
            .collect();
        let translations: Box<dyn TranslationSource> = match &cli.translations {
            Some(path) => Box::new(TranslationMap::from_file(path).unwrap_or_else(|e| {
                fail(format!("loading translations '{}': {}", path.display(), e))
            })),
            None => Box::new(NoopTranslations),
        };
        let refs: Vec<&TokenSource> = sources.iter().collect();
        resolver.resolve_dynamic(&tree, &locale, translations.as_ref(), &refs)
    };

    let resolution = result.unwrap_or_else(|e| fail(e.to_string()));
    let json = if cli.compact {
        serde_json::to_string(&resolution)
    } else {
        serde_json::to_string_pretty(&resolution)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("serializing resolution: {}", e)),
    }
}
