//! Heddle CLI
//!
//! Usage:
//!   heddle [OPTIONS] <MAP> [REFERENCE]...
//!
//! Options:
//!   --from <IDENT>   Identity of the component making the references
//!   --lang <TAG>     Report locale data for this language as well
//!   -v, --verbose    Narrate resolution steps on stderr
//!   -h, --help       Print help
//!
//! Loads a site map (TOML) and resolves each reference against it exactly
//! the way a running page would, printing one line per reference. Without
//! references it prints an overview of the site map.

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use heddle::{ComponentIdent, FragmentIdent, Loader, Page, SiteMap};

#[derive(Parser)]
#[command(name = "heddle")]
#[command(about = "Resolve component references against a site map")]
struct Cli {
    /// Site map file (TOML format)
    map: PathBuf,

    /// References to resolve, e.g. "reports/summary.header" or "/styles.css"
    references: Vec<String>,

    /// Identity of the component making the references
    #[arg(long, default_value = "")]
    from: String,

    /// Report locale data for this language as well
    #[arg(long)]
    lang: Option<String>,

    /// Narrate resolution steps on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("heddle=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let map = match SiteMap::from_file(&cli.map) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error loading site map '{}': {}", cli.map.display(), e);
            exit(1);
        }
    };

    if cli.references.is_empty() {
        print_overview(&map);
        return;
    }

    let current = Page::new(ComponentIdent::parse(&cli.from));
    let mut failed = false;

    for reference in &cli.references {
        match current.resolve(map.context(), reference) {
            Ok(component) => {
                let mut fragments: Vec<&str> = component
                    .fragments()
                    .map(|registry| registry.names().collect())
                    .unwrap_or_default();
                if fragments.is_empty() {
                    println!("{}: ok", reference);
                } else {
                    fragments.sort_unstable();
                    println!("{}: ok (fragments: {})", reference, fragments.join(", "));
                }
            }
            Err(e) => {
                println!("{}: {}", reference, e);
                failed = true;
            }
        }

        if let Some(lang) = &cli.lang {
            let target = FragmentIdent::parse(reference).qualify(current.ident());
            match map.loader.locale_data(target.component(), lang) {
                Some(data) => println!(
                    "  {} data: {}",
                    lang,
                    String::from_utf8_lossy(&data)
                ),
                None => println!("  no {} data", lang),
            }
        }
    }

    if failed {
        exit(1);
    }
}

fn print_overview(map: &SiteMap) {
    match &map.name {
        Some(name) => println!("site map: {}", name),
        None => println!("site map: (unnamed)"),
    }
    if let Some(description) = &map.description {
        println!("  {}", description);
    }

    let mut libraries: Vec<_> = map.loader.libraries().collect();
    libraries.sort_by(|a, b| a.name().cmp(b.name()));
    for library in libraries {
        let mut components: Vec<&str> = library.components().collect();
        components.sort_unstable();
        println!("  {}: {}", library.name(), components.join(", "));
    }
    println!("  mappings: {}", map.mapper.len());
}
