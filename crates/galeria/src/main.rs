#[cfg(not(target_arch = "wasm32"))]
use galeria::manifest;
#[cfg(not(target_arch = "wasm32"))]
use gallery_config::SiteConfig;
#[cfg(not(target_arch = "wasm32"))]
use std::{path::PathBuf, process::ExitCode};

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: galeria-manifest <gallery-dir> [--base <url-prefix>] [--out <file>]
       galeria-manifest --print-config";

#[cfg(not(target_arch = "wasm32"))]
enum Command {
    Manifest(Args),
    PrintConfig,
}

#[cfg(not(target_arch = "wasm32"))]
struct Args {
    root: PathBuf,
    base: String,
    out: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Command> {
    let mut root = None;
    let mut base = String::new();
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base" => base = args.next()?,
            "--out" => out = Some(PathBuf::from(args.next()?)),
            "--print-config" if root.is_none() => return Some(Command::PrintConfig),
            _ if root.is_none() => root = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Command::Manifest(Args {
        root: root?,
        base,
        out,
    }))
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Some(Command::Manifest(args)) => args,
        Some(Command::PrintConfig) => return print_config(),
        None => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let items = match manifest::build_manifest(&args.root, &args.base).await {
        Ok(items) => items,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let written = match &args.out {
        Some(out) => manifest::write_manifest(&items, out),
        None => manifest::to_json(&items).map(|json| println!("{json}")),
    };

    match written {
        Ok(()) => {
            tracing::info!("wrote {} gallery items", items.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the effective site config, ready to paste into the page's
/// `#galeria-config` block.
#[cfg(not(target_arch = "wasm32"))]
fn print_config() -> ExitCode {
    match serde_json::to_string_pretty(&SiteConfig::load_or_default()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

// The browser build starts from the library's wasm entry point instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
