//! Host launcher shim.
//!
//! The library is host-agnostic; this binary is the thin integration layer a
//! launcher (or a curious shell user) drives. Listing prints one project per
//! line in rank order, `--json` switches to one JSON object per line for
//! programmatic hosts, and `--open` activates the project recorded at the
//! given path.
//!
//! Exit status is the activation contract: zero on success, non-zero when
//! the requested launch failed. Listing never fails; a degraded scan just
//! prints fewer lines.

use clap::Parser;
use jbopen::infrastructure::normalize_path;
use jbopen::{observability, Config, ProjectEngine};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "jbopen", version, about = "List and open JetBrains IDE projects")]
struct Cli {
    /// Case-insensitive substring filter on project title or path.
    query: Option<String>,

    /// Open the recent project at this path instead of listing.
    #[arg(long, value_name = "PATH", conflicts_with = "query")]
    open: Option<PathBuf>,

    /// Emit one JSON object per project instead of tab-separated text.
    #[arg(long)]
    json: bool,

    /// Read configuration from a TOML file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("jbopen: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    observability::init_tracing(&config);
    let engine = ProjectEngine::new(config);

    match &cli.open {
        Some(path) => open_project(&engine, path),
        None => list_projects(&engine, cli.query.as_deref().unwrap_or(""), cli.json),
    }
}

/// Activates the recent project recorded at `path`.
fn open_project(engine: &ProjectEngine, path: &Path) -> ExitCode {
    let wanted = normalize_path(path);

    let projects = engine.search("");
    let Some(project) = projects.iter().find(|p| normalize_path(&p.path) == wanted) else {
        eprintln!("jbopen: no recent project at {}", wanted.display());
        return ExitCode::FAILURE;
    };

    match engine.activate(project) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jbopen: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints matching projects in rank order.
fn list_projects(engine: &ProjectEngine, query: &str, json: bool) -> ExitCode {
    for project in engine.search(query) {
        // Hide entries whose directory is gone, the way a launcher UI
        // would; the library keeps them so activation can report NotFound.
        if !project.path.is_dir() {
            continue;
        }

        if json {
            if let Ok(line) = serde_json::to_string(&project) {
                println!("{line}");
            }
        } else {
            println!(
                "{}\t{}\t{} ({})",
                project.title,
                project.path.display(),
                project.ide.product_name,
                project.time_ago()
            );
        }
    }
    ExitCode::SUCCESS
}
