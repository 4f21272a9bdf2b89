mod cache;
mod config;
mod error;
mod format;
mod source;
mod tag;
mod types;
mod walk;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use rayon::prelude::*;

use crate::cache::OutlineCache;
use crate::error::HarrowError;
use crate::types::ParseOptions;

/// MATLAB function outlines from pattern scanning.
#[derive(Parser)]
#[command(name = "harrow", version, about)]
struct Cli {
    /// Files or directories to outline. Defaults to the current directory.
    paths: Vec<PathBuf>,

    /// Emit JSON instead of the text outline.
    #[arg(long)]
    json: bool,

    /// Script dialect: function bodies are not `end`-terminated.
    #[arg(long)]
    no_end: bool,

    /// Directory treated as a MATLAB system root (repeatable). Doc-only
    /// files under a system root are reported as builtins.
    #[arg(long = "system-root", value_name = "DIR")]
    system_roots: Vec<PathBuf>,

    /// Print shell completions and exit.
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<clap_complete::Shell>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "harrow", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let options = config::resolve(&cli.system_roots, cli.no_end, &paths[0]);
    let cache = OutlineCache::new();

    let mut failed = false;
    for path in &paths {
        match outline_path(path, &options, cli.json, &cache) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("harrow: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Outline one CLI path argument. Directories fan out over their MATLAB
/// sources in parallel; per-file problems inside a directory are reported
/// and skipped rather than aborting the walk.
fn outline_path(
    path: &Path,
    options: &ParseOptions,
    json: bool,
    cache: &OutlineCache,
) -> Result<String, HarrowError> {
    let meta = std::fs::metadata(path).map_err(|e| error::from_io(path, e))?;

    if !meta.is_dir() {
        return if json {
            json_outline(path, options)
        } else {
            text_outline(path, options, cache)
        };
    }

    let files = walk::matlab_files(path);
    if json {
        let docs: Vec<serde_json::Value> = files
            .par_iter()
            .filter_map(|f| report_err(json_doc(f, options)))
            .collect();
        Ok(serde_json::to_string_pretty(&docs).unwrap_or_else(|_| String::from("[]")))
    } else {
        let outlines: Vec<String> = files
            .par_iter()
            .filter_map(|f| report_err(text_outline(f, options, cache)))
            .collect();
        Ok(outlines.join("\n\n"))
    }
}

fn report_err<T>(result: Result<T, HarrowError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("harrow: {e}");
            None
        }
    }
}

fn text_outline(
    path: &Path,
    options: &ParseOptions,
    cache: &OutlineCache,
) -> Result<String, HarrowError> {
    let (text, mtime) = source::read_source(path)?;
    Ok(cache.get_or_compute(path, mtime, || {
        let tags = tag::parse(&text, path, options);
        format::render_outline(path, &text, &tags)
    }))
}

fn json_outline(path: &Path, options: &ParseOptions) -> Result<String, HarrowError> {
    let doc = json_doc(path, options)?;
    Ok(serde_json::to_string_pretty(&doc).unwrap_or_else(|_| String::from("{}")))
}

fn json_doc(path: &Path, options: &ParseOptions) -> Result<serde_json::Value, HarrowError> {
    let (text, _) = source::read_source(path)?;
    let tags = tag::parse(&text, path, options);
    Ok(serde_json::json!({
        "path": path.display().to_string(),
        "functions": tags,
    }))
}
