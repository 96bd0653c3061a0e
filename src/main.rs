#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use strata::cli::{CliArgs, Command, MatchFlags};
use strata::config::StrataConfig;
use strata::diff::{diff_text, merge3_with_labels, split_lines, unified_diff};
use strata::search::SearchEngine;
use strata::text::Buffer;
use strata::util::LineEnding;

/// Exit status when a merge leaves conflicts (as `git merge-file` does)
const EXIT_CONFLICTS: u8 = 1;

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load a file as a buffer with CRLF folded to LF, along with the line
/// ending to write it back with
fn read_buffer(path: &Path) -> Result<(Buffer, LineEnding)> {
    let text = read_text(path)?;
    let mut buf = Buffer::from_text(&text);
    buf.normalize_newlines();
    Ok((buf, LineEnding::detect(&text)))
}

fn run_diff(config: &StrataConfig, old: &Path, new: &Path, json: bool) -> Result<ExitCode> {
    let hunks = diff_text(&read_text(old)?, &read_text(new)?);
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &hunks).context("Failed to write JSON")?;
        writeln!(out)?;
    } else if !hunks.is_empty() {
        let old_name = config.diff.old_name(&old.display().to_string());
        let new_name = config.diff.new_name(&new.display().to_string());
        write!(out, "{}", unified_diff(&hunks, &old_name, &new_name))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_merge(
    config: &StrataConfig,
    base: &Path,
    ours: &Path,
    theirs: &Path,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let result = merge3_with_labels(
        &split_lines(&read_text(base)?),
        &split_lines(&read_text(ours)?),
        &split_lines(&read_text(theirs)?),
        &config.merge,
    );
    let merged = result.lines.join("\n");

    match output {
        Some(path) => std::fs::write(path, &merged)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => write!(std::io::stdout().lock(), "{}", merged)?,
    }

    if result.has_conflicts {
        eprintln!("{} conflict(s)", result.conflict_count);
        return Ok(ExitCode::from(EXIT_CONFLICTS));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_search(
    config: &StrataConfig,
    file: &Path,
    pattern: &str,
    flags: MatchFlags,
    json: bool,
) -> Result<ExitCode> {
    let (buf, _) = read_buffer(file)?;
    let options = flags.apply(config.search);
    let matches = SearchEngine::with_options(options).find_all(&buf, pattern, &options);
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &matches).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for m in &matches {
            let line = buf.get_line(m.line);
            writeln!(out, "{}:{}:{}", m.line + 1, m.col + 1, line)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_replace(
    config: &StrataConfig,
    file: &Path,
    pattern: &str,
    replacement: &str,
    flags: MatchFlags,
    in_place: bool,
) -> Result<ExitCode> {
    let (mut buf, ending) = read_buffer(file)?;
    let options = flags.apply(config.search);
    let count = SearchEngine::with_options(options).replace_all(&mut buf, pattern, replacement, &options);

    let text = ending.join(&buf.all_lines());
    if in_place {
        std::fs::write(file, text)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        eprintln!("{} replacement(s)", count);
    } else {
        write!(std::io::stdout().lock(), "{}", text)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    strata::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => StrataConfig::load_from(path)?,
        None => StrataConfig::load(),
    };

    match &args.command {
        Command::Diff { old, new, json } => run_diff(&config, old, new, *json),
        Command::Merge {
            base,
            ours,
            theirs,
            output,
        } => run_merge(&config, base, ours, theirs, output.as_deref()),
        Command::Search {
            file,
            pattern,
            flags,
            json,
        } => run_search(&config, file, pattern, *flags, *json),
        Command::Replace {
            file,
            pattern,
            replacement,
            flags,
            in_place,
        } => run_replace(&config, file, pattern, replacement, *flags, *in_place),
    }
}
