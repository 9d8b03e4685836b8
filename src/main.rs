//! luadoc — generate documentation from `---@tag` annotations in Lua sources.
//!
//! Three modes:
//!
//! - **stdin mode**: `luadoc < init.lua` writes rendered output to stdout
//! - **file mode**: `luadoc -o doc lua/*.lua` writes one file per input
//! - **splice mode**: `luadoc --into README.md lua/init.lua` replaces the
//!   marked region of an existing file with the rendered output

mod model;
mod parser;
mod render;
mod section;
mod toc;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use render::vimdoc::{Vimdoc, VimdocSection};
use render::RenderOptions;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_TOC_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<!-- TOC -->$").unwrap());
static RE_TOC_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<!-- /TOC -->$").unwrap());

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Generate documentation from ---@tag annotations in Lua sources"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (file mode)
    #[arg(short = 'o', long, conflicts_with = "into")]
    output: Option<PathBuf>,

    /// Existing file to splice rendered output into
    #[arg(long)]
    into: Option<PathBuf>,

    /// Start marker regex for --into
    #[arg(long, default_value = "^<!-- API -->$")]
    start_marker: String,

    /// End marker regex for --into
    #[arg(long, default_value = "^<!-- /API -->$")]
    end_marker: String,

    /// Also refresh the <!-- TOC --> region of the --into file
    #[arg(long, requires = "into")]
    toc: bool,

    /// Output format: markdown (default), vimdoc
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Line width for vimdoc layout
    #[arg(long, default_value_t = render::vimdoc::DEFAULT_WIDTH)]
    width: usize,

    /// Tag namespace for vimdoc (tags render as `*namespace.name*`).
    /// Defaults to the input file stem.
    #[arg(short = 'n', long)]
    namespace: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }
    if let Some(dest) = cli.into.clone() {
        return splice_mode(&cli, &dest);
    }
    file_mode(&cli)
}

/// stdin mode: read Lua source from stdin, render to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let (docs, errors) = parser::parse_source(&input);
    for err in &errors {
        eprintln!("warning: {}", err);
    }
    let opts = RenderOptions {
        width: cli.width,
        namespace: cli.namespace.clone().unwrap_or_else(|| "api".to_string()),
    };
    let renderer = render::create_renderer(&cli.format, &opts)?;
    for line in renderer.render(&docs) {
        println!("{}", line);
    }
    Ok(())
}

/// file mode: one output file per input, extension chosen by the renderer.
/// Vimdoc output is the complete framed help file.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for path in expand_globs(&cli.files)? {
        let docs = parse_input(&path)?;
        if docs.is_empty() {
            continue;
        }
        let name = derive_output_name(&path);
        let namespace = cli.namespace.clone().unwrap_or_else(|| name.clone());
        let opts = RenderOptions {
            width: cli.width,
            namespace: namespace.clone(),
        };
        let renderer = render::create_renderer(&cli.format, &opts)?;

        let lines = if renderer.file_extension() == "txt" {
            let mut doc = Vimdoc::new(format!("{}.txt", name), namespace.clone(), cli.width);
            doc.sections.push(VimdocSection::new(
                "API",
                format!("{}-api", namespace),
                renderer.render(&docs),
            ));
            doc.render()
        } else {
            renderer.render(&docs)
        };

        let out_path = output_dir.join(format!("{}.{}", name, renderer.file_extension()));
        write_lines(&out_path, &lines)?;
    }
    Ok(())
}

/// splice mode: render all inputs in order and replace the marked region of
/// the destination file; optionally refresh its TOC region too.
fn splice_mode(cli: &Cli, dest: &Path) -> Result<()> {
    let start = Regex::new(&cli.start_marker)
        .with_context(|| format!("invalid start marker regex: {}", cli.start_marker))?;
    let end = Regex::new(&cli.end_marker)
        .with_context(|| format!("invalid end marker regex: {}", cli.end_marker))?;

    let inputs = expand_globs(&cli.files)?;
    let mut docs = Vec::new();
    for path in &inputs {
        docs.extend(parse_input(path)?);
    }

    let namespace = cli
        .namespace
        .clone()
        .or_else(|| inputs.first().map(|p| derive_output_name(p)))
        .unwrap_or_else(|| "api".to_string());
    let opts = RenderOptions {
        width: cli.width,
        namespace,
    };
    let renderer = render::create_renderer(&cli.format, &opts)?;
    section::replace_section(dest, &start, &end, &renderer.render(&docs))?;

    if cli.toc {
        refresh_toc(dest)?;
    }
    Ok(())
}

/// Regenerate the `<!-- TOC -->` region from the destination's headings.
fn refresh_toc(dest: &Path) -> Result<()> {
    let content =
        fs::read_to_string(dest).with_context(|| format!("failed to read {}", dest.display()))?;
    let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    let toc = toc::generate_md_toc(&lines, 99);
    section::replace_section(dest, &RE_TOC_START, &RE_TOC_END, &toc)
}

/// Parse one input file, reporting per-definition failures on stderr and
/// keeping the rest.
fn parse_input(path: &Path) -> Result<Vec<model::FunctionDoc>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (docs, errors) = parser::parse_source(&content);
    for err in &errors {
        eprintln!("warning: {}: {}", path.display(), err);
    }
    Ok(docs)
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Expand glob patterns into a sorted, deduplicated list of Lua files.
/// Bare directory paths are scanned (non-recursive) for .lua files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("lua") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output name (without extension) for a source path: "lua/tasks.lua" → "tasks".
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("doc")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_lua() {
        assert_eq!(derive_output_name(Path::new("lua/tasks.lua")), "tasks");
        assert_eq!(derive_output_name(Path::new("init.lua")), "init");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name(Path::new("Makefile")), "Makefile");
    }
}
