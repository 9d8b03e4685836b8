//! Chunk discovery — pair each `---` comment run with the definition below it.

use regex::Regex;
use std::sync::LazyLock;

static RE_ASSIGN_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^M\.([A-Za-z_][A-Za-z0-9_]*)\s*=").unwrap());

static RE_FUNCTION_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:local\s+)?function\s+M\.([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap()
});

/// One annotation block and the name of the definition it documents.
/// `lines` have had the `---` marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub lines: Vec<String>,
}

/// Scan a source file for annotation chunks.
///
/// Consecutive lines starting with `---` accumulate; when a module-level
/// definition (`M.name = ...` or `function M.name(...)`) immediately follows
/// a non-empty run, the run becomes that definition's chunk. Any other line
/// discards the run. Pure and restartable.
pub fn scan(source: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for line in source.lines() {
        if let Some(stripped) = line.strip_prefix("---") {
            run.push(stripped.to_string());
        } else {
            if !run.is_empty() {
                if let Some(name) = definition_name(line) {
                    chunks.push(Chunk {
                        name,
                        lines: std::mem::take(&mut run),
                    });
                }
            }
            run.clear();
        }
    }
    chunks
}

fn definition_name(line: &str) -> Option<String> {
    RE_ASSIGN_DEF
        .captures(line)
        .or_else(|| RE_FUNCTION_DEF.captures(line))
        .map(|caps| caps[1].to_string())
}
