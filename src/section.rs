//! Marked-region file utilities — read or replace the lines between a start
//! and end marker in an existing file.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Return the lines strictly between the start and end markers.
pub fn read_section(path: &Path, start: &Regex, end: &Regex) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let lines: Vec<&str> = content.lines().collect();
    let (start_at, end_at) = locate(&lines, start, end, path)?;
    Ok(lines[start_at + 1..end_at].iter().map(|l| l.to_string()).collect())
}

/// Replace the lines strictly between the start and end markers, keeping the
/// marker lines themselves. Fails loudly unless the start marker occurs
/// exactly once with an end marker after it.
pub fn replace_section(path: &Path, start: &Regex, end: &Regex, lines: &[String]) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let old: Vec<&str> = content.lines().collect();
    let (start_at, end_at) = locate(&old, start, end, path)?;

    let mut out: Vec<&str> = Vec::with_capacity(old.len() + lines.len());
    out.extend(&old[..=start_at]);
    out.extend(lines.iter().map(String::as_str));
    out.extend(&old[end_at..]);

    let mut text = out.join("\n");
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn locate(lines: &[&str], start: &Regex, end: &Regex, path: &Path) -> Result<(usize, usize)> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| start.is_match(l))
        .map(|(i, _)| i)
        .collect();
    let start_at = match starts.as_slice() {
        [only] => *only,
        [] => bail!("marker `{}` not found in {}", start, path.display()),
        _ => bail!("marker `{}` found more than once in {}", start, path.display()),
    };
    let end_at = lines[start_at + 1..]
        .iter()
        .position(|l| end.is_match(l))
        .map(|i| start_at + 1 + i)
        .with_context(|| {
            format!("end marker `{}` not found after start in {}", end, path.display())
        })?;
    Ok((start_at, end_at))
}
