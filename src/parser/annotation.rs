//! Annotation block parser — one comment block in, one `FunctionDoc` out.
//!
//! Line-oriented single forward pass. The only state is which tag is being
//! accumulated; no transition depends on anything but the next line's prefix.
//! Input lines have already had their `---` comment marker stripped.

use crate::model::{FunctionDoc, Param, Return};
use crate::types::{self, GrammarError};
use thiserror::Error;

/// Fatal failure for a single annotation block. Always names the definition
/// being parsed so a batch driver can report it and move on.
#[derive(Debug, Error)]
#[error("in annotation for `{name}`: {kind}")]
pub struct AnnotationError {
    pub name: String,
    pub kind: AnnotationErrorKind,
}

#[derive(Debug, Error)]
pub enum AnnotationErrorKind {
    #[error("{0}")]
    Grammar(#[from] GrammarError),
    #[error("{0}")]
    Structure(String),
}

fn structure(msg: impl Into<String>) -> AnnotationErrorKind {
    AnnotationErrorKind::Structure(msg.into())
}

/// Parse one annotation block into a `FunctionDoc`.
///
/// `name` comes from the definition line below the block, not from the block
/// body. Trailing blank lines are discarded; an interior blank line with
/// content after it is an error.
pub fn parse_annotation(name: &str, lines: &[String]) -> Result<FunctionDoc, AnnotationError> {
    parse_block(name, lines).map_err(|kind| AnnotationError {
        name: name.to_string(),
        kind,
    })
}

fn parse_block(name: &str, lines: &[String]) -> Result<FunctionDoc, AnnotationErrorKind> {
    let mut doc = FunctionDoc::new(name);

    let mut end = lines.len();
    while end > 0 && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    let lines = &lines[..end];

    let mut i = 0;
    if let Some(first) = lines.first() {
        let trimmed = first.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('@') {
            doc.summary = first.trim().to_string();
            i = 1;
        }
    }

    while i < lines.len() {
        let line = &lines[i];
        if line.trim().is_empty() {
            return Err(structure("blank line inside annotation block"));
        }
        let trimmed = line.trim_start();
        if !trimmed.starts_with('@') {
            return Err(structure(format!("expected a tag line, found {:?}", trimmed)));
        }
        let (tag, rest) = split_tag(trimmed);
        match tag {
            "@param" => {
                let mut param = parse_param_body(rest)?;
                i += 1;
                while let Some(body) = subparam_line(lines, i) {
                    param.subparams.push(parse_param_body(body)?);
                    i += 1;
                }
                doc.params.push(param);
            }
            "@return" => {
                if rest.is_empty() {
                    return Err(structure("`@return` is missing a type"));
                }
                let (ty, used) = types::parse_prefix(rest)?;
                doc.returns.push(Return {
                    ty,
                    desc: rest[used..].trim().to_string(),
                });
                i += 1;
            }
            "@private" => {
                require_bare(tag, rest)?;
                doc.private = true;
                i += 1;
            }
            "@example" => {
                require_bare(tag, rest)?;
                i += 1;
                doc.example = Some(capture_block(lines, &mut i, tag)?);
            }
            "@note" => {
                require_bare(tag, rest)?;
                i += 1;
                doc.note = Some(capture_block(lines, &mut i, tag)?);
            }
            other => return Err(structure(format!("unknown tag `{}`", other))),
        }
    }
    Ok(doc)
}

/// Split a tag line into the `@tag` word and the trimmed remainder.
fn split_tag(line: &str) -> (&str, &str) {
    match line.find([' ', '\t']) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    }
}

fn require_bare(tag: &str, rest: &str) -> Result<(), AnnotationErrorKind> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(structure(format!("`{}` takes no text on the tag line", tag)))
    }
}

/// `<name> <type> [description]` — shared by `@param` and sub-parameter lines.
fn parse_param_body(text: &str) -> Result<Param, AnnotationErrorKind> {
    match text.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err(structure(format!("expected a parameter name in {:?}", text))),
    }
    let name_end = text
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let name = &text[..name_end];
    let rest = text[name_end..].trim_start();
    if rest.is_empty() {
        return Err(structure(format!("parameter `{}` is missing a type", name)));
    }
    let (ty, used) = types::parse_prefix(rest)?;
    Ok(Param {
        name: name.to_string(),
        ty,
        desc: rest[used..].trim().to_string(),
        subparams: Vec::new(),
    })
}

/// A sub-parameter line is indented, non-blank, and not itself a tag. The
/// list ends at the first line that breaks any of those; a line past this
/// check that fails to parse as `<name> <type> [desc]` is fatal.
fn subparam_line(lines: &[String], i: usize) -> Option<&str> {
    let line = lines.get(i)?;
    if line.trim().is_empty() || !line.starts_with([' ', '\t']) {
        return None;
    }
    let trimmed = line.trim_start();
    if trimmed.starts_with('@') {
        return None;
    }
    Some(trimmed)
}

/// Capture the indented body of `@example`/`@note`: one or more indented
/// lines, each dedented by exactly one level, joined with newlines.
fn capture_block(lines: &[String], i: &mut usize, tag: &str) -> Result<String, AnnotationErrorKind> {
    let mut captured: Vec<&str> = Vec::new();
    while *i < lines.len() {
        let line = &lines[*i];
        if line.trim().is_empty() || !line.starts_with([' ', '\t']) {
            break;
        }
        if line.trim_start().starts_with('@') {
            break;
        }
        captured.push(&line[1..]);
        *i += 1;
    }
    if captured.is_empty() {
        return Err(structure(format!("`{}` block has no indented body", tag)));
    }
    Ok(captured.join("\n"))
}
