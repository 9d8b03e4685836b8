//! Vim help-file renderer — fixed-width layout with right-aligned tags.
//!
//! Alignment uses visual length, not character count: help syntax hides
//! paired `` ` ``/`|`/`*` delimiters, so each pair discounts two columns.

use crate::model::{FunctionDoc, Param};
use crate::render::Renderer;

pub const DEFAULT_WIDTH: usize = 80;

pub struct VimdocRenderer {
    pub width: usize,
    pub namespace: String,
}

impl Renderer for VimdocRenderer {
    fn render(&self, docs: &[FunctionDoc]) -> Vec<String> {
        render_api(docs, &self.namespace, self.width)
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

/// Render the per-function bodies for an API section, skipping private docs.
pub fn render_api(docs: &[FunctionDoc], namespace: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for doc in docs.iter().filter(|d| !d.private) {
        let args = doc
            .params
            .iter()
            .map(|p| format!("{{{}}}", p.name))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(leftright(
            &format!("{}({})", doc.name, args),
            &format!("*{}.{}*", namespace, doc.name),
            width,
        ));
        lines.extend(wrap(&doc.summary, 4, width));
        lines.push(String::new());
        if !doc.params.is_empty() {
            lines.push("    Parameters:".to_string());
            lines.extend(format_params(&doc.params, 6, width));
        }
        if let Some(note) = &doc.note {
            lines.push(String::new());
            lines.push("    Note:".to_string());
            lines.extend(indent_lines(note, 6));
        }
        if let Some(example) = &doc.example {
            lines.push(String::new());
            lines.push("    Examples: >".to_string());
            lines.extend(indent_lines(example, 6));
            lines.push("<".to_string());
        }
        lines.push(String::new());
    }
    lines
}

// -- Layout primitives --------------------------------------------------------

/// Visual length: character count minus 2 for every paired occurrence of a
/// concealed markup character. An odd trailing occurrence is a literal and
/// is not discounted.
pub fn vimlen(s: &str) -> usize {
    let mut len = 0usize;
    let mut counts = [0usize; 3];
    for c in s.chars() {
        len += 1;
        match c {
            '`' => counts[0] += 1,
            '|' => counts[1] += 1,
            '*' => counts[2] += 1,
            _ => {}
        }
    }
    let discount: usize = counts.iter().map(|c| 2 * (c / 2)).sum();
    len - discount
}

/// Pad between `left` and `right` so the right string's last character lands
/// at `width` (by visual length). At least one space, even when over budget.
pub fn leftright(left: &str, right: &str, width: usize) -> String {
    let spaces = width.saturating_sub(vimlen(left) + vimlen(right)).max(1);
    format!("{}{}{}", left, " ".repeat(spaces), right)
}

/// Greedy word wrap at `width`, every line indented by `indent` spaces.
/// Empty or whitespace-only text wraps to no lines at all.
pub fn wrap(text: &str, indent: usize, width: usize) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };
    let prefix = " ".repeat(indent);
    let mut lines = Vec::new();
    let mut line = format!("{}{}", prefix, first);
    let mut len = indent + first.chars().count();
    for word in words {
        let wlen = word.chars().count();
        if len + 1 + wlen <= width {
            line.push(' ');
            line.push_str(word);
            len += 1 + wlen;
        } else {
            lines.push(line);
            line = format!("{}{}", prefix, word);
            len = indent + wlen;
        }
    }
    lines.push(line);
    lines
}

/// `{name}` padded to a shared column (longest name in the group plus 2),
/// back-ticked type, then the description wrapped to continue at the column
/// where the type ends. Sub-parameters recurse shifted right four columns.
fn format_params(params: &[Param], indent: usize, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let max_param = params
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    for param in params {
        let fill = max_param - param.name.chars().count() - 1;
        let prefix = format!("{}{{{}}}{}", " ".repeat(indent), param.name, " ".repeat(fill));
        let line = format!("{}`{}` ", prefix, param.ty);
        if param.desc.split_whitespace().next().is_none() {
            lines.push(line.trim_end().to_string());
        } else {
            let col = line.chars().count();
            let mut wrapped = wrap(&param.desc, col, width).into_iter();
            if let Some(first) = wrapped.next() {
                lines.push(format!("{}{}", line, first.trim_start()));
            }
            lines.extend(wrapped);
        }
        if !param.subparams.is_empty() {
            lines.extend(format_params(&param.subparams, indent + 4, width));
        }
    }
    lines
}

fn indent_lines(text: &str, amount: usize) -> Vec<String> {
    let prefix = " ".repeat(amount);
    text.lines()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, l)
            }
        })
        .collect()
}

// -- Whole-file framing -------------------------------------------------------

/// One titled, tagged section of a help file.
pub struct VimdocSection {
    pub name: String,
    pub tag: String,
    pub body: Vec<String>,
}

impl VimdocSection {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, body: Vec<String>) -> Self {
        VimdocSection {
            name: name.into(),
            tag: tag.into(),
            body,
        }
    }
}

/// A complete help file: header, contents listing, sections, modeline.
pub struct Vimdoc {
    pub filename: String,
    pub project: String,
    pub width: usize,
    pub sections: Vec<VimdocSection>,
}

impl Vimdoc {
    pub fn new(filename: impl Into<String>, project: impl Into<String>, width: usize) -> Self {
        Vimdoc {
            filename: filename.into(),
            project: project.into(),
            width,
            sections: Vec::new(),
        }
    }

    pub fn render(&self) -> Vec<String> {
        let sep = "=".repeat(self.width);
        let mut lines = vec![format!("*{}*", self.filename), String::new()];

        lines.push(sep.clone());
        lines.push(leftright(
            "CONTENTS",
            &format!("*{}-contents*", self.project),
            self.width,
        ));
        lines.push(String::new());
        for (i, section) in self.sections.iter().enumerate() {
            lines.push(toc_entry(i + 1, &section.name, &section.tag, self.width));
        }
        lines.push(String::new());

        for section in &self.sections {
            lines.push(sep.clone());
            lines.push(leftright(
                &section.name.to_uppercase(),
                &format!("*{}*", section.tag),
                self.width,
            ));
            lines.push(String::new());
            lines.extend(section.body.iter().cloned());
        }

        lines.push(sep);
        lines.push("vim:tw=80:ts=2:ft=help:norl:syntax=help:".to_string());
        lines
    }
}

/// Contents line: display name dot-padded against its `|tag|` reference.
fn toc_entry(index: usize, name: &str, tag: &str, width: usize) -> String {
    let left = format!("  {}. {}", index, name);
    let right = format!("|{}|", tag);
    let dots = width
        .saturating_sub(vimlen(&left) + vimlen(&right) + 2)
        .max(1);
    format!("{} {} {}", left, ".".repeat(dots), right)
}
