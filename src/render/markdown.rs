//! Markdown renderer — headings, aligned parameter tables, fenced blocks.

use crate::model::{FunctionDoc, Param};
use crate::render::Renderer;
use crate::types::TypeExpr;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, docs: &[FunctionDoc]) -> Vec<String> {
        render_markdown(docs)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a batch of documents as markdown lines, skipping private ones.
pub fn render_markdown(docs: &[FunctionDoc]) -> Vec<String> {
    let mut lines = Vec::new();
    for doc in docs.iter().filter(|d| !d.private) {
        render_function(&mut lines, doc);
    }
    lines
}

fn render_function(lines: &mut Vec<String>, doc: &FunctionDoc) {
    let args = doc
        .params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("### {}({})", doc.name, args));
    lines.push(String::new());
    lines.push(doc.summary.clone());
    if !doc.params.is_empty() {
        lines.extend(param_table(&doc.params, doc.has_subparams()));
    }
    if let Some(note) = &doc.note {
        lines.push(String::new());
        lines.push("**Note:**".to_string());
        lines.push("<pre>".to_string());
        lines.extend(note.lines().map(str::to_string));
        lines.push("</pre>".to_string());
    }
    if let Some(example) = &doc.example {
        lines.push(String::new());
        lines.push("**Examples:**".to_string());
        lines.push("```lua".to_string());
        lines.extend(example.lines().map(str::to_string));
        lines.push("```".to_string());
    }
    lines.push(String::new());
}

/// Parameter table. Sub-parameter rows shift one column right: the name
/// lands in the Type column, the type in Desc, and the description in a
/// blank-header fourth column that exists only when any sub-parameter does.
fn param_table(params: &[Param], any_subparams: bool) -> Vec<String> {
    let mut headers: Vec<&str> = vec!["Param", "Type", "Desc"];
    if any_subparams {
        headers.push("");
    }
    let mut rows: Vec<Vec<String>> = Vec::new();
    for param in params {
        let mut row = vec![
            param.name.clone(),
            backtick_type(&param.ty),
            param.desc.clone(),
        ];
        if any_subparams {
            row.push(String::new());
        }
        rows.push(row);
        for sub in &param.subparams {
            rows.push(vec![
                String::new(),
                sub.name.clone(),
                backtick_type(&sub.ty),
                sub.desc.clone(),
            ]);
        }
    }
    format_table(&headers, &rows)
}

/// `|` delimits table columns, so escape it inside type cells.
fn backtick_type(ty: &TypeExpr) -> String {
    format!("`{}`", ty.to_string().replace('|', "\\|"))
}

/// Every column is sized to its widest cell, header included (minimum 1).
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(1)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(table_row(&header_cells, &widths));
    lines.push(table_row(&separator, &widths));
    for row in rows {
        lines.push(table_row(row, &widths));
    }
    lines
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = w)
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Return;
    use crate::types;

    fn doc_with_params() -> FunctionDoc {
        let mut doc = FunctionDoc::new("run");
        doc.summary = "Does things.".to_string();
        doc.params.push(Param::new(
            "a",
            types::parse("string").unwrap(),
            "first",
        ));
        doc.params.push(Param::new(
            "b",
            types::parse("table<string, integer>").unwrap(),
            "",
        ));
        doc
    }

    #[test]
    fn heading_summary_and_table() {
        let lines = render_markdown(&[doc_with_params()]);
        assert_eq!(
            lines,
            vec![
                "### run(a, b)",
                "",
                "Does things.",
                "| Param | Type                     | Desc  |",
                "| ----- | ------------------------ | ----- |",
                "| a     | `string`                 | first |",
                "| b     | `table<string, integer>` |       |",
                "",
            ]
        );
    }

    #[test]
    fn union_pipe_escaped_in_type_cell() {
        let mut doc = FunctionDoc::new("f");
        doc.params.push(Param::new(
            "x",
            types::parse("string|nil").unwrap(),
            "",
        ));
        let lines = render_markdown(&[doc]);
        let row = lines.iter().find(|l| l.contains("`string\\|nil`")).unwrap();
        assert!(row.starts_with("| x"));
    }

    #[test]
    fn subparam_rows_shift_and_add_column() {
        let mut doc = FunctionDoc::new("setup");
        let mut opts = Param::new("opts", types::parse("table").unwrap(), "");
        opts.subparams.push(Param::new(
            "foo",
            types::parse("string").unwrap(),
            "nested value",
        ));
        doc.params.push(opts);
        let lines = render_markdown(&[doc]);
        assert_eq!(
            lines[3..7].to_vec(),
            vec![
                "| Param | Type    | Desc     |              |",
                "| ----- | ------- | -------- | ------------ |",
                "| opts  | `table` |          |              |",
                "|       | foo     | `string` | nested value |",
            ]
        );
    }

    #[test]
    fn private_docs_skipped() {
        let mut secret = FunctionDoc::new("secret");
        secret.private = true;
        let public = FunctionDoc::new("public");
        let lines = render_markdown(&[secret, public]);
        assert!(lines.iter().any(|l| l.starts_with("### public(")));
        assert!(!lines.iter().any(|l| l.contains("secret")));
    }

    #[test]
    fn note_and_example_blocks() {
        let mut doc = FunctionDoc::new("load");
        doc.note = Some("first line\nsecond line".to_string());
        doc.example = Some("require(\"task\").load()".to_string());
        let lines = render_markdown(&[doc]);
        let note_at = lines.iter().position(|l| l == "**Note:**").unwrap();
        assert_eq!(lines[note_at + 1], "<pre>");
        assert_eq!(lines[note_at + 2], "first line");
        assert_eq!(lines[note_at + 3], "second line");
        assert_eq!(lines[note_at + 4], "</pre>");
        let ex_at = lines.iter().position(|l| l == "**Examples:**").unwrap();
        assert_eq!(lines[ex_at + 1], "```lua");
        assert_eq!(lines[ex_at + 3], "```");
    }

    #[test]
    fn returns_are_parsed_but_not_rendered() {
        let mut doc = FunctionDoc::new("probe");
        doc.returns.push(Return {
            ty: types::parse("boolean").unwrap(),
            desc: "whether it worked".to_string(),
        });
        let lines = render_markdown(&[doc]);
        assert!(!lines.iter().any(|l| l.contains("whether it worked")));
    }

    #[test]
    fn rendering_is_idempotent() {
        let docs = vec![doc_with_params()];
        assert_eq!(render_markdown(&docs), render_markdown(&docs));
    }
}
