//! Markdown table-of-contents generation and GitHub anchor slugs.

/// GitHub heading anchor slug: lowercase, strip everything that is not
/// alphanumeric, space, or hyphen, then spaces become hyphens.
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Markdown link to a heading's anchor.
pub fn toc_link(title: &str) -> String {
    format!("[{}](#{})", title, github_slug(title))
}

/// Build a table of contents from markdown lines.
///
/// Headings inside fenced code blocks are ignored. Entries are indented two
/// spaces per level below the shallowest heading; headings deeper than
/// `max_level` are dropped.
pub fn generate_md_toc(lines: &[String], max_level: usize) -> Vec<String> {
    let mut headings: Vec<(usize, String)> = Vec::new();
    let mut in_fence = false;
    for line in lines {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let level = line.chars().take_while(|&c| c == '#').count();
        if level == 0 || level > max_level {
            continue;
        }
        let title = line[level..].trim();
        if title.is_empty() {
            continue;
        }
        headings.push((level, title.to_string()));
    }

    let base = headings.iter().map(|(l, _)| *l).min().unwrap_or(1);
    headings
        .into_iter()
        .map(|(level, title)| {
            format!("{}- {}", "  ".repeat(level - base), toc_link(&title))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn slug_rules() {
        assert_eq!(github_slug("Hello World"), "hello-world");
        assert_eq!(github_slug("string.trim"), "stringtrim");
        assert_eq!(github_slug("run(a, b)"), "runa-b");
        assert_eq!(github_slug("drop-index"), "drop-index");
    }

    #[test]
    fn link_format() {
        assert_eq!(toc_link("setup(opts)"), "[setup(opts)](#setupopts)");
    }

    #[test]
    fn nested_headings_indent() {
        let toc = generate_md_toc(&lines("# Top\n## Inner\n### Deep\n## Other\n"), 99);
        assert_eq!(
            toc,
            vec![
                "- [Top](#top)",
                "  - [Inner](#inner)",
                "    - [Deep](#deep)",
                "  - [Other](#other)",
            ]
        );
    }

    #[test]
    fn max_level_filters() {
        let toc = generate_md_toc(&lines("## A\n### B\n"), 2);
        assert_eq!(toc, vec!["- [A](#a)"]);
    }

    #[test]
    fn code_fences_skipped() {
        let toc = generate_md_toc(&lines("## Real\n```lua\n## not a heading\n```\n"), 99);
        assert_eq!(toc, vec!["- [Real](#real)"]);
    }
}
