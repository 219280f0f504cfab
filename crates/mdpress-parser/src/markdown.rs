//! Markdown parser using pulldown-cmark.

use mdpress_core::frontmatter::{Metadata, parse_frontmatter};
use pulldown_cmark::{Options, Parser, html};

/// Parsed post with metadata and rendered HTML.
#[derive(Debug, Clone)]
pub struct ParsedContent {
    /// Front matter metadata.
    pub metadata: Metadata,

    /// Rendered HTML body.
    pub html: String,

    /// Markdown body without the front matter.
    pub raw: String,
}

/// Markdown renderer.
///
/// Fenced code blocks are always on; tables, footnotes, strikethrough and task
/// lists are enabled on top of CommonMark.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Parse a whole document: front matter plus rendered body.
    pub fn parse(&self, content: &str) -> ParsedContent {
        let (metadata, body) = parse_frontmatter(content);

        ParsedContent {
            metadata,
            html: self.render(body),
            raw: body.to_string(),
        }
    }

    /// Render a markdown body to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_markdown() {
        let parser = MarkdownParser::new();
        let content = r#"---
title: "Test Post"
---

# Hello World

This is a test."#;

        let result = parser.parse(content);

        assert_eq!(result.metadata.title(), Some("Test Post"));
        assert!(result.html.contains("<h1>Hello World</h1>"));
        assert!(result.html.contains("<p>This is a test.</p>"));
        assert!(result.raw.starts_with("# Hello World"));
    }

    #[test]
    fn test_fenced_code_block() {
        let parser = MarkdownParser::new();
        let html = parser.render("```rust\nfn main() {\n    println!(\"Hello\");\n}\n```\n");

        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("fn main()"));
        assert!(html.contains("println!"));
    }

    #[test]
    fn test_fenced_code_without_language() {
        let parser = MarkdownParser::new();
        let html = parser.render("```\n<not a tag>\n```\n");

        assert!(html.contains("<pre><code>&lt;not a tag&gt;"));
    }

    #[test]
    fn test_table_rendering() {
        let parser = MarkdownParser::new();
        let html = parser.render(
            r#"| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |"#,
        );

        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<td>Cell 1</td>"));
    }

    #[test]
    fn test_task_list() {
        let parser = MarkdownParser::new();
        let html = parser.render("- [x] Done\n- [ ] Not done");

        assert!(html.contains("checkbox"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_no_frontmatter() {
        let parser = MarkdownParser::new();
        let content = "# Just Content\n\nNo frontmatter here.";
        let result = parser.parse(content);

        assert!(result.metadata.is_empty());
        assert_eq!(result.raw, content);
        assert!(result.html.contains("Just Content"));
    }
}
