//! HTML template system for page generation.
//!
//! Provides a lightweight template system using string interpolation rather than
//! heavy template engines like Tera or Handlebars.
//!
//! Syntax:
//! - `{{ name }}` inserts the HTML-escaped value; a missing variable is an error.
//! - `{{ name? }}` inserts an empty string when the variable is missing.
//! - `{{ name | safe }}` inserts the value without escaping.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable `{variable}` in template `{template}`")]
    MissingVariable { template: String, variable: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in `{template}`: {message}")]
    InvalidSyntax { template: String, message: String },

    /// Failed to read a template override.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A parsed `{{ ... }}` expression.
struct Placeholder<'a> {
    name: &'a str,
    optional: bool,
    raw: bool,
}

impl<'a> Placeholder<'a> {
    fn parse(expr: &'a str, template: &str) -> Result<Self> {
        let (name, filter) = match expr.split_once('|') {
            Some((name, filter)) => (name.trim(), Some(filter.trim())),
            None => (expr.trim(), None),
        };

        let raw = match filter {
            None => false,
            Some("safe") => true,
            Some(other) => {
                return Err(TemplateError::InvalidSyntax {
                    template: template.to_string(),
                    message: format!("unknown filter `{other}`"),
                });
            }
        };

        let (name, optional) = match name.strip_suffix('?') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (name, false),
        };

        if name.is_empty() {
            return Err(TemplateError::InvalidSyntax {
                template: template.to_string(),
                message: "empty placeholder".to_string(),
            });
        }

        Ok(Self {
            name,
            optional,
            raw,
        })
    }
}

/// A simple template that supports variable interpolation.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);

            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "unclosed {{ delimiter".to_string(),
                })?;

            let placeholder = Placeholder::parse(&after_open[..end], &self.name)?;
            match context.get(placeholder.name) {
                Some(value) if placeholder.raw => result.push_str(value),
                Some(value) => result.push_str(&escape_html(value)),
                None if placeholder.optional => {}
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        variable: placeholder.name.to_string(),
                    });
                }
            }

            rest = &after_open[end + 2..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Names of the templates every site needs.
    pub const BUILTIN: [&'static str; 3] = ["post", "index", "post_item"];

    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    /// Register default built-in templates.
    fn register_defaults(&mut self) {
        self.register(Template::new("post", DEFAULT_POST_TEMPLATE));
        self.register(Template::new("index", DEFAULT_INDEX_TEMPLATE));
        self.register(Template::new("post_item", DEFAULT_POST_ITEM_TEMPLATE));
    }

    /// Replace built-in templates with `<name>.html` files found in `dir`.
    ///
    /// Returns the number of templates loaded. A missing directory loads nothing.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no template directory");
            return Ok(0);
        }

        let mut loaded = 0;
        for name in Self::BUILTIN {
            let path = dir.join(format!("{name}.html"));
            if !path.is_file() {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?;
            self.register(Template::new(name, content));
            info!(template = name, path = %path.display(), "loaded template override");
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Register a template.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Escape special HTML characters.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Default post page template.
pub const DEFAULT_POST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} | {{ site_title }}</title>
    <meta name="description" content="{{ description }}">
    <link rel="canonical" href="{{ canonical }}">
    <link rel="alternate" type="application/rss+xml" title="{{ site_title }}" href="{{ rss_url }}">
    <link rel="icon" href="{{ base_url }}assets/favicon.svg" type="image/svg+xml">
    <link rel="stylesheet" href="{{ base_url }}assets/styles.css">
    <meta property="og:type" content="article">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ description }}">
    <meta property="og:url" content="{{ canonical }}">
    <script type="application/ld+json">
{{ jsonld | safe }}
    </script>
</head>
<body>
    <header>
        <nav><a href="{{ base_url }}">{{ site_title }}</a></nav>
        <button id="theme-toggle" type="button" aria-label="Toggle theme">◐</button>
    </header>
    <main>
        <article>
            <h1>{{ title }}</h1>
            <p class="meta"><time datetime="{{ date }}">{{ date }}</time></p>
{{ body | safe }}
        </article>
    </main>
    <footer>
        <a href="{{ rss_url }}">RSS</a>
    </footer>
    <script src="{{ base_url }}assets/toggle.js"></script>
</body>
</html>
"#;

/// Default home page template.
pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description }}">
    <link rel="canonical" href="{{ canonical }}">
    <link rel="alternate" type="application/rss+xml" title="{{ site_title }}" href="{{ rss_url }}">
    <link rel="icon" href="{{ base_url }}assets/favicon.svg" type="image/svg+xml">
    <link rel="stylesheet" href="{{ base_url }}assets/styles.css">
    <script type="application/ld+json">
{{ jsonld | safe }}
    </script>
</head>
<body>
    <header>
        <h1>{{ site_title }}</h1>
        <p>{{ site_description }}</p>
        <button id="theme-toggle" type="button" aria-label="Toggle theme">◐</button>
    </header>
    <main>
        <input id="search" type="search" placeholder="Search posts" data-index="{{ search_index_url }}">
        <ul id="search-results"></ul>
        <ul class="posts">
{{ posts | safe }}
        </ul>
    </main>
    <footer>
        <a href="{{ rss_url }}">RSS</a>
    </footer>
    <script src="{{ base_url }}assets/toggle.js"></script>
    <script src="{{ search_js }}"></script>
</body>
</html>
"#;

/// Default template for one entry of the home page post list.
pub const DEFAULT_POST_ITEM_TEMPLATE: &str = r#"            <li>
                <a href="{{ url }}">{{ title }}</a>
                <time datetime="{{ date }}">{{ date }}</time>
                <p>{{ description }}</p>
            </li>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_values_are_escaped() {
        let template = Template::new("test", "<p>{{ text }}</p>");
        let ctx = TemplateContext::new().with_var("text", r#"<b>"Tom" & 'Jerry'</b>"#);

        assert_eq!(
            template.render(&ctx).unwrap(),
            "<p>&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_safe_filter() {
        let template = Template::new("test", "<div>{{ body | safe }}</div>{{ body|safe }}");
        let ctx = TemplateContext::new().with_var("body", "<p>Hi</p>");

        assert_eq!(
            template.render(&ctx).unwrap(),
            "<div><p>Hi</p></div><p>Hi</p>"
        );
    }

    #[test]
    fn test_unknown_filter() {
        let template = Template::new("test", "{{ body | upper }}");
        let ctx = TemplateContext::new().with_var("body", "x");

        let err = template.render(&ctx).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidSyntax { .. }));
        assert!(err.to_string().contains("upper"));
    }

    #[test]
    fn test_missing_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx);
        assert!(matches!(
            result,
            Err(TemplateError::MissingVariable { ref variable, .. }) if variable == "name"
        ));
    }

    #[test]
    fn test_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");
        let ctx = TemplateContext::new();

        assert_eq!(template.render(&ctx).unwrap(), "Hello!");
    }

    #[test]
    fn test_unclosed_delimiter() {
        let template = Template::new("test", "Hello, {{ name");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert!(matches!(
            template.render(&ctx),
            Err(TemplateError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("test", "{{ a }} {{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "B");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }} B");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = TemplateRegistry::new();

        for name in TemplateRegistry::BUILTIN {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(matches!(
            registry.render("nope", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("post.html"), "<h1>{{ title }}</h1>").unwrap();
        fs::write(dir.path().join("unrelated.html"), "ignored").unwrap();

        let mut registry = TemplateRegistry::new();
        let loaded = registry.load_overrides(dir.path()).unwrap();

        assert_eq!(loaded, 1);
        let ctx = TemplateContext::new().with_var("title", "Custom");
        assert_eq!(registry.render("post", &ctx).unwrap(), "<h1>Custom</h1>");
        assert!(registry.get("unrelated").is_none());
    }

    #[test]
    fn test_load_overrides_missing_dir() {
        let mut registry = TemplateRegistry::new();
        let loaded = registry
            .load_overrides(Path::new("/nonexistent/templates"))
            .unwrap();
        assert_eq!(loaded, 0);
    }

    #[test]
    fn test_context_contains() {
        let ctx = TemplateContext::new().with_var("key", "value");

        assert!(ctx.contains("key"));
        assert!(!ctx.contains("other"));
    }
}
