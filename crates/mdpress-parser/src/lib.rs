//! mdpress Parser Library
//!
//! Markdown rendering and plain-text extraction for posts.

pub mod markdown;
pub mod text;

pub use markdown::{MarkdownParser, ParsedContent};
pub use text::{first_line, strip_tags, title_case};
