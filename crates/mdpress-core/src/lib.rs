//! mdpress Core Library
//!
//! Core types, configuration, and error handling for the mdpress static site generator.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod post;
pub mod slug;

pub use config::Config;
pub use error::{CoreError, Result};
pub use frontmatter::{Metadata, parse_frontmatter};
pub use post::{BuildClock, PostRecord};
pub use slug::slugify;
