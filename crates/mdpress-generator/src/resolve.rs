//! Field resolution for posts.
//!
//! Each post field is resolved by a [`FallbackChain`]: an ordered list of
//! providers where the first one producing a non-blank value wins.

use mdpress_core::{
    Metadata,
    post::{DESCRIPTION_LIMIT, truncate_chars},
    slugify,
};
use mdpress_parser::{first_line, title_case};
use tracing::trace;

/// Everything a provider may look at.
#[derive(Debug, Clone, Copy)]
pub struct FieldSource<'a> {
    /// Front matter of the document.
    pub metadata: &'a Metadata,

    /// File name without extension.
    pub stem: &'a str,

    /// Markdown body without front matter.
    pub body: &'a str,

    /// Build date as `YYYY-MM-DD`.
    pub build_date: &'a str,

    /// Resolved title, once known.
    pub title: Option<&'a str>,
}

/// A provider returns a candidate value or nothing.
pub type Provider = fn(&FieldSource<'_>) -> Option<String>;

/// A resolved value and the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The value.
    pub value: String,

    /// Name of the winning provider, `"none"` if every provider came up empty.
    pub provider: &'static str,
}

/// Ordered first-match-wins list of providers for one field.
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain {
    field: &'static str,
    providers: &'static [(&'static str, Provider)],
}

impl FallbackChain {
    /// Create a chain.
    #[must_use]
    pub const fn new(field: &'static str, providers: &'static [(&'static str, Provider)]) -> Self {
        Self { field, providers }
    }

    /// Field name.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Provider names in evaluation order.
    pub fn provider_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|(name, _)| *name)
    }

    /// Evaluate providers in order and return the first non-blank value.
    pub fn resolve(&self, source: &FieldSource<'_>) -> Resolution {
        for &(name, provider) in self.providers {
            if let Some(value) = provider(source).filter(|v| !v.trim().is_empty()) {
                trace!(field = self.field, provider = name, "resolved field");
                return Resolution {
                    value,
                    provider: name,
                };
            }
        }

        Resolution {
            value: String::new(),
            provider: "none",
        }
    }
}

fn meta_title(source: &FieldSource<'_>) -> Option<String> {
    source.metadata.title().map(str::to_string)
}

fn title_from_stem(source: &FieldSource<'_>) -> Option<String> {
    Some(title_case(&source.stem.replace('-', " ")))
}

fn untitled(_: &FieldSource<'_>) -> Option<String> {
    Some("Untitled".to_string())
}

fn meta_description(source: &FieldSource<'_>) -> Option<String> {
    source.metadata.description().map(str::to_string)
}

fn first_body_line(source: &FieldSource<'_>) -> Option<String> {
    Some(truncate_chars(first_line(source.body), DESCRIPTION_LIMIT).to_string())
}

fn meta_date(source: &FieldSource<'_>) -> Option<String> {
    source.metadata.date().map(str::to_string)
}

fn build_date(source: &FieldSource<'_>) -> Option<String> {
    Some(source.build_date.to_string())
}

fn meta_slug(source: &FieldSource<'_>) -> Option<String> {
    source.metadata.slug().map(str::to_string)
}

fn stem(source: &FieldSource<'_>) -> Option<String> {
    Some(source.stem.to_string())
}

fn resolved_title(source: &FieldSource<'_>) -> Option<String> {
    source.title.map(str::to_string)
}

/// Title: front matter, then the title-cased file name.
pub const TITLE: FallbackChain = FallbackChain::new(
    "title",
    &[
        ("front_matter", meta_title),
        ("file_name", title_from_stem),
        ("untitled", untitled),
    ],
);

/// Description: front matter, then the first body line cut to 160 characters.
pub const DESCRIPTION: FallbackChain = FallbackChain::new(
    "description",
    &[
        ("front_matter", meta_description),
        ("first_line", first_body_line),
    ],
);

/// Date: front matter, then the build date.
pub const DATE: FallbackChain = FallbackChain::new(
    "date",
    &[("front_matter", meta_date), ("build_date", build_date)],
);

/// Slug source text: front matter slug, then the file name, then the title.
pub const SLUG: FallbackChain = FallbackChain::new(
    "slug",
    &[
        ("front_matter", meta_slug),
        ("file_name", stem),
        ("title", resolved_title),
    ],
);

/// All resolved fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFields {
    pub title: String,
    pub description: String,
    pub date: String,
    pub slug: String,
}

/// Resolve every field. The slug chain sees the resolved title.
pub fn resolve_fields(source: &FieldSource<'_>) -> ResolvedFields {
    let title = TITLE.resolve(source).value;
    let description = DESCRIPTION.resolve(source).value;
    let date = DATE.resolve(source).value;

    let with_title = FieldSource {
        title: Some(&title),
        ..*source
    };
    let slug = slugify(&SLUG.resolve(&with_title).value);

    ResolvedFields {
        title,
        description,
        date,
        slug,
    }
}
