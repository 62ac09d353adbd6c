//! Reverse image search results extraction.
//!
//! The results page carries its matches in an inline script of the form
//! `AF_initDataCallback({... data: [...] ...});`. The script is evaluated with
//! the literal-only evaluator in [`crate::parsers::script`] and the resulting
//! payload is read through a [`ReverseImageSchema`]. The payload layout is
//! undocumented and changes without notice, so extraction is best effort:
//! anything that does not fit the schema is logged and skipped.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use thiserror::Error;

use crate::parsers::{script, selector};
use crate::results::ReverseImageMatch;

/// Callback that wraps the inline data payloads
pub const CALLBACK_MARKER: &str = "AF_initDataCallback";

/// Only payloads referencing thumbnails from this host carry matches
pub const THUMBNAIL_HOST_MARKER: &str = "https://encrypted-tbn";

static NONCE_SCRIPT: LazyLock<Selector> = LazyLock::new(|| selector("script[nonce]"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("payload has no match list at {0}")]
    MissingMatches(&'static str),

    #[error("match has no `{field}` at {pointer}")]
    MissingField {
        field: &'static str,
        pointer: &'static str,
    },

    #[error("match field `{field}` is not a string")]
    NotAString { field: &'static str },
}

/// JSON pointer paths into the evaluated payload
#[derive(Debug, Clone, Copy)]
pub struct ReverseImageSchema {
    pub version: &'static str,
    /// Path from the payload root to the array of matches
    pub match_list: &'static str,
    /// Paths below are relative to a single match
    pub title: &'static str,
    pub source_url: &'static str,
    pub domain_name: &'static str,
    pub image_url: &'static str,
    pub icon_url: &'static str,
}

/// Layout observed on the lens results page
pub const LENS_SCHEMA: ReverseImageSchema = ReverseImageSchema {
    version: "lens-v1",
    match_list: "/data/1/0/1/8/8/0/12",
    title: "/3",
    source_url: "/5",
    domain_name: "/14",
    image_url: "/0/0",
    icon_url: "/15/0",
};

impl ReverseImageSchema {
    /// The list of raw matches in a payload
    pub fn matches<'v>(&self, payload: &'v Value) -> Result<&'v [Value], SchemaError> {
        payload
            .pointer(self.match_list)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or(SchemaError::MissingMatches(self.match_list))
    }

    /// Decode one raw match; fails if any field is missing
    pub fn decode_match(&self, item: &Value) -> Result<ReverseImageMatch, SchemaError> {
        Ok(ReverseImageMatch {
            title: string_at(item, "title", self.title)?,
            source_url: string_at(item, "source_url", self.source_url)?,
            domain_name: string_at(item, "domain_name", self.domain_name)?,
            image_url: string_at(item, "image_url", self.image_url)?,
            icon_url: string_at(item, "icon_url", self.icon_url)?,
        })
    }
}

fn string_at(
    item: &Value,
    field: &'static str,
    pointer: &'static str,
) -> Result<String, SchemaError> {
    match item.pointer(pointer) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(SchemaError::MissingField { field, pointer }),
        Some(_) => Err(SchemaError::NotAString { field }),
    }
}

/// Parses a reverse image results page with the current schema
pub fn parse(html: &str) -> Vec<ReverseImageMatch> {
    parse_with_schema(html, &LENS_SCHEMA)
}

/// Parses a reverse image results page with the given schema
pub fn parse_with_schema(html: &str, schema: &ReverseImageSchema) -> Vec<ReverseImageMatch> {
    let mut out = Vec::new();
    for source in data_scripts(html) {
        match script::evaluate_call(&source, CALLBACK_MARKER) {
            Ok(payload) => out.extend(matches_from_payload(&payload, schema)),
            Err(e) => ::log::debug!("Skipping data script: {}", e),
        }
    }
    ::log::debug!(
        "Reverse image extractor found {} matches (schema {})",
        out.len(),
        schema.version
    );
    out
}

/// Texts of the nonce-carrying scripts that hold match payloads
pub fn data_scripts(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&NONCE_SCRIPT)
        .map(|el| el.text().collect::<String>())
        .filter(|text| {
            text.trim_start().starts_with(CALLBACK_MARKER) && text.contains(THUMBNAIL_HOST_MARKER)
        })
        .collect()
}

/// Decodes every well-formed match in a payload, skipping the rest
pub fn matches_from_payload(payload: &Value, schema: &ReverseImageSchema) -> Vec<ReverseImageMatch> {
    let items = match schema.matches(payload) {
        Ok(items) => items,
        Err(e) => {
            ::log::debug!("{}", e);
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match schema.decode_match(item) {
            Ok(m) => Some(m),
            Err(e) => {
                ::log::debug!("Skipping match {}: {}", i, e);
                None
            }
        })
        .collect()
}
