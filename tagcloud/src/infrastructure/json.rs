// tagcloud/src/infrastructure/json.rs
use std::io::Write;

use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::renderer::{CloudOutput, RenderedTag};
use crate::domain::tag::{TagId, Term};

/// JSON view of one rendered cloud entry
#[derive(Serialize)]
pub struct JsonCloudEntry<'a> {
    pub id: &'a TagId,
    pub name: &'a str,
    pub count: u64,
    pub size: f64,
    pub href: &'a str,
    pub markup: &'a str,
}

impl<'a> JsonCloudEntry<'a> {
    pub fn from_domain(entry: &'a RenderedTag) -> Self {
        Self {
            id: &entry.id,
            name: &entry.name,
            count: entry.count,
            size: entry.size,
            href: &entry.href,
            markup: &entry.markup,
        }
    }
}

/// Structured output becomes an array of entries, joined markup a single string
pub fn cloud_to_json(output: &CloudOutput) -> DomainResult<String> {
    let json = match output {
        CloudOutput::Structured(entries) => {
            let views: Vec<JsonCloudEntry<'_>> =
                entries.iter().map(JsonCloudEntry::from_domain).collect();
            serde_json::to_string_pretty(&views)?
        }
        CloudOutput::Flat(markup) | CloudOutput::List(markup) => {
            serde_json::to_string_pretty(markup)?
        }
    };
    Ok(json)
}

/// Writes to `out` so stdout stays pipeable
pub fn write_cloud_as_json<W: Write>(out: &mut W, output: &CloudOutput) -> DomainResult<()> {
    let json = cloud_to_json(output)?;
    writeln!(out, "{}", json).map_err(DomainError::Io)
}

pub fn write_terms_as_json<W: Write>(out: &mut W, terms: &[Term]) -> DomainResult<()> {
    let json = serde_json::to_string_pretty(terms)?;
    writeln!(out, "{}", json).map_err(DomainError::Io)
}
