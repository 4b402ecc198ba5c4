//! Source list parsing: one identifier per row, taken from the first field.
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// A remotely hosted image and the local name derived from its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub identifier: String,
    pub local_name: String,
}

impl SourceRef {
    /// Derive the local name as the segment between the first and second
    /// occurrence of `delimiter` (the rest of the identifier when there is
    /// only one). An identifier without the delimiter, or with nothing after
    /// it, is malformed.
    ///
    /// `http://dcmny.org/islandora/object/nyhs%3A826` with `%` gives `3A826`.
    pub fn parse(identifier: &str, delimiter: char) -> Result<Self> {
        let local_name = identifier
            .split(delimiter)
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| Error::MalformedIdentifier {
                identifier: identifier.to_string(),
                delimiter,
            })?;

        Ok(SourceRef {
            identifier: identifier.to_string(),
            local_name: local_name.to_string(),
        })
    }

    pub fn retrieval_url(&self, suffix: &str) -> String {
        format!("{}{}", self.identifier, suffix)
    }
}

/// First comma-separated field of every non-blank row, trimmed and unquoted.
pub fn parse_source_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim_start_matches('\u{feff}');
            let first = line.split(',').next().unwrap_or_default().trim();
            let first = first
                .strip_prefix('"')
                .and_then(|f| f.strip_suffix('"'))
                .unwrap_or(first);
            (!first.is_empty()).then(|| first.to_string())
        })
        .collect()
}

pub fn read_source_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_source_list(&text))
}
