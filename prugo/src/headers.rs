//! Header map helpers shared by the client and its configuration.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::collections::HashMap;

use crate::{Error, Result};

mod parser;

/// Headers a client carries when the caller does not supply its own map.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Merges client defaults into a per-call override.
///
/// Names only present in `defaults` are copied over with all their values.
/// Names present in both keep the override's values first, followed by the
/// defaults.
pub fn merge(defaults: &HeaderMap, mut overrides: HeaderMap) -> HeaderMap {
    for name in defaults.keys() {
        for value in defaults.get_all(name) {
            overrides.append(name.clone(), value.clone());
        }
    }
    overrides
}

/// Parses a block of `Name: value` lines into a header map.
pub fn parse(block: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for field in parser::parse_block(block) {
        let field = field?;
        let (name, value) = header_pair(field.name, field.value)?;
        headers.append(name, value);
    }
    Ok(headers)
}

pub fn from_map(map: HashMap<String, Vec<String>>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, values) in map {
        for value in values {
            let (name, value) = header_pair(&name, &value)?;
            headers.append(name, value);
        }
    }
    Ok(headers)
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::ConfigError(format!("{} for header name {:?}", e, name)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| Error::ConfigError(format!("{} for header {}", e, name)))?;
    Ok((header_name, header_value))
}
