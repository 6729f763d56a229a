use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

use crate::{headers, Result};

/// Client settings in a form that can be loaded with serde.
///
/// A zero `timeout_ms` and a missing `headers` entry fall back to the same
/// defaults as [`HttpClient::new`](crate::HttpClient::new).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Option<HeaderSource>,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderSource {
    /// Raw `Name: value` lines.
    Block(String),
    Map(HashMap<String, Vec<String>>),
}

impl HeaderSource {
    pub fn into_header_map(self) -> Result<HeaderMap> {
        match self {
            HeaderSource::Block(block) => headers::parse(&block),
            HeaderSource::Map(map) => headers::from_map(map),
        }
    }
}
