use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::error::Error;

/// One monitored endpoint, as declared in the configuration file.
///
/// Immutable after load; the whole list lives for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    /// Display label for log lines. Falls back to the URL when absent.
    pub name: Option<String>,
    pub url: String,
    /// HTTP method, matched case-insensitively. Defaults to GET.
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_owned()
}

impl Endpoint {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Loads the endpoint list from a YAML file.
///
/// The top-level value must be a non-empty sequence of endpoint mappings;
/// anything else is a configuration error and the monitor never starts.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Endpoint>, Error> {
    let content = fs::read_to_string(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content)?;

    if !value.is_sequence() {
        return Err(Error::Config(
            "expected a list of endpoint definitions".to_owned(),
        ));
    }

    let endpoints: Vec<Endpoint> = serde_yaml::from_value(value)?;
    if endpoints.is_empty() {
        return Err(Error::Config(
            "expected at least one endpoint definition".to_owned(),
        ));
    }

    Ok(endpoints)
}
