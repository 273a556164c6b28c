use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use dosgi::{EndpointRecord, PropertyValue};

#[derive(Serialize)]
pub struct EndpointEntry {
    pub index: usize,
    pub interfaces: Vec<String>,
    pub remote_uri: String,
    pub properties: BTreeMap<String, String>,
}

pub fn endpoint_entry(index: usize, endpoint: &EndpointRecord) -> EndpointEntry {
    EndpointEntry {
        index,
        interfaces: endpoint.interfaces.clone(),
        remote_uri: endpoint.remote_uri.clone(),
        properties: endpoint
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), format_value(value)))
            .collect(),
    }
}

pub fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Scalar(scalar) => scalar.to_string(),
        PropertyValue::Array(items) | PropertyValue::List(items) => {
            let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
            format!("[{}]", rendered.join(", "))
        }
        PropertyValue::Set(items) => {
            let mut rendered: Vec<&str> = items.iter().map(String::as_str).collect();
            rendered.sort_unstable();
            format!("{{{}}}", rendered.join(", "))
        }
        PropertyValue::Xml(markup) => markup.clone(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}
