use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use dosgi::{build_endpoint, parse_descriptors};

use crate::common;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let described =
        parse_descriptors(&data).with_context(|| format!("parse descriptor {}", file.display()))?;
    info!(elements = described.len(), "parsed descriptor file");

    let mut endpoints = Vec::new();
    for element in &described {
        match build_endpoint(element) {
            Ok(built) => {
                for err in built.dropped {
                    warn!(error = %err, "dropped property");
                }
                endpoints.push(built.record);
            }
            Err(err) => warn!(error = %err, "skipping description element"),
        }
    }

    if json {
        let entries: Vec<common::EndpointEntry> = endpoints
            .iter()
            .enumerate()
            .map(|(idx, endpoint)| common::endpoint_entry(idx, endpoint))
            .collect();
        common::print_json(&entries)?;
        return Ok(());
    }

    for (idx, endpoint) in endpoints.iter().enumerate() {
        println!("#{idx} {}", endpoint.interfaces.join(", "));
        if !endpoint.remote_uri.is_empty() {
            println!("    remote-uri: {}", endpoint.remote_uri);
        }
        let mut names: Vec<&String> = endpoint.properties.keys().collect();
        names.sort();
        for name in names {
            println!(
                "    {name} = {}",
                common::format_value(&endpoint.properties[name])
            );
        }
    }

    Ok(())
}
