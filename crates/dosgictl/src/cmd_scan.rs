use std::path::Path;

use anyhow::{Context, Result};

use dosgi::{discover_endpoints, DirUnit};

use crate::common;

pub fn run(root: &Path, properties: bool, json: bool) -> Result<()> {
    let unit = DirUnit::open(root)
        .with_context(|| format!("open deployment unit at {}", root.display()))?;
    let report = discover_endpoints(&unit);

    if json {
        let entries: Vec<common::EndpointEntry> = report
            .endpoints
            .iter()
            .enumerate()
            .map(|(idx, endpoint)| common::endpoint_entry(idx, endpoint))
            .collect();
        common::print_json(&entries)?;
        return Ok(());
    }

    if report.endpoints.is_empty() {
        println!(
            "No endpoint descriptions found under {}.",
            unit.root().display()
        );
        return Ok(());
    }

    println!("{:<6} {:<44} {}", "INDEX", "Interfaces", "Remote URI");
    for (idx, endpoint) in report.endpoints.iter().enumerate() {
        println!(
            "{idx:<6} {:<44} {}",
            endpoint.interfaces.join(", "),
            if endpoint.remote_uri.is_empty() {
                "-"
            } else {
                endpoint.remote_uri.as_str()
            },
        );
        if properties {
            let mut names: Vec<&String> = endpoint.properties.keys().collect();
            names.sort();
            for name in names {
                println!(
                    "       {name} = {}",
                    common::format_value(&endpoint.properties[name])
                );
            }
        }
    }
    if !report.errors.is_empty() {
        println!("{} descriptor issue(s) skipped.", report.errors.len());
    }

    Ok(())
}
