use std::env;
use std::error::Error;

use dosgi::endpoint::PropertyValue;
use dosgi::{discover_endpoints, DirUnit};

fn main() -> Result<(), Box<dyn Error>> {
    let root = env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let unit = DirUnit::open(&root)?;
    let report = discover_endpoints(&unit);

    for err in &report.errors {
        eprintln!("warning: {err}");
    }
    if report.endpoints.is_empty() {
        println!("No remote service descriptions found under {root}.");
        return Ok(());
    }

    for (index, endpoint) in report.endpoints.iter().enumerate() {
        println!("#{index} {}", endpoint.interfaces.join(", "));
        if !endpoint.remote_uri.is_empty() {
            println!("    remote-uri: {}", endpoint.remote_uri);
        }
        let mut names: Vec<&String> = endpoint.properties.keys().collect();
        names.sort();
        for name in names {
            match &endpoint.properties[name] {
                PropertyValue::Xml(fragment) => {
                    println!("    {name} = <{} bytes of markup>", fragment.len())
                }
                value => println!("    {name} = {value:?}"),
            }
        }
    }
    Ok(())
}
