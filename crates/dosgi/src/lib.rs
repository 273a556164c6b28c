//! Remote service discovery over deployment units.
//!
//! A deployment unit is anything that can list named descriptor resources
//! and answer manifest headers; [`DirUnit`] backs one with a directory
//! tree. [`discover_endpoints`] flattens every descriptor file of a unit
//! into endpoint records, collecting per-file and per-element failures
//! instead of aborting the pass.
//!
//! ```rust,no_run
//! use dosgi::{discover_endpoints, DirUnit};
//!
//! # fn run() -> std::io::Result<()> {
//! let unit = DirUnit::open("./my-bundle")?;
//! let report = discover_endpoints(&unit);
//! for endpoint in &report.endpoints {
//!     println!("{} -> {}", endpoint.interfaces.join(", "), endpoint.remote_uri);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

pub use rsd_core as endpoint;
pub use rsd_xml as xml;

pub use rsd_core::{
    build_endpoint, BuildError, BuiltEndpoint, EndpointRecord, PropertyValue, Scalar,
    INTENTS_PROPERTY,
};
pub use rsd_xml::{canonicalize, parse_descriptors, DescriptionElement, Dialect, Element, XmlError};

/// Well-known descriptor locations and headers.
pub mod consts {
    /// Directory scanned for descriptor files when no header overrides it.
    pub const DESCRIPTOR_PATH: &str = "OSGI-INF/remote-service";
    /// Pattern matched against entry names in the descriptor directory.
    pub const DESCRIPTOR_PATTERN: &str = "*.xml";
    /// Unit header naming an alternate descriptor directory.
    pub const REMOTE_SERVICE_HEADER: &str = "Remote-Service";
    /// Resource parsed for unit headers.
    pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
}

/// Error type produced by a discovery pass. None of these abort the pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The descriptor file could not be parsed and was skipped.
    #[error("malformed descriptor {entry}: {source}")]
    MalformedDescriptor { entry: String, source: XmlError },
    /// A description element could not be converted, or lost a property.
    #[error("invalid description in {entry}: {source}")]
    Endpoint { entry: String, source: BuildError },
    /// Listing or reading unit entries failed.
    #[error("reading {location}: {source}")]
    Io { location: String, source: io::Error },
}

/// One named descriptor resource inside a deployment unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorEntry {
    /// Entry name, unique within the unit.
    pub name: String,
    /// Raw bytes of the resource.
    pub data: Vec<u8>,
}

/// Access to the descriptor resources and metadata of a deployment unit.
pub trait DeploymentUnit {
    /// List the entries under `path` whose names match `pattern`, reading
    /// each one to completion. A missing directory is an empty listing.
    fn find_entries(&self, path: &str, pattern: &str) -> io::Result<Vec<DescriptorEntry>>;

    /// Value of a unit manifest header, if present.
    fn header(&self, name: &str) -> Option<String>;
}

/// Deployment unit backed by a directory tree.
#[derive(Debug)]
pub struct DirUnit {
    root: PathBuf,
    headers: HashMap<String, String>,
}

impl DirUnit {
    /// Open a unit rooted at `root`, reading headers from its manifest when
    /// one exists.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unit root {} is not a directory", root.display()),
            ));
        }
        let manifest = root.join(consts::MANIFEST_PATH);
        let headers = match fs::read_to_string(&manifest) {
            Ok(text) => parse_manifest(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err),
        };
        Ok(DirUnit { root, headers })
    }

    /// Root directory of the unit.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DeploymentUnit for DirUnit {
    fn find_entries(&self, path: &str, pattern: &str) -> io::Result<Vec<DescriptorEntry>> {
        let dir = self.root.join(path);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if wildcard_match(pattern, name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        let mut found = Vec::new();
        for name in names {
            let data = fs::read(dir.join(&name))?;
            found.push(DescriptorEntry {
                name: format!("{path}/{name}"),
                data,
            });
        }
        Ok(found)
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).cloned()
    }
}

/// Outcome of a discovery pass over one deployment unit.
#[derive(Debug)]
pub struct DiscoveryReport {
    /// Endpoint records recovered from the unit, in descriptor order.
    pub endpoints: Vec<EndpointRecord>,
    /// Non-fatal failures encountered along the way.
    pub errors: Vec<DiscoveryError>,
}

/// Directory queried for descriptor files, honoring the `Remote-Service`
/// header override. A trailing slash on the header is dropped.
pub fn descriptor_location(unit: &dyn DeploymentUnit) -> String {
    match unit.header(consts::REMOTE_SERVICE_HEADER) {
        Some(header) => {
            let location = header.trim();
            let location = location.strip_suffix('/').unwrap_or(location);
            location.to_string()
        }
        None => consts::DESCRIPTOR_PATH.to_string(),
    }
}

/// Gather the description elements from every descriptor file of the unit.
///
/// Files keep the listing order of the unit and elements keep document
/// order, so the flattened sequence is stable. A malformed file contributes
/// an error and is skipped; the remaining files still contribute elements.
pub fn collect_description_elements(
    unit: &dyn DeploymentUnit,
) -> (Vec<DescriptionElement>, Vec<DiscoveryError>) {
    let (described, errors) = parse_unit(unit);
    let elements = described.into_iter().map(|(_, element)| element).collect();
    (elements, errors)
}

/// Convert every description element of the unit into endpoint records.
///
/// The pass never fails as a whole: records that could be recovered are
/// returned together with the failures that were skipped on the way.
pub fn discover_endpoints(unit: &dyn DeploymentUnit) -> DiscoveryReport {
    let (described, mut errors) = parse_unit(unit);
    let mut endpoints = Vec::new();
    for (entry, element) in described {
        match build_endpoint(&element) {
            Ok(built) => {
                for err in built.dropped {
                    errors.push(DiscoveryError::Endpoint {
                        entry: entry.clone(),
                        source: err,
                    });
                }
                endpoints.push(built.record);
            }
            Err(err) => {
                warn!(entry = %entry, error = %err, "skipping description element");
                errors.push(DiscoveryError::Endpoint { entry, source: err });
            }
        }
    }
    info!(
        endpoints = endpoints.len(),
        errors = errors.len(),
        "discovery pass complete"
    );
    DiscoveryReport { endpoints, errors }
}

fn parse_unit(
    unit: &dyn DeploymentUnit,
) -> (Vec<(String, DescriptionElement)>, Vec<DiscoveryError>) {
    let location = descriptor_location(unit);
    let mut described = Vec::new();
    let mut errors = Vec::new();
    let entries = match unit.find_entries(&location, consts::DESCRIPTOR_PATTERN) {
        Ok(entries) => entries,
        Err(err) => {
            errors.push(DiscoveryError::Io {
                location,
                source: err,
            });
            return (described, errors);
        }
    };
    debug!(location = %location, files = entries.len(), "scanning descriptor files");
    for entry in entries {
        match parse_descriptors(&entry.data) {
            Ok(found) => {
                debug!(entry = %entry.name, elements = found.len(), "parsed descriptor file");
                for element in found {
                    described.push((entry.name.clone(), element));
                }
            }
            Err(err) => {
                warn!(entry = %entry.name, error = %err, "skipping malformed descriptor");
                errors.push(DiscoveryError::MalformedDescriptor {
                    entry: entry.name,
                    source: err,
                });
            }
        }
    }
    (described, errors)
}

/// Match an entry name against a pattern where `*` spans any run of
/// characters and everything else is literal.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == name;
    }
    let mut segments = pattern.split('*').peekable();
    let mut rest = name;
    if let Some(first) = segments.next() {
        if !rest.starts_with(first) {
            return false;
        }
        rest = &rest[first.len()..];
    }
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return segment.is_empty() || rest.ends_with(segment);
        }
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }
    true
}

/// Parse the main section of a manifest, folding continuation lines.
fn parse_manifest(text: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    let mut current: Option<(String, String)> = None;
    for line in text.lines() {
        if line.is_empty() {
            // the main attributes section ends at the first blank line
            break;
        }
        if let Some(folded) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(folded);
            }
            continue;
        }
        if let Some((name, value)) = current.take() {
            headers.insert(name, value);
        }
        if let Some((name, value)) = line.split_once(':') {
            current = Some((name.trim().to_string(), value.trim_start().to_string()));
        }
    }
    if let Some((name, value)) = current.take() {
        headers.insert(name, value);
    }
    headers
}
