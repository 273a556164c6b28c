//! Endpoint records assembled from remote-service description elements.
//!
//! A description element advertises one endpoint: the service interfaces it
//! provides, the address it is reachable at, and a bag of typed properties.
//! Property decoding is deliberately lenient. A value that fails to decode
//! drops that property, never the record; only an element without a single
//! resolvable interface is rejected as a whole.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rsd_xml::{DescriptionElement, Dialect, Element};
use thiserror::Error;
use tracing::warn;

/// Property carrying the intents an endpoint advertises.
pub const INTENTS_PROPERTY: &str = "service.intents";

/// Error type produced while converting a description element.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The element provides no service interface at all.
    #[error("no resolvable interface on {0}")]
    UnresolvableInterface(String),
    /// A property value failed to decode under its declared type.
    #[error("property '{name}': cannot decode '{value}' as {type_name}")]
    PropertyType {
        name: String,
        type_name: String,
        value: String,
    },
    /// A property declared a type outside the supported set.
    #[error("property '{name}': unsupported type '{type_name}'")]
    UnsupportedType { name: String, type_name: String },
    /// A property element carries no name attribute.
    #[error("property element without a name attribute")]
    UnnamedProperty,
}

/// Scalar types a property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Long,
    Double,
    Float,
    Int,
    Byte,
    Boolean,
    Short,
}

impl ScalarKind {
    /// Case-insensitive keyword lookup; `int` and `integer` are synonyms.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "string" => Some(ScalarKind::String),
            "long" => Some(ScalarKind::Long),
            "double" => Some(ScalarKind::Double),
            "float" => Some(ScalarKind::Float),
            "int" | "integer" => Some(ScalarKind::Int),
            "byte" => Some(ScalarKind::Byte),
            "boolean" => Some(ScalarKind::Boolean),
            "short" => Some(ScalarKind::Short),
            _ => None,
        }
    }

    /// Decode one textual value.
    ///
    /// Strings are kept verbatim; every other kind trims surrounding
    /// whitespace before parsing.
    fn decode(self, name: &str, type_name: &str, text: &str) -> Result<Scalar, BuildError> {
        let trimmed = text.trim();
        let fail = || BuildError::PropertyType {
            name: name.to_string(),
            type_name: type_name.to_string(),
            value: trimmed.to_string(),
        };
        match self {
            ScalarKind::String => Ok(Scalar::String(text.to_string())),
            ScalarKind::Long => trimmed.parse().map(Scalar::Long).map_err(|_| fail()),
            ScalarKind::Double => trimmed.parse().map(Scalar::Double).map_err(|_| fail()),
            ScalarKind::Float => trimmed.parse().map(Scalar::Float).map_err(|_| fail()),
            ScalarKind::Int => trimmed.parse().map(Scalar::Int).map_err(|_| fail()),
            ScalarKind::Byte => trimmed.parse().map(Scalar::Byte).map_err(|_| fail()),
            ScalarKind::Short => trimmed.parse().map(Scalar::Short).map_err(|_| fail()),
            ScalarKind::Boolean => parse_bool(trimmed).map(Scalar::Boolean).ok_or_else(fail),
        }
    }
}

/// Container types a property may declare; keywords match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    List,
    Set,
}

impl ContainerKind {
    /// Literal keyword lookup, case-sensitive by design of the schema.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "array" => Some(ContainerKind::Array),
            "list" => Some(ContainerKind::List),
            "set" => Some(ContainerKind::Set),
            _ => None,
        }
    }
}

/// One scalar property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    Double(f64),
    Float(f32),
    Boolean(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(value) => f.write_str(value),
            Scalar::Long(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Short(value) => write!(f, "{value}"),
            Scalar::Byte(value) => write!(f, "{value}"),
            Scalar::Double(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// Decoded value of one endpoint property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Single scalar value.
    Scalar(Scalar),
    /// Ordered entries declared as an array.
    Array(Vec<Scalar>),
    /// Ordered entries declared as a list.
    List(Vec<Scalar>),
    /// Distinct entries keyed by their canonical rendering; order is lost.
    Set(HashSet<String>),
    /// Embedded markup stored verbatim.
    Xml(String),
}

impl PropertyValue {
    /// Borrow the value as a plain string when it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }
}

/// One advertised endpoint: interfaces, transport address, typed properties.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    /// Fully qualified interface names in declaration order, without duplicates.
    pub interfaces: Vec<String>,
    /// Address the endpoint is reachable at; empty when the document has none.
    pub remote_uri: String,
    /// Decoded properties keyed by name.
    pub properties: HashMap<String, PropertyValue>,
}

impl EndpointRecord {
    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Intents listed under the `service.intents` property.
    ///
    /// A plain string is split on whitespace; sequence values contribute one
    /// intent per entry.
    pub fn intents(&self) -> Vec<String> {
        match self.properties.get(INTENTS_PROPERTY) {
            Some(PropertyValue::Scalar(scalar)) => scalar
                .to_string()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            Some(PropertyValue::Array(items)) | Some(PropertyValue::List(items)) => {
                items.iter().map(ToString::to_string).collect()
            }
            Some(PropertyValue::Set(items)) => items.iter().cloned().collect(),
            Some(PropertyValue::Xml(_)) | None => Vec::new(),
        }
    }
}

/// Conversion result for one description element.
#[derive(Debug)]
pub struct BuiltEndpoint {
    /// The assembled record.
    pub record: EndpointRecord,
    /// Property level failures skipped while decoding.
    pub dropped: Vec<BuildError>,
}

/// Convert one description element into an endpoint record.
///
/// Both schema generations are handled behind this entry point; the
/// element's dialect selects the converter.
pub fn build_endpoint(description: &DescriptionElement) -> Result<BuiltEndpoint, BuildError> {
    match description.dialect {
        Dialect::ServiceDescriptions => build_service_description(&description.element),
        Dialect::EndpointDescriptions => build_endpoint_description(&description.element),
    }
}

fn build_service_description(element: &Element) -> Result<BuiltEndpoint, BuildError> {
    let mut interfaces = provided_interfaces(element);
    if interfaces.is_empty() {
        // the oldest documents put a single interface on the description itself
        if let Some(interface) = element.attribute("interface") {
            let interface = interface.trim();
            if !interface.is_empty() {
                interfaces.push(interface.to_string());
            }
        }
    }
    if interfaces.is_empty() {
        return Err(BuildError::UnresolvableInterface(element.qualified_name()));
    }
    let (properties, dropped) = decode_properties(element);
    Ok(BuiltEndpoint {
        record: EndpointRecord {
            interfaces,
            remote_uri: String::new(),
            properties,
        },
        dropped,
    })
}

fn build_endpoint_description(element: &Element) -> Result<BuiltEndpoint, BuildError> {
    let interfaces = provided_interfaces(element);
    if interfaces.is_empty() {
        return Err(BuildError::UnresolvableInterface(element.qualified_name()));
    }
    let remote_uri = element
        .attribute("remote-uri")
        .map(|value| value.trim().to_string())
        .unwrap_or_default();
    let (properties, dropped) = decode_properties(element);
    Ok(BuiltEndpoint {
        record: EndpointRecord {
            interfaces,
            remote_uri,
            properties,
        },
        dropped,
    })
}

fn provided_interfaces(element: &Element) -> Vec<String> {
    let mut interfaces: Vec<String> = Vec::new();
    for provide in element.children_named("provide") {
        let Some(interface) = provide.attribute("interface") else {
            continue;
        };
        let interface = interface.trim();
        if interface.is_empty() || interfaces.iter().any(|known| known == interface) {
            continue;
        }
        interfaces.push(interface.to_string());
    }
    interfaces
}

fn decode_properties(element: &Element) -> (HashMap<String, PropertyValue>, Vec<BuildError>) {
    let mut properties = HashMap::new();
    let mut dropped = Vec::new();
    for property in element.children_named("property") {
        let Some(name) = property.attribute("name") else {
            warn!("dropping property element without a name");
            dropped.push(BuildError::UnnamedProperty);
            continue;
        };
        match decode_property(name, property, element) {
            Ok(value) => {
                properties.insert(name.to_string(), value);
            }
            Err(err) => {
                warn!(property = name, error = %err, "dropping undecodable property");
                dropped.push(err);
            }
        }
    }
    (properties, dropped)
}

/// Decode one property element.
///
/// Value sources are checked in a fixed order: a container type wins over
/// everything, an element child makes the value raw markup, then a `value`
/// attribute, then the text content. Markup is serialized under the
/// bindings in scope at its position, so the stored string carries exactly
/// the declarations the document wrote there.
fn decode_property(
    name: &str,
    property: &Element,
    description: &Element,
) -> Result<PropertyValue, BuildError> {
    let declared = property.attribute("type");
    if let Some(container) = declared.and_then(ContainerKind::from_keyword) {
        return decode_container(name, property, container, description);
    }
    if let Some(fragment) = property.first_child_element() {
        return Ok(PropertyValue::Xml(fragment.serialize_within(&[description, property])));
    }
    let kind = scalar_kind(name, declared)?;
    let type_name = declared.unwrap_or("string");
    let text = match property.attribute("value") {
        Some(value) => value.to_string(),
        None => property.text(),
    };
    kind.decode(name, type_name, &text).map(PropertyValue::Scalar)
}

fn decode_container(
    name: &str,
    property: &Element,
    container: ContainerKind,
    description: &Element,
) -> Result<PropertyValue, BuildError> {
    let declared = property.attribute("value-type");
    let kind = scalar_kind(name, declared)?;
    let type_name = declared.unwrap_or("string");
    let mut entries = Vec::new();
    for value in property.children_named("value") {
        if let Some(fragment) = value.first_child_element() {
            entries.push(Scalar::String(
                fragment.serialize_within(&[description, property, value]),
            ));
            continue;
        }
        entries.push(kind.decode(name, type_name, &value.text())?);
    }
    Ok(match container {
        ContainerKind::Array => PropertyValue::Array(entries),
        ContainerKind::List => PropertyValue::List(entries),
        ContainerKind::Set => {
            PropertyValue::Set(entries.iter().map(ToString::to_string).collect())
        }
    })
}

fn scalar_kind(name: &str, declared: Option<&str>) -> Result<ScalarKind, BuildError> {
    match declared {
        None => Ok(ScalarKind::String),
        Some(keyword) => {
            ScalarKind::from_keyword(keyword).ok_or_else(|| BuildError::UnsupportedType {
                name: name.to_string(),
                type_name: keyword.to_string(),
            })
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
