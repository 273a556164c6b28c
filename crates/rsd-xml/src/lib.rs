//! Parse remote-service descriptor XML using quick-xml.
//!
//! Descriptor documents come in two schema generations. This crate turns a
//! raw byte stream into the description elements a document declares,
//! keeping text content and attribute order exactly as written so embedded
//! markup can be reproduced verbatim later.

use std::fmt::Write as _;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

/// Namespace URIs recognized by the descriptor reader.
pub mod ns {
    /// Legacy service-description documents.
    pub const SERVICE_DESCRIPTIONS_1_0: &str = "http://www.osgi.org/xmlns/sd/v1.0.0";
    /// Revised edition of the legacy schema.
    pub const SERVICE_DESCRIPTIONS_1_1: &str = "http://www.osgi.org/xmlns/sd/v1.1.0";
    /// Endpoint description documents.
    pub const ENDPOINT_DESCRIPTIONS_1_0: &str = "http://www.osgi.org/xmlns/rsa/v1.0.0";
}

/// Error type produced while reading descriptor markup.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well formed and was skipped.
    #[error("malformed descriptor: {0}")]
    Malformed(String),
    /// The input is not valid UTF-8.
    #[error("encoding: {0}")]
    Encoding(String),
}

/// Schema generation a descriptor document was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Legacy `service-descriptions` documents.
    ServiceDescriptions,
    /// Current `endpoint-descriptions` documents.
    EndpointDescriptions,
}

impl Dialect {
    /// Look up the dialect declared by a namespace URI.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        match uri {
            ns::SERVICE_DESCRIPTIONS_1_0 | ns::SERVICE_DESCRIPTIONS_1_1 => {
                Some(Dialect::ServiceDescriptions)
            }
            ns::ENDPOINT_DESCRIPTIONS_1_0 => Some(Dialect::EndpointDescriptions),
            _ => None,
        }
    }

    /// Local name of the description elements under this dialect.
    pub fn description_name(&self) -> &'static str {
        match self {
            Dialect::ServiceDescriptions => "service-description",
            Dialect::EndpointDescriptions => "endpoint-description",
        }
    }
}

/// Attribute as written in the document, namespace declarations included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Child content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

/// Lightweight element node built from the event stream.
///
/// Text is stored verbatim; adjacent text and CDATA segments are merged
/// into one segment. Comments, processing instructions, and the prolog do
/// not survive parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Prefix part of the qualified name, if any.
    pub prefix: Option<String>,
    /// Local part of the qualified name.
    pub local: String,
    /// Namespace URI the element resolved to, if any.
    pub namespace: Option<String>,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child elements and text segments in document order.
    pub children: Vec<Content>,
}

impl Element {
    /// Qualified name as written in the document.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }

    /// Value of the attribute with the given name, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Child elements with the given local name, any namespace.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |child| child.local == local)
    }

    /// First child element, if any.
    pub fn first_child_element(&self) -> Option<&Element> {
        self.child_elements().next()
    }

    /// Concatenated text content of the element, verbatim.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Content::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialize the element back to markup.
    ///
    /// Attributes keep document order and text stays verbatim. A namespace
    /// binding declared on an ancestor outside this element is re-declared
    /// here so the fragment stays self contained.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let mut scopes = Vec::new();
        self.write_markup(&mut out, &mut scopes);
        out
    }

    /// Serialize the element as it sat inside a larger document.
    ///
    /// `enclosing` lists the ancestor elements above this one, outermost
    /// first. Bindings they declare count as in scope and are never
    /// re-declared, so the output reproduces exactly the markup that was
    /// written at the element's position.
    pub fn serialize_within(&self, enclosing: &[&Element]) -> String {
        let mut out = String::new();
        let mut scopes: Vec<Vec<(String, String)>> = enclosing
            .iter()
            .map(|element| declarations(&element.attributes))
            .collect();
        self.write_markup(&mut out, &mut scopes);
        out
    }

    fn write_markup(&self, out: &mut String, scopes: &mut Vec<Vec<(String, String)>>) {
        let mut frame = declarations(&self.attributes);
        out.push('<');
        out.push_str(&self.qualified_name());
        let key = self.prefix.clone().unwrap_or_default();
        let bound = lookup_binding(scopes, &frame, &key);
        if bound.as_deref() != self.namespace.as_deref() {
            let uri = self.namespace.clone().unwrap_or_default();
            if key.is_empty() {
                let _ = write!(out, " xmlns=\"{}\"", escape(&uri));
            } else {
                let _ = write!(out, " xmlns:{key}=\"{}\"", escape(&uri));
            }
            frame.push((key, uri));
        }
        for attr in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", attr.name, escape(&attr.value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        scopes.push(frame);
        for child in &self.children {
            match child {
                Content::Element(element) => element.write_markup(out, scopes),
                Content::Text(text) => out.push_str(&partial_escape(text)),
            }
        }
        scopes.pop();
        out.push_str("</");
        out.push_str(&self.qualified_name());
        out.push('>');
    }
}

/// One top-level description node recognized in a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionElement {
    /// Schema generation the node was recognized under.
    pub dialect: Dialect,
    /// The underlying element tree.
    pub element: Element,
}

/// Parse a descriptor document and collect its description elements.
///
/// Top-level children outside the recognized namespaces are skipped, so
/// documents mixing in newer vocabularies still yield the nodes this reader
/// understands. Elements preserve document order. Namespace declarations on
/// the document root are folded onto each description element, so the
/// detached elements keep the bindings that were in scope around them.
pub fn parse_descriptors(data: &[u8]) -> Result<Vec<DescriptionElement>, XmlError> {
    let text = std::str::from_utf8(data).map_err(|err| XmlError::Encoding(err.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root = parse_element(text)?;
    let inherited = declarations(&root.attributes);
    let mut descriptions = Vec::new();
    for child in root.children {
        let Content::Element(mut element) = child else {
            continue;
        };
        let dialect = element
            .namespace
            .as_deref()
            .and_then(Dialect::from_namespace);
        match dialect {
            Some(dialect) if element.local == dialect.description_name() => {
                adopt_bindings(&mut element, &inherited);
                descriptions.push(DescriptionElement { dialect, element });
            }
            _ => {
                debug!(element = %element.qualified_name(), "skipping unrecognized element");
            }
        }
    }
    debug!(count = descriptions.len(), "collected description elements");
    Ok(descriptions)
}

/// Parse a standalone XML fragment into its root element.
pub fn parse_element(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut scopes = ScopeStack::default();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(event)) => {
                let element = open_element(&event, &mut scopes)?;
                stack.push(element);
            }
            Ok(Event::Empty(event)) => {
                let element = open_element(&event, &mut scopes)?;
                scopes.pop();
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unbalanced end tag".into()))?;
                scopes.pop();
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(event)) => {
                let text = event
                    .unescape()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                append_text(&mut stack, &text)?;
            }
            Ok(Event::CData(event)) => {
                let bytes = event.into_inner();
                let text = utf8(&bytes)?.to_string();
                append_text(&mut stack, &text)?;
            }
            Ok(Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(XmlError::Malformed(err.to_string())),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed("unclosed element".into()));
    }
    root.ok_or_else(|| XmlError::Malformed("missing document element".into()))
}

/// Reduce markup to a canonical form for structural comparison.
///
/// Attributes are sorted by name, insignificant whitespace is dropped, and
/// text is trimmed, so two fragments compare equal exactly when their
/// element structure does. Decoded values never go through this form; it
/// exists for comparison only.
pub fn canonicalize(xml: &str) -> Result<String, XmlError> {
    let root = parse_element(xml)?;
    let mut out = String::new();
    write_canonical(&root, 0, &mut out);
    Ok(out)
}

fn write_canonical(element: &Element, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.qualified_name());
    let mut attributes: Vec<&Attribute> = element.attributes.iter().collect();
    attributes.sort_by(|a, b| a.name.cmp(&b.name));
    for attr in attributes {
        let _ = write!(out, " {}=\"{}\"", attr.name, escape(&attr.value));
    }
    let meaningful: Vec<&Content> = element
        .children
        .iter()
        .filter(|child| match child {
            Content::Element(_) => true,
            Content::Text(text) => !text.trim().is_empty(),
        })
        .collect();
    if meaningful.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for child in meaningful {
        match child {
            Content::Element(nested) => write_canonical(nested, depth + 1, out),
            Content::Text(text) => {
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(&partial_escape(text.trim()));
                out.push('\n');
            }
        }
    }
    out.push_str(&indent);
    out.push_str("</");
    out.push_str(&element.qualified_name());
    out.push_str(">\n");
}

fn open_element(event: &BytesStart<'_>, scopes: &mut ScopeStack) -> Result<Element, XmlError> {
    let mut attributes = Vec::new();
    for attr in event.attributes() {
        let attr = attr.map_err(|err| XmlError::Malformed(err.to_string()))?;
        let name = utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Malformed(err.to_string()))?
            .into_owned();
        attributes.push(Attribute { name, value });
    }
    scopes.push(declarations(&attributes));
    let (local, prefix) = event.name().decompose();
    let local = utf8(local.as_ref())?.to_string();
    let prefix = match prefix {
        Some(prefix) => Some(utf8(prefix.as_ref())?.to_string()),
        None => None,
    };
    let namespace = scopes.resolve(prefix.as_deref());
    Ok(Element {
        prefix,
        local,
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Content::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed("multiple document elements".into()));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            if let Some(Content::Text(existing)) = parent.children.last_mut() {
                existing.push_str(text);
            } else {
                parent.children.push(Content::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::Malformed("text outside the document element".into())),
    }
}

fn adopt_bindings(element: &mut Element, inherited: &[(String, String)]) {
    for (prefix, uri) in inherited {
        if uri.is_empty() {
            continue;
        }
        let name = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{prefix}")
        };
        // a declaration the element carries itself wins
        if element.attribute(&name).is_some() {
            continue;
        }
        element.attributes.push(Attribute {
            name,
            value: uri.clone(),
        });
    }
}

fn declarations(attributes: &[Attribute]) -> Vec<(String, String)> {
    let mut declared = Vec::new();
    for attr in attributes {
        if attr.name == "xmlns" {
            declared.push((String::new(), attr.value.clone()));
        } else if let Some(prefix) = attr.name.strip_prefix("xmlns:") {
            declared.push((prefix.to_string(), attr.value.clone()));
        }
    }
    declared
}

fn lookup_binding(
    scopes: &[Vec<(String, String)>],
    frame: &[(String, String)],
    key: &str,
) -> Option<String> {
    for (name, uri) in frame.iter().rev() {
        if name == key {
            return non_empty(uri);
        }
    }
    for scope in scopes.iter().rev() {
        for (name, uri) in scope.iter().rev() {
            if name == key {
                return non_empty(uri);
            }
        }
    }
    None
}

fn non_empty(uri: &str) -> Option<String> {
    if uri.is_empty() {
        None
    } else {
        Some(uri.to_string())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(bytes).map_err(|err| XmlError::Encoding(err.to_string()))
}

#[derive(Default)]
struct ScopeStack {
    frames: Vec<Vec<(String, String)>>,
}

impl ScopeStack {
    fn push(&mut self, declared: Vec<(String, String)>) {
        self.frames.push(declared);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn resolve(&self, prefix: Option<&str>) -> Option<String> {
        let key = prefix.unwrap_or_default();
        for frame in self.frames.iter().rev() {
            for (name, uri) in frame.iter().rev() {
                if name == key {
                    return non_empty(uri);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<service-descriptions xmlns="http://www.osgi.org/xmlns/sd/v1.0.0">
    <!-- registered by the provider bundle -->
    <service-description>
        <provide interface="org.example.SomeService" />
        <property name="testKey">testValue</property>
    </service-description>
</service-descriptions>
"#;

    const ENDPOINT_DOC: &str = r#"<endpoint-descriptions xmlns="http://www.osgi.org/xmlns/rsa/v1.0.0">
    <endpoint-description remote-uri="http://localhost:9090/greeter">
        <provide interface="org.example.GreeterService" />
    </endpoint-description>
    <endpoint-description remote-uri="http://localhost:9090/echo">
        <provide interface="org.example.EchoService" />
    </endpoint-description>
</endpoint-descriptions>
"#;

    #[test]
    fn collects_legacy_description_elements() {
        let found = parse_descriptors(LEGACY_DOC.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dialect, Dialect::ServiceDescriptions);
        assert_eq!(found[0].element.local, "service-description");
        assert_eq!(
            found[0].element.namespace.as_deref(),
            Some(ns::SERVICE_DESCRIPTIONS_1_0)
        );
    }

    #[test]
    fn collects_endpoint_description_elements_in_order() {
        let found = parse_descriptors(ENDPOINT_DOC.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].dialect, Dialect::EndpointDescriptions);
        assert_eq!(
            found[0].element.attribute("remote-uri"),
            Some("http://localhost:9090/greeter")
        );
        assert_eq!(
            found[1].element.attribute("remote-uri"),
            Some("http://localhost:9090/echo")
        );
    }

    #[test]
    fn revised_legacy_namespace_is_recognized() {
        let xml = r#"<service-descriptions xmlns="http://www.osgi.org/xmlns/sd/v1.1.0">
            <service-description><provide interface="a.B" /></service-description>
        </service-descriptions>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dialect, Dialect::ServiceDescriptions);
    }

    #[test]
    fn skips_foreign_top_level_elements() {
        let xml = r#"<service-descriptions xmlns="http://www.osgi.org/xmlns/sd/v1.0.0">
            <service-description><provide interface="a.B" /></service-description>
            <extra xmlns="http://www.example.org/xmlns/future/v2.0.0">ignored</extra>
        </service-descriptions>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn unknown_namespace_yields_nothing() {
        let xml = r#"<things xmlns="http://www.example.org/unrelated">
            <thing name="a" />
        </things>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        assert!(found.is_empty());
    }

    #[test]
    fn prefixed_documents_resolve_namespaces() {
        let xml = r#"<sd:service-descriptions xmlns:sd="http://www.osgi.org/xmlns/sd/v1.0.0">
            <sd:service-description><provide interface="a.B" /></sd:service-description>
        </sd:service-descriptions>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].element.prefix.as_deref(), Some("sd"));
        assert_eq!(
            found[0].element.namespace.as_deref(),
            Some(ns::SERVICE_DESCRIPTIONS_1_0)
        );
    }

    #[test]
    fn descriptions_adopt_document_level_bindings() {
        let xml = r#"<endpoint-descriptions xmlns="http://www.osgi.org/xmlns/rsa/v1.0.0"
                xmlns:other="http://www.acme.org/xmlns/other/v1.0.0">
            <endpoint-description remote-uri="x:1">
                <provide interface="a.B" />
            </endpoint-description>
        </endpoint-descriptions>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].element.attribute("xmlns"),
            Some(ns::ENDPOINT_DESCRIPTIONS_1_0)
        );
        assert_eq!(
            found[0].element.attribute("xmlns:other"),
            Some("http://www.acme.org/xmlns/other/v1.0.0")
        );
    }

    #[test]
    fn adopted_bindings_never_shadow_local_ones() {
        let xml = r#"<endpoint-descriptions xmlns="http://www.osgi.org/xmlns/rsa/v1.0.0"
                xmlns:other="http://www.acme.org/xmlns/other/v1.0.0">
            <endpoint-description remote-uri="x:1"
                    xmlns:other="http://www.acme.org/xmlns/other/v2.0.0">
                <provide interface="a.B" />
            </endpoint-description>
        </endpoint-descriptions>"#;
        let found = parse_descriptors(xml.as_bytes()).expect("parse descriptor");
        let declared: Vec<&Attribute> = found[0]
            .element
            .attributes
            .iter()
            .filter(|attr| attr.name == "xmlns:other")
            .collect();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].value, "http://www.acme.org/xmlns/other/v2.0.0");
    }

    #[test]
    fn malformed_markup_is_rejected() {
        let err = parse_descriptors(b"<service-descriptions><oops></service-descriptions>")
            .expect_err("mismatched tags");
        assert!(matches!(err, XmlError::Malformed(_)));

        let err = parse_descriptors(b"   ").expect_err("empty document");
        assert!(matches!(err, XmlError::Malformed(_)));
    }

    #[test]
    fn non_utf8_input_is_rejected() {
        let err = parse_descriptors(&[0xff, 0xfe, 0x3c, 0x61, 0x2f, 0x3e]).expect_err("bad bytes");
        assert!(matches!(err, XmlError::Encoding(_)));
    }

    #[test]
    fn text_is_stored_verbatim() {
        let element = parse_element("<p>\n    first\n    second\n</p>").expect("parse fragment");
        assert_eq!(element.text(), "\n    first\n    second\n");
    }

    #[test]
    fn cdata_merges_into_adjacent_text() {
        let element = parse_element("<p>a<![CDATA[<b>]]>c</p>").expect("parse fragment");
        assert_eq!(element.text(), "a<b>c");
        assert_eq!(element.children.len(), 1);
    }

    #[test]
    fn serialize_keeps_attribute_order_and_text() {
        let element =
            parse_element(r#"<foo type="bar" extra="1">ha&amp;ha</foo>"#).expect("parse fragment");
        assert_eq!(
            element.serialize(),
            r#"<foo type="bar" extra="1">ha&amp;ha</foo>"#
        );
    }

    #[test]
    fn serialize_redeclares_inherited_bindings() {
        let root = parse_element(
            r#"<root xmlns:other="http://www.acme.org/xmlns/other/v1.0.0"><other:t2/></root>"#,
        )
        .expect("parse fragment");
        let fragment = root.first_child_element().expect("child element");
        assert_eq!(
            fragment.serialize(),
            r#"<other:t2 xmlns:other="http://www.acme.org/xmlns/other/v1.0.0"/>"#
        );

        let root = parse_element(r#"<root xmlns="http://www.acme.org/d"><leaf/></root>"#)
            .expect("parse fragment");
        let fragment = root.first_child_element().expect("child element");
        assert_eq!(fragment.serialize(), r#"<leaf xmlns="http://www.acme.org/d"/>"#);
    }

    #[test]
    fn serialize_within_keeps_enclosing_bindings_implicit() {
        let root = parse_element(
            r#"<root xmlns="http://www.acme.org/d"><wrap><leaf keep="1"/></wrap></root>"#,
        )
        .expect("parse fragment");
        let wrap = root.first_child_element().expect("wrap element");
        let leaf = wrap.first_child_element().expect("leaf element");
        assert_eq!(leaf.serialize_within(&[&root, wrap]), r#"<leaf keep="1"/>"#);
        assert_eq!(
            leaf.serialize(),
            r#"<leaf xmlns="http://www.acme.org/d" keep="1"/>"#
        );
    }

    #[test]
    fn serialize_within_still_declares_fragment_local_bindings() {
        let root = parse_element(
            r#"<root xmlns="http://www.acme.org/d">
                <t1 xmlns:other="http://www.acme.org/xmlns/other/v1.0.0"><other:leaf/></t1>
            </root>"#,
        )
        .expect("parse fragment");
        let fragment = root.first_child_element().expect("t1 element");
        assert_eq!(
            fragment.serialize_within(&[&root]),
            r#"<t1 xmlns:other="http://www.acme.org/xmlns/other/v1.0.0"><other:leaf/></t1>"#
        );
    }

    #[test]
    fn canonical_form_ignores_layout_differences() {
        let a = canonicalize(
            "<?xml version=\"1.0\"?>\n<!-- lead -->\n<t1 b='2' a='1'>\n  <foo type='bar'>haha</foo>\n</t1>",
        )
        .expect("canonicalize");
        let b = canonicalize(r#"<t1 a="1" b="2"><foo type="bar">  haha  </foo></t1>"#)
            .expect("canonicalize");
        assert_eq!(a, b);

        let c = canonicalize(r#"<t1 a="1" b="2"><foo type="bar">hoho</foo></t1>"#)
            .expect("canonicalize");
        assert_ne!(a, c);
    }
}
