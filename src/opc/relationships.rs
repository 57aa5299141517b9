//! Relationships handling for OPC packages
//!
//! Generates `.rels` files. Relationships are kept in insertion order and
//! identifiers are assigned as an incrementing `rId` sequence, so the same
//! registration sequence always serializes to the same bytes.

use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Collection of relationships
#[derive(Clone, Debug)]
pub struct Relationships {
    /// Relationships in insertion order
    items: Vec<Relationship>,
    /// Next auto-generated ID number
    next_id: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1, // Start from 1, not 0
        }
    }
}

/// A single relationship
#[derive(Clone, Debug)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path or external URL
    pub target: String,
    /// Target mode
    pub target_mode: TargetMode,
}

/// Target mode for relationships
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetMode {
    /// Internal target (part within the package)
    #[default]
    Internal,
    /// External target (hyperlink, etc.)
    External,
}

impl Relationships {
    /// Create empty relationships
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to XML string
    pub fn to_xml(&self) -> String {
        let mut buf = Vec::new();
        self.write_to(&mut buf).expect("write to Vec should not fail");
        String::from_utf8(buf).expect("XML should be valid UTF-8")
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);

        // XML declaration
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        // Relationships element
        let mut rels_elem = BytesStart::new("Relationships");
        rels_elem.push_attribute(("xmlns", NS_RELATIONSHIPS));
        xml.write_event(Event::Start(rels_elem))?;

        // Relationship elements
        for rel in &self.items {
            let mut rel_elem = BytesStart::new("Relationship");
            rel_elem.push_attribute(("Id", rel.id.as_str()));
            rel_elem.push_attribute(("Type", rel.rel_type.as_str()));
            rel_elem.push_attribute(("Target", rel.target.as_str()));

            if rel.target_mode == TargetMode::External {
                rel_elem.push_attribute(("TargetMode", "External"));
            }

            xml.write_event(Event::Empty(rel_elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Relationships")))?;

        Ok(())
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Get a relationship by type (returns first match)
    pub fn by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type == rel_type)
    }

    /// Add an internal relationship (auto-generates ID)
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::Internal)
    }

    /// Add an external relationship (auto-generates ID)
    pub fn add_external(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::External)
    }

    /// Iterate over all relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, rel_type: &str, target: &str, mode: TargetMode) -> String {
        let id = self.generate_id();
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: mode,
        });
        id
    }

    /// Generate a new unique ID
    fn generate_id(&mut self) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;
        id
    }
}

// Namespace
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

// Well-known relationship types
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auto_id() {
        let mut rels = Relationships::new();
        let id1 = rels.add(rel_types::STYLES, "styles.xml");
        let id2 = rels.add_external(rel_types::HYPERLINK, "https://example.com");

        assert_eq!(id1, "rId1");
        assert_eq!(id2, "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_ids_never_recycled() {
        let mut rels = Relationships::new();
        rels.add_external(rel_types::HYPERLINK, "https://a.example");
        rels.add_external(rel_types::HYPERLINK, "https://b.example");
        let id3 = rels.add(rel_types::FOOTER, "footer1.xml");
        assert_eq!(id3, "rId3");
    }

    #[test]
    fn test_get_by_id() {
        let mut rels = Relationships::new();
        let id = rels.add_external(rel_types::HYPERLINK, "https://example.com");

        let rel = rels.get(&id).unwrap();
        assert_eq!(rel.target, "https://example.com");
        assert_eq!(rel.target_mode, TargetMode::External);
        assert!(rels.get("rId99").is_none());
    }

    #[test]
    fn test_external_flag_in_xml() {
        let mut rels = Relationships::new();
        rels.add(rel_types::STYLES, "styles.xml");
        rels.add_external(rel_types::HYPERLINK, "https://example.com");

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#));
        assert!(xml.contains(r#"Target="https://example.com" TargetMode="External"/>"#));
    }

    #[test]
    fn test_by_type() {
        let mut rels = Relationships::new();
        rels.add(rel_types::STYLES, "styles.xml");
        rels.add(rel_types::FOOTER, "footer1.xml");

        assert_eq!(rels.by_type(rel_types::FOOTER).unwrap().target, "footer1.xml");
        assert!(rels.by_type(rel_types::HYPERLINK).is_none());
    }

    #[test]
    fn test_xml_preserves_insertion_order() {
        let mut rels = Relationships::new();
        rels.add_external(rel_types::HYPERLINK, "https://z.example");
        rels.add_external(rel_types::HYPERLINK, "https://a.example");

        let xml = rels.to_xml();
        let z = xml.find("https://z.example").unwrap();
        let a = xml.find("https://a.example").unwrap();
        assert!(z < a, "entries must serialize in registration order");
    }

    #[test]
    fn test_url_passed_through_unvalidated() {
        let mut rels = Relationships::new();
        let id = rels.add_external(rel_types::HYPERLINK, "not a url at all");
        assert_eq!(rels.get(&id).unwrap().target, "not a url at all");
    }
}
