//! Package assembly: translate the document model into OPC parts
//!
//! Every call builds the complete package from current in-memory state, so
//! repeated saves with identical state produce identical bytes.

use crate::document::paragraph::ParagraphContent;
use crate::document::section::{Footer, Section};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::opc::{content_types, rel_types, well_known, Package, Part, Relationships, TargetMode};
use crate::xml;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeSet;
use std::io::Cursor;

/// Build the full OPC package for a document.
pub(crate) fn build_package(doc: &Document) -> Result<Package> {
    let section = doc.section();
    verify_hyperlinks(section, doc.hyperlink_rels())?;

    // The document keeps only hyperlink relationships; structural
    // relationships are appended to a snapshot here so repeated saves never
    // accumulate duplicates.
    let mut rels = doc.hyperlink_rels().clone();
    rels.add(rel_types::STYLES, "styles.xml");
    let footer_rel_id = section
        .footer()
        .map(|_| rels.add(rel_types::FOOTER, "footer1.xml"));

    let mut package = Package::new();

    let doc_xml = document_xml(section, footer_rel_id.as_deref())?;
    let mut doc_part = Part::new(
        well_known::document(),
        content_types::MAIN_DOCUMENT,
        doc_xml.into_bytes(),
    );
    doc_part.set_relationships(rels);
    package.add_part(doc_part);

    package.add_part(Part::new(
        well_known::styles(),
        content_types::STYLES,
        styles_xml()?.into_bytes(),
    ));

    if let Some(footer) = section.footer() {
        package.add_part(Part::new(
            well_known::footer(),
            content_types::FOOTER,
            footer_xml(footer)?.into_bytes(),
        ));
    }

    package
        .relationships_mut()
        .add(rel_types::OFFICE_DOCUMENT, "word/document.xml");

    Ok(package)
}

/// Check the cross-part contract: hyperlink ids referenced in the body and
/// hyperlink-typed entries in the relationship table must match one-to-one.
fn verify_hyperlinks(section: &Section, rels: &Relationships) -> Result<()> {
    let mut referenced = BTreeSet::new();

    for para in section.paragraphs() {
        for item in &para.content {
            let link = match item {
                ParagraphContent::Hyperlink(link) => link,
                ParagraphContent::Run(_) => continue,
            };

            if !referenced.insert(link.r_id.as_str()) {
                return Err(Error::InvalidRelationship(format!(
                    "hyperlink id {} referenced more than once",
                    link.r_id
                )));
            }

            match rels.get(&link.r_id) {
                None => {
                    return Err(Error::InvalidRelationship(format!(
                        "hyperlink references unregistered id {}",
                        link.r_id
                    )))
                }
                Some(rel)
                    if rel.rel_type != rel_types::HYPERLINK
                        || rel.target_mode != TargetMode::External =>
                {
                    return Err(Error::InvalidRelationship(format!(
                        "{} is not an external hyperlink relationship",
                        link.r_id
                    )))
                }
                Some(_) => {}
            }
        }
    }

    for rel in rels.iter().filter(|r| r.rel_type == rel_types::HYPERLINK) {
        if !referenced.contains(rel.id.as_str()) {
            return Err(Error::InvalidRelationship(format!(
                "relationship {} ({}) is not referenced by any hyperlink",
                rel.id, rel.target
            )));
        }
    }

    Ok(())
}

/// Serialize the main document part (w:document/w:body)
fn document_xml(section: &Section, footer_rel_id: Option<&str>) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut buffer);

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut doc_start = BytesStart::new("w:document");
    for (attr, value) in xml::document_namespaces() {
        doc_start.push_attribute((attr, value));
    }
    writer.write_event(Event::Start(doc_start))?;

    section.write_to(&mut writer, footer_rel_id)?;

    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    into_string(buffer.into_inner())
}

/// Serialize the footer part (w:ftr)
fn footer_xml(footer: &Footer) -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut buffer);

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut ftr_start = BytesStart::new("w:ftr");
    for (attr, value) in xml::document_namespaces() {
        ftr_start.push_attribute((attr, value));
    }
    writer.write_event(Event::Start(ftr_start))?;

    footer.paragraph.write_to(&mut writer)?;

    writer.write_event(Event::End(BytesEnd::new("w:ftr")))?;

    into_string(buffer.into_inner())
}

/// Serialize the styles part: document defaults plus the named styles the
/// composition API assigns.
fn styles_xml() -> Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut buffer);

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut styles_start = BytesStart::new("w:styles");
    styles_start.push_attribute(("xmlns:w", xml::W));
    writer.write_event(Event::Start(styles_start))?;

    // Document defaults: Times New Roman 12pt
    writer.write_event(Event::Start(BytesStart::new("w:docDefaults")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPrDefault")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    let mut fonts = BytesStart::new("w:rFonts");
    fonts.push_attribute(("w:ascii", "Times New Roman"));
    fonts.push_attribute(("w:hAnsi", "Times New Roman"));
    writer.write_event(Event::Empty(fonts))?;
    let mut sz = BytesStart::new("w:sz");
    sz.push_attribute(("w:val", "24"));
    writer.write_event(Event::Empty(sz))?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:rPrDefault")))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pPrDefault")))?;
    writer.write_event(Event::End(BytesEnd::new("w:docDefaults")))?;

    // Normal
    let mut normal = BytesStart::new("w:style");
    normal.push_attribute(("w:type", "paragraph"));
    normal.push_attribute(("w:default", "1"));
    normal.push_attribute(("w:styleId", "Normal"));
    writer.write_event(Event::Start(normal))?;
    let mut name = BytesStart::new("w:name");
    name.push_attribute(("w:val", "Normal"));
    writer.write_event(Event::Empty(name))?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    // Heading1
    let mut heading = BytesStart::new("w:style");
    heading.push_attribute(("w:type", "paragraph"));
    heading.push_attribute(("w:styleId", "Heading1"));
    writer.write_event(Event::Start(heading))?;
    let mut name = BytesStart::new("w:name");
    name.push_attribute(("w:val", "heading 1"));
    writer.write_event(Event::Empty(name))?;
    let mut based_on = BytesStart::new("w:basedOn");
    based_on.push_attribute(("w:val", "Normal"));
    writer.write_event(Event::Empty(based_on))?;
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    let mut outline = BytesStart::new("w:outlineLvl");
    outline.push_attribute(("w:val", "0"));
    writer.write_event(Event::Empty(outline))?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    writer.write_event(Event::End(BytesEnd::new("w:styles")))?;

    into_string(buffer.into_inner())
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::InvalidDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::paragraph::{Alignment, Hyperlink, Paragraph};
    use crate::document::Run;
    use crate::style::Role;

    fn paragraph_with_link(r_id: &str) -> Paragraph {
        let mut para = Paragraph::aligned(Alignment::Right);
        para.add_hyperlink(Hyperlink {
            r_id: r_id.into(),
            runs: vec![Run::styled("Example", Role::Source.attributes())],
        });
        para
    }

    #[test]
    fn test_verify_accepts_matching_table() {
        let mut section = Section::default();
        let mut rels = Relationships::new();
        let id = rels.add_external(rel_types::HYPERLINK, "https://example.org/x");
        section.add_paragraph(paragraph_with_link(&id));

        assert!(verify_hyperlinks(&section, &rels).is_ok());
    }

    #[test]
    fn test_verify_rejects_dangling_reference() {
        let mut section = Section::default();
        section.add_paragraph(paragraph_with_link("rId9"));

        let err = verify_hyperlinks(&section, &Relationships::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidRelationship(_)));
    }

    #[test]
    fn test_verify_rejects_duplicate_reference() {
        let mut section = Section::default();
        let mut rels = Relationships::new();
        let id = rels.add_external(rel_types::HYPERLINK, "https://example.org/x");
        section.add_paragraph(paragraph_with_link(&id));
        section.add_paragraph(paragraph_with_link(&id));

        let err = verify_hyperlinks(&section, &rels).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_verify_rejects_unreferenced_entry() {
        let mut rels = Relationships::new();
        rels.add_external(rel_types::HYPERLINK, "https://orphan.example");

        let err = verify_hyperlinks(&Section::default(), &rels).unwrap_err();
        assert!(err.to_string().contains("not referenced"));
    }

    #[test]
    fn test_verify_rejects_internal_hyperlink_entry() {
        let mut section = Section::default();
        let mut rels = Relationships::new();
        // Internal-mode entry under a hyperlink reference is a wiring bug
        let id = rels.add(rel_types::HYPERLINK, "https://example.org/x");
        section.add_paragraph(paragraph_with_link(&id));

        assert!(verify_hyperlinks(&section, &rels).is_err());
    }

    #[test]
    fn test_styles_xml_defines_normal_and_heading() {
        let xml = styles_xml().unwrap();
        assert!(xml.contains(r#"w:styleId="Normal""#));
        assert!(xml.contains(r#"w:styleId="Heading1""#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/>"#));
    }

    #[test]
    fn test_document_xml_has_namespaces() {
        let xml = document_xml(&Section::default(), None).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#));
        assert!(xml.contains(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#));
    }
}
