//! Section state: paragraphs, page margins, footer

use crate::document::Paragraph;
use crate::error::Result;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

// US Letter, in twentieths of a point
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
// Header/footer distance from the page edge
const EDGE_DISTANCE: u32 = 720;

/// Page margins in inches
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        // Top/Bottom 1", Left/Right 0.75"
        Self {
            top: 1.0,
            bottom: 1.0,
            left: 0.75,
            right: 0.75,
        }
    }
}

/// Convert inches to twentieths of a point
fn twips(inches: f64) -> i64 {
    (inches * 1440.0).round() as i64
}

/// Footer content for a section
#[derive(Clone, Debug)]
pub struct Footer {
    /// The single footer paragraph
    pub paragraph: Paragraph,
}

/// A document section: ordered paragraphs plus page-level state
#[derive(Clone, Debug, Default)]
pub struct Section {
    paragraphs: Vec<Paragraph>,
    margins: Margins,
    footer: Option<Footer>,
}

impl Section {
    /// Add a paragraph at the end of the section
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.paragraphs.push(para);
    }

    /// Get all paragraphs in order
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Get all paragraphs mutably
    pub(crate) fn paragraphs_mut(&mut self) -> &mut Vec<Paragraph> {
        &mut self.paragraphs
    }

    /// Overwrite the section margins (inches)
    pub fn set_margins(&mut self, top: f64, bottom: f64, left: f64, right: f64) {
        self.margins = Margins {
            top,
            bottom,
            left,
            right,
        };
    }

    /// Get the section margins
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Install or replace the section footer
    pub fn set_footer(&mut self, footer: Footer) {
        self.footer = Some(footer);
    }

    /// Get the section footer
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Write the w:body element: paragraphs followed by section properties.
    ///
    /// `footer_rel_id` is the relationship id of the footer part when one is
    /// being emitted; the serializer allocates it.
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        footer_rel_id: Option<&str>,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;

        for para in &self.paragraphs {
            para.write_to(writer)?;
        }

        self.write_section_properties(writer, footer_rel_id)?;

        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        Ok(())
    }

    /// Write w:sectPr.
    ///
    /// Child order follows the CT_SectPr schema sequence: footerReference,
    /// pgSz, pgMar.
    fn write_section_properties<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        footer_rel_id: Option<&str>,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

        if let Some(r_id) = footer_rel_id {
            let mut footer_ref = BytesStart::new("w:footerReference");
            footer_ref.push_attribute(("w:type", "default"));
            footer_ref.push_attribute(("r:id", r_id));
            writer.write_event(Event::Empty(footer_ref))?;
        }

        let mut pg_sz = BytesStart::new("w:pgSz");
        pg_sz.push_attribute(("w:w", PAGE_WIDTH.to_string().as_str()));
        pg_sz.push_attribute(("w:h", PAGE_HEIGHT.to_string().as_str()));
        writer.write_event(Event::Empty(pg_sz))?;

        let mut pg_mar = BytesStart::new("w:pgMar");
        pg_mar.push_attribute(("w:top", twips(self.margins.top).to_string().as_str()));
        pg_mar.push_attribute(("w:right", twips(self.margins.right).to_string().as_str()));
        pg_mar.push_attribute(("w:bottom", twips(self.margins.bottom).to_string().as_str()));
        pg_mar.push_attribute(("w:left", twips(self.margins.left).to_string().as_str()));
        pg_mar.push_attribute(("w:header", EDGE_DISTANCE.to_string().as_str()));
        pg_mar.push_attribute(("w:footer", EDGE_DISTANCE.to_string().as_str()));
        pg_mar.push_attribute(("w:gutter", "0"));
        writer.write_event(Event::Empty(pg_mar))?;

        writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn body_xml(section: &Section, footer_rel_id: Option<&str>) -> String {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new(&mut buffer);
        section.write_to(&mut writer, footer_rel_id).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_default_margins() {
        let section = Section::default();
        let xml = body_xml(&section, None);
        assert!(xml.contains(
            r#"<w:pgMar w:top="1440" w:right="1080" w:bottom="1440" w:left="1080" w:header="720" w:footer="720" w:gutter="0"/>"#
        ));
    }

    #[test]
    fn test_custom_margins_in_twips() {
        let mut section = Section::default();
        section.set_margins(2.0, 2.0, 1.0, 1.0);

        let xml = body_xml(&section, None);
        assert!(xml.contains(
            r#"<w:pgMar w:top="2880" w:right="1440" w:bottom="2880" w:left="1440""#
        ));
    }

    #[test]
    fn test_letter_page_size() {
        let xml = body_xml(&Section::default(), None);
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    }

    #[test]
    fn test_footer_reference_only_when_id_given() {
        let section = Section::default();

        let without = body_xml(&section, None);
        assert!(!without.contains("w:footerReference"));

        let with = body_xml(&section, Some("rId7"));
        assert!(with.contains(r#"<w:footerReference w:type="default" r:id="rId7"/>"#));
        // Reference precedes page geometry per the schema
        assert!(with.find("w:footerReference").unwrap() < with.find("w:pgSz").unwrap());
    }

    #[test]
    fn test_replacing_footer_keeps_one() {
        let mut section = Section::default();
        section.set_footer(Footer {
            paragraph: Paragraph::default(),
        });
        section.set_footer(Footer {
            paragraph: Paragraph::default(),
        });
        assert!(section.footer().is_some());
    }
}
