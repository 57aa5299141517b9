//! Document model - high-level composition API

mod elements;
mod paragraph;
mod run;
mod section;
mod serialize;

pub use elements::GENERATOR;
pub use paragraph::{
    Alignment, BottomBorder, Hyperlink, Paragraph, ParagraphContent, ParagraphProperties,
};
pub use run::{Run, RunProperties};
pub use section::{Footer, Margins, Section};

use crate::error::Result;
use crate::opc::{rel_types, Relationships};
use crate::style::Role;
use std::path::Path;

// Spacing after the title paragraph, in twentieths of a point (6pt)
const TITLE_SPACING_AFTER: u32 = 120;

/// A DOCX document under composition
///
/// Mutation operations append styled content to the single section; `save`
/// serializes the whole model from scratch, so a document may be saved
/// repeatedly as it grows.
#[derive(Debug, Default)]
pub struct Document {
    /// Content and page state
    section: Section,
    /// External hyperlink relationships for the document part
    rels: Relationships,
    /// Most recent title text, reused by the footer
    title: String,
}

impl Document {
    /// Create a new empty document with default margins
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the section margins (inches).
    ///
    /// Values are expected positive; nothing is enforced and negative input
    /// passes straight through to the output.
    pub fn set_margins(&mut self, top: f64, bottom: f64, left: f64, right: f64) {
        log::debug!("margins set: top={top}\" bottom={bottom}\" left={left}\" right={right}\"");
        self.section.set_margins(top, bottom, left, right);
    }

    /// Add a centered, bold title followed by a full-width underline rule.
    ///
    /// The text is also stored as the document title for later footer use;
    /// only the most recent title is retained.
    pub fn add_title(&mut self, text: impl Into<String>) -> &mut Paragraph {
        let text = text.into();
        self.title = text.clone();

        let mut para = Paragraph::aligned(Alignment::Center);
        para.properties
            .as_mut()
            .expect("aligned paragraph has properties")
            .spacing_after = Some(TITLE_SPACING_AFTER);
        para.add_run(Run::styled(text, Role::Title.attributes()));

        self.section.add_paragraph(para);
        self.section.add_paragraph(elements::rule_paragraph());

        let title_index = self.section.paragraphs().len() - 2;
        &mut self.section.paragraphs_mut()[title_index]
    }

    /// Add a justified section heading.
    ///
    /// Headings are never bold, so the weight is forced off explicitly
    /// rather than left to the named style.
    pub fn add_heading(&mut self, text: impl Into<String>) -> &mut Paragraph {
        let mut para = Paragraph::aligned(Alignment::Justify);
        {
            let props = para
                .properties
                .as_mut()
                .expect("aligned paragraph has properties");
            props.style = Some("Heading1".into());
            props.outline_level = Some(0);
        }

        let mut run = Run::styled(text, Role::Heading.attributes());
        run.set_bold(false);
        para.add_run(run);

        self.push_paragraph(para)
    }

    /// Add a justified body paragraph
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        let mut para = Paragraph::aligned(Alignment::Justify);
        para.add_run(Run::styled(text, Role::Body.attributes()));
        self.push_paragraph(para)
    }

    /// Add a right-aligned source citation rendering as
    /// `(dates, short_label)` where the label is a working hyperlink to
    /// `full_url`.
    pub fn add_source(&mut self, dates: &str, full_url: &str, short_label: &str) -> &mut Paragraph {
        let attrs = Role::Source.attributes();
        let r_id = self.rels.add_external(rel_types::HYPERLINK, full_url);
        log::debug!("registered hyperlink {r_id} -> {full_url}");

        let mut para = Paragraph::aligned(Alignment::Right);
        para.add_run(Run::styled("(", attrs));
        para.add_run(Run::styled(dates, attrs));
        para.add_run(Run::styled(", ", attrs));
        para.add_hyperlink(elements::hyperlink(short_label, r_id, attrs));
        para.add_run(Run::styled(")", attrs));

        self.push_paragraph(para)
    }

    /// Install or replace the section footer.
    ///
    /// The footer names the stored title; with no title yet added the text
    /// is the copyright notice alone.
    pub fn add_footer(&mut self) -> &Footer {
        self.section.set_footer(elements::footer_paragraph(&self.title));
        self.section.footer().expect("footer just installed")
    }

    /// Serialize the document and write it to a file.
    ///
    /// Missing parent directories are created; an existing file at `path`
    /// is replaced atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let package = serialize::build_package(self)?;
        package.save(path.as_ref())?;
        log::info!("document saved: {}", path.as_ref().display());
        Ok(())
    }

    /// Serialize the document to package bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize::build_package(self)?.to_bytes()
    }

    /// Get the stored title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the section
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Get all paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.section.paragraphs().iter()
    }

    /// Get paragraph count
    pub fn paragraph_count(&self) -> usize {
        self.section.paragraphs().len()
    }

    /// Get all text in the document
    pub fn text(&self) -> String {
        self.section
            .paragraphs()
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The hyperlink relationship table (serializer input)
    pub(crate) fn hyperlink_rels(&self) -> &Relationships {
        &self.rels
    }

    fn push_paragraph(&mut self, para: Paragraph) -> &mut Paragraph {
        self.section.add_paragraph(para);
        self.section
            .paragraphs_mut()
            .last_mut()
            .expect("paragraph just added")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_title_stores_text_and_appends_rule() {
        let mut doc = Document::new();
        doc.add_title("Annual Report");

        assert_eq!(doc.title(), "Annual Report");
        // Title paragraph plus the underline rule
        assert_eq!(doc.paragraph_count(), 2);

        let title = &doc.section().paragraphs()[0];
        assert_eq!(title.alignment(), Some(Alignment::Center));
        assert!(title.runs().next().unwrap().bold());

        let rule = &doc.section().paragraphs()[1];
        assert!(rule.properties.as_ref().unwrap().bottom_border.is_some());
        assert!(rule.content.is_empty());
    }

    #[test]
    fn test_latest_title_wins() {
        let mut doc = Document::new();
        doc.add_title("First");
        doc.add_title("Second");
        assert_eq!(doc.title(), "Second");
    }

    #[test]
    fn test_heading_is_justified_and_not_bold() {
        let mut doc = Document::new();
        doc.add_heading("Background");

        let para = &doc.section().paragraphs()[0];
        assert_eq!(para.alignment(), Some(Alignment::Justify));
        assert_eq!(para.properties.as_ref().unwrap().style.as_deref(), Some("Heading1"));

        let run = para.runs().next().unwrap();
        assert!(!run.bold());
        assert_eq!(run.font_size_pt(), Some(18.0));
    }

    #[test]
    fn test_source_paragraph_layout() {
        let mut doc = Document::new();
        doc.add_source("2020-2021", "https://example.org/x", "Example");

        let para = &doc.section().paragraphs()[0];
        assert_eq!(para.text(), "(2020-2021, Example)");
        assert_eq!(para.alignment(), Some(Alignment::Right));

        let link = para.hyperlinks().next().unwrap();
        assert_eq!(link.r_id, "rId1");
        assert_eq!(link.runs[0].underline(), Some("single"));

        let rel = doc.hyperlink_rels().get("rId1").unwrap();
        assert_eq!(rel.target, "https://example.org/x");
    }

    #[test]
    fn test_each_source_gets_fresh_id() {
        let mut doc = Document::new();
        doc.add_source("2020", "https://a.example", "A");
        doc.add_source("2021", "https://b.example", "B");

        let ids: Vec<_> = doc
            .paragraphs()
            .flat_map(|p| p.hyperlinks())
            .map(|h| h.r_id.clone())
            .collect();
        assert_eq!(ids, vec!["rId1", "rId2"]);
        assert_eq!(doc.hyperlink_rels().len(), 2);
    }

    #[test]
    fn test_footer_uses_stored_title() {
        let mut doc = Document::new();
        doc.add_title("Report");
        let footer = doc.add_footer();

        assert!(footer.paragraph.text().starts_with("Report"));
    }

    #[test]
    fn test_footer_without_title_is_not_an_error() {
        let mut doc = Document::new();
        let footer = doc.add_footer();

        assert!(footer.paragraph.text().starts_with("(c)"));
    }

    #[test]
    fn test_footer_replaced_not_duplicated() {
        let mut doc = Document::new();
        doc.add_footer();
        doc.add_title("Report");
        doc.add_footer();

        let footer = doc.section().footer().unwrap();
        assert!(footer.paragraph.text().starts_with("Report"));
    }

    #[test]
    fn test_default_margins_match_editor_defaults() {
        let doc = Document::new();
        let margins = doc.section().margins();
        assert_eq!(margins.top, 1.0);
        assert_eq!(margins.bottom, 1.0);
        assert_eq!(margins.left, 0.75);
        assert_eq!(margins.right, 0.75);
    }
}
