//! Paragraph element (w:p)

use crate::document::Run;
use crate::error::Result;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    /// Paragraph properties
    pub properties: Option<ParagraphProperties>,
    /// Paragraph content (runs and hyperlinks)
    pub content: Vec<ParagraphContent>,
}

/// Inline content within a paragraph
#[derive(Clone, Debug)]
pub enum ParagraphContent {
    /// Text run
    Run(Run),
    /// Hyperlink
    Hyperlink(Hyperlink),
}

/// Hyperlink element (w:hyperlink) bound to an external relationship
#[derive(Clone, Debug)]
pub struct Hyperlink {
    /// Relationship ID referencing the target URL
    pub r_id: String,
    /// Content runs
    pub runs: Vec<Run>,
}

/// Paragraph alignment (w:jc)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// The w:jc attribute value; WordprocessingML calls justify "both"
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Bottom border descriptor (w:pBdr/w:bottom)
#[derive(Clone, Debug)]
pub struct BottomBorder {
    /// Border line style (e.g., "single")
    pub style: &'static str,
    /// Line thickness in eighth-points (18 = 2.25pt)
    pub size: u32,
    /// Space from text in points
    pub space: u32,
    /// RGB hex color
    pub color: &'static str,
}

/// Paragraph properties (w:pPr)
#[derive(Clone, Debug, Default)]
pub struct ParagraphProperties {
    /// Named style ID
    pub style: Option<String>,
    /// Alignment
    pub alignment: Option<Alignment>,
    /// Outline level (for headings)
    pub outline_level: Option<u8>,
    /// Spacing after the paragraph, in twentieths of a point
    pub spacing_after: Option<u32>,
    /// Bottom border
    pub bottom_border: Option<BottomBorder>,
}

impl Paragraph {
    /// Create an empty paragraph with the given alignment
    pub fn aligned(alignment: Alignment) -> Self {
        Paragraph {
            properties: Some(ParagraphProperties {
                alignment: Some(alignment),
                ..Default::default()
            }),
            content: Vec::new(),
        }
    }

    /// Add a run to this paragraph
    pub fn add_run(&mut self, run: Run) {
        self.content.push(ParagraphContent::Run(run));
    }

    /// Add a hyperlink to this paragraph
    pub fn add_hyperlink(&mut self, link: Hyperlink) {
        self.content.push(ParagraphContent::Hyperlink(link));
    }

    /// Get all text in this paragraph
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                ParagraphContent::Run(run) => {
                    result.push_str(run.text());
                }
                ParagraphContent::Hyperlink(link) => {
                    for run in &link.runs {
                        result.push_str(run.text());
                    }
                }
            }
        }
        result
    }

    /// Get all plain runs (hyperlink runs excluded)
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| {
            if let ParagraphContent::Run(r) = c {
                Some(r)
            } else {
                None
            }
        })
    }

    /// Get all hyperlinks
    pub fn hyperlinks(&self) -> impl Iterator<Item = &Hyperlink> {
        self.content.iter().filter_map(|c| {
            if let ParagraphContent::Hyperlink(h) = c {
                Some(h)
            } else {
                None
            }
        })
    }

    /// Get the alignment
    pub fn alignment(&self) -> Option<Alignment> {
        self.properties.as_ref()?.alignment
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let start = BytesStart::new("w:p");

        if self.properties.is_none() && self.content.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }

        for content in &self.content {
            content.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:p")))?;

        Ok(())
    }
}

impl ParagraphContent {
    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            ParagraphContent::Run(run) => run.write_to(writer),
            ParagraphContent::Hyperlink(link) => link.write_to(writer),
        }
    }
}

impl Hyperlink {
    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:hyperlink");
        start.push_attribute(("r:id", self.r_id.as_str()));

        if self.runs.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for run in &self.runs {
                run.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:hyperlink")))?;
        }

        Ok(())
    }
}

impl ParagraphProperties {
    /// Write to XML writer.
    ///
    /// Child order follows the CT_PPr schema sequence: pStyle, pBdr,
    /// spacing, jc, outlineLvl.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let has_content = self.style.is_some()
            || self.alignment.is_some()
            || self.outline_level.is_some()
            || self.spacing_after.is_some()
            || self.bottom_border.is_some();

        if !has_content {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        // Style
        if let Some(style) = &self.style {
            let mut elem = BytesStart::new("w:pStyle");
            elem.push_attribute(("w:val", style.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Bottom border
        if let Some(border) = &self.bottom_border {
            writer.write_event(Event::Start(BytesStart::new("w:pBdr")))?;
            let mut bottom = BytesStart::new("w:bottom");
            bottom.push_attribute(("w:val", border.style));
            bottom.push_attribute(("w:sz", border.size.to_string().as_str()));
            bottom.push_attribute(("w:space", border.space.to_string().as_str()));
            bottom.push_attribute(("w:color", border.color));
            writer.write_event(Event::Empty(bottom))?;
            writer.write_event(Event::End(BytesEnd::new("w:pBdr")))?;
        }

        // Spacing
        if let Some(after) = self.spacing_after {
            let mut elem = BytesStart::new("w:spacing");
            elem.push_attribute(("w:after", after.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Alignment
        if let Some(alignment) = self.alignment {
            let mut elem = BytesStart::new("w:jc");
            elem.push_attribute(("w:val", alignment.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Outline level
        if let Some(level) = self.outline_level {
            let mut elem = BytesStart::new("w:outlineLvl");
            elem.push_attribute(("w:val", level.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        Ok(())
    }
}
