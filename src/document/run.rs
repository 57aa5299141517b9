//! Run element (w:r) - a contiguous run of text with uniform formatting

use crate::error::Result;
use crate::style::StyleAttributes;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Run element (w:r)
///
/// Style attributes are fully resolved when the run is created; nothing is
/// left for a consumer application to infer from document defaults.
#[derive(Clone, Debug, Default)]
pub struct Run {
    /// Run properties
    pub properties: Option<RunProperties>,
    /// Text content
    pub text: String,
}

/// Run properties (w:rPr)
#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    /// Bold
    pub bold: Option<bool>,
    /// Underline type (e.g., "single")
    pub underline: Option<String>,
    /// Font size (in half-points, e.g., 24 = 12pt)
    pub size: Option<u32>,
    /// Color (RGB hex)
    pub color: Option<String>,
    /// Font family
    pub font: Option<String>,
}

impl Run {
    /// Create a new run with text and no explicit formatting
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            properties: None,
            text: text.into(),
        }
    }

    /// Create a run with attributes resolved from the style catalog
    pub fn styled(text: impl Into<String>, attrs: StyleAttributes) -> Self {
        Run {
            properties: Some(RunProperties::from_attributes(attrs)),
            text: text.into(),
        }
    }

    /// Get the run text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if bold
    pub fn bold(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.bold).unwrap_or(false)
    }

    /// Get font size in points (None if not specified)
    pub fn font_size_pt(&self) -> Option<f32> {
        self.properties.as_ref()?.size.map(|s| s as f32 / 2.0)
    }

    /// Get color (RGB hex string)
    pub fn color(&self) -> Option<&str> {
        self.properties.as_ref()?.color.as_deref()
    }

    /// Get underline type
    pub fn underline(&self) -> Option<&str> {
        self.properties.as_ref()?.underline.as_deref()
    }

    /// Set bold
    pub fn set_bold(&mut self, bold: bool) {
        self.properties.get_or_insert_with(Default::default).bold = Some(bold);
    }

    /// Set underline type
    pub fn set_underline(&mut self, underline: impl Into<String>) {
        self.properties.get_or_insert_with(Default::default).underline = Some(underline.into());
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let start = BytesStart::new("w:r");

        if self.properties.is_none() && self.text.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }

        let mut text_elem = BytesStart::new("w:t");
        // Preserve space if text has leading/trailing whitespace
        if self.text.starts_with(' ') || self.text.ends_with(' ') || self.text.contains("  ") {
            text_elem.push_attribute(("xml:space", "preserve"));
        }
        writer.write_event(Event::Start(text_elem))?;
        writer.write_event(Event::Text(BytesText::new(&self.text)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;

        writer.write_event(Event::End(BytesEnd::new("w:r")))?;

        Ok(())
    }
}

impl RunProperties {
    /// Build properties from resolved catalog attributes
    pub fn from_attributes(attrs: StyleAttributes) -> Self {
        RunProperties {
            bold: attrs.bold.then_some(true),
            underline: attrs.underline.then(|| "single".to_string()),
            size: Some(attrs.size),
            color: Some(attrs.color.to_string()),
            font: Some(attrs.font.to_string()),
        }
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let has_content = self.bold.is_some()
            || self.underline.is_some()
            || self.size.is_some()
            || self.color.is_some()
            || self.font.is_some();

        if !has_content {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

        // Fonts
        if let Some(font) = &self.font {
            let mut elem = BytesStart::new("w:rFonts");
            elem.push_attribute(("w:ascii", font.as_str()));
            elem.push_attribute(("w:hAnsi", font.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Bold
        if let Some(bold) = self.bold {
            let mut elem = BytesStart::new("w:b");
            if !bold {
                elem.push_attribute(("w:val", "0"));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        // Underline
        if let Some(underline) = &self.underline {
            let mut elem = BytesStart::new("w:u");
            elem.push_attribute(("w:val", underline.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Color
        if let Some(color) = &self.color {
            let mut elem = BytesStart::new("w:color");
            elem.push_attribute(("w:val", color.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        // Size
        if let Some(size) = self.size {
            let mut elem = BytesStart::new("w:sz");
            elem.push_attribute(("w:val", size.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        Ok(())
    }
}
