//! Style catalog: fixed formatting attributes per content role
//!
//! Every run in a composed document is styled through exactly one role, so
//! formatting rules live here instead of being re-derived at each call site.

/// Content role for a piece of document text.
///
/// The set is closed; requesting attributes for a role can never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Document title
    Title,
    /// Section heading
    Heading,
    /// Body paragraph text
    Body,
    /// Source citation text
    Source,
    /// Page footer text
    Footer,
}

/// Resolved formatting attributes for a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleAttributes {
    /// Font family name
    pub font: &'static str,
    /// Font size in half-points (e.g., 24 = 12pt)
    pub size: u32,
    /// RGB hex color
    pub color: &'static str,
    /// Bold weight
    pub bold: bool,
    /// Single underline (hyperlinks force this on independently)
    pub underline: bool,
}

const FONT: &str = "Times New Roman";
const BLACK: &str = "000000";
const GRAY: &str = "808080";

impl Role {
    /// Resolve the fixed attributes for this role.
    pub fn attributes(self) -> StyleAttributes {
        match self {
            Role::Title => StyleAttributes {
                font: FONT,
                size: 44,
                color: BLACK,
                bold: true,
                underline: false,
            },
            Role::Heading => StyleAttributes {
                font: FONT,
                size: 36,
                color: BLACK,
                bold: false,
                underline: false,
            },
            Role::Body => StyleAttributes {
                font: FONT,
                size: 24,
                color: BLACK,
                bold: false,
                underline: false,
            },
            Role::Source => StyleAttributes {
                font: FONT,
                size: 20,
                color: BLACK,
                bold: false,
                underline: false,
            },
            Role::Footer => StyleAttributes {
                font: FONT,
                size: 20,
                color: GRAY,
                bold: false,
                underline: false,
            },
        }
    }
}
