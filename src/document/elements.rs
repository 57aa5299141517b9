//! Builders for structural elements outside the plain paragraph/run vocabulary
//!
//! These are pure constructors. Relationship registration happens in the
//! document model before a builder is invoked; the resulting identifier is
//! passed in.

use crate::document::paragraph::{Alignment, BottomBorder, Hyperlink, Paragraph};
use crate::document::section::Footer;
use crate::document::Run;
use crate::style::{Role, StyleAttributes};

/// Marker named in every generated footer
pub const GENERATOR: &str = "docx-compose";

/// Full-width horizontal rule: an empty paragraph carrying a bottom border
/// (single line, 2.25pt, black), used as the title underline.
pub(crate) fn rule_paragraph() -> Paragraph {
    let mut para = Paragraph::default();
    let props = para.properties.get_or_insert_with(Default::default);
    props.bottom_border = Some(BottomBorder {
        style: "single",
        size: 18,
        space: 1,
        color: "000000",
    });
    props.spacing_after = Some(240); // 12pt
    para
}

/// Hyperlink element carrying one styled run with underline forced on.
///
/// `r_id` must already be registered as an external relationship.
pub(crate) fn hyperlink(
    display: impl Into<String>,
    r_id: impl Into<String>,
    attrs: StyleAttributes,
) -> Hyperlink {
    let mut run = Run::styled(display, attrs);
    run.set_underline("single");
    Hyperlink {
        r_id: r_id.into(),
        runs: vec![run],
    }
}

/// Centered footer paragraph: document title plus the generator notice.
///
/// With an empty title the text is the notice alone.
pub(crate) fn footer_paragraph(title: &str) -> Footer {
    let text = if title.is_empty() {
        format!("(c) Generated using {}", GENERATOR)
    } else {
        format!("{}     (c) Generated using {}", title, GENERATOR)
    };

    let mut para = Paragraph::aligned(Alignment::Center);
    para.add_run(Run::styled(text, Role::Footer.attributes()));
    Footer { paragraph: para }
}
