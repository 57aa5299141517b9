//! # docx-compose
//!
//! A DOCX composition library for building styled report documents.
//!
//! ## Features
//!
//! - Titles, headings, body paragraphs, and source citations with a fixed
//!   role-based style catalog (Times New Roman throughout)
//! - Working hyperlinks backed by real package relationships
//! - Full-width title underlines, a title/copyright footer, custom margins
//! - Deterministic serialization: the same content always produces the same
//!   bytes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_compose::Document;
//!
//! let mut doc = Document::new();
//! doc.add_title("Housing Report");
//! doc.add_heading("Background");
//! doc.add_paragraph("Prices rose steadily over the period.");
//! doc.add_source("2020-2021", "https://example.org/data", "example.org");
//! doc.add_footer();
//! doc.save("reports/housing.docx")?;
//! ```

pub mod document;
pub mod error;
pub mod opc;
pub mod style;
pub mod xml;

pub use document::{Document, Footer, Hyperlink, Paragraph, Run, Section};
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
pub use style::{Role, StyleAttributes};
