//! OPC Package implementation
//!
//! Writes DOCX output as a ZIP package

use crate::error::Result;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// An OPC package (ZIP-based container for DOCX output)
#[derive(Debug)]
pub struct Package {
    /// All parts in the package, keyed by URI; sorted order fixes the ZIP
    /// entry sequence so identical content serializes to identical bytes
    parts: BTreeMap<PartUri, Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Save the package to a file.
    ///
    /// Missing parent directories are created. The package is staged to a
    /// sibling temp file and renamed into place, so a failure leaves any
    /// existing file at `path` untouched and no truncated file observable.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = self.to_bytes()?;

        let mut tmp_name = path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        if let Err(e) = std::fs::write(&tmp, &bytes).and_then(|_| std::fs::rename(&tmp, path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }

    /// Save the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let cursor = Cursor::new(&mut buf);
        self.write_to(cursor)?;
        Ok(buf)
    }

    /// Write the package to a writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        // Fixed entry timestamp keeps repeated saves byte-identical
        let options: FileOptions<()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        // Write [Content_Types].xml
        zip.start_file("[Content_Types].xml", options)?;
        self.content_types.write_to(&mut zip)?;

        // Write package relationships
        if !self.relationships.is_empty() {
            zip.start_file("_rels/.rels", options)?;
            self.relationships.write_to(&mut zip)?;
        }

        // Write all parts
        for (uri, part) in &self.parts {
            let path = &uri.as_str()[1..]; // Remove leading '/'
            zip.start_file(path, options)?;
            zip.write_all(part.data())?;

            // Write part relationships if any
            if let Some(rels) = part.relationships() {
                if !rels.is_empty() {
                    let rels_uri = uri.relationships_uri();
                    let rels_path = &rels_uri.as_str()[1..];
                    zip.start_file(rels_path, options)?;
                    rels.write_to(&mut zip)?;
                }
            }
        }

        zip.finish()?;
        Ok(())
    }

    /// Get a part by URI
    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    /// Add a part to the package
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        self.content_types.add_override(&uri, part.content_type());
        self.parts.insert(uri, part);
    }

    /// Get all parts in URI order
    pub fn parts(&self) -> impl Iterator<Item = (&PartUri, &Part)> {
        self.parts.iter()
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get mutable package-level relationships
    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    /// Get content types
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::{content_types, rel_types};

    #[test]
    fn test_new_package() {
        let pkg = Package::new();
        assert!(pkg.parts.is_empty());
        assert!(pkg.relationships.is_empty());
    }

    #[test]
    fn test_add_part_registers_content_type() {
        let mut pkg = Package::new();
        let uri = PartUri::new("/word/document.xml").unwrap();
        let part = Part::new(uri.clone(), content_types::MAIN_DOCUMENT, b"<doc/>".to_vec());

        pkg.add_part(part);

        assert_eq!(pkg.parts().count(), 1);
        assert_eq!(pkg.part(&uri).unwrap().data_as_str(), Ok("<doc/>"));
        assert_eq!(pkg.content_types().get(&uri), Some(content_types::MAIN_DOCUMENT));
    }

    #[test]
    fn test_to_bytes_is_zip() {
        let mut pkg = Package::new();
        let uri = PartUri::new("/word/document.xml").unwrap();
        pkg.add_part(Part::new(uri, content_types::MAIN_DOCUMENT, b"<doc/>".to_vec()));
        pkg.relationships_mut()
            .add(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        let bytes = pkg.to_bytes().unwrap();
        assert_eq!(&bytes[0..2], b"PK", "Should be valid ZIP file");
    }

    #[test]
    fn test_to_bytes_deterministic() {
        let mut pkg = Package::new();
        pkg.add_part(Part::new(
            PartUri::new("/word/styles.xml").unwrap(),
            content_types::STYLES,
            b"<styles/>".to_vec(),
        ));
        pkg.add_part(Part::new(
            PartUri::new("/word/document.xml").unwrap(),
            content_types::MAIN_DOCUMENT,
            b"<doc/>".to_vec(),
        ));
        pkg.relationships_mut()
            .add(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        assert_eq!(pkg.to_bytes().unwrap(), pkg.to_bytes().unwrap());
    }

    #[test]
    fn test_part_rels_written_alongside_part() {
        let mut pkg = Package::new();
        let uri = PartUri::new("/word/document.xml").unwrap();
        let mut part = Part::new(uri, content_types::MAIN_DOCUMENT, b"<doc/>".to_vec());

        let mut rels = Relationships::new();
        rels.add_external(rel_types::HYPERLINK, "https://example.com");
        part.set_relationships(rels);
        pkg.add_part(part);

        let bytes = pkg.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("word/_rels/document.xml.rels").is_ok());
    }
}
