//! `META-INF/manifest.xml` generation.
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::odf::constants::{OFFICE_VERSION, namespace};

/// One `manifest:file-entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub full_path: String,
    pub media_type: String,
    /// Only set on the root entry and on sub-document directories
    pub version: Option<&'static str>,
}

/// Entries of a package manifest, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// A manifest whose root entry declares the package `mimetype`.
    pub fn new(mimetype: &str) -> Self {
        Self {
            entries: vec![ManifestEntry {
                full_path: "/".to_string(),
                media_type: mimetype.to_string(),
                version: Some(OFFICE_VERSION),
            }],
        }
    }

    /// Add a file entry.
    pub fn add_file(&mut self, full_path: &str, media_type: &str) {
        self.entries.push(ManifestEntry {
            full_path: full_path.to_string(),
            media_type: media_type.to_string(),
            version: None,
        });
    }

    /// Add a sub-document directory entry such as `Object 1/`.
    pub fn add_directory(&mut self, full_path: &str, media_type: &str) {
        if self.contains(full_path) {
            return;
        }
        self.entries.push(ManifestEntry {
            full_path: full_path.to_string(),
            media_type: media_type.to_string(),
            version: Some(OFFICE_VERSION),
        });
    }

    pub fn contains(&self, full_path: &str) -> bool {
        self.entries.iter().any(|e| e.full_path == full_path)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.entries.len() * 128);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<manifest:manifest xmlns:manifest="{}" manifest:version="{OFFICE_VERSION}">"#,
            namespace::MANIFEST
        )?;
        xml.push('\n');

        for entry in &self.entries {
            write!(
                xml,
                r#" <manifest:file-entry manifest:full-path="{}""#,
                escape_xml(&entry.full_path)
            )?;
            if let Some(version) = entry.version {
                write!(xml, r#" manifest:version="{version}""#)?;
            }
            writeln!(
                xml,
                r#" manifest:media-type="{}"/>"#,
                escape_xml(&entry.media_type)
            )?;
        }

        xml.push_str("</manifest:manifest>\n");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::constants::{ODF_CHART, ODF_PRESENTATION};

    #[test]
    fn test_manifest_xml() {
        let mut manifest = Manifest::new(ODF_PRESENTATION);
        manifest.add_file("content.xml", "text/xml");
        manifest.add_directory("Object 2/", ODF_CHART);
        manifest.add_directory("Object 2/", ODF_CHART);

        let xml = manifest.to_xml().unwrap();
        assert!(xml.contains(&format!(
            r#"<manifest:file-entry manifest:full-path="/" manifest:version="1.3" manifest:media-type="{ODF_PRESENTATION}"/>"#
        )));
        assert!(xml.contains(
            r#"<manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>"#
        ));
        assert_eq!(xml.matches("Object 2/").count(), 1);
        assert_eq!(manifest.entries().len(), 3);
    }
}
