//! Aggregated content-type declarations for a package.
//!
//! Relationship-based packages render these as `[Content_Types].xml`; the ODF
//! writer turns the overrides into `META-INF/manifest.xml` entries.
use std::collections::BTreeMap;

use phf::phf_map;

use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::common::{Error, Result};
use crate::package::rel::RELATIONSHIPS_CONTENT_TYPE;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Extensions that are declared once by a `Default` element when their part
/// carries the listed content type.
static STANDARD_DEFAULTS: phf::Map<&'static str, &'static str> = phf_map! {
    "rels" => RELATIONSHIPS_CONTENT_TYPE,
    "xml" => "application/xml",
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "tiff" => "image/tiff",
    "svg" => "image/svg+xml",
    "emf" => "image/x-emf",
    "wmf" => "image/x-wmf",
    "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
};

/// One declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypeRecord {
    Default {
        extension: String,
        content_type: String,
    },
    Override {
        part_name: String,
        content_type: String,
    },
}

/// Sorted view of every declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypeSnapshot {
    /// `(extension, content_type)`, sorted by extension
    pub defaults: Vec<(String, String)>,
    /// `(part_name, content_type)`, sorted by part name
    pub overrides: Vec<(String, String)>,
}

impl ContentTypeSnapshot {
    /// All declarations as records, defaults first.
    pub fn records(&self) -> Vec<ContentTypeRecord> {
        let defaults = self.defaults.iter().map(|(ext, ct)| ContentTypeRecord::Default {
            extension: ext.clone(),
            content_type: ct.clone(),
        });
        let overrides = self.overrides.iter().map(|(name, ct)| ContentTypeRecord::Override {
            part_name: name.clone(),
            content_type: ct.clone(),
        });
        defaults.chain(overrides).collect()
    }
}

#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    /// lowercase extension -> content type
    defaults: BTreeMap<String, String>,
    /// part name -> content type
    overrides: BTreeMap<String, String>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ext` with `content_type` is one of the standard `Default` pairs.
    pub fn is_standard_default(ext: &str, content_type: &str) -> bool {
        STANDARD_DEFAULTS
            .get(ext.to_ascii_lowercase().as_str())
            .is_some_and(|ct| *ct == content_type)
    }

    /// Declare a content type for every part with extension `ext`.
    ///
    /// # Errors
    ///
    /// `ContentTypeConflict` when the extension already maps to a different type.
    pub fn add_default(&mut self, ext: &str, content_type: &str) -> Result<()> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::insert(&mut self.defaults, ext, content_type)
    }

    /// Declare a content type for one part.
    ///
    /// # Errors
    ///
    /// `ContentTypeConflict` when the part already maps to a different type.
    pub fn add_override(&mut self, part_name: &str, content_type: &str) -> Result<()> {
        Self::insert(&mut self.overrides, part_name.to_string(), content_type)
    }

    fn insert(map: &mut BTreeMap<String, String>, key: String, content_type: &str) -> Result<()> {
        match map.get(&key) {
            Some(existing) if existing == content_type => Ok(()),
            Some(existing) => Err(Error::ContentTypeConflict {
                key,
                existing: existing.clone(),
                requested: content_type.to_string(),
            }),
            None => {
                map.insert(key, content_type.to_string());
                Ok(())
            }
        }
    }

    /// Content type in effect for `part_name`: its override, else its extension default.
    pub fn resolve(&self, part_name: &str) -> Option<&str> {
        if let Some(ct) = self.overrides.get(part_name) {
            return Some(ct.as_str());
        }
        let ext = part_name.rsplit_once('.')?.1.to_ascii_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }

    pub fn snapshot(&self) -> ContentTypeSnapshot {
        ContentTypeSnapshot {
            defaults: self
                .defaults
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            overrides: self
                .overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.defaults.len() + self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render `[Content_Types].xml`.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.len() * 128);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(CONTENT_TYPES_NS);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part_name),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}
