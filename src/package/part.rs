//! Part names and the parts that carry them.
//!
//! A part name is an absolute, slash-separated path inside the container
//! (`/ppt/slides/slide1.xml`). The package itself is addressed by the
//! pseudo part name `/`, which owns the package-level relationships.
use std::fmt;

use crate::common::{Error, Result};
use crate::package::rel::RelationshipRecord;

/// Absolute part name inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartName {
    uri: String,
}

impl PartName {
    /// Validate and wrap a part name.
    ///
    /// # Errors
    ///
    /// `InvalidPartName` when the name does not start with `/`, has an empty,
    /// `.` or `..` segment, ends with `/`, or contains a backslash.
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if uri == "/" {
            return Ok(Self { uri });
        }
        if !uri.starts_with('/') {
            return Err(Error::InvalidPartName(format!(
                "part name must begin with '/', got '{uri}'"
            )));
        }
        if uri.contains('\\') {
            return Err(Error::InvalidPartName(format!(
                "part name must not contain '\\', got '{uri}'"
            )));
        }
        if uri[1..]
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(Error::InvalidPartName(format!(
                "part name has an empty or relative segment: '{uri}'"
            )));
        }
        Ok(Self { uri })
    }

    /// The package pseudo part name `/`.
    pub fn package() -> Self {
        Self {
            uri: "/".to_string(),
        }
    }

    pub fn is_package(&self) -> bool {
        self.uri == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Directory portion, e.g. `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Last segment, e.g. `slide1.xml`. Empty for the package.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Extension without the dot, e.g. `xml`.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// Name of the archive entry: the part name without its leading slash.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Path of this part relative to the directory `base_uri`.
    ///
    /// `/ppt/media/image1.png` from `/ppt/slides` is `../media/image1.png`.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = vec![".."; from.len() - common];
        segments.extend_from_slice(&to[common..]);
        segments.join("/")
    }

    /// Resolve a relative reference against the directory `base_uri`.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in base_uri.split('/').chain(relative_ref.split('/')) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        Self::new(format!("/{}", segments.join("/")))
    }

    /// Name of the relationships part for this part:
    /// `/ppt/slides/_rels/slide1.xml.rels`, or `/_rels/.rels` for the package.
    pub fn rels_part_name(&self) -> PartName {
        let uri = match self.base_uri() {
            "/" => format!("/_rels/{}.rels", self.filename()),
            base => format!("{}/_rels/{}.rels", base, self.filename()),
        };
        Self { uri }
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// A part produced by a format writer, before relationships are attached.
#[derive(Debug, Clone)]
pub struct RenderedPart {
    pub name: PartName,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl RenderedPart {
    pub fn new(name: PartName, content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// A finished part owned by the assembler until the package is sealed.
#[derive(Debug, Clone)]
pub struct PackagePart {
    pub name: PartName,
    pub content_type: String,
    pub data: Vec<u8>,
    /// Outgoing relationships, in allocation order
    pub relationships: Vec<RelationshipRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_name_validation() {
        assert!(PartName::new("/ppt/slides/slide1.xml").is_ok());
        assert!(PartName::new("/Object 1/content.xml").is_ok());
        assert!(PartName::new("/").unwrap().is_package());
        assert!(PartName::new("ppt/slides/slide1.xml").is_err());
        assert!(PartName::new("/ppt//slide1.xml").is_err());
        assert!(PartName::new("/ppt/slides/").is_err());
        assert!(PartName::new("/ppt\\slide1.xml").is_err());
        assert!(PartName::new("/ppt/../slide1.xml").is_err());
    }

    #[test]
    fn test_components() {
        let name = PartName::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(name.base_uri(), "/ppt/slides");
        assert_eq!(name.filename(), "slide1.xml");
        assert_eq!(name.ext(), "xml");
        assert_eq!(name.membername(), "ppt/slides/slide1.xml");

        let root = PartName::new("/content.xml").unwrap();
        assert_eq!(root.base_uri(), "/");
    }

    #[test]
    fn test_relative_ref() {
        let image = PartName::new("/ppt/media/image1.png").unwrap();
        assert_eq!(image.relative_ref("/ppt/slides"), "../media/image1.png");
        assert_eq!(image.relative_ref("/ppt/media"), "image1.png");
        assert_eq!(image.relative_ref("/"), "ppt/media/image1.png");

        let resolved = PartName::from_rel_ref("/ppt/slides", "../media/image1.png").unwrap();
        assert_eq!(resolved, image);
    }

    #[test]
    fn test_rels_part_name() {
        let slide = PartName::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(
            slide.rels_part_name().as_str(),
            "/ppt/slides/_rels/slide1.xml.rels"
        );
        assert_eq!(PartName::package().rels_part_name().as_str(), "/_rels/.rels");
    }
}
