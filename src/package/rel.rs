//! Per-part relationship id allocation and `.rels` rendering.
use std::fmt;

use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::common::{Error, Result};
use crate::package::part::PartName;

/// Content type of every `.rels` part.
pub const RELATIONSHIPS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-package.relationships+xml";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Whether a relationship target lives inside the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

/// Relationship id, rendered `rId{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelId(u32);

impl RelId {
    pub fn ordinal(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str("rId")?;
        f.write_str(buf.format(self.0))
    }
}

/// One outgoing relationship of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRecord {
    pub owner: PartName,
    pub id: RelId,
    pub reltype: String,
    /// Target as written to the `.rels` part: relative for internal targets,
    /// an absolute URL for external ones
    pub target: String,
    pub mode: TargetMode,
    /// Resolved absolute part name of an internal target
    pub target_part: Option<PartName>,
}

/// Hands out relationship ids for one owner part.
///
/// Ids start at `rId1` and strictly increase. There is no per-target reuse:
/// every reference site gets its own id, even when the target repeats.
#[derive(Debug, Clone)]
pub struct RelationshipAllocator {
    owner: PartName,
    records: Vec<RelationshipRecord>,
}

impl RelationshipAllocator {
    pub fn new(owner: PartName) -> Self {
        Self {
            owner,
            records: Vec::new(),
        }
    }

    pub fn owner(&self) -> &PartName {
        &self.owner
    }

    /// Record a relationship and return its id.
    ///
    /// Internal targets are relative to the owner's directory.
    ///
    /// # Errors
    ///
    /// `InvalidTarget` for an empty relationship type or target, or an
    /// internal target that does not resolve to a valid part name.
    pub fn allocate(&mut self, reltype: &str, target: &str, mode: TargetMode) -> Result<RelId> {
        if reltype.is_empty() {
            return Err(Error::InvalidTarget(format!(
                "empty relationship type from '{}'",
                self.owner
            )));
        }
        if target.is_empty() {
            return Err(Error::InvalidTarget(format!(
                "empty relationship target from '{}'",
                self.owner
            )));
        }

        let target_part = match mode {
            TargetMode::Internal => Some(
                PartName::from_rel_ref(self.owner.base_uri(), target)
                    .map_err(|e| Error::InvalidTarget(format!("'{target}': {e}")))?,
            ),
            TargetMode::External => None,
        };

        let id = RelId(self.records.len() as u32 + 1);
        log::trace!("{} {} -> {} ({})", self.owner, id, target, reltype);
        self.records.push(RelationshipRecord {
            owner: self.owner.clone(),
            id,
            reltype: reltype.to_string(),
            target: target.to_string(),
            mode,
            target_part,
        });
        Ok(id)
    }

    /// Record an internal relationship to `target`, computing the relative reference.
    pub fn allocate_part(&mut self, reltype: &str, target: &PartName) -> Result<RelId> {
        if target.is_package() {
            return Err(Error::InvalidTarget(
                "the package itself cannot be a relationship target".to_string(),
            ));
        }
        let relative = target.relative_ref(self.owner.base_uri());
        self.allocate(reltype, &relative, TargetMode::Internal)
    }

    /// Records in allocation order.
    pub fn manifest(&self) -> &[RelationshipRecord] {
        &self.records
    }

    /// First relationship pointing at `target`.
    pub fn find_target(&self, target: &PartName) -> Option<RelId> {
        self.records
            .iter()
            .find(|r| r.target_part.as_ref() == Some(target))
            .map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name of the `.rels` part carrying this manifest.
    pub fn rels_part_name(&self) -> PartName {
        self.owner.rels_part_name()
    }

    /// Render the `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.records.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(RELATIONSHIPS_NS);
        xml.push_str(r#"">"#);

        for rel in &self.records {
            let target_mode = match rel.mode {
                TargetMode::External => r#" TargetMode="External""#,
                TargetMode::Internal => "",
            };
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                rel.id,
                escape_xml(&rel.reltype),
                escape_xml(&rel.target),
                target_mode
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    fn slide_allocator() -> RelationshipAllocator {
        RelationshipAllocator::new(PartName::new("/ppt/slides/slide1.xml").unwrap())
    }

    #[test]
    fn test_ids_increase_without_dedup() {
        let mut rels = slide_allocator();
        let a = rels
            .allocate(IMAGE, "../media/image1.png", TargetMode::Internal)
            .unwrap();
        let b = rels
            .allocate(IMAGE, "../media/image1.png", TargetMode::Internal)
            .unwrap();

        assert_eq!(a.to_string(), "rId1");
        assert_eq!(b.to_string(), "rId2");
        assert_eq!(rels.len(), 2);
        assert_eq!(
            rels.manifest()[0].target_part.as_ref().unwrap().as_str(),
            "/ppt/media/image1.png"
        );
    }

    #[test]
    fn test_empty_type_or_target_rejected() {
        let mut rels = slide_allocator();
        assert!(matches!(
            rels.allocate("", "x.xml", TargetMode::Internal),
            Err(Error::InvalidTarget(_))
        ));
        assert!(matches!(
            rels.allocate(IMAGE, "", TargetMode::External),
            Err(Error::InvalidTarget(_))
        ));
        assert!(rels.is_empty());
    }

    #[test]
    fn test_to_xml() {
        let mut rels = slide_allocator();
        let image = PartName::new("/ppt/media/image1.png").unwrap();
        rels.allocate_part(IMAGE, &image).unwrap();
        rels.allocate(
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink",
            "https://example.com/?a=1&b=2",
            TargetMode::External,
        )
        .unwrap();

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="../media/image1.png""#));
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External""#));
        assert_eq!(rels.find_target(&image).unwrap().ordinal(), 1);
        assert_eq!(
            rels.rels_part_name().as_str(),
            "/ppt/slides/_rels/slide1.xml.rels"
        );
    }

    proptest! {
        #[test]
        fn prop_ids_are_pairwise_distinct(count in 1usize..64) {
            let mut rels = slide_allocator();
            for i in 0..count {
                let target = format!("../media/image{}.png", i % 3 + 1);
                rels.allocate(IMAGE, &target, TargetMode::Internal).unwrap();
            }
            let ids: Vec<u32> = rels.manifest().iter().map(|r| r.id.ordinal()).collect();
            let expected: Vec<u32> = (1..=count as u32).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
