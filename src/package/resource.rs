//! Registry of binary resources: pictures, chart parts and embedded workbooks.
//!
//! Each distinct [`ContentKey`] is registered once and gets a 1-based ordinal
//! shared by every resource kind. The archive filename derives from the kind
//! and that ordinal only, so names never collide no matter what the caller
//! called the source file.
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::common::{Error, Result};
use crate::media::format::ImageFormat;
use crate::media::provider::{InMemoryResourceProvider, ResourceProvider};
use crate::package::fingerprint::Fingerprint;

pub const CHART_MIME: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
pub const WORKBOOK_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const OCTET_STREAM: &str = "application/octet-stream";

/// Identity of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKey {
    /// Payload located through the resource provider
    Path(String),
    /// Inline or generated payload, keyed by its content
    Digest(Fingerprint),
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Digest(fp) => write!(f, "sha256:{fp}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Chart,
    /// Spreadsheet carrying chart data
    Workbook,
    Other,
}

/// Where a resource's bytes come from.
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// Read through the provider at registration time
    File(String),
    Bytes(Arc<[u8]>),
    /// Rendered by the format writer while emitting
    Chart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Arc<[u8]>),
    Deferred,
}

impl Payload {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(data) => Some(data),
            Self::Deferred => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub key: ContentKey,
    /// 1-based, assigned once per key
    pub ordinal: u32,
    pub kind: ResourceKind,
    pub filename: String,
    pub mime_type: String,
    pub payload: Payload,
}

impl ResourceEntry {
    /// Filename extension without the dot.
    pub fn extension(&self) -> &str {
        self.filename.rsplit_once('.').map_or("", |(_, ext)| ext)
    }
}

/// Content-keyed resource registry for one generation run.
#[derive(Debug)]
pub struct ResourceIndex {
    entries: Vec<ResourceEntry>,
    lookup: HashMap<ContentKey, usize>,
    provider: Box<dyn ResourceProvider>,
}

impl Default for ResourceIndex {
    fn default() -> Self {
        Self::new(Box::new(InMemoryResourceProvider::new()))
    }
}

impl ResourceIndex {
    pub fn new(provider: Box<dyn ResourceProvider>) -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            provider,
        }
    }

    pub fn provider(&self) -> &dyn ResourceProvider {
        self.provider.as_ref()
    }

    /// Register a resource, or return the existing entry for `key`.
    ///
    /// The payload is read now. The MIME type comes from `mime_hint` when
    /// given, otherwise from the payload's magic bytes, otherwise from the
    /// path extension.
    ///
    /// # Errors
    ///
    /// `UnreadableResource` when the payload cannot be read or is empty.
    pub fn register(
        &mut self,
        key: ContentKey,
        source: PayloadSource,
        mime_hint: Option<&str>,
    ) -> Result<&ResourceEntry> {
        if let Some(&index) = self.lookup.get(&key) {
            return Ok(&self.entries[index]);
        }

        let (payload, mime_type) = match &source {
            PayloadSource::File(path) => {
                let data = self.provider.load(path)?;
                let mime = resolve_mime(&key, &data, mime_hint, Some(path));
                (Payload::Bytes(data), mime)
            }
            PayloadSource::Bytes(data) => {
                let mime = resolve_mime(&key, data, mime_hint, None);
                (Payload::Bytes(data.clone()), mime)
            }
            PayloadSource::Chart => (
                Payload::Deferred,
                mime_hint.unwrap_or(CHART_MIME).to_string(),
            ),
        };

        if payload.bytes().is_some_and(<[u8]>::is_empty) {
            return Err(Error::UnreadableResource {
                key: key.to_string(),
                reason: "payload is empty".to_string(),
            });
        }

        let ordinal = self.entries.len() as u32 + 1;
        let kind = match source {
            PayloadSource::Chart => ResourceKind::Chart,
            _ if mime_type == WORKBOOK_MIME => ResourceKind::Workbook,
            _ if ImageFormat::from_mime_type(&mime_type).is_some() => ResourceKind::Image,
            _ => ResourceKind::Other,
        };
        let filename = match kind {
            ResourceKind::Image => {
                let ext = ImageFormat::from_mime_type(&mime_type).map_or("bin", |f| f.extension());
                format!("image{ordinal}.{ext}")
            }
            ResourceKind::Chart => format!("chart{ordinal}.xml"),
            ResourceKind::Workbook => format!("Microsoft_Excel_Worksheet{ordinal}.xlsx"),
            ResourceKind::Other => format!("object{ordinal}.bin"),
        };

        log::debug!("registered resource {key} as {filename} ({mime_type})");
        self.lookup.insert(key.clone(), self.entries.len());
        self.entries.push(ResourceEntry {
            key,
            ordinal,
            kind,
            filename,
            mime_type,
            payload,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn contains(&self, key: &ContentKey) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn get(&self, key: &ContentKey) -> Option<&ResourceEntry> {
        self.lookup.get(key).map(|&i| &self.entries[i])
    }

    pub fn by_ordinal(&self, ordinal: u32) -> Option<&ResourceEntry> {
        if ordinal == 0 {
            return None;
        }
        self.entries.get(ordinal as usize - 1)
    }

    /// Entries in registration order.
    pub fn all(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_mime(key: &ContentKey, data: &[u8], hint: Option<&str>, path: Option<&str>) -> String {
    let sniffed = ImageFormat::detect_from_bytes(data);
    if let Some(hint) = hint {
        let hinted = ImageFormat::from_mime_type(hint);
        if let (Some(hinted), Some(sniffed)) = (hinted, sniffed)
            && hinted != sniffed
        {
            log::warn!(
                "resource {key}: MIME hint '{hint}' disagrees with payload ({})",
                sniffed.mime_type()
            );
        }
        return hinted.map_or_else(|| hint.to_string(), |f| f.mime_type().to_string());
    }

    if let Some(format) = sniffed {
        return format.mime_type().to_string();
    }

    path.and_then(|p| Path::new(p).extension())
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .map_or(OCTET_STREAM, |f| f.mime_type())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::fingerprint::fingerprint_bytes;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn index_with(files: &[(&str, &[u8])]) -> ResourceIndex {
        let provider = InMemoryResourceProvider::new();
        for (path, data) in files {
            provider.add(*path, data.to_vec()).unwrap();
        }
        ResourceIndex::new(Box::new(provider))
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut index = index_with(&[("logo.png", PNG)]);
        let key = ContentKey::Path("logo.png".into());

        let first = index
            .register(key.clone(), PayloadSource::File("logo.png".into()), None)
            .unwrap()
            .clone();
        let second = index
            .register(key, PayloadSource::File("logo.png".into()), None)
            .unwrap();

        assert_eq!(first.ordinal, 1);
        assert_eq!(second.ordinal, 1);
        assert_eq!(second.filename, "image1.png");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_ordinals_are_global_across_kinds() {
        let mut index = index_with(&[]);
        let jpeg: Arc<[u8]> = JPEG.into();
        index
            .register(
                ContentKey::Digest(fingerprint_bytes(JPEG)),
                PayloadSource::Bytes(jpeg),
                None,
            )
            .unwrap();
        let chart = index
            .register(
                ContentKey::Digest(fingerprint_bytes(b"chart")),
                PayloadSource::Chart,
                None,
            )
            .unwrap();

        assert_eq!(chart.filename, "chart2.xml");
        assert_eq!(chart.payload, Payload::Deferred);
        assert_eq!(index.by_ordinal(1).unwrap().filename, "image1.jpeg");
        assert_eq!(index.all()[0].kind, ResourceKind::Image);
    }

    #[test]
    fn test_workbook_naming() {
        let mut index = index_with(&[]);
        let entry = index
            .register(
                ContentKey::Digest(fingerprint_bytes(b"PK")),
                PayloadSource::Bytes(Arc::from(&b"PK\x03\x04"[..])),
                Some(WORKBOOK_MIME),
            )
            .unwrap();
        assert_eq!(entry.kind, ResourceKind::Workbook);
        assert_eq!(entry.filename, "Microsoft_Excel_Worksheet1.xlsx");
        assert_eq!(entry.extension(), "xlsx");
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let mut index = index_with(&[]);
        let err = index
            .register(
                ContentKey::Path("missing.png".into()),
                PayloadSource::File("missing.png".into()),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnreadableResource { .. }));
        assert!(index.is_empty());
    }

    #[test]
    fn test_mime_resolution_order() {
        let mut index = index_with(&[("photo.jpg", &b"not really a jpeg"[..])]);
        let entry = index
            .register(
                ContentKey::Path("photo.jpg".into()),
                PayloadSource::File("photo.jpg".into()),
                None,
            )
            .unwrap();
        assert_eq!(entry.mime_type, "image/jpeg");

        // Hint wins over sniffing
        let entry = index
            .register(
                ContentKey::Digest(fingerprint_bytes(PNG)),
                PayloadSource::Bytes(PNG.into()),
                Some("image/jpg"),
            )
            .unwrap();
        assert_eq!(entry.mime_type, "image/jpeg");
        assert_eq!(entry.filename, "image2.jpeg");
    }
}
