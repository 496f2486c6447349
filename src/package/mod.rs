//! Identity registries and the package assembler.
//!
//! Everything in here is format-neutral. The registries allocate ids,
//! deduplicate styles and resources, and aggregate content types; the
//! [`PackageAssembler`] sequences them so that every reference is resolved
//! before any markup is written.

pub mod assembler;
pub mod content_types;
pub mod fingerprint;
pub mod format;
pub mod options;
pub mod part;
pub mod rel;
pub mod resource;
pub mod sink;
pub mod style_registry;

pub use assembler::{AssemblerState, PackageAssembler};
pub use content_types::{ContentTypeRecord, ContentTypeRegistry, ContentTypeSnapshot};
pub use fingerprint::{Fingerprint, Fingerprintable, fingerprint, fingerprint_bytes};
pub use format::{
    IndexContext, LinkKind, LinkTarget, PackageFormat, Reference, RenderContext,
};
pub use options::{Compression, PackageOptions};
pub use part::{PackagePart, PartName, RenderedPart};
pub use rel::{RelId, RelationshipAllocator, RelationshipRecord, TargetMode};
pub use resource::{ContentKey, Payload, PayloadSource, ResourceEntry, ResourceIndex, ResourceKind};
pub use sink::{MemorySink, PackageSink, SinkEntry, ZipSink};
pub use style_registry::{StyleDeduplicator, StyleEntry, StyleFamily, StyleId, StyleRegistry};
