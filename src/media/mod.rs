//! Picture payload support: format sniffing and payload providers.

pub mod format;
pub mod provider;

pub use format::ImageFormat;
pub use provider::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceProvider, SharedPayload,
};
