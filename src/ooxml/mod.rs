//! Office Open XML output.
//!
//! [`pptx::Pptx`] implements [`crate::package::PackageFormat`] for
//! PresentationML packages. Every cross-part reference in the markup is a
//! relationship id allocated during indexing.

pub mod constants;
pub mod pptx;

pub use pptx::Pptx;
