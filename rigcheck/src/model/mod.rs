//! Canonical data model: components, builds and their typed attributes.

pub mod build;
pub mod component;

pub use build::Build;
pub use component::*;
