//! Browser-backed implementations of the core collaborator traits.

pub(crate) mod browser;
pub(crate) mod http;
