#![deny(missing_docs)]
//! confmark publish: content model and upload flows for pages and attachments.
//!
//! The platform itself is reached through a [`ContentClient`] implementation
//! supplied by the caller.

/// Content platform client seam.
pub mod client;
/// YAML publish configuration.
pub mod config;
/// Publish error types.
pub mod error;
/// REST content model.
pub mod model;
/// Attachment and page upload flows.
pub mod publish;

pub use client::ContentClient;
pub use config::{PublishConfig, PublishReport};
pub use error::{ClientError, PublishError, PublishResult};
pub use model::{
    Body, Content, ContentResultList, ContentType, PageDescriptor, Parent, Representation, Space,
    Storage,
};
pub use publish::{add_attachment, add_attachments, publish_code_page, publish_page, resolve_parent};
