//! The content platform operations the publish flows depend on.

use crate::error::ClientError;
use crate::model::{Content, ContentResultList};

/// Access to the content platform's REST API.
///
/// Transport, authentication and retries belong to the implementation.
pub trait ContentClient {
    /// Searches content in `space_key` with exactly `title`.
    fn get_content_by_space_key_and_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<ContentResultList, ClientError>;

    /// Creates new content and returns it as stored by the platform.
    fn post_content(&self, content: &Content) -> Result<Content, ClientError>;
}
