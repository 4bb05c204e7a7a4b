//! Attachment and page upload flows.

use crate::client::ContentClient;
use crate::error::{PublishError, PublishResult};
use crate::model::{Content, ContentType, PageDescriptor, Parent};
use confmark_core::{CodeBlockOptions, markdown_to_code_macros, render_all};
use std::path::Path;

/// Looks up `page` and returns it as a parent reference.
///
/// The first search result is used.
pub fn resolve_parent<C: ContentClient + ?Sized>(
    client: &C,
    page: &PageDescriptor,
) -> PublishResult<Parent> {
    let results = client.get_content_by_space_key_and_title(&page.space, &page.title)?;
    if results.results.len() > 1 {
        log::debug!(
            "{} pages match {page}; using the first",
            results.results.len()
        );
    }
    let parent = results.first().ok_or_else(|| PublishError::ParentNotFound {
        space: page.space.clone(),
        title: page.title.clone(),
    })?;
    parent.as_parent().ok_or_else(|| PublishError::ParentWithoutId {
        space: page.space.clone(),
        title: page.title.clone(),
    })
}

/// Uploads one file as an attachment of `page`.
pub fn add_attachment<C: ContentClient + ?Sized>(
    client: &C,
    page: &PageDescriptor,
    path: &Path,
) -> PublishResult<Content> {
    let parent = resolve_parent(client, page)?;
    upload_attachment(client, page, parent, path)
}

/// Uploads every file in `paths` as an attachment of `page`.
///
/// The parent is resolved once. Stops at the first failure; files uploaded
/// before it stay uploaded.
pub fn add_attachments<C, P>(
    client: &C,
    page: &PageDescriptor,
    paths: &[P],
) -> PublishResult<Vec<Content>>
where
    C: ContentClient + ?Sized,
    P: AsRef<Path>,
{
    if paths.is_empty() {
        return Ok(Vec::new());
    }
    let parent = resolve_parent(client, page)?;
    paths
        .iter()
        .map(|path| upload_attachment(client, page, parent.clone(), path.as_ref()))
        .collect()
}

fn upload_attachment<C: ContentClient + ?Sized>(
    client: &C,
    page: &PageDescriptor,
    parent: Parent,
    path: &Path,
) -> PublishResult<Content> {
    let bytes = std::fs::read(path).map_err(|source| PublishError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).unwrap_or_else(|err| {
        log::warn!(
            "Attachment {} is not valid UTF-8; invalid bytes are replaced",
            path.display()
        );
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    });

    let content = Content::new_child(
        ContentType::Attachment,
        &page.space,
        page.title.as_str(),
        parent,
        text,
    );
    log::info!("Uploading attachment {} to {page}", path.display());
    Ok(client.post_content(&content)?)
}

/// Creates `page` under `parent` with a storage-format `body`.
pub fn publish_page<C: ContentClient + ?Sized>(
    client: &C,
    page: &PageDescriptor,
    parent: &PageDescriptor,
    body: impl Into<String>,
) -> PublishResult<Content> {
    let ancestor = resolve_parent(client, parent)?;
    let content = Content::new_child(
        ContentType::Page,
        &page.space,
        page.title.as_str(),
        ancestor,
        body,
    );
    log::info!("Publishing page {page} under {parent}");
    Ok(client.post_content(&content)?)
}

/// Creates `page` under `parent` whose body is the code blocks of a
/// Markdown document, rendered as code block macros.
pub fn publish_code_page<C: ContentClient + ?Sized>(
    client: &C,
    page: &PageDescriptor,
    parent: &PageDescriptor,
    markdown: &str,
    defaults: &CodeBlockOptions,
) -> PublishResult<Content> {
    let macros = markdown_to_code_macros(markdown, defaults)?;
    if macros.is_empty() {
        log::warn!("No code blocks found for {page}; publishing an empty body");
    }
    publish_page(client, page, parent, render_all(&macros))
}
