//! YAML publish configuration.

use crate::client::ContentClient;
use crate::error::{PublishError, PublishResult};
use crate::model::{Content, PageDescriptor};
use crate::publish::{add_attachments, publish_code_page};
use confmark_core::CodeBlockOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to publish and where.
///
/// ```yaml
/// page:
///   space: DOCS
///   title: Build guide
/// parent:
///   space: DOCS
///   title: Guides
/// source: guide.md
/// attachments:
///   - build.log
/// code:
///   theme: Midnight
///   lineNumbers: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublishConfig {
    /// Target page; attachments are attached to it.
    pub page: PageDescriptor,
    /// Parent for a newly published page. Required with `source`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PageDescriptor>,
    /// Markdown document whose code blocks become the page body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Files to attach to `page`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<PathBuf>,
    /// Defaults for generated code block macros.
    #[serde(default)]
    pub code: CodeBlockOptions,
}

/// Content created by [`PublishConfig::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// The published page, if a source was configured.
    pub page: Option<Content>,
    /// Uploaded attachments, in configuration order.
    pub attachments: Vec<Content>,
}

impl PublishConfig {
    /// Parses a configuration document.
    pub fn from_yaml(input: &str) -> PublishResult<Self> {
        serde_yaml::from_str(input).map_err(|err| PublishError::Config(err.to_string()))
    }

    /// Reads a configuration file. Relative `source` and `attachments` paths
    /// are resolved against the file's directory.
    pub fn load(path: &Path) -> PublishResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|err| {
            PublishError::Config(format!("failed to read '{}': {err}", path.display()))
        })?;
        let config = Self::from_yaml(&input)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        self.source = self.source.map(|source| base.join(source));
        self.attachments = self
            .attachments
            .into_iter()
            .map(|attachment| base.join(attachment))
            .collect();
        self
    }

    /// Publishes the configured page (when `source` is set) and then uploads
    /// the attachments.
    pub fn run<C: ContentClient + ?Sized>(&self, client: &C) -> PublishResult<PublishReport> {
        let mut report = PublishReport::default();

        if let Some(source) = &self.source {
            let parent = self.parent.as_ref().ok_or_else(|| {
                PublishError::Config("'source' requires a 'parent' page".to_string())
            })?;
            let markdown = std::fs::read_to_string(source).map_err(|err| PublishError::Source {
                path: source.clone(),
                source: err,
            })?;
            let page = publish_code_page(client, &self.page, parent, &markdown, &self.code)
                .map_err(|err| in_source(err, source))?;
            report.page = Some(page);
        }

        report.attachments = add_attachments(client, &self.page, &self.attachments)?;
        Ok(report)
    }
}

/// Names `source` in markdown errors raised while converting it.
fn in_source(err: PublishError, source: &Path) -> PublishError {
    match err {
        PublishError::Macro(err) => PublishError::Macro(err.in_file(source.display().to_string())),
        other => other,
    }
}
