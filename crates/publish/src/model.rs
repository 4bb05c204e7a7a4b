//! Content model exchanged with the content platform's REST API.

use serde::{Deserialize, Serialize};

/// Kind of a content object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A regular page.
    Page,
    /// A blog post.
    BlogPost,
    /// A file attached to a page.
    Attachment,
    /// A comment on a page.
    Comment,
}

/// Body representation understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Storage format (XHTML with `ac:` macros).
    Storage,
    /// Rendered view format.
    View,
    /// Editor format.
    Editor,
}

/// A space, referenced by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Space key (e.g. `DOCS`).
    pub key: String,
}

impl Space {
    /// Creates a space reference.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// An ancestor reference, by content id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    /// Content id of the ancestor.
    pub id: String,
}

/// Body text in a given representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    /// Body text.
    pub value: String,
    /// How `value` is encoded.
    pub representation: Representation,
}

impl Storage {
    /// Body in storage format.
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: Representation::Storage,
        }
    }
}

/// Content body wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Body in storage representation.
    pub storage: Storage,
}

impl Body {
    /// Wraps storage-format markup.
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            storage: Storage::storage(value),
        }
    }
}

/// A page, attachment, or other content object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Assigned by the platform; absent on new content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Content kind.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Title.
    pub title: String,
    /// Owning space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,
    /// Ancestor chain, nearest parent last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Parent>,
    /// Content body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Content {
    /// New content of `content_type` in `space` under `parent`, with a
    /// storage-format body.
    pub fn new_child(
        content_type: ContentType,
        space: &str,
        title: impl Into<String>,
        parent: Parent,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            content_type,
            title: title.into(),
            space: Some(Space::new(space)),
            ancestors: vec![parent],
            body: Some(Body::storage(body)),
        }
    }

    /// Reference to this content as a parent of other content.
    pub fn as_parent(&self) -> Option<Parent> {
        self.id.as_ref().map(|id| Parent { id: id.clone() })
    }

    /// Encodes the request body for a post.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of a content search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResultList {
    /// Matching content, best match first.
    #[serde(default)]
    pub results: Vec<Content>,
    /// Number of results in this page.
    #[serde(default)]
    pub size: usize,
}

impl ContentResultList {
    /// Decodes a search response body.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// The first match, if any.
    pub fn first(&self) -> Option<&Content> {
        self.results.first()
    }
}

/// Identifies a page by space key and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    /// Space key.
    pub space: String,
    /// Page title.
    pub title: String,
}

impl PageDescriptor {
    /// Creates a page descriptor.
    pub fn new(space: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            title: title.into(),
        }
    }
}

impl std::fmt::Display for PageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.space, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_attachment_matches_rest_shape() {
        let content = Content::new_child(
            ContentType::Attachment,
            "DOCS",
            "Release notes",
            Parent {
                id: "1234".to_string(),
            },
            "notes",
        );
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "attachment",
                "title": "Release notes",
                "space": { "key": "DOCS" },
                "ancestors": [{ "id": "1234" }],
                "body": {
                    "storage": { "value": "notes", "representation": "storage" }
                }
            })
        );
    }

    #[test]
    fn post_body_is_the_content_json() {
        let page = Content::new_child(
            ContentType::Page,
            "DOCS",
            "Guide",
            Parent {
                id: "7".to_string(),
            },
            "<p>hi</p>",
        );
        let body = page.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["type"], json!("page"));
        assert_eq!(value["ancestors"], json!([{ "id": "7" }]));
        assert_eq!(value["body"]["storage"]["value"], json!("<p>hi</p>"));
        assert!(value.get("id").is_none());
        assert_eq!(serde_json::from_str::<Content>(&body).unwrap(), page);
    }

    #[test]
    fn decodes_search_results() {
        let list = ContentResultList::from_json(
            r#"{"results":[{"id":"42","type":"page","title":"Home"}],"size":1,"start":0}"#,
        )
        .unwrap();
        let first = list.first().unwrap();
        assert_eq!(first.content_type, ContentType::Page);
        assert_eq!(first.as_parent(), Some(Parent { id: "42".to_string() }));
        assert!(first.ancestors.is_empty());
    }

    #[test]
    fn blog_post_type_name() {
        assert_eq!(
            serde_json::to_value(ContentType::BlogPost).unwrap(),
            json!("blogpost")
        );
    }

    #[test]
    fn page_descriptor_display() {
        assert_eq!(PageDescriptor::new("DOCS", "Home").to_string(), "DOCS/Home");
    }
}
