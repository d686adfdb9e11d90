//! GraphQL object types for the three blog collections.
//!
//! Each type is decoded straight from its stored document with `serde`, so
//! field names follow the document layout (`_id`, `bodyContent`, ...).
//! Foreign keys keep their stored JSON value and are resolved per field.

use {
    async_graphql::{ComplexObject, Context, Result, SimpleObject},
    scribe_store::{Collection, Filter},
    serde::{Deserialize, Deserializer, Serialize, de::Error as _},
    serde_json::Value,
};

use crate::{store_find, store_find_one};

/// Represent the type of an author of a blog post or a comment
#[derive(Debug, Clone, Default, PartialEq, SimpleObject, Serialize, Deserialize)]
pub struct Author {
    #[graphql(name = "_id")]
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

/// Blog post content
#[derive(Debug, Clone, Default, PartialEq, SimpleObject, Serialize, Deserialize)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stored `_id`, also the key comments point at.
    #[graphql(skip)]
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub body_content: Option<String>,
    /// `_id` of the author.
    #[graphql(skip)]
    #[serde(rename = "author", default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Value>,
}

#[ComplexObject]
impl Post {
    #[graphql(name = "_id")]
    async fn display_id(&self) -> Option<String> {
        self.id.as_ref().and_then(display_string)
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        let Some(author_id) = self.author_id.clone() else {
            return Ok(None);
        };
        store_find_one!(ctx, Collection::Authors, Filter::by_id(author_id))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Comment>>>> {
        let Some(id) = self.id.clone() else {
            return Ok(Some(Vec::new()));
        };
        store_find!(ctx, Collection::Comments, Filter::eq("post", id))
    }
}

/// Comment on the blog post
///
/// A stored comment without a `post` does not decode, so it surfaces as a
/// null list item with an error rather than a comment missing `post`.
#[derive(Debug, Clone, Default, PartialEq, SimpleObject, Serialize, Deserialize)]
#[graphql(complex)]
pub struct Comment {
    #[graphql(name = "_id")]
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    /// `_id` of the author.
    #[graphql(skip)]
    #[serde(rename = "author", default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Value>,
    /// `_id` of the post.
    #[serde(deserialize_with = "required_string")]
    pub post: String,
}

#[ComplexObject]
impl Comment {
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        let Some(author_id) = self.author_id.clone() else {
            return Ok(None);
        };
        store_find_one!(ctx, Collection::Authors, Filter::by_id(author_id))
    }
}

/// Render a stored scalar the way the GraphQL `String` type coerces it.
///
/// Numbers and booleans become their string form; anything else is null.
pub(crate) fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(display_string))
}

fn required_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer)?.ok_or_else(|| D::Error::custom("expected a string value"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {super::*, serde_json::json};

    #[test]
    fn post_decodes_document_field_names() {
        let post: Post = serde_json::from_value(json!({
            "_id": "p1",
            "title": "Hi",
            "bodyContent": "Body",
            "author": "a1",
        }))
        .unwrap();
        assert_eq!(post.id, Some(json!("p1")));
        assert_eq!(post.body_content.as_deref(), Some("Body"));
        assert_eq!(post.author_id, Some(json!("a1")));
    }

    #[test]
    fn foreign_keys_keep_their_stored_type() {
        let comment: Comment =
            serde_json::from_value(json!({ "_id": "c1", "author": 7, "post": 3 })).unwrap();
        assert_eq!(comment.author_id, Some(json!(7)));
        assert_eq!(comment.post, "3");
    }

    #[test]
    fn loose_scalars_are_coerced_or_dropped() {
        let author: Author =
            serde_json::from_value(json!({ "_id": 7, "name": { "first": "Ada" } })).unwrap();
        assert_eq!(author.id.as_deref(), Some("7"));
        assert_eq!(author.name, None);

        assert_eq!(display_string(&json!(true)).as_deref(), Some("true"));
        assert_eq!(display_string(&json!([1])), None);
    }

    #[test]
    fn comment_without_post_does_not_decode() {
        assert!(serde_json::from_value::<Comment>(json!({ "_id": "c1" })).is_err());
        assert!(serde_json::from_value::<Comment>(json!({ "_id": "c1", "post": null })).is_err());
    }

    #[test]
    fn absent_options_are_not_written() {
        let post = Post {
            id: Some(json!("p1")),
            author_id: Some(json!("a1")),
            ..Post::default()
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({ "_id": "p1", "author": "a1" })
        );
    }
}
