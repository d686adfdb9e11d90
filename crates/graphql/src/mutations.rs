//! GraphQL mutation resolvers.
//!
//! Each mutation inserts exactly one document built from its arguments and
//! returns those arguments as the result. Nothing is read back, and foreign
//! keys are not checked.

use std::sync::Arc;

use {
    async_graphql::{Context, Object, Result},
    scribe_store::{Collection, Document},
    serde_json::Value,
    tracing::debug,
};

use crate::{
    context::GqlContext,
    error::{store_err, to_document},
    types::{Author, Comment, Post},
};

/// Root mutation type.
#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutations")]
impl MutationRoot {
    async fn create_author(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: String,
        name: String,
    ) -> Result<Option<Author>> {
        let author = Author {
            id: Some(id),
            name: Some(name),
        };
        insert(ctx, Collection::Authors, to_document(&author)?).await?;
        Ok(Some(author))
    }

    async fn create_post(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: String,
        title: Option<String>,
        body_content: Option<String>,
        #[graphql(desc = "Id of the author")] author: String,
    ) -> Result<Option<Post>> {
        let post = Post {
            id: Some(Value::String(id)),
            title,
            body_content,
            author_id: Some(Value::String(author)),
        };
        insert(ctx, Collection::Posts, to_document(&post)?).await?;
        Ok(Some(post))
    }

    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: String,
        content: Option<String>,
        #[graphql(desc = "Id of the author")] author: String,
        #[graphql(desc = "Id of the post")] post: String,
    ) -> Result<Option<Comment>> {
        let comment = Comment {
            id: Some(id),
            content,
            author_id: Some(Value::String(author)),
            post,
        };
        insert(ctx, Collection::Comments, to_document(&comment)?).await?;
        Ok(Some(comment))
    }
}

async fn insert(ctx: &Context<'_>, collection: Collection, doc: Document) -> Result<()> {
    let c = ctx.data::<Arc<GqlContext>>()?;
    debug!(%collection, id = ?doc.get("_id"), "create");
    c.store.insert(collection, doc).await.map_err(store_err)
}
