//! GraphQL query resolvers.

use {
    async_graphql::{Context, Object, Result},
    scribe_store::{Collection, Filter},
};

use crate::{
    store_find, store_find_one,
    types::{Author, Comment, Post},
};

/// Root query type.
#[derive(Default)]
pub struct QueryRoot;

/// Root of the Blog Schema
#[Object(name = "BlogSchema")]
impl QueryRoot {
    /// List of posts in the blog
    async fn posts(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "category", desc = "Accepted for compatibility; not applied.")]
        _category: Option<String>,
    ) -> Result<Option<Vec<Option<Post>>>> {
        store_find!(ctx, Collection::Posts)
    }

    /// List of Comments
    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Comment>>>> {
        store_find!(ctx, Collection::Comments)
    }

    /// List of Authors
    async fn authors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Author>>>> {
        store_find!(ctx, Collection::Authors)
    }

    /// Get Author by id
    async fn author(&self, ctx: &Context<'_>, id: String) -> Result<Option<Author>> {
        store_find_one!(ctx, Collection::Authors, Filter::by_id(id))
    }
}
