//! HTTP transport for the blog GraphQL schema.
//!
//! One path, `/`: GraphiQL on GET, query/mutation execution on POST.

pub mod graphql_routes;
pub mod server;

pub use server::{AppState, build_app, serve, shutdown_signal};
