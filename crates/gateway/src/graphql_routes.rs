//! GraphQL HTTP handlers.
//!
//! GET `/` serves GraphiQL, or executes the request when it carries a
//! `query` parameter. POST `/` executes queries and mutations.

use {
    async_graphql::{
        http::GraphiQLSource,
        parser::{parse_query, types::OperationType},
    },
    axum::{
        Json,
        extract::{FromRequest, Request, State},
        http::{StatusCode, header},
        response::{Html, IntoResponse, Response},
    },
    tracing::debug,
};

use crate::server::AppState;

/// Handle GET on the GraphQL endpoint.
///
/// - With a `query` parameter: executes it (queries only).
/// - Otherwise: returns GraphiQL, or 405 when the console is disabled.
pub async fn graphql_get_handler(State(state): State<AppState>, req: Request) -> Response {
    if !has_query_param(req.uri().query()) {
        if state.graphiql {
            return graphiql_response();
        }
        return method_not_allowed("GraphiQL is disabled; POST GraphQL requests to /");
    }

    let gql_req = match <async_graphql_axum::GraphQLRequest>::from_request(req, &state).await {
        Ok(r) => r.into_inner(),
        Err(rejection) => return rejection.into_response(),
    };

    if is_mutation(&gql_req.query, gql_req.operation_name.as_deref()) {
        return method_not_allowed("mutations must be sent with POST");
    }

    async_graphql_axum::GraphQLResponse::from(state.schema.execute(gql_req).await).into_response()
}

/// Handle GraphQL queries and mutations.
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: async_graphql_axum::GraphQLRequest,
) -> impl IntoResponse {
    let req = req.into_inner();
    debug!(operation = ?req.operation_name, "graphql request");
    async_graphql_axum::GraphQLResponse::from(state.schema.execute(req).await)
}

fn graphiql_response() -> Response {
    Html(
        GraphiQLSource::build()
            .endpoint("/")
            .title("Scribe GraphQL Sandbox")
            .finish(),
    )
    .into_response()
}

fn method_not_allowed(message: &str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        Json(serde_json::json!({ "errors": [{ "message": message }] })),
    )
        .into_response()
}

fn has_query_param(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        q.split('&')
            .any(|pair| pair.split('=').next() == Some("query"))
    })
}

/// Whether the operation that would run is a mutation.
///
/// Unparseable documents return `false` so execution reports the syntax
/// error in the usual GraphQL shape.
fn is_mutation(query: &str, operation_name: Option<&str>) -> bool {
    let Ok(doc) = parse_query(query) else {
        return false;
    };
    doc.operations.iter().any(|(name, op)| {
        let selected = match operation_name {
            Some(wanted) => name.is_some_and(|n| n.as_str() == wanted),
            None => true,
        };
        selected && op.node.ty == OperationType::Mutation
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_query_parameter() {
        assert!(has_query_param(Some("query=%7B%20authors%20%7B%20_id%20%7D%20%7D")));
        assert!(has_query_param(Some("operationName=A&query=x")));
        assert!(!has_query_param(Some("queryx=1")));
        assert!(!has_query_param(None));
    }

    #[test]
    fn detects_mutations() {
        assert!(is_mutation(
            r#"mutation { createAuthor(_id: "a", name: "b") { _id } }"#,
            None
        ));
        assert!(!is_mutation("{ authors { _id } }", None));
        assert!(!is_mutation("{ broken", None));
    }

    #[test]
    fn operation_name_selects_the_operation() {
        let doc = r#"query Read { authors { _id } } mutation Write { createAuthor(_id: "a", name: "b") { _id } }"#;
        assert!(!is_mutation(doc, Some("Read")));
        assert!(is_mutation(doc, Some("Write")));
    }
}
