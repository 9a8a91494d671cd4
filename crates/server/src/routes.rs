pub mod auth;
pub mod booking;
pub mod catalog;

use axum::{
    http::Method,
    middleware,
    routing::{delete, get, patch, post, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use self::auth::ServerState;

pub const LIVENESS_TEXT: &str = "bike-club is running ";

/// Access requirement of a route, checked before its handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Bearer,
}

/// One row of the route table.
pub struct RouteDef {
    pub method: Method,
    pub path: &'static str,
    pub access: Access,
    pub handler: MethodRouter<ServerState>,
}

impl RouteDef {
    fn new(method: Method, path: &'static str, access: Access, handler: MethodRouter<ServerState>) -> Self {
        Self { method, path, access, handler }
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Liveness text")))]
pub async fn root() -> &'static str {
    LIVENESS_TEXT
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Attach the bearer guard to a method router when its access requires it.
pub fn guard(handler: MethodRouter<ServerState>, access: Access, state: &ServerState) -> MethodRouter<ServerState> {
    match access {
        Access::Public => handler,
        Access::Bearer => handler.route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer)),
    }
}

/// Every route with its access requirement. Rows sharing a path are merged by the router.
pub fn route_table(state: &ServerState) -> Vec<RouteDef> {
    let mutation = state.auth.booking_mutation_access();
    vec![
        RouteDef::new(Method::GET, "/", Access::Public, get(root)),
        RouteDef::new(Method::GET, "/health", Access::Public, get(health)),
        RouteDef::new(Method::GET, "/api-docs/openapi.json", Access::Public, get(openapi_json)),
        RouteDef::new(Method::GET, "/services", Access::Public, get(catalog::list)),
        RouteDef::new(Method::GET, "/services/:id", Access::Public, get(catalog::get)),
        RouteDef::new(Method::POST, "/booking", Access::Public, post(booking::create)),
        RouteDef::new(Method::GET, "/booking", Access::Bearer, get(booking::list)),
        RouteDef::new(Method::PATCH, "/booking/:id", mutation, patch(booking::update_status)),
        RouteDef::new(Method::DELETE, "/booking/:id", mutation, delete(booking::delete)),
        RouteDef::new(Method::POST, "/jwt", Access::Public, post(auth::issue_token)),
    ]
}

/// Build the full application router from the route table
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let router = route_table(&state).into_iter().fold(Router::new(), |router, def| {
        debug!(method = %def.method, path = def.path, access = ?def.access, "route registered");
        router.route(def.path, guard(def.handler, def.access, &state))
    });

    router
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
