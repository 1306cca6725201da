use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    ops::GridOps,
    store::{ExcessFlow, FlowStore, HomeRate, NewFlow},
};

/// Everything a handler may touch. Built once in `main` around the opened
/// store; axum clones the wrapper, not the data.
#[derive(Clone)]
pub struct AppState {
    store: Arc<FlowStore>,
}

impl AppState {
    pub fn new(store: FlowStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    1000
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/homerates", get(home_rates))
        .route("/flows", get(flows).post(create_flow))
        .with_state(state)
}

async fn home_rates(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<HomeRate>> {
    Json(state.store.fetch_home_flow_rates(query.page, query.limit))
}

async fn flows(State(state): State<AppState>) -> Json<Vec<ExcessFlow>> {
    Json(state.store.get_flows())
}

async fn create_flow(
    State(state): State<AppState>,
    Json(new): Json<NewFlow>,
) -> (StatusCode, Json<ExcessFlow>) {
    (StatusCode::CREATED, Json(state.store.add_flow(new)))
}
