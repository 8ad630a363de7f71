use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Route paths served by the trading app.
pub mod endpoints {
    pub const USER_BY_ID: &str = "/users/:user_id";
    pub const RENAME_USER: &str = "/user/:user_id";
    pub const TRADES: &str = "/trades";
}

/// Build the axum router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::USER_BY_ID, get(handler::get_user))
        .route(endpoints::RENAME_USER, post(handler::rename_user))
        .route(
            endpoints::TRADES,
            get(handler::list_trades).post(handler::add_trades),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
