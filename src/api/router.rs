//! Router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::api::endpoints::{health, profiles, records, tasks};
use crate::api::state::{AppState, Stores};

/// Builds the application router with every route under `/api/`.
///
/// Path parameters use the `:param` syntax of axum 0.7.
pub fn router<S: Stores>(state: AppState<S>) -> Router {
    let api = Router::new()
        .route("/health", get(health::check))
        .route(
            "/profiles",
            get(profiles::list::<S>).post(profiles::create::<S>),
        )
        .route(
            "/profiles/:profile_id",
            get(profiles::detail::<S>)
                .patch(profiles::update::<S>)
                .delete(profiles::remove::<S>),
        )
        .route(
            "/profiles/:profile_id/medical-records",
            get(records::list::<S>).post(records::create::<S>),
        )
        .route(
            "/profiles/:profile_id/medical-records/:id",
            get(records::detail::<S>)
                .patch(records::update::<S>)
                .delete(records::remove::<S>),
        )
        .route(
            "/profiles/:profile_id/tasks",
            get(tasks::list::<S>).post(tasks::create::<S>),
        )
        .route("/profiles/:profile_id/tasks/board", get(tasks::board::<S>))
        .route(
            "/profiles/:profile_id/tasks/:task_id",
            get(tasks::detail::<S>)
                .patch(tasks::update::<S>)
                .delete(tasks::remove::<S>),
        )
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}
