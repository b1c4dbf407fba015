// Export route modules
pub mod chat;
pub mod models;
pub mod search;
pub mod status;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(models::routes())
        .merge(chat::routes(state.clone()))
        .merge(search::routes(state))
}
