pub mod dto;
pub mod handlers;
mod normalize;
mod prompt;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
