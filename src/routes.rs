// Route definitions and handlers

use std::convert::Infallible;
use std::sync::Arc;

use warp::Filter;

use crate::handlers;
use crate::rejection::handle_rejection;
use crate::state::AppState;

/// Largest accepted webhook form body
const WEBHOOK_BODY_LIMIT: u64 = 64 * 1024;

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn configure_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let upload_limit = state.screenshot_max_bytes;

    // POST /whatsapp
    let whatsapp = warp::path("whatsapp")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::content_length_limit(WEBHOOK_BODY_LIMIT))
        .and(warp::body::form())
        .and_then(handlers::whatsapp_handler);

    // POST /save_screenshot
    let save_screenshot = warp::path("save_screenshot")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::multipart::form().max_length(upload_limit))
        .and_then(handlers::save_screenshot_handler);

    // GET /screenshots/{filename}
    let get_screenshot = warp::path("screenshots")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::get_screenshot_handler);

    whatsapp
        .or(save_screenshot)
        .or(get_screenshot)
        .recover(handle_rejection)
}
