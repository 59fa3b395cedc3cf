// POST /save_screenshot and GET /screenshots/{filename} handlers

use std::sync::Arc;

use bytes::BufMut;
use futures_util::TryStreamExt;
use warp::multipart::{FormData, Part};

use crate::models::ScreenshotSaved;
use crate::rejection::{InvalidUpload, MissingField, StorageFailure};
use crate::screenshots::{content_type_for, ScreenshotError};
use crate::state::AppState;

/// Multipart field carrying the image
pub const SCREENSHOT_FIELD: &str = "screenshot";

/// Read one multipart part to the end
async fn read_part(mut part: Part) -> Result<(String, Vec<u8>), warp::Error> {
    let name = part.name().to_string();
    let mut data = Vec::new();
    while let Some(chunk) = part.data().await {
        data.put(chunk?);
    }
    Ok((name, data))
}

pub async fn save_screenshot_handler(
    state: Arc<AppState>,
    form: FormData,
) -> Result<impl warp::Reply, warp::Rejection> {
    let parts: Vec<(String, Vec<u8>)> = form
        .and_then(read_part)
        .try_collect()
        .await
        .map_err(|e| warp::reject::custom(InvalidUpload(e.to_string())))?;

    let data = parts
        .into_iter()
        .find(|(name, _)| name == SCREENSHOT_FIELD)
        .map(|(_, data)| data)
        .ok_or_else(|| warp::reject::custom(MissingField(SCREENSHOT_FIELD)))?;

    let path = state
        .screenshots
        .save(data)
        .await
        .map_err(|e| warp::reject::custom(StorageFailure(e.to_string())))?;

    Ok(warp::reply::json(&ScreenshotSaved {
        message: "Screenshot saved successfully".to_string(),
        path: path.display().to_string(),
    }))
}

pub async fn get_screenshot_handler(
    file_name: String,
    state: Arc<AppState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match state.screenshots.read(&file_name).await {
        Ok(data) => Ok(warp::reply::with_header(
            data,
            "content-type",
            content_type_for(&file_name),
        )),
        Err(ScreenshotError::InvalidName(_)) | Err(ScreenshotError::NotFound(_)) => {
            tracing::debug!(file_name = %file_name, "screenshot not served");
            Err(warp::reject::not_found())
        }
        Err(e) => Err(warp::reject::custom(StorageFailure(e.to_string()))),
    }
}
