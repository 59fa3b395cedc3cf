//! Custom rejections and their conversion to HTTP responses

use std::convert::Infallible;

use warp::http::StatusCode;
use warp::reject::Reject;
use warp::Rejection;

use crate::models::ErrorResponse;

/// A required multipart field was not sent
#[derive(Debug)]
pub struct MissingField(pub &'static str);

impl Reject for MissingField {}

/// The multipart body could not be read
#[derive(Debug)]
pub struct InvalidUpload(pub String);

impl Reject for InvalidUpload {}

/// Writing or reading local storage failed
#[derive(Debug)]
pub struct StorageFailure(pub String);

impl Reject for StorageFailure {}

/// Turn any rejection into a JSON error response
pub async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(MissingField(field)) = err.find::<MissingField>() {
        (
            StatusCode::BAD_REQUEST,
            format!("missing field {}", field),
        )
    } else if let Some(InvalidUpload(reason)) = err.find::<InvalidUpload>() {
        (StatusCode::BAD_REQUEST, format!("invalid upload: {}", reason))
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidHeader>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::MissingHeader>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "content length required".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported media type".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else if let Some(StorageFailure(reason)) = err.find::<StorageFailure>() {
        tracing::error!(error = %reason, "screenshot storage failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "screenshot storage failed".to_string(),
        )
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { error: message }),
        status,
    ))
}
