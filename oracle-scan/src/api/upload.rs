//! Multipart upload extraction
//!
//! Form fields: `image` (file, required) and `specimen` (text, optional).
//! Unknown fields are ignored.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::error::{ApiError, ApiResult};
use crate::intake::Upload;

pub const IMAGE_FIELD: &str = "image";
pub const SPECIMEN_FIELD: &str = "specimen";

/// Read the upload form into an `Upload`
pub async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut image = None;
    let mut specimen = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(IMAGE_FIELD) => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                image = Some((bytes, file_name));
            }
            Some(SPECIMEN_FIELD) => {
                specimen = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (bytes, file_name) = image.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing `{}` file field", IMAGE_FIELD))
    })?;

    Ok(Upload {
        bytes,
        file_name,
        specimen,
    })
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
