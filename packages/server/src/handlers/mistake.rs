use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::{PhotoRole, StorageError};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath};
use crate::mistake::{MistakeService, lifecycle};
use crate::models::mistake::{CreateMistakeRequest, MistakeResponse};
use crate::state::AppState;

/// Fallback when the stored extension maps to nothing image-like.
const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

pub fn mistake_body_limit(max_request_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_request_size)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Mistakes",
    operation_id = "listMistakes",
    summary = "List mistakes",
    description = "Returns every recorded mistake, newest first.",
    responses(
        (status = 200, description = "All mistakes", body = Vec<MistakeResponse>),
        (status = 500, description = "Storage failure (STORAGE_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_mistakes(
    State(state): State<AppState>,
) -> Result<Json<Vec<MistakeResponse>>, AppError> {
    let mistakes = MistakeService::new(&state.db).list().await?;
    Ok(Json(
        mistakes.into_iter().map(MistakeResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Mistakes",
    operation_id = "getMistake",
    summary = "Get a mistake",
    params(("id" = i32, Path, description = "Mistake ID")),
    responses(
        (status = 200, description = "Mistake", body = MistakeResponse),
        (status = 400, description = "Invalid ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Mistake not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_mistake(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MistakeResponse>, AppError> {
    let mistake = MistakeService::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mistake not found".into()))?;

    Ok(Json(MistakeResponse::from(mistake)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Mistakes",
    operation_id = "createMistake",
    summary = "Record a mistake",
    description = "Stores both photos, then the record. `photo` and `originalPhoto` are base64, \
        optionally wrapped in a `data:` URL. All three fields are required.",
    request_body = CreateMistakeRequest,
    responses(
        (status = 201, description = "Mistake created", body = MistakeResponse,
            headers(("Location" = String, description = "URL of the new mistake"))),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_mistake(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMistakeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = lifecycle::create(&state.db, &*state.photos, payload).await?;
    let location = format!("/api/mistakes/{}", model.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MistakeResponse::from(model)),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Mistakes",
    operation_id = "deleteMistake",
    summary = "Delete a mistake",
    description = "Removes both photos, then the record. If the photos cannot be removed the \
        record is kept.",
    params(("id" = i32, Path, description = "Mistake ID")),
    responses(
        (status = 204, description = "Mistake deleted"),
        (status = 400, description = "Invalid ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Mistake not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_mistake(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    lifecycle::delete(&state.db, &*state.photos, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/photo/{id}",
    tag = "Mistakes",
    operation_id = "getMistakePhoto",
    summary = "Download the compressed photo",
    params(("id" = i32, Path, description = "Mistake ID")),
    responses(
        (status = 200, description = "Photo bytes (image/jpeg)"),
        (status = 404, description = "Mistake or photo file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    photo_response(&state, id, PhotoRole::Compressed).await
}

#[utoipa::path(
    get,
    path = "/photo/{id}/original",
    tag = "Mistakes",
    operation_id = "getMistakeOriginalPhoto",
    summary = "Download the original photo",
    params(("id" = i32, Path, description = "Mistake ID")),
    responses(
        (status = 200, description = "Photo bytes (image/jpeg)"),
        (status = 404, description = "Mistake or photo file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_original_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Response, AppError> {
    photo_response(&state, id, PhotoRole::Original).await
}

async fn photo_response(state: &AppState, id: i32, role: PhotoRole) -> Result<Response, AppError> {
    let mistake = MistakeService::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mistake not found".into()))?;

    let path = mistake.path_for(role);

    let bytes = match state.photos.read(path).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("Photo file not found ({role})")));
        }
        Err(e) => return Err(e.into()),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, photo_content_type(path))
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Image MIME type for a stored photo path.
fn photo_content_type(path: &str) -> String {
    mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| DEFAULT_PHOTO_CONTENT_TYPE.to_string())
}
