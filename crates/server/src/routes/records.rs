use axum::{extract::State, http::StatusCode, Json};
use common::types::Message;
use service::record::Record;

use crate::{errors::ApiError, form::{FilePart, RecordForm, RecordId}, routes::ServerState};

/// Write the attached file, if any, before the record is touched.
/// A later failure leaves the file in place.
async fn store_image(state: &ServerState, image: Option<FilePart>) -> Result<Option<String>, ApiError> {
    let Some(part) = image else { return Ok(None) };
    let stored = state
        .uploads
        .store(&part.field_name, &part.file_name, &part.bytes)
        .await?;
    Ok(Some(stored.url))
}

#[utoipa::path(
    get, path = "/api/imgcrud", tag = "records",
    responses(
        (status = 200, description = "All records in insertion order", body = [crate::openapi::RecordDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.records.list().await?))
}

#[utoipa::path(
    get, path = "/api/imgcrud/{id}", tag = "records",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::RecordDoc),
        (status = 404, description = "Data not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, RecordId(id): RecordId) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.records.get(&id).await?))
}

#[utoipa::path(
    post, path = "/api/imgcrud", tag = "records",
    request_body(content = crate::openapi::RecordFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::RecordDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, form: RecordForm) -> Result<(StatusCode, Json<Record>), ApiError> {
    let image_url = store_image(&state, form.image).await?;
    let created = state.records.create(form.fields, image_url).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/imgcrud/{id}", tag = "records",
    params(("id" = String, Path, description = "Record ID")),
    request_body(content = crate::openapi::RecordFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::RecordDoc),
        (status = 404, description = "Data not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    RecordId(id): RecordId,
    form: RecordForm,
) -> Result<Json<Record>, ApiError> {
    let image_url = store_image(&state, form.image).await?;
    let updated = state.records.update(&id, form.fields, image_url).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/imgcrud/{id}", tag = "records",
    params(("id" = String, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Data deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Data not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, RecordId(id): RecordId) -> Result<Json<Message>, ApiError> {
    state.records.delete(&id).await?;
    Ok(Json(Message::new("Data deleted")))
}
