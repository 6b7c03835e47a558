//! Request extractors: the record id path segment and the create/update body.
//!
//! Multipart is the primary encoding (text fields plus one optional file);
//! JSON and urlencoded bodies are accepted as text-only forms. A missing or
//! unrecognised content type yields an empty form, so every text field is
//! cleared on update.

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use models::record::RecordFields;
use tracing::debug;

use crate::errors::ApiError;

/// The `:id` path segment, still unparsed. Undecodable segments fail as
/// [`ApiError::Internal`] like any other malformed id.
#[derive(Debug, Clone)]
pub struct RecordId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// Multipart field name the upload is expected under, taken from router state.
#[derive(Debug, Clone)]
pub struct UploadField(pub String);

/// A file part read into memory, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub fields: RecordFields,
    pub image: Option<FilePart>,
}

impl RecordForm {
    /// Read all parts. Only one file is accepted and only under `upload_field`;
    /// anything else is rejected. Unknown text parts are ignored.
    pub async fn from_multipart(mut multipart: Multipart, upload_field: &str) -> Result<Self, ApiError> {
        let mut form = RecordForm::default();
        while let Some(field) = multipart.next_field().await.map_err(ApiError::internal)? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(ApiError::internal)?;
                // an empty file input submits a nameless, empty part
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if name != upload_field || form.image.is_some() {
                    return Err(ApiError::Internal(format!("unexpected file field: {name}")));
                }
                form.image = Some(FilePart { field_name: name, file_name, bytes: bytes.to_vec() });
                continue;
            }

            let value = field.text().await.map_err(ApiError::internal)?;
            match name.as_str() {
                "name" => form.fields.name = Some(value),
                "email" => form.fields.email = Some(value),
                "contact" => form.fields.contact = Some(value),
                "address" => form.fields.address = Some(value),
                other => debug!(field = %other, "ignoring unknown form field"),
            }
        }
        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for RecordForm
where
    S: Send + Sync,
    UploadField: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let UploadField(upload_field) = UploadField::from_ref(state);
            let multipart = Multipart::from_request(req, state).await.map_err(ApiError::internal)?;
            return Self::from_multipart(multipart, &upload_field).await;
        }
        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<RecordFields>::from_request(req, state).await.map_err(ApiError::internal)?;
            return Ok(Self { fields, image: None });
        }
        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<RecordFields>::from_request(req, state).await.map_err(ApiError::internal)?;
            return Ok(Self { fields, image: None });
        }
        Ok(Self::default())
    }
}
