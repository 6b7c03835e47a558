use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored record as returned by every record endpoint.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDoc {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    /// `/uploads/<file>` or empty when no image was attached
    pub image_url: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

/// Multipart body for create and update. Omitted text fields are stored as absent.
#[derive(ToSchema)]
pub struct RecordFormDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::records::list,
        crate::routes::records::get,
        crate::routes::records::create,
        crate::routes::records::update,
        crate::routes::records::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RecordDoc,
            RecordFormDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "records")
    )
)]
pub struct ApiDoc;
