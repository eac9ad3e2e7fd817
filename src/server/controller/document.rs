use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        document::DocumentDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::document::{parse_category, Document, UploadDocumentParams},
        service::document::DocumentService,
        state::AppState,
        util::multipart::MultipartForm,
    },
};

/// Tag for grouping document endpoints in OpenAPI documentation
pub static DOCUMENT_TAG: &str = "document";

/// Upload a document for a customer and/or vehicle.
///
/// Multipart body with one `file` part and optional `category`, `customerId` and
/// `vehicleId` text parts. The category defaults to `other`.
///
/// # Access Control
/// - Authenticated
///
/// # Returns
/// - `201 Created` - The stored document
/// - `400 Bad Request` - No file, unknown category or malformed ids
/// - `404 Not Found` - Referenced customer or vehicle does not exist
#[utoipa::path(
    post,
    path = "/documents",
    tag = DOCUMENT_TAG,
    request_body(content_type = "multipart/form-data", description = "`file` with optional `category`, `customerId`, `vehicleId`"),
    responses(
        (status = 201, description = "Document uploaded", body = DocumentDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Customer or vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let mut form = MultipartForm::read(multipart).await?;
    let Some(file) = form.take_files("file").into_iter().next() else {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    };

    let params = UploadDocumentParams {
        file,
        category: parse_category(form.text("category").as_deref())?,
        customer_id: parse_uuid(&form, "customerId")?,
        vehicle_id: parse_uuid(&form, "vehicleId")?,
    };

    let service = DocumentService::new(&state.db, state.storage.as_ref());
    let document = service.upload(params).await?;

    Ok((StatusCode::CREATED, Json(document.into_dto())))
}

/// List a customer's documents, newest first.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/documents/customer/{customer_id}",
    tag = DOCUMENT_TAG,
    params(
        ("customer_id" = Uuid, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer documents", body = Vec<DocumentDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customer_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = DocumentService::new(&state.db, state.storage.as_ref());
    let documents = service.get_by_customer(customer_id).await?;

    Ok((
        StatusCode::OK,
        Json(
            documents
                .into_iter()
                .map(Document::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// List a vehicle's documents, newest first.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    get,
    path = "/documents/vehicle/{vehicle_id}",
    tag = DOCUMENT_TAG,
    params(
        ("vehicle_id" = Uuid, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle documents", body = Vec<DocumentDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicle_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(vehicle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = DocumentService::new(&state.db, state.storage.as_ref());
    let documents = service.get_by_vehicle(vehicle_id).await?;

    Ok((
        StatusCode::OK,
        Json(
            documents
                .into_iter()
                .map(Document::into_dto)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// Delete a document.
///
/// # Access Control
/// - Authenticated
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = DOCUMENT_TAG,
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let service = DocumentService::new(&state.db, state.storage.as_ref());
    service.delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Document deleted successfully")),
    ))
}

fn parse_uuid(form: &MultipartForm, name: &str) -> Result<Option<Uuid>, AppError> {
    form.text(name)
        .map(|value| {
            Uuid::parse_str(&value).map_err(|_| AppError::BadRequest(format!("Invalid {}", name)))
        })
        .transpose()
}
