//! HTTP Controller - Inbound adapter exposing ContactService over REST
//!
//! | Method | Path             | Success             |
//! |--------|------------------|---------------------|
//! | POST   | `/contacts`      | 201 + contact       |
//! | GET    | `/contacts`      | 200 + contact list  |
//! | GET    | `/contacts/{id}` | 200 + contact       |
//! | PUT    | `/contacts/{id}` | 200 + contact       |
//! | DELETE | `/contacts/{id}` | 204                 |
//! | GET    | `/health`        | 200                 |
//!
//! Every failure is rendered as an [`ErrorDto`], including bodies that
//! are not valid contact JSON and path ids that are not integers (400).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use phonebook_domain::{Contact, ContactDraft, ContactId, ContactRepository};
use phonebook_usecase::{ContactService, ContactServiceError};

/// Wire representation of a contact.
///
/// Every field is optional on input; missing text fields are treated
/// as empty and rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactDto {
    pub fn into_draft(self) -> ContactDraft {
        ContactDraft {
            id: self.id.map(ContactId::new),
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
        }
    }
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: Some(contact.id().get()),
            name: Some(contact.name().to_string()),
            phone: Some(contact.phone().to_string()),
            address: Some(contact.address().to_string()),
        }
    }
}

/// Error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub status: u16,
    pub message: String,
    pub details: String,
}

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    Service(ContactServiceError),
    /// The request could not be read: bad JSON body or a non-integer path id
    BadRequest(String),
}

impl From<ContactServiceError> for ApiError {
    fn from(err: ContactServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::Service(ContactServiceError::Validation(_))
            | ApiError::Service(ContactServiceError::DuplicateId { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Service(ContactServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(ContactServiceError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> String {
        match self {
            ApiError::Service(err) => err.to_string(),
            ApiError::BadRequest(details) => details.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.details();
        if status.is_server_error() {
            tracing::error!("request failed: {}", details);
        } else if let ApiError::BadRequest(_) = self {
            tracing::debug!("unreadable request: {}", details);
        }

        let body = ErrorDto {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// `Json` extractor whose rejections are rendered as an [`ErrorDto`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `Path` extractor whose rejections are rendered as an [`ErrorDto`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathId<T>(pub T);

/// Build the router for the contact endpoints.
pub fn router<R>(service: ContactService<R>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route(
            "/contacts",
            get(list_contacts::<R>).post(create_contact::<R>),
        )
        .route(
            "/contacts/{id}",
            get(get_contact::<R>)
                .put(update_contact::<R>)
                .delete(delete_contact::<R>),
        )
        .route("/health", get(health_check))
        .with_state(service)
}

async fn create_contact<R: ContactRepository>(
    State(service): State<ContactService<R>>,
    JsonBody(dto): JsonBody<ContactDto>,
) -> Result<(StatusCode, Json<ContactDto>), ApiError> {
    let contact = service.create_contact(&dto.into_draft())?;
    Ok((StatusCode::CREATED, Json(contact.into())))
}

async fn list_contacts<R: ContactRepository>(
    State(service): State<ContactService<R>>,
) -> Result<Json<Vec<ContactDto>>, ApiError> {
    let contacts = service.get_all_contacts()?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

async fn get_contact<R: ContactRepository>(
    State(service): State<ContactService<R>>,
    PathId(id): PathId<i64>,
) -> Result<Json<ContactDto>, ApiError> {
    let contact = service.get_contact_by_id(ContactId::new(id))?;
    Ok(Json(contact.into()))
}

/// The path id always wins over an id in the body.
async fn update_contact<R: ContactRepository>(
    State(service): State<ContactService<R>>,
    PathId(id): PathId<i64>,
    JsonBody(dto): JsonBody<ContactDto>,
) -> Result<Json<ContactDto>, ApiError> {
    let draft = ContactDto {
        id: Some(id),
        ..dto
    }
    .into_draft();
    let contact = service.update_contact(&draft)?;
    Ok(Json(contact.into()))
}

/// The service reports a missing id as `false`; over HTTP that is a 404.
async fn delete_contact<R: ContactRepository>(
    State(service): State<ContactService<R>>,
    PathId(id): PathId<i64>,
) -> Result<StatusCode, ApiError> {
    let id = ContactId::new(id);
    if service.delete_contact(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ContactServiceError::NotFound { id }.into())
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}
