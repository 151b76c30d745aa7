//! HTML error responses

use crate::views;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use roster_core::RosterError;

pub fn status_for(err: &RosterError) -> StatusCode {
    match err {
        RosterError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RosterError::Conflict(_) => StatusCode::CONFLICT,
        RosterError::NotFound(_) => StatusCode::NOT_FOUND,
        RosterError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RosterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A `RosterError` rendered as a full error page
pub struct PageError(pub RosterError);

impl From<RosterError> for PageError {
    fn from(err: RosterError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(views::error_page(title, &self.0.to_string()))).into_response()
    }
}
