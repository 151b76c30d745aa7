//! Employee handlers: listing, hire, edit and fire

use super::error::{status_for, PageError};
use crate::views::{Flash, FormAction, FormPage, ListingPage};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use roster_core::{EmployeeInput, RosterError};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    q: Option<String>,
    flash: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, PageError> {
    let employees = state.directory.list(params.q.as_deref()).await?;

    Ok(Html(
        ListingPage {
            employees: &employees,
            query: params.q.as_deref(),
            flash: params.flash.as_deref().and_then(Flash::parse),
        }
        .render(),
    ))
}

pub async fn hire_form() -> Html<String> {
    let input = EmployeeInput::default();
    Html(
        FormPage {
            action: FormAction::Hire,
            input: &input,
            error: None,
        }
        .render(),
    )
}

pub async fn hire(State(state): State<AppState>, Form(input): Form<EmployeeInput>) -> Response {
    match state.directory.hire(&input).await {
        Ok(_) => Redirect::to(&Flash::Hired.redirect_target()).into_response(),
        Err(e) => form_with_error(FormAction::Hire, &input, &e),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let employee = state.directory.get(id).await?;
    let input = EmployeeInput::from_employee(&employee);

    Ok(Html(
        FormPage {
            action: FormAction::Edit(id),
            input: &input,
            error: None,
        }
        .render(),
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(input): Form<EmployeeInput>,
) -> Response {
    match state.directory.edit(id, &input).await {
        Ok(_) => Redirect::to(&Flash::Updated.redirect_target()).into_response(),
        Err(e @ RosterError::NotFound(_)) => PageError(e).into_response(),
        Err(e) => form_with_error(FormAction::Edit(id), &input, &e),
    }
}

pub async fn fire(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.directory.fire(id).await {
        Ok(()) => Redirect::to(&Flash::Fired.redirect_target()).into_response(),
        Err(e @ RosterError::NotFound(_)) => PageError(e).into_response(),
        Err(e) => {
            error!("Failed to fire employee {}: {}", id, e);
            Redirect::to(&Flash::FireFailed.redirect_target()).into_response()
        }
    }
}

/// Re-render the submitted form with the failure explained inline.
fn form_with_error(action: FormAction, input: &EmployeeInput, err: &RosterError) -> Response {
    let page = FormPage {
        action,
        input,
        error: Some(err),
    };
    (status_for(err), Html(page.render())).into_response()
}
