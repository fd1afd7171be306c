//! Users API handlers.
//!
//! ```text
//! POST   /users        create a user (random-identity fallback)
//! GET    /users        list users with filters and sorting
//! GET    /users/{id}   fetch one user
//! PUT    /users/{id}   merge-update one user
//! DELETE /users/{id}   remove one user
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{UserListFilter, UserSortKey};
use crate::domain::{ApiResult, Error, User, UserDraft, UserDraftValidationError, UserPatch};
use crate::inbound::http::state::HttpState;

fn map_draft_validation_error(err: UserDraftValidationError) -> Error {
    match err {
        UserDraftValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        UserDraftValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
    }
}

/// Create a user.
///
/// The body is decoded by hand rather than through `web::Json` so an
/// undecodable payload can fall back to the random-user source instead
/// of short-circuiting into Actix's default 400.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let draft = match serde_json::from_slice::<UserDraft>(&body) {
        Ok(draft) => draft,
        Err(decode_error) => {
            debug!(error = %decode_error, "create payload undecodable, trying random user fallback");
            state.random_users.fetch_random_user().await.map_err(|err| {
                warn!(error = %err, "random user fallback failed");
                Error::invalid_request("invalid data or failed to generate random user")
            })?
        }
    };

    draft.validate().map_err(map_draft_validation_error)?;
    let user = state.users.create(draft).await.map_err(Error::from)?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch one user by identifier.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    let user = state.users.get(id).await.map_err(Error::from)?;
    Ok(web::Json(user))
}

/// Merge-update one user.
///
/// The existence check runs before body parsing so an unknown id is a
/// 404 even when the payload is malformed. The response carries the
/// post-merge record as re-read from storage.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let id = path.into_inner();
    state.users.get(id).await.map_err(Error::from)?;

    let patch = serde_json::from_slice::<UserPatch>(&body)
        .map_err(|err| Error::invalid_request(format!("malformed user payload: {err}")))?;
    let user = state.users.update(id, patch).await.map_err(Error::from)?;
    Ok(web::Json(user))
}

/// Remove one user. Deleting an id that never existed still succeeds.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state.users.delete(id).await.map_err(Error::from)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
}

/// Query parameters for the list endpoint. Empty values are ignored,
/// matching the behaviour of absent parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// List users, optionally filtered and sorted.
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let query = query.into_inner();
    let sort = match present(query.sort) {
        None => None,
        Some(raw) => Some(UserSortKey::parse(&raw).ok_or_else(|| {
            Error::invalid_request(format!("unsupported sort key: {raw}"))
                .with_details(json!({ "field": "sort", "code": "unsupported_sort_key" }))
        })?),
    };
    let filter = UserListFilter {
        username: present(query.username),
        first_name: present(query.first_name),
        last_name: present(query.last_name),
    };

    let users = state.users.list(filter, sort).await.map_err(Error::from)?;
    Ok(web::Json(users))
}
