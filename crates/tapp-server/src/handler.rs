use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Json;
use serde::Serialize;
use serde_json::Value;
use tapp_types::coerce;
use tapp_types::{validate_list, FieldError, Loc, Page, Trade, User, ValidationErrors, DEFAULT_OFFSET};

use crate::error::ServerResult;
use crate::extract::{json_body, path_int, path_text, query_int};
use crate::state::AppState;

/// `{"status": 200, "data": ...}` wrapper returned by the mutation routes.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { status: 200, data }
    }
}

/// `GET /users/:user_id`: every user with this id, possibly none.
pub async fn get_user(
    State(state): State<AppState>,
    uri: Uri,
    user_id: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<Vec<User>>> {
    let user_id = path_int(&path_text(user_id, &uri), "user_id")?;
    let users = state.users.find_by_id(user_id)?;
    tracing::debug!(user_id, matches = users.len(), "user lookup");
    Ok(Json(users))
}

/// `GET /trades?limit=&offset=`: one page of trades in insertion order.
pub async fn list_trades(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ServerResult<Json<Vec<Trade>>> {
    let limit = query_int(&params, "limit", state.config.default_limit);
    let offset = query_int(&params, "offset", DEFAULT_OFFSET);
    let page = match (limit, offset) {
        (Ok(limit), Ok(offset)) => Page::new(limit, offset),
        (limit, offset) => {
            let errors = limit.err().into_iter().chain(offset.err()).collect();
            return Err(ValidationErrors(errors).into());
        }
    };

    let trades = state.trades.list(page)?;
    tracing::debug!(limit = page.limit, offset = page.offset, returned = trades.len(), "listed trades");
    Ok(Json(trades))
}

/// `POST /user/:user_id?new_name=`: rename the first user with this id.
///
/// `new_name` comes from the query string, or from a JSON body
/// `{"new_name": "..."}` when the query does not carry it.
pub async fn rename_user(
    State(state): State<AppState>,
    uri: Uri,
    user_id: Result<Path<String>, PathRejection>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> ServerResult<Json<Envelope<User>>> {
    let user_id = path_int(&path_text(user_id, &uri), "user_id");
    let new_name = requested_name(&params, &body);

    let (user_id, new_name) = match (user_id, new_name) {
        (Ok(id), Ok(name)) => (id, name),
        (id, name) => {
            let errors = id
                .err()
                .into_iter()
                .chain(name.err())
                .flat_map(ValidationErrors::into_errors)
                .collect();
            return Err(ValidationErrors(errors).into());
        }
    };

    let user = state.users.rename(user_id, &new_name)?;
    tracing::info!(user_id, name = %user.name, "user renamed");
    Ok(Json(Envelope::ok(user)))
}

fn requested_name(params: &HashMap<String, String>, body: &[u8]) -> Result<String, ValidationErrors> {
    if let Some(name) = params.get("new_name") {
        return Ok(name.clone());
    }
    let query_missing = || ValidationErrors::from(FieldError::missing(Loc::part("query").child("new_name")));
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(query_missing());
    }
    let value = json_body(body)?;
    match value.get("new_name") {
        Some(name) => coerce::string(name, &Loc::part("body").child("new_name"))
            .map_err(ValidationErrors::from),
        None => Err(query_missing()),
    }
}

/// `POST /trades`: validate the whole batch, then append it.
///
/// A single invalid element rejects the batch; nothing is appended.
pub async fn add_trades(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<Envelope<Vec<Trade>>>> {
    let value: Value = json_body(&body)?;
    let batch: Vec<Trade> = validate_list(
        &value,
        &Loc::part("body"),
        &state.config.schema,
        Some(state.config.max_batch_size),
    )?;

    let count = batch.len();
    let all = state.trades.append(batch)?;
    tracing::info!(added = count, total = all.len(), "trades appended");
    Ok(Json(Envelope::ok(all)))
}
