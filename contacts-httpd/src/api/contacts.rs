use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::Router;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::api::axum_extra::{Json, Path};
use crate::api::error::Error;
use crate::api::Context;
use crate::contact::{ContactId, Details};

/// Message returned when creating a contact without a name or email.
pub const CREATE_INVALID: &str = "Full name and email are required.";
/// Message returned when updating a contact without a name or email.
pub const UPDATE_INVALID: &str = "Missing data.";

pub fn router(ctx: Context) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(contacts_handler).post(contact_create_handler),
        )
        .route(
            "/contacts/:id",
            put(contact_update_handler).delete(contact_delete_handler),
        )
        .with_state(ctx)
}

/// Body of create and update requests.
///
/// Fields are loosely typed: strings are used as-is, numbers and `true` are
/// rendered as text, anything falsy counts as absent. Arrays and objects count
/// as absent too.
#[derive(Debug, Default, Deserialize)]
struct ContactBody {
    #[serde(default)]
    full: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
}

impl From<ContactBody> for Details {
    fn from(body: ContactBody) -> Self {
        Details::new(text(body.full), text(body.email))
    }
}

/// Coerce a JSON value to text. Absent values become the empty string.
fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) if n.as_f64() != Some(0.) => number(&n),
        Some(Value::Bool(true)) => String::from("true"),
        _ => String::new(),
    }
}

/// Render a number the way clients print it: integral floats lose their
/// fraction, so `1.0` becomes `1`.
fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Parse a contact id from a path segment. Unparseable ids match no contact.
fn contact_id(segment: &str) -> Result<ContactId, Error> {
    segment.parse().map_err(|_| Error::NotFound)
}

/// List all contacts.
/// `GET /contacts`
async fn contacts_handler(State(ctx): State<Context>) -> impl IntoResponse {
    let store = ctx.store.read().await;
    tracing::info!("Listing {} contact(s)", store.len());

    axum::Json(store.list().to_vec())
}

/// Create a contact.
/// `POST /contacts`
async fn contact_create_handler(
    State(ctx): State<Context>,
    Json(body): Json<ContactBody>,
) -> impl IntoResponse {
    let mut store = ctx.store.write().await;
    let contact = store
        .create(body.into())
        .map_err(Error::store(CREATE_INVALID))?
        .clone();

    tracing::info!("Added contact {contact}");

    Ok::<_, Error>((StatusCode::CREATED, axum::Json(contact)))
}

/// Update a contact's name and email.
/// `PUT /contacts/:id`
async fn contact_update_handler(
    State(ctx): State<Context>,
    Path(id): Path<String>,
    Json(body): Json<ContactBody>,
) -> impl IntoResponse {
    let id = contact_id(&id)?;
    let mut store = ctx.store.write().await;
    let contact = store
        .update(id, body.into())
        .map_err(Error::store(UPDATE_INVALID))?
        .clone();

    tracing::info!("Updated contact {contact}");

    Ok::<_, Error>(axum::Json(contact))
}

/// Delete a contact.
/// `DELETE /contacts/:id`
async fn contact_delete_handler(
    State(ctx): State<Context>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = contact_id(&id)?;
    let contact = ctx
        .store
        .write()
        .await
        .delete(id)
        .map_err(|_| Error::NotFound)?;

    tracing::info!("Deleted contact {contact}");

    Ok::<_, Error>(StatusCode::NO_CONTENT)
}
