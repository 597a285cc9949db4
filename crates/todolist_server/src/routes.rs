//! Route table and handlers.
//!
//! | Method | Path | Effect |
//! |---|---|---|
//! | GET | `/` | render home list, seeding defaults if empty |
//! | GET | `/:list` | render or create+redirect for a named list |
//! | POST | `/` | append `newItem` to the list labelled `list` |
//! | POST | `/delete` | remove `removeItem` from the list labelled `listName` |
//! | GET | `/delete` | the named list "Delete", same as `GET /:list` |

use crate::error::AppError;
use crate::state::AppState;
use crate::views::list_page;
use axum::extract::{MatchedPath, Path, Request, State};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use log::info;
use maud::Markup;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use std::time::Instant;
use todolist_core::{today_header, ListTarget, ListView};
use uuid::Uuid;

/// Characters escaped when a list name becomes one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    #[serde(rename = "newItem", default)]
    pub new_item: String,
    #[serde(default)]
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemForm {
    #[serde(rename = "removeItem", default)]
    pub remove_item: String,
    #[serde(rename = "listName", default)]
    pub list_name: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_list).post(add_item))
        .route("/delete", get(delete_path_list).post(delete_item))
        .route("/:list", get(named_list))
        .layer(from_fn(log_requests))
        .with_state(state)
}

/// Location of a list view: `/` for home, `/<encoded name>` otherwise.
pub fn list_location(target: &ListTarget) -> String {
    match target {
        ListTarget::Home => "/".to_string(),
        ListTarget::Named(name) => format!("/{}", utf8_percent_encode(name, PATH_SEGMENT)),
    }
}

async fn home_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.with_service(|service| service.home_view()).await?;
    Ok(respond(view))
}

async fn named_list(
    State(state): State<AppState>,
    Path(list): Path<String>,
) -> Result<Response, AppError> {
    let view = state
        .with_service(move |service| service.named_list_view(&list))
        .await?;
    Ok(respond(view))
}

/// `/delete` is a static route, so its GET side is routed here by hand.
async fn delete_path_list(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state
        .with_service(|service| service.named_list_view("delete"))
        .await?;
    Ok(respond(view))
}

async fn add_item(
    State(state): State<AppState>,
    Form(form): Form<NewItemForm>,
) -> Result<Redirect, AppError> {
    let target = state
        .with_service(move |service| service.add_item(&form.new_item, &form.list))
        .await?;
    Ok(Redirect::to(&list_location(&target)))
}

async fn delete_item(
    State(state): State<AppState>,
    Form(form): Form<DeleteItemForm>,
) -> Result<Redirect, AppError> {
    let item_id = Uuid::parse_str(form.remove_item.trim())
        .map_err(|_| AppError::BadRequest("removeItem must be an item id".to_string()))?;
    let target = state
        .with_service(move |service| service.delete_item(item_id, &form.list_name))
        .await?;
    Ok(Redirect::to(&list_location(&target)))
}

fn respond(view: ListView) -> Response {
    match view {
        ListView::Render(page) => {
            let markup: Markup = list_page(&page, &today_header());
            markup.into_response()
        }
        ListView::Redirect(target) => Redirect::to(&list_location(&target)).into_response(),
    }
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    info!(
        "event=http_request module=http method={method} route={route} status={} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
