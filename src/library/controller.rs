use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::books::validator::validate_book;
use crate::core::auth::require_api_key;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};
use crate::library::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::library::command::find_books_cmd::{FindBooksCommand, FindBooksCommandRequest};
use crate::library::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::library::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::library::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::library::domain::BookService;
use crate::library::factory;

const STATUS_PAGE: &str = r#"<!doctype html>
<html>
<head><title>Status page</title></head>
<body>
<h1>Status</h1>
<p>The server is up and running</p>
</body>
</html>
"#;

// The route table: every feature route is registered here explicitly, with
// the book routes gated behind the api-key middleware and /status left open.
pub fn app<B>(state: AppState) -> Router<(), B>
where
    B: axum::body::HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<axum::BoxError>,
{
    let books = Router::new()
        .route("/books", post(create_book).get(get_all_books))
        .route("/books/:isbn",
               get(get_book).put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));
    Router::new()
        .merge(books)
        .route("/status", get(status).layer(CorsLayer::permissive()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn build_service(state: AppState) -> Box<dyn BookService> {
    factory::create_book_service(&state.config, state.store).await
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindBooksParams {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

pub(crate) async fn create_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<impl IntoResponse, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    validate_book(&req.build_book()).map_err(ServerError::Validation)?;
    let svc = build_service(state).await;
    let res = AddBookCommand::new(svc).execute(req).await?;
    let location = format!("/books/{}", res.book.isbn);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(res.book)))
}

pub(crate) async fn get_all_books(
    State(state): State<AppState>,
    Query(params): Query<FindBooksParams>) -> Result<impl IntoResponse, ServerError> {
    let search_term = params.search_term
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);
    let svc = build_service(state).await;
    let res = FindBooksCommand::new(svc).execute(FindBooksCommandRequest::new(search_term)).await?;
    Ok(Json(res.books))
}

pub(crate) async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<impl IntoResponse, ServerError> {
    let svc = build_service(state).await;
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest::new(isbn)).await?;
    Ok(Json(res.book))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    json: Json<Value>) -> Result<impl IntoResponse, ServerError> {
    let mut req: UpdateBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    // the path names the target record regardless of any isbn in the body
    req.isbn = isbn;
    validate_book(&req.build_book()).map_err(ServerError::Validation)?;
    let svc = build_service(state).await;
    let res = UpdateBookCommand::new(svc).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<impl IntoResponse, ServerError> {
    let svc = build_service(state).await;
    let _ = RemoveBookCommand::new(svc).execute(RemoveBookCommandRequest::new(isbn)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn status() -> Html<&'static str> {
    Html(STATUS_PAGE)
}
