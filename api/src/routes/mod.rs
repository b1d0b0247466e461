pub mod posts;
pub mod tags;
pub mod users;

use crate::{AppState, error::AppError, flash::FlashData, flash::take_flash_cookie};
use axum::{
    Router,
    response::{Html, Redirect},
    routing::{get, post},
};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(user_routes())
        .merge(post_routes())
        .merge(tag_routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/new", get(users::new_user).post(users::create_user))
        .route("/users/{id}", get(users::show_user))
        .route("/users/{id}/edit", get(users::edit_user).post(users::update_user))
        .route("/users/{id}/delete", post(users::delete_user))
        .route(
            "/users/{id}/posts/new",
            get(posts::new_post).post(posts::create_post),
        )
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/{id}", get(posts::show_post))
        .route("/posts/{id}/edit", get(posts::edit_post).post(posts::update_post))
        .route("/posts/{id}/delete", post(posts::delete_post))
}

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags))
        .route("/tags/new", get(tags::new_tag).post(tags::create_tag))
        .route("/tags/{id}", get(tags::show_tag))
        .route("/tags/{id}/edit", get(tags::edit_tag).post(tags::update_tag))
        .route("/tags/{id}/delete", post(tags::delete_tag))
}

async fn root() -> Redirect {
    Redirect::to("/users")
}

/// Template context carrying the pending flash message, if any.
fn page_context(state: &AppState, cookies: &Cookies) -> tera::Context {
    let mut ctx = tera::Context::new();
    if let Some(value) = take_flash_cookie::<FlashData>(cookies, &state.flash_key) {
        ctx.insert("flash", &value);
    }
    ctx
}

fn render(state: &AppState, template: &str, ctx: &tera::Context) -> Result<Html<String>, AppError> {
    let body = state.templates.render(template, ctx)?;
    Ok(Html(body))
}
