use super::{page_context, render};
use crate::{
    AppState,
    error::AppError,
    flash::{FlashData, post_response},
    forms::{EditUserForm, NewUserForm},
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use blogly_service::{Mutation as MutationCore, Query as QueryCore};
use tower_cookies::Cookies;
use tracing::info;

pub async fn list_users(
    state: State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let users = QueryCore::get_all_users(&state.conn).await?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("users", &users);

    render(&state, "users/list.html.tera", &ctx)
}

pub async fn new_user(state: State<AppState>, cookies: Cookies) -> Result<Html<String>, AppError> {
    let ctx = page_context(&state, &cookies);

    render(&state, "users/new.html.tera", &ctx)
}

pub async fn create_user(
    state: State<AppState>,
    cookies: Cookies,
    Form(form): Form<NewUserForm>,
) -> Result<Redirect, AppError> {
    let user = MutationCore::create_user(&state.conn, form.validate()?).await?;
    info!(user_id = user.id, "user created");

    post_response(
        &cookies,
        &state.flash_key,
        "/users",
        FlashData::success("User created!"),
    )
}

pub async fn show_user(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let (user, posts) = QueryCore::find_user_with_posts(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("user", &user);
    ctx.insert("posts", &posts);

    render(&state, "users/detail.html.tera", &ctx)
}

pub async fn edit_user(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let user = QueryCore::find_user_by_id(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("user", &user);

    render(&state, "users/edit.html.tera", &ctx)
}

pub async fn update_user(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
    Form(form): Form<EditUserForm>,
) -> Result<Redirect, AppError> {
    MutationCore::update_user_by_id(&state.conn, id, form.validate()?).await?;
    info!(user_id = id, "user updated");

    post_response(
        &cookies,
        &state.flash_key,
        &format!("/users/{id}"),
        FlashData::success("Profile successfully updated"),
    )
}

pub async fn delete_user(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    let posts = MutationCore::delete_user(&state.conn, id).await?;
    info!(user_id = id, posts, "user deleted");

    post_response(
        &cookies,
        &state.flash_key,
        "/users",
        FlashData::success("User successfully deleted"),
    )
}
