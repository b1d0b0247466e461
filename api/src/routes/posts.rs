use super::{page_context, render};
use crate::{
    AppState,
    error::AppError,
    flash::{FlashData, post_response},
    forms::PostForm,
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use blogly_service::{Mutation as MutationCore, Query as QueryCore};
use tower_cookies::Cookies;
use tracing::info;

pub async fn new_post(
    state: State<AppState>,
    Path(user_id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let user = QueryCore::find_user_by_id(&state.conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", user_id))?;
    let tags = QueryCore::get_all_tags(&state.conn).await?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("user", &user);
    ctx.insert("tags", &tags);

    render(&state, "posts/new.html.tera", &ctx)
}

pub async fn create_post(
    state: State<AppState>,
    Path(user_id): Path<i32>,
    cookies: Cookies,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = PostForm::new_post(fields)?;
    let post = MutationCore::create_post(&state.conn, user_id, form.input, &form.tag_names).await?;
    info!(post_id = post.id, user_id, tags = ?form.tag_names, "post created");

    post_response(
        &cookies,
        &state.flash_key,
        &format!("/users/{user_id}"),
        FlashData::success("Post successfully added"),
    )
}

pub async fn show_post(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let detail = QueryCore::find_post_detail(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("post", id))?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("post", &detail.post);
    ctx.insert("author", &detail.author);
    ctx.insert("tags", &detail.tags);

    render(&state, "posts/detail.html.tera", &ctx)
}

pub async fn edit_post(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let post = QueryCore::find_post_by_id(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("post", id))?;
    let tags = QueryCore::get_all_tags(&state.conn).await?;
    let selected: Vec<i32> = QueryCore::find_tags_of_post(&state.conn, id)
        .await?
        .into_iter()
        .map(|tag| tag.id)
        .collect();

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("post", &post);
    ctx.insert("tags", &tags);
    ctx.insert("selected", &selected);

    render(&state, "posts/edit.html.tera", &ctx)
}

pub async fn update_post(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = PostForm::edit_post(fields)?;
    MutationCore::update_post_by_id(&state.conn, id, form.input, &form.tag_names).await?;
    info!(post_id = id, tags = ?form.tag_names, "post updated");

    post_response(
        &cookies,
        &state.flash_key,
        &format!("/posts/{id}"),
        FlashData::success("Post changes saved"),
    )
}

pub async fn delete_post(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    let post = MutationCore::delete_post(&state.conn, id).await?;
    info!(post_id = id, user_id = post.user_id, "post deleted");

    post_response(
        &cookies,
        &state.flash_key,
        &format!("/users/{}", post.user_id),
        FlashData::success("Post removed"),
    )
}
