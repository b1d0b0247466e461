use super::{page_context, render};
use crate::{
    AppState,
    error::AppError,
    flash::{FlashData, post_response},
    forms::{EditTagForm, NewTagForm},
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use blogly_service::{Mutation as MutationCore, Query as QueryCore};
use tower_cookies::Cookies;
use tracing::info;

pub async fn list_tags(state: State<AppState>, cookies: Cookies) -> Result<Html<String>, AppError> {
    let tags = QueryCore::get_all_tags(&state.conn).await?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("tags", &tags);

    render(&state, "tags/list.html.tera", &ctx)
}

pub async fn show_tag(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let (tag, posts) = QueryCore::find_tag_with_posts(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", id))?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("tag", &tag);
    ctx.insert("posts", &posts);

    render(&state, "tags/detail.html.tera", &ctx)
}

pub async fn new_tag(state: State<AppState>, cookies: Cookies) -> Result<Html<String>, AppError> {
    let ctx = page_context(&state, &cookies);

    render(&state, "tags/new.html.tera", &ctx)
}

pub async fn create_tag(
    state: State<AppState>,
    cookies: Cookies,
    Form(form): Form<NewTagForm>,
) -> Result<Redirect, AppError> {
    let tag = MutationCore::create_tag(&state.conn, form.validate()?).await?;
    info!(tag_id = tag.id, name = %tag.name, "tag created");

    post_response(
        &cookies,
        &state.flash_key,
        "/tags",
        FlashData::success("Tag created"),
    )
}

pub async fn edit_tag(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let tag = QueryCore::find_tag_by_id(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", id))?;

    let mut ctx = page_context(&state, &cookies);
    ctx.insert("tag", &tag);

    render(&state, "tags/edit.html.tera", &ctx)
}

pub async fn update_tag(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
    Form(form): Form<EditTagForm>,
) -> Result<Redirect, AppError> {
    let tag = MutationCore::update_tag_by_id(&state.conn, id, form.validate()?).await?;
    info!(tag_id = id, name = %tag.name, "tag renamed");

    post_response(
        &cookies,
        &state.flash_key,
        &format!("/tags/{id}"),
        FlashData::success("Tag updated"),
    )
}

pub async fn delete_tag(
    state: State<AppState>,
    Path(id): Path<i32>,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    let tag = MutationCore::delete_tag(&state.conn, id).await?;
    info!(tag_id = id, name = %tag.name, "tag deleted");

    post_response(
        &cookies,
        &state.flash_key,
        "/tags",
        FlashData::success("Tag deleted"),
    )
}
