use crate::{Query, ServiceError};
use ::entity::{post, post_tag, prelude::*, tag, user, user::DEFAULT_IMAGE_URL};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;

/// Validated user fields, as submitted by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

/// Validated post fields. Ownership comes from the route, not the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

pub struct Mutation;

impl Mutation {
    /// Inserts a user. A missing image is left to the column default.
    pub async fn create_user(db: &DbConn, form_data: UserInput) -> Result<user::Model, ServiceError> {
        let image_url = match form_data.image_url {
            Some(url) => Set(url),
            None => NotSet,
        };

        let user = user::ActiveModel {
            first_name: Set(form_data.first_name),
            last_name: Set(form_data.last_name),
            image_url,
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(user)
    }

    /// Replaces every field of a user. A missing image resets it to [`DEFAULT_IMAGE_URL`].
    pub async fn update_user_by_id(
        db: &DbConn,
        id: i32,
        form_data: UserInput,
    ) -> Result<user::Model, ServiceError> {
        let mut user: user::ActiveModel = User::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))?
            .into();

        user.first_name = Set(form_data.first_name);
        user.last_name = Set(form_data.last_name);
        user.image_url = Set(form_data
            .image_url
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned()));

        Ok(user.update(db).await?)
    }

    /// Deletes a user together with their posts and those posts' tag links.
    ///
    /// Returns the number of posts removed.
    pub async fn delete_user(db: &DbConn, id: i32) -> Result<u64, ServiceError> {
        let txn = db.begin().await?;

        let user = User::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::user_not_found(id))?;

        let post_ids: Vec<i32> = Post::find()
            .filter(post::Column::UserId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|post| post.id)
            .collect();

        if !post_ids.is_empty() {
            PostTag::delete_many()
                .filter(post_tag::Column::PostId.is_in(post_ids))
                .exec(&txn)
                .await?;
        }
        let posts = Post::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        user.delete(&txn).await?;

        txn.commit().await?;
        debug!(user_id = id, posts = posts.rows_affected, "user deleted");

        Ok(posts.rows_affected)
    }

    /// Inserts a post for `user_id` linked to the named tags.
    ///
    /// Nothing is written unless the user and every tag exist.
    pub async fn create_post(
        db: &DbConn,
        user_id: i32,
        form_data: PostInput,
        tag_names: &[String],
    ) -> Result<post::Model, ServiceError> {
        let txn = db.begin().await?;

        if User::find_by_id(user_id).one(&txn).await?.is_none() {
            return Err(ServiceError::user_not_found(user_id));
        }
        let tag_ids = resolve_tag_ids(&txn, tag_names).await?;

        let post = post::ActiveModel {
            title: Set(form_data.title),
            content: Set(form_data.content),
            created_at: Set(Utc::now()),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        link_tags(&txn, post.id, &tag_ids).await?;

        txn.commit().await?;

        Ok(post)
    }

    /// Replaces title and content, then sets the post's tags to exactly `tag_names`.
    pub async fn update_post_by_id(
        db: &DbConn,
        id: i32,
        form_data: PostInput,
        tag_names: &[String],
    ) -> Result<post::Model, ServiceError> {
        let txn = db.begin().await?;

        let mut post: post::ActiveModel = Post::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::post_not_found(id))?
            .into();

        post.title = Set(form_data.title);
        post.content = Set(form_data.content);
        let post = post.update(&txn).await?;
        Self::set_post_tags(&txn, post.id, tag_names).await?;

        txn.commit().await?;

        Ok(post)
    }

    /// Makes the tag links of `post_id` exactly the tags named in `tag_names`.
    ///
    /// All names are resolved before any link is touched, so an unknown name
    /// leaves the existing links in place. Run it inside a transaction to make
    /// the delete and re-insert atomic.
    pub async fn set_post_tags<C>(
        db: &C,
        post_id: i32,
        tag_names: &[String],
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let tag_ids = resolve_tag_ids(db, tag_names).await?;

        PostTag::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(db)
            .await?;
        link_tags(db, post_id, &tag_ids).await?;

        Ok(())
    }

    /// Deletes a post and its tag links. Returns the deleted post so callers know its owner.
    pub async fn delete_post(db: &DbConn, id: i32) -> Result<post::Model, ServiceError> {
        let txn = db.begin().await?;

        let post = Post::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::post_not_found(id))?;

        PostTag::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        post.clone().delete(&txn).await?;

        txn.commit().await?;

        Ok(post)
    }

    /// Inserts a tag. Fails with [`ServiceError::DuplicateTag`] if the name is taken.
    pub async fn create_tag(db: &DbConn, name: String) -> Result<tag::Model, ServiceError> {
        if Query::find_tag_by_name(db, &name).await?.is_some() {
            return Err(ServiceError::DuplicateTag(name));
        }

        insert_tag(db, name).await
    }

    pub async fn update_tag_by_id(
        db: &DbConn,
        id: i32,
        name: String,
    ) -> Result<tag::Model, ServiceError> {
        let tag: tag::ActiveModel = Tag::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::tag_not_found(id))?
            .into();

        let taken = Query::find_tag_by_name(db, &name)
            .await?
            .is_some_and(|other| other.id != id);
        if taken {
            return Err(ServiceError::DuplicateTag(name));
        }

        rename_tag(db, tag, name).await
    }

    /// Deletes a tag and unlinks it from every post.
    pub async fn delete_tag(db: &DbConn, id: i32) -> Result<tag::Model, ServiceError> {
        let txn = db.begin().await?;

        let tag = Tag::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::tag_not_found(id))?;

        PostTag::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        tag.clone().delete(&txn).await?;

        txn.commit().await?;

        Ok(tag)
    }
}

// The name checks above race with concurrent writers; the unique index has the final say.
async fn insert_tag(db: &DbConn, name: String) -> Result<tag::Model, ServiceError> {
    tag::ActiveModel {
        name: Set(name.clone()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| duplicate_tag_or_db(err, name))
}

async fn rename_tag(
    db: &DbConn,
    mut tag: tag::ActiveModel,
    name: String,
) -> Result<tag::Model, ServiceError> {
    tag.name = Set(name.clone());
    tag.update(db)
        .await
        .map_err(|err| duplicate_tag_or_db(err, name))
}

fn duplicate_tag_or_db(err: DbErr, name: String) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateTag(name),
        _ => ServiceError::Db(err),
    }
}

async fn resolve_tag_ids<C>(db: &C, tag_names: &[String]) -> Result<Vec<i32>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut tag_ids = Vec::with_capacity(tag_names.len());
    for name in tag_names {
        let tag = Query::find_tag_by_name(db, name)
            .await?
            .ok_or_else(|| ServiceError::UnknownTag(name.clone()))?;
        if !tag_ids.contains(&tag.id) {
            tag_ids.push(tag.id);
        }
    }
    Ok(tag_ids)
}

async fn link_tags<C>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if tag_ids.is_empty() {
        return Ok(());
    }

    PostTag::insert_many(tag_ids.iter().map(|&tag_id| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    }))
    .exec_without_returning(db)
    .await?;

    Ok(())
}
