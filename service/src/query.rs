use ::entity::{post, prelude::*, tag, user};
use sea_orm::*;

/// A post together with everything its detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub post: post::Model,
    pub author: user::Model,
    pub tags: Vec<tag::Model>,
}

pub struct Query;

impl Query {
    pub async fn get_all_users(db: &DbConn) -> Result<Vec<user::Model>, DbErr> {
        User::find().order_by_asc(user::Column::Id).all(db).await
    }

    pub async fn find_user_by_id(db: &DbConn, id: i32) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(db).await
    }

    /// If found, returns the user and their posts in creation order.
    pub async fn find_user_with_posts(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<(user::Model, Vec<post::Model>)>, DbErr> {
        let Some(user) = User::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let posts = user
            .find_related(Post)
            .order_by_asc(post::Column::Id)
            .all(db)
            .await?;

        Ok(Some((user, posts)))
    }

    pub async fn find_posts_by_user(db: &DbConn, user_id: i32) -> Result<Vec<post::Model>, DbErr> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_post_by_id(db: &DbConn, id: i32) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id).one(db).await
    }

    pub async fn find_post_detail(db: &DbConn, id: i32) -> Result<Option<PostDetail>, DbErr> {
        let Some(post) = Post::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let author = post.find_related(User).one(db).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("author {} of post {}", post.user_id, post.id))
        })?;
        let tags = Self::find_tags_of_post(db, post.id).await?;

        Ok(Some(PostDetail { post, author, tags }))
    }

    pub async fn find_tags_of_post(db: &DbConn, post_id: i32) -> Result<Vec<tag::Model>, DbErr> {
        Tag::find()
            .inner_join(PostTag)
            .filter(::entity::post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await
    }

    pub async fn get_all_tags(db: &DbConn) -> Result<Vec<tag::Model>, DbErr> {
        Tag::find().order_by_asc(tag::Column::Id).all(db).await
    }

    pub async fn find_tag_by_id(db: &DbConn, id: i32) -> Result<Option<tag::Model>, DbErr> {
        Tag::find_by_id(id).one(db).await
    }

    /// If found, returns the tag and the posts carrying it.
    pub async fn find_tag_with_posts(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<(tag::Model, Vec<post::Model>)>, DbErr> {
        let Some(tag) = Tag::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let posts = tag
            .find_related(Post)
            .order_by_asc(post::Column::Id)
            .all(db)
            .await?;

        Ok(Some((tag, posts)))
    }

    /// Exact-name lookup. Ties resolve to the oldest tag.
    pub async fn find_tag_by_name<C>(db: &C, name: &str) -> Result<Option<tag::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Tag::find()
            .filter(tag::Column::Name.eq(name))
            .order_by_asc(tag::Column::Id)
            .one(db)
            .await
    }
}
