use ::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

/// Creates any missing table for the blog entities.
///
/// Tables are created parents first so that foreign keys resolve on every backend.
/// Existing tables are left untouched; there is no migration step.
pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    for mut stmt in [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Tag),
        schema.create_table_from_entity(Post),
        schema.create_table_from_entity(PostTag),
    ] {
        stmt.if_not_exists();
        db.execute(&stmt).await?;
    }

    Ok(())
}
