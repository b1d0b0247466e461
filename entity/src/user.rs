use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Placeholder avatar used when a user has no image of their own.
///
/// Must match the `default_value` of [`Column::ImageUrl`].
pub const DEFAULT_IMAGE_URL: &str = "https://merriam-webster.com/assets/mw/images/article/art-wap-article-main/egg-3442-e1f6463624338504cd021bf23aef8441@2x.jpg";

/// Longest first or last name the `users` table holds, in characters.
pub const NAME_MAX_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub last_name: String,
    #[sea_orm(
        column_type = "Text",
        default_value = "https://merriam-webster.com/assets/mw/images/article/art-wap-article-main/egg-3442-e1f6463624338504cd021bf23aef8441@2x.jpg"
    )]
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_column_default_is_the_placeholder() {
        assert_eq!(
            Column::ImageUrl.def(),
            ColumnType::Text.def().default_value(DEFAULT_IMAGE_URL)
        );
    }

    #[test]
    fn name_columns_hold_the_max_len() {
        let name_type = ColumnType::String(StringLen::N(NAME_MAX_LEN as u32));

        assert_eq!(Column::FirstName.def().get_column_type(), &name_type);
        assert_eq!(Column::LastName.def().get_column_type(), &name_type);
    }
}
