//! Typed bodies for every form the site accepts.
//!
//! Fields are trimmed; a blank field counts as missing.

use crate::error::AppError;
use blogly_service::{PostInput, UserInput};
use entity::user::NAME_MAX_LEN;
use serde::Deserialize;

fn required(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    optional(value).ok_or(AppError::MissingField(field))
}

fn name(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    let value = required(field, value)?;
    if value.chars().count() > NAME_MAX_LEN {
        return Err(AppError::TooLong {
            field,
            max: NAME_MAX_LEN,
        });
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Deserialize, Debug, Default)]
pub struct NewUserForm {
    #[serde(rename = "first-name")]
    pub first_name: Option<String>,
    #[serde(rename = "last-name")]
    pub last_name: Option<String>,
    #[serde(rename = "image-url")]
    pub image_url: Option<String>,
}

impl NewUserForm {
    pub fn validate(self) -> Result<UserInput, AppError> {
        Ok(UserInput {
            first_name: name("first-name", self.first_name)?,
            last_name: name("last-name", self.last_name)?,
            image_url: optional(self.image_url),
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EditUserForm {
    #[serde(rename = "first-name-edit")]
    pub first_name: Option<String>,
    #[serde(rename = "last-name-edit")]
    pub last_name: Option<String>,
    #[serde(rename = "image-url-edit")]
    pub image_url: Option<String>,
}

impl EditUserForm {
    pub fn validate(self) -> Result<UserInput, AppError> {
        Ok(UserInput {
            first_name: name("first-name-edit", self.first_name)?,
            last_name: name("last-name-edit", self.last_name)?,
            image_url: optional(self.image_url),
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct NewTagForm {
    #[serde(rename = "tag-name")]
    pub name: Option<String>,
}

impl NewTagForm {
    pub fn validate(self) -> Result<String, AppError> {
        required("tag-name", self.name)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EditTagForm {
    #[serde(rename = "tag-name-edit")]
    pub name: Option<String>,
}

impl EditTagForm {
    pub fn validate(self) -> Result<String, AppError> {
        required("tag-name-edit", self.name)
    }
}

/// Post create/edit body. `tag-name` repeats once per checked tag, so it is
/// collected from the raw urlencoded pairs rather than a serde struct.
#[derive(Debug, PartialEq, Eq)]
pub struct PostForm {
    pub input: PostInput,
    pub tag_names: Vec<String>,
}

const TAG_NAME_FIELD: &str = "tag-name";

impl PostForm {
    pub fn new_post(fields: Vec<(String, String)>) -> Result<Self, AppError> {
        Self::from_fields(fields, "title", "content")
    }

    pub fn edit_post(fields: Vec<(String, String)>) -> Result<Self, AppError> {
        Self::from_fields(fields, "title-edit", "content-edit")
    }

    fn from_fields(
        fields: Vec<(String, String)>,
        title_field: &'static str,
        content_field: &'static str,
    ) -> Result<Self, AppError> {
        let mut title = None;
        let mut content = None;
        let mut tag_names = Vec::new();

        for (key, value) in fields {
            if key == title_field {
                title = Some(value);
            } else if key == content_field {
                content = Some(value);
            } else if key == TAG_NAME_FIELD {
                tag_names.extend(optional(Some(value)));
            }
        }

        Ok(Self {
            input: PostInput {
                title: required(title_field, title)?,
                content: required(content_field, content)?,
            },
            tag_names,
        })
    }
}
