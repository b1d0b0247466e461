use crate::error::AppError;
use axum::response::Redirect;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower_cookies::{Cookie, Cookies, Key};

#[derive(Deserialize)]
struct ValuedMessage<T> {
    #[serde(rename = "_")]
    value: T,
}

#[derive(Serialize)]
struct ValuedMessageRef<'a, T> {
    #[serde(rename = "_")]
    value: &'a T,
}

const FLASH_COOKIE_NAME: &str = "_flash";

/// One-shot notice shown on the page a POST redirects to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashData {
    pub kind: String,
    pub message: String,
}

impl FlashData {
    pub fn success(message: &str) -> Self {
        Self {
            kind: "success".to_owned(),
            message: message.to_owned(),
        }
    }
}

fn flash_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE_NAME, value);
    cookie.set_path("/");
    cookie
}

/// Reads the pending flash message and clears it, so it is shown only once.
///
/// Cookies with a bad signature or payload are dropped.
pub fn take_flash_cookie<T>(cookies: &Cookies, key: &Key) -> Option<T>
where
    T: DeserializeOwned,
{
    cookies.get(FLASH_COOKIE_NAME)?;

    let value = cookies
        .signed(key)
        .get(FLASH_COOKIE_NAME)
        .and_then(|verified| {
            serde_json::from_str::<ValuedMessage<T>>(verified.value())
                .ok()
                .map(|ValuedMessage { value }| value)
        });
    cookies.remove(flash_cookie(String::new()));

    value
}

/// Stores `data` as the next flash message and redirects to `location` with `303 See Other`.
pub fn post_response<T>(
    cookies: &Cookies,
    key: &Key,
    location: &str,
    data: T,
) -> Result<Redirect, AppError>
where
    T: Serialize,
{
    let valued_message_ref = ValuedMessageRef { value: &data };
    let cookie = flash_cookie(serde_json::to_string(&valued_message_ref)?);
    cookies.signed(key).add(cookie);

    Ok(Redirect::to(location))
}
