pub mod prelude;

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
