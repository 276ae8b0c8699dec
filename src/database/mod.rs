pub mod memos;
pub mod models;
pub mod users;

pub use models::{Memo, User};
