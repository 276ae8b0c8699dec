pub mod memo;
pub mod user;

pub use memo::Memo;
pub use user::User;
