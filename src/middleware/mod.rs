pub mod session;

pub use session::{require_session, SessionUser};
