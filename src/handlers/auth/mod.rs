// Account and session endpoints, one route handler per file.

pub mod session; // GET /api/auth/session
pub mod signin;  // POST /api/auth/signin
pub mod signout; // POST /api/auth/signout
pub mod signup;  // POST /api/auth/signup

pub use session::session_get;
pub use signin::signin_post;
pub use signout::signout_post;
pub use signup::signup_post;
