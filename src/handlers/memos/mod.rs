// Memo CRUD, one file per route shape. All handlers read the caller from
// the SessionUser extension; the guard middleware has already rejected
// unauthenticated requests by the time these run.

pub mod collection; // GET/POST /api/memos
pub mod item;       // GET/PUT/DELETE /api/memos/:id
pub mod utils;

pub use collection::{memos_get, memos_post};
pub use item::{memo_delete, memo_get, memo_put};
