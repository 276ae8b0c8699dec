// Two tiers: auth endpoints are public (they establish the session),
// memo endpoints sit behind the session guard.

pub mod auth;
pub mod memos;
