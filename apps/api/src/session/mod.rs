// Client Controller — per-session state machine for the match flow.
// States: initial -> profile-capture -> matching -> results, with failure
// returning to profile-capture and reset discarding everything. Sessions
// live in memory only, with no persistence layer; an entry stays in the
// map until the client deletes it.

pub mod handlers;
pub mod machine;

// Re-export the public API consumed by AppState and main.
pub use machine::{Session, SessionState, SessionStore};
