//! Seams between the run logic and the outside world.

pub mod notify_api;
pub mod timeline_api;
