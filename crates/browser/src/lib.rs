//! A text-mode page viewer on top of `micro-fetch`.
//!
//! The binary fetches the url given on the command line and prints the body
//! with all markup removed. Logs go to stderr, see [`app::init_tracing`].

pub mod app;
pub mod args;
