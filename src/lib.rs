//! Serves "N days without incident" PNG cards over HTTP.
//!
//! A card shows either a literal day count or the days elapsed since an
//! incident date in a given timezone. Preview pages carry Open Graph tags
//! pointing at the matching PNG.

pub mod config;
pub mod error;
pub mod monitoring;
pub mod pages;
pub mod render;
pub mod routes;
pub mod server;
pub mod time;
