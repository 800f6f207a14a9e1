//! Library exports for the kidsdraw canvas.
//!
//! The drawing model, input translation and export pipeline live here so that
//! any host (the `kidsdraw` binary, a toolkit front end, tests) can drive the
//! same canvas.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
