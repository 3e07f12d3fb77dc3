pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod git;
pub mod io;
pub mod paths;
pub mod phase;
pub mod progress;
pub mod rollup;
pub mod slug;
pub mod status;
pub mod templates;

pub use error::{KitError, Result};
