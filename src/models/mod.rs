//! Data models for the CodexMind content site.
//!
//! Field names serialize in camelCase to match the site's client contract.

mod article;
mod category;
mod contact;
mod library;
mod preferences;
mod search;

pub use article::*;
pub use category::*;
pub use contact::*;
pub use library::*;
pub use preferences::*;
pub use search::*;
