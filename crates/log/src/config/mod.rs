//! Configuration types
//!
//! - `base`: [`Config`], [`Format`], [`Level`]
//! - `writer`: output destination and display toggles
//! - `fields`: global fields
//! - `presets`: development, production and environment-driven setups

mod base;
mod fields;
mod presets;
mod writer;

pub use base::{Config, Format, Level};
pub use fields::Fields;
pub use writer::{DisplayConfig, WriterConfig};
