//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills these from
//! its embedded TOML file; anything missing keeps its default.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
