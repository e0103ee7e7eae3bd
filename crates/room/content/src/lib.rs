//! Data-driven room definitions and loaders.
//!
//! This crate houses authored room content and provides loaders for RON/TOML
//! room files. Content is consumed by the session runtime and never appears
//! in live room state.
//!
//! All loaders use room-core types directly with serde for RON/TOML
//! deserialization, and validate the dependency graph before handing the
//! configuration out.

pub mod catalog;
pub mod loaders;

pub use catalog::builtin_rooms;
pub use loaders::RoomLoader;
