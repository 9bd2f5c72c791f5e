// src/core/mod.rs
pub mod environment;
pub mod gate;
pub mod messages;
pub mod version;
