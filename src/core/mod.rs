//! Core business logic modules.

pub mod formatter;
pub mod genres;
pub mod handlers;
pub mod images;
