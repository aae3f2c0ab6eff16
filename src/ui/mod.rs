//! User Interface Module
//!
//! Rendering for the catalog editor pages. Presentation only: every widget
//! reads from [`crate::app::App`] and never mutates the catalog itself.

pub mod colors;
pub mod components;
pub mod editor;
pub mod generate;
pub mod help;
