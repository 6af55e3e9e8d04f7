#![forbid(unsafe_code)]

//! Primitives for the sortable drag-to-reorder engine.
//!
//! This crate holds the pieces with no engine state: viewport geometry,
//! the normalized pointer input model, and the engine configuration.
//! The engine itself lives in `sortable-engine`.

pub mod config;
pub mod geometry;
pub mod pointer;

pub use config::SortableConfig;
pub use geometry::{Axis, Point, Rect};
pub use pointer::{PointerEvent, PointerPhase, PointerSample};
