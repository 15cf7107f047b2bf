#![no_std]

//! # Editor Core
//!
//! Bounded text fields for a character-LCD calculator.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Fixed-capacity buffers, `alloc` only for snapshots
//! - **Deterministic**: Same key trace => same field state
//! - **Mechanism over policy**: Fields edit bytes; modes decide which key does what
//! - **Render on request**: Edits never touch the display, `refresh` does
//!
//! ## Design
//!
//! The core provides:
//! - Field: bounded byte buffer with cursor and scroll-window rendering
//! - ExprField: token-aware variant that treats `sin(` as one position
//! - unit: the atomic-span helper shared by motion and deletion
//! - FieldSnapshot: Deterministic state for testing

extern crate alloc;

pub mod buffer;
pub mod expr_field;
pub mod snapshot;
pub mod unit;

pub use buffer::{Field, FieldGeometry};
pub use expr_field::{ExprField, EXPR_CAPACITY, EXPR_GEOMETRY};
pub use snapshot::FieldSnapshot;
pub use unit::{unit_at, unit_before};
