//! # pinboard-core
//!
//! Foundation types for the Pinboard research canvas.
//!
//! This crate provides the shared vocabulary the other Pinboard crates
//! depend on:
//!
//! - **Branded IDs**: [`ids::ProjectId`], [`ids::ItemId`] as newtypes
//! - **Errors**: [`errors::StoreError`] and [`errors::PersistError`] via `thiserror`
//! - **Geometry**: [`geometry::clamp_position`] and [`geometry::DragSession`]
//!   for canvas placement
//! - **Text**: [`text::truncate_str`] and [`text::excerpt_chars`] truncation
//!   helpers
//! - **Logging**: [`logging::init_subscriber`] tracing setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `pinboard-canvas` and
//! `pinboard-providers`.

#![deny(unsafe_code)]

pub mod errors;
pub mod geometry;
pub mod ids;
pub mod logging;
pub mod text;
