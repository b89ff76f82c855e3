//! # Base types for rookery
//!
//! This is an auxiliary crate for `rookery`, which contains the plain value types: squares,
//! pieces, colors, castling rights and game outcomes. It has no knowledge of chess rules.
//!
//! Normally you don't want to use this crate directly. Use `rookery` instead, which re-exports
//! everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
