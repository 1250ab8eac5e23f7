//! tensordraw Core Types
//!
//! This crate provides the foundational types for tensor-network diagrams:
//!
//! - **Geometry**: points, sizes and bounding boxes ([`geometry`] module)
//! - **Identifiers**: interned tensor names ([`identifier::Id`])
//! - **Legs**: sides, leg counts and leg placement ([`leg`] module)

pub mod geometry;
pub mod identifier;
pub mod leg;
