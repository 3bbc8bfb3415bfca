//! Physics for DARKWATER: velocity/position integration and rectangle
//! collision resolution.
//!
//! Pure functions over core types, no ECS dependency. The movement system in
//! darkwater-sim drives these each tick.

pub mod collide;
pub mod integrate;
