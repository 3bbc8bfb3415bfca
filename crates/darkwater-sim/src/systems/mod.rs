//! Systems run by the engine each tick, in the order listed in `engine.rs`.
//!
//! Systems are functions over `&mut World` plus the orchestrator-owned state
//! they need. They hold no state of their own.

pub mod acoustics;
pub mod ai;
pub mod contacts;
pub mod control;
pub mod expiry;
pub mod movement;
pub mod ping;
pub mod snapshot;
pub mod victory;
