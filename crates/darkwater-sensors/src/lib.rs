//! Sensor model for DARKWATER: the emitted-noise engine, line-of-sight
//! occlusion, and the three detection channels (ambient, passive, active).
//!
//! Everything here is a pure function of current state. The contacts and
//! ping systems in darkwater-sim decide when and for whom the channels run.

pub mod detect;
pub mod los;
pub mod noise;
