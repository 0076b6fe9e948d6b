//! Core library for the rust_gencam camera control stack.
//!
//! This library drives a USB machine-vision camera through a register-style
//! device seam ([`genapi::NodeMap`]): one-shot startup parameterization,
//! auto-exposure/auto-gain limit seeding, and a hardware exposure sequencer
//! programmed from an ordered list of exposure times. An emulated device
//! ([`genapi::mock::MockDevice`]) stands in for the vendor transport, so the
//! full protocol is exercisable without a camera attached.

pub mod camera;
pub mod config;
pub mod error;
pub mod genapi;
