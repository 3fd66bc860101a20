//! Time subsystem.
//!
//! Provides the elapsed-time gate that paces update/composite work, kept
//! free of runtime coupling so gating is testable with injected instants.

mod frame_gate;

pub use frame_gate::FrameGate;
