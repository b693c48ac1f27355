//! Audio capture interfaces and per-frame analysis.

pub mod capture;
pub mod energy;
pub mod frame;

pub use capture::{FrameSource, MockFrameSource, ScriptPhase};
pub use energy::rms;
pub use frame::Frame;
