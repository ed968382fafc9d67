//! CPU/GPU frame pacing built on a monotonically increasing fence.
//!
//! [`SerialSubmitter`] signals and then waits for every frame before the next
//! one is recorded. [`FrameRing`] keeps up to N frames in flight and only
//! blocks when the slot it is about to reuse has not been retired yet.
//!
//! Both are written against [`GpuTimeline`], so the same pacing logic drives
//! a D3D12 fence or the [`SimulatedTimeline`] used in tests.

pub mod error;
pub mod fence_value;
pub mod ring;
pub mod serial;
pub mod simulated;
pub mod timeline;

pub use error::PacingError;
pub use fence_value::FenceValue;
pub use ring::FrameRing;
pub use serial::SerialSubmitter;
pub use simulated::SimulatedTimeline;
pub use timeline::GpuTimeline;
