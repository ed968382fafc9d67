use thiserror::Error;

use crate::FenceValue;
use crate::GpuTimeline;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulatedError {
    #[error("fence value {value} does not exceed the last signalled value {last}")]
    NonMonotonicSignal { value: FenceValue, last: FenceValue },
    #[error("waiting for {target} would never return, the last signalled value is {last}")]
    NeverSignalled { target: FenceValue, last: FenceValue },
}

/// In-process stand-in for a queue and fence.
///
/// The simulated GPU makes no progress on its own: work is retired by
/// [`SimulatedTimeline::retire`] or by a blocking `wait_for`, which models
/// the CPU sleeping until the GPU catches up. Every signal and wait is
/// recorded so callers can check the ordering they produced.
#[derive(Debug, Default)]
pub struct SimulatedTimeline {
    last_signalled: FenceValue,
    completed: FenceValue,
    signals: Vec<FenceValue>,
    waits: Vec<FenceValue>,
    retire_on_signal: bool,
}

impl SimulatedTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline whose GPU finishes every submission as soon as it is signalled.
    pub fn eager() -> Self {
        Self {
            retire_on_signal: true,
            ..Self::default()
        }
    }

    /// Lets the GPU make progress up to `upto`, clamped to what was signalled.
    pub fn retire(&mut self, upto: FenceValue) {
        let reachable = upto.min(self.last_signalled);
        self.completed = self.completed.max(reachable);
    }

    pub fn retire_all(&mut self) {
        self.completed = self.last_signalled;
    }

    pub fn last_signalled(&self) -> FenceValue {
        self.last_signalled
    }

    /// Submissions signalled but not yet retired.
    pub fn outstanding(&self) -> u64 {
        self.last_signalled.0 - self.completed.0
    }

    pub fn signals(&self) -> &[FenceValue] {
        &self.signals
    }

    /// Fence values the CPU actually blocked on.
    pub fn waits(&self) -> &[FenceValue] {
        &self.waits
    }
}

impl GpuTimeline for SimulatedTimeline {
    type Error = SimulatedError;

    fn signal(&mut self, value: FenceValue) -> Result<(), Self::Error> {
        if value <= self.last_signalled {
            return Err(SimulatedError::NonMonotonicSignal {
                value,
                last: self.last_signalled,
            });
        }
        self.last_signalled = value;
        self.signals.push(value);
        if self.retire_on_signal {
            self.completed = value;
        }
        Ok(())
    }

    fn completed(&self) -> FenceValue {
        self.completed
    }

    fn wait_for(&mut self, value: FenceValue) -> Result<(), Self::Error> {
        if value > self.last_signalled {
            return Err(SimulatedError::NeverSignalled {
                target: value,
                last: self.last_signalled,
            });
        }
        self.waits.push(value);
        self.retire(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_must_strictly_increase() {
        let mut timeline = SimulatedTimeline::new();
        timeline.signal(FenceValue(1)).unwrap();
        let err = timeline.signal(FenceValue(1)).unwrap_err();
        assert_eq!(
            err,
            SimulatedError::NonMonotonicSignal {
                value: FenceValue(1),
                last: FenceValue(1)
            }
        );
    }

    #[test]
    fn waiting_past_the_last_signal_is_rejected() {
        let mut timeline = SimulatedTimeline::new();
        timeline.signal(FenceValue(1)).unwrap();
        assert!(matches!(
            timeline.wait_for(FenceValue(2)),
            Err(SimulatedError::NeverSignalled { .. })
        ));
    }

    #[test]
    fn retire_is_clamped_to_signalled_work() {
        let mut timeline = SimulatedTimeline::new();
        timeline.signal(FenceValue(3)).unwrap();
        timeline.retire(FenceValue(10));
        assert_eq!(timeline.completed(), FenceValue(3));
        assert_eq!(timeline.outstanding(), 0);
    }

    #[test]
    fn eager_timeline_never_blocks() {
        let mut timeline = SimulatedTimeline::eager();
        timeline.signal(FenceValue(1)).unwrap();
        assert!(!timeline.wait_until_reached(FenceValue(1)).unwrap());
        assert!(timeline.waits().is_empty());
    }
}
