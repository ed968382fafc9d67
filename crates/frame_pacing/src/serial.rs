use tracing::debug;
use tracing::trace;

use crate::FenceValue;
use crate::GpuTimeline;

/// Signal-then-wait pacing: the CPU idles until each frame is done on the GPU.
///
/// Nothing overlaps, so a command allocator can be reset as soon as
/// [`SerialSubmitter::submit_and_wait`] returns.
pub struct SerialSubmitter<L: GpuTimeline> {
    timeline: L,
    next: FenceValue,
}

impl<L: GpuTimeline> SerialSubmitter<L> {
    pub fn new(timeline: L) -> Self {
        Self {
            timeline,
            next: FenceValue::FIRST,
        }
    }

    /// Signals the next fence value, bumps the target and blocks until the
    /// GPU reports it complete. Returns the value that was signalled.
    pub fn submit_and_wait(&mut self) -> Result<FenceValue, L::Error> {
        let fence = self.next;
        self.timeline.signal(fence)?;
        self.next = fence.next();
        trace!(%fence, "signalled");

        if self.timeline.wait_until_reached(fence)? {
            debug!(%fence, "waited for previous frame");
        }
        Ok(fence)
    }

    /// The value the next submission will signal.
    pub fn next_value(&self) -> FenceValue {
        self.next
    }

    pub fn timeline(&self) -> &L {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut L {
        &mut self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedTimeline;

    #[test]
    fn starts_at_one_and_counts_up() {
        let mut submitter = SerialSubmitter::new(SimulatedTimeline::new());
        assert_eq!(submitter.next_value(), FenceValue(1));
        assert_eq!(submitter.submit_and_wait().unwrap(), FenceValue(1));
        assert_eq!(submitter.submit_and_wait().unwrap(), FenceValue(2));
        assert_eq!(submitter.next_value(), FenceValue(3));
    }

    #[test]
    fn every_submission_is_waited_on() {
        let mut submitter = SerialSubmitter::new(SimulatedTimeline::new());
        for _ in 0..4 {
            let fence = submitter.submit_and_wait().unwrap();
            assert!(submitter.timeline().completed() >= fence);
            assert_eq!(submitter.timeline().outstanding(), 0);
        }
        assert_eq!(
            submitter.timeline().waits(),
            &[FenceValue(1), FenceValue(2), FenceValue(3), FenceValue(4)]
        );
    }

    #[test]
    fn no_wait_when_the_gpu_is_already_done() {
        let mut submitter = SerialSubmitter::new(SimulatedTimeline::eager());
        submitter.submit_and_wait().unwrap();
        assert!(submitter.timeline().waits().is_empty());
    }
}
