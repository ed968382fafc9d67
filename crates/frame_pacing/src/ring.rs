use tracing::debug;
use tracing::trace;

use crate::FenceValue;
use crate::GpuTimeline;
use crate::PacingError;

struct FrameSlot<T> {
    payload: T,
    // Fence value signalled after the last frame recorded with this slot.
    retire_at: FenceValue,
}

/// Bounded ring of per-frame resources with up to `depth` frames in flight.
///
/// Each slot owns whatever must not be touched while the GPU may still read
/// it (a command allocator, an upload buffer). [`FrameRing::begin_frame`]
/// hands the current slot back only once the fence value signalled after its
/// previous use has completed.
pub struct FrameRing<L: GpuTimeline, T> {
    timeline: L,
    slots: Vec<FrameSlot<T>>,
    index: usize,
    next: FenceValue,
}

impl<L: GpuTimeline, T> FrameRing<L, T> {
    pub fn new(timeline: L, payloads: Vec<T>) -> Result<Self, PacingError<L::Error>> {
        if payloads.is_empty() {
            return Err(PacingError::EmptyRing);
        }
        let slots = payloads
            .into_iter()
            .map(|payload| FrameSlot {
                payload,
                retire_at: FenceValue::ZERO,
            })
            .collect();
        Ok(Self {
            timeline,
            slots,
            index: 0,
            next: FenceValue::FIRST,
        })
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the ring to `index` without submitting anything.
    ///
    /// Used once after creation when the presentation engine, not the ring,
    /// decides which back buffer comes first.
    pub fn set_index(&mut self, index: usize) -> Result<(), PacingError<L::Error>> {
        self.check_index(index)?;
        self.index = index;
        Ok(())
    }

    pub fn last_signalled(&self) -> FenceValue {
        FenceValue(self.next.0 - 1)
    }

    /// Blocks until the current slot's previous frame is done on the GPU and
    /// returns its payload for reuse.
    pub fn begin_frame(&mut self) -> Result<&mut T, PacingError<L::Error>> {
        let slot = &mut self.slots[self.index];
        if !slot.retire_at.is_zero() && self.timeline.wait_until_reached(slot.retire_at)? {
            debug!(slot = self.index, fence = %slot.retire_at, "waited for frame slot");
        }
        Ok(&mut slot.payload)
    }

    /// Signals the end of the current frame and advances to the next slot.
    pub fn end_frame(&mut self) -> Result<FenceValue, PacingError<L::Error>> {
        let next_index = (self.index + 1) % self.slots.len();
        self.end_frame_at(next_index)
    }

    /// Like [`FrameRing::end_frame`], but the next slot is chosen by the
    /// caller, e.g. the swap chain's current back buffer.
    pub fn end_frame_at(&mut self, next_index: usize) -> Result<FenceValue, PacingError<L::Error>> {
        self.check_index(next_index)?;
        let fence = self.next;
        self.timeline.signal(fence)?;
        self.slots[self.index].retire_at = fence;
        self.next = fence.next();
        trace!(slot = self.index, %fence, next_slot = next_index, "frame submitted");
        self.index = next_index;
        Ok(fence)
    }

    /// Signals a fresh value and waits for it, draining every frame in flight.
    pub fn wait_idle(&mut self) -> Result<FenceValue, PacingError<L::Error>> {
        let fence = self.next;
        self.timeline.signal(fence)?;
        self.next = fence.next();
        if self.timeline.wait_until_reached(fence)? {
            debug!(%fence, "waited for gpu idle");
        }
        Ok(fence)
    }

    pub fn timeline(&self) -> &L {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut L {
        &mut self.timeline
    }

    fn check_index(&self, index: usize) -> Result<(), PacingError<L::Error>> {
        if index >= self.slots.len() {
            return Err(PacingError::SlotOutOfRange {
                index,
                depth: self.slots.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedTimeline;

    fn ring(depth: usize) -> FrameRing<SimulatedTimeline, usize> {
        FrameRing::new(SimulatedTimeline::new(), (0..depth).collect()).unwrap()
    }

    #[test]
    fn empty_ring_is_rejected() {
        let result = FrameRing::<SimulatedTimeline, ()>::new(SimulatedTimeline::new(), Vec::new());
        assert!(matches!(result, Err(PacingError::EmptyRing)));
    }

    #[test]
    fn first_pass_over_the_ring_never_blocks() {
        let mut ring = ring(3);
        for expected in 0..3 {
            assert_eq!(*ring.begin_frame().unwrap(), expected);
            ring.end_frame().unwrap();
        }
        assert!(ring.timeline().waits().is_empty());
        assert_eq!(ring.timeline().outstanding(), 3);
    }

    #[test]
    fn reusing_a_slot_waits_for_its_own_fence() {
        let mut ring = ring(2);
        ring.begin_frame().unwrap();
        ring.end_frame().unwrap(); // slot 0 -> 1
        ring.begin_frame().unwrap();
        ring.end_frame().unwrap(); // slot 1 -> 2

        ring.begin_frame().unwrap();
        assert_eq!(ring.timeline().waits(), &[FenceValue(1)]);
        assert_eq!(ring.timeline().completed(), FenceValue(1));
    }

    #[test]
    fn no_wait_once_the_gpu_caught_up() {
        let mut ring = ring(2);
        ring.begin_frame().unwrap();
        ring.end_frame().unwrap();
        ring.begin_frame().unwrap();
        ring.end_frame().unwrap();
        ring.timeline_mut().retire_all();

        ring.begin_frame().unwrap();
        assert!(ring.timeline().waits().is_empty());
    }

    #[test]
    fn depth_one_behaves_like_the_serial_submitter() {
        let mut ring = ring(1);
        for frame in 1..=3u64 {
            ring.begin_frame().unwrap();
            assert_eq!(ring.end_frame().unwrap(), FenceValue(frame));
        }
        assert_eq!(ring.timeline().waits(), &[FenceValue(1), FenceValue(2)]);
    }

    #[test]
    fn end_frame_at_follows_the_caller() {
        let mut ring = ring(3);
        ring.begin_frame().unwrap();
        ring.end_frame_at(2).unwrap();
        assert_eq!(ring.index(), 2);
        assert!(matches!(
            ring.end_frame_at(3),
            Err(PacingError::SlotOutOfRange { index: 3, depth: 3 })
        ));
    }

    #[test]
    fn wait_idle_drains_everything() {
        let mut ring = ring(3);
        for _ in 0..3 {
            ring.begin_frame().unwrap();
            ring.end_frame().unwrap();
        }
        let fence = ring.wait_idle().unwrap();
        assert_eq!(fence, FenceValue(4));
        assert_eq!(ring.timeline().outstanding(), 0);
        assert_eq!(ring.last_signalled(), FenceValue(4));
    }

    #[test]
    fn timeline_errors_are_wrapped() {
        let mut ring = ring(1);
        ring.timeline_mut().signal(FenceValue(5)).unwrap();
        assert!(matches!(ring.end_frame(), Err(PacingError::Timeline(_))));
    }
}
