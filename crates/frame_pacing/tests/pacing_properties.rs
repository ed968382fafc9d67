use frame_pacing::FenceValue;
use frame_pacing::FrameRing;
use frame_pacing::GpuTimeline;
use frame_pacing::SerialSubmitter;
use frame_pacing::SimulatedTimeline;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Frame,
    Retire(u64),
    RetireAll,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Frame),
        2 => (0u64..8).prop_map(Step::Retire),
        1 => Just(Step::RetireAll),
    ]
}

proptest! {
    #[test]
    fn slot_is_never_reused_before_its_fence_completes(
        depth in 1usize..5,
        steps in proptest::collection::vec(step(), 1..64),
    ) {
        let mut ring = FrameRing::new(SimulatedTimeline::new(), (0..depth).collect::<Vec<_>>()).unwrap();
        let mut last_fence_of_slot = vec![FenceValue::ZERO; depth];

        for step in steps {
            match step {
                Step::Frame => {
                    let slot = *ring.begin_frame().unwrap();
                    prop_assert!(ring.timeline().completed() >= last_fence_of_slot[slot]);
                    prop_assert!(ring.timeline().outstanding() < depth as u64);

                    let fence = ring.end_frame().unwrap();
                    last_fence_of_slot[slot] = fence;
                }
                Step::Retire(ahead) => {
                    let target = FenceValue(ring.timeline().completed().0 + ahead);
                    ring.timeline_mut().retire(target);
                }
                Step::RetireAll => ring.timeline_mut().retire_all(),
            }
        }

        ring.wait_idle().unwrap();
        prop_assert_eq!(ring.timeline().outstanding(), 0);
    }

    #[test]
    fn signalled_values_strictly_increase(depth in 1usize..5, frames in 1usize..40) {
        let mut ring = FrameRing::new(SimulatedTimeline::new(), vec![(); depth]).unwrap();
        for _ in 0..frames {
            ring.begin_frame().unwrap();
            ring.end_frame().unwrap();
        }
        let signals = ring.timeline().signals();
        prop_assert_eq!(signals.first().copied(), Some(FenceValue::FIRST));
        prop_assert!(signals.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn serial_wait_returns_only_after_completion(frames in 1usize..40, eager in any::<bool>()) {
        let timeline = if eager { SimulatedTimeline::eager() } else { SimulatedTimeline::new() };
        let mut submitter = SerialSubmitter::new(timeline);
        for _ in 0..frames {
            let fence = submitter.submit_and_wait().unwrap();
            prop_assert!(submitter.timeline().completed() >= fence);
        }
        prop_assert_eq!(submitter.next_value(), FenceValue(frames as u64 + 1));
    }
}

#[test]
fn deeper_rings_wait_less() {
    let waits_for_depth = |depth: usize| {
        let mut ring = FrameRing::new(SimulatedTimeline::new(), vec![(); depth]).unwrap();
        for frame in 0..12u64 {
            ring.begin_frame().unwrap();
            ring.end_frame().unwrap();
            // The GPU finishes one frame per CPU frame, two frames behind.
            ring.timeline_mut().retire(FenceValue(frame.saturating_sub(1)));
        }
        ring.timeline().waits().len()
    };

    assert!(waits_for_depth(1) > waits_for_depth(2));
    assert_eq!(waits_for_depth(3), 0);
}
