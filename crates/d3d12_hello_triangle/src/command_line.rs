use tracing::warn;

pub const DEFAULT_FRAMES_IN_FLIGHT: u32 = 2;
// Flip-model swap chains need at least two buffers.
pub const MIN_FRAMES_IN_FLIGHT: u32 = 2;
pub const MAX_FRAMES_IN_FLIGHT: u32 = 3;

/// Command line arguments for sample initialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleCommandLine {
    pub use_warp_device: bool,
    pub frames_in_flight: u32,
}

impl Default for SampleCommandLine {
    fn default() -> Self {
        Self {
            use_warp_device: false,
            frames_in_flight: DEFAULT_FRAMES_IN_FLIGHT,
        }
    }
}

/// Builds a SampleCommandLine from the process arguments
pub fn build_command_line() -> SampleCommandLine {
    parse_command_line(std::env::args().skip(1))
}

/// Accepts `-warp` and `-frames <n>`, with `/` also allowed as the prefix.
pub fn parse_command_line<I, S>(args: I) -> SampleCommandLine
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut command_line = SampleCommandLine::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if is_switch(arg, "warp") {
            command_line.use_warp_device = true;
        } else if is_switch(arg, "frames") {
            match args.next().map(|value| value.as_ref().parse::<u32>()) {
                Some(Ok(frames)) => {
                    let clamped = frames.clamp(MIN_FRAMES_IN_FLIGHT, MAX_FRAMES_IN_FLIGHT);
                    if clamped != frames {
                        warn!(requested = frames, used = clamped, "frames in flight out of range");
                    }
                    command_line.frames_in_flight = clamped;
                }
                _ => warn!("-frames expects a number, keeping {}", command_line.frames_in_flight),
            }
        }
    }

    command_line
}

fn is_switch(arg: &str, name: &str) -> bool {
    arg.strip_prefix('-')
        .or_else(|| arg.strip_prefix('/'))
        .is_some_and(|rest| rest.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_command_line(empty), SampleCommandLine::default());
    }

    #[test]
    fn warp_switch_accepts_both_prefixes_and_any_case() {
        assert!(parse_command_line(["-warp"]).use_warp_device);
        assert!(parse_command_line(["/WARP"]).use_warp_device);
        assert!(!parse_command_line(["warp"]).use_warp_device);
    }

    #[test]
    fn frames_are_clamped() {
        assert_eq!(parse_command_line(["-frames", "3"]).frames_in_flight, 3);
        assert_eq!(parse_command_line(["-frames", "1"]).frames_in_flight, 2);
        assert_eq!(parse_command_line(["/frames", "8"]).frames_in_flight, 3);
    }

    #[test]
    fn bad_frame_count_keeps_the_default() {
        let command_line = parse_command_line(["-frames", "many", "-warp"]);
        assert_eq!(command_line.frames_in_flight, DEFAULT_FRAMES_IN_FLIGHT);
        // "-warp" was consumed as the bad value.
        assert!(!command_line.use_warp_device);
    }
}
