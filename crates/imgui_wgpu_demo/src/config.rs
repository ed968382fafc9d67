use tracing::warn;

pub const WINDOW_TITLE: &str = "Dear ImGui winit+wgpu example";
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);
pub const DEFAULT_FRAMES_IN_FLIGHT: u32 = 2;
pub const MAX_FRAMES_IN_FLIGHT: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Forwarded to the surface as `desired_maximum_frame_latency`.
    pub frames_in_flight: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_owned(),
            width: WINDOW_SIZE.0,
            height: WINDOW_SIZE.1,
            frames_in_flight: DEFAULT_FRAMES_IN_FLIGHT,
        }
    }
}

impl UiConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Only `-frames <n>` (or `/frames <n>`) is recognised.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            if !(arg.eq_ignore_ascii_case("-frames") || arg.eq_ignore_ascii_case("/frames")) {
                continue;
            }
            match args.next().map(|value| value.as_ref().parse::<u32>()) {
                Some(Ok(frames)) => config.frames_in_flight = frames.clamp(1, MAX_FRAMES_IN_FLIGHT),
                _ => warn!("-frames expects a number"),
            }
        }
        config
    }
}
