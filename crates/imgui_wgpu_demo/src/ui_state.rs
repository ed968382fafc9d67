/// Widget state that outlives a single UI frame.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub show_demo_window: bool,
    pub show_another_window: bool,
    pub value: f32,
    pub clear_color: [f32; 3],
    pub clear_alpha: f32,
    pub counter: u32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_demo_window: true,
            show_another_window: false,
            value: 0.0,
            clear_color: [0.45, 0.55, 0.60],
            clear_alpha: 1.0,
            counter: 0,
        }
    }
}

impl UiState {
    pub fn click(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    /// The clear color with alpha premultiplied into RGB.
    pub fn premultiplied_clear_color(&self) -> [f64; 4] {
        let a = self.clear_alpha as f64;
        let [r, g, b] = self.clear_color.map(|c| c as f64 * a);
        [r, g, b, a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_is_premultiplied() {
        let state = UiState {
            clear_color: [1.0, 0.5, 0.25],
            clear_alpha: 0.5,
            ..UiState::default()
        };
        assert_eq!(state.premultiplied_clear_color(), [0.5, 0.25, 0.125, 0.5]);
    }

    #[test]
    fn opaque_default_clear_color_is_unchanged() {
        let [r, g, b, a] = UiState::default().premultiplied_clear_color();
        assert!((r - 0.45).abs() < 1e-6);
        assert!((g - 0.55).abs() < 1e-6);
        assert!((b - 0.60).abs() < 1e-6);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn clicks_count_up() {
        let mut state = UiState::default();
        state.click();
        state.click();
        assert_eq!(state.counter, 2);
    }
}
