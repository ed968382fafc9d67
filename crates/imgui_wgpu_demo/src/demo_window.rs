use imgui::Condition;
use imgui::Ui;

use crate::ui_state::UiState;

/// Builds this frame's windows from `state`.
pub fn build_ui(ui: &Ui, state: &mut UiState) {
    if state.show_demo_window {
        ui.show_demo_window(&mut state.show_demo_window);
    }

    ui.window("Hello, world!")
        .size([400.0, 220.0], Condition::FirstUseEver)
        .build(|| {
            ui.text("This is some useful text.");
            ui.checkbox("Demo Window", &mut state.show_demo_window);
            ui.checkbox("Another Window", &mut state.show_another_window);

            ui.slider("float", 0.0, 1.0, &mut state.value);
            ui.color_edit3("clear color", &mut state.clear_color);

            if ui.button("Button") {
                state.click();
            }
            ui.same_line();
            ui.text(format!("counter = {}", state.counter));

            let framerate = ui.io().framerate;
            ui.text(format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                1000.0 / framerate,
                framerate
            ));
        });

    if state.show_another_window {
        let mut open = true;
        ui.window("Another Window").opened(&mut open).build(|| {
            ui.text("Hello from another window!");
            if ui.button("Close Me") {
                state.show_another_window = false;
            }
        });
        if !open {
            state.show_another_window = false;
        }
    }
}
