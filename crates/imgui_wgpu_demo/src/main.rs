pub mod app;
pub mod config;
pub mod demo_window;
pub mod gpu;
pub mod ui_state;

use tracing::info;
use winit::event_loop::ControlFlow;
use winit::event_loop::EventLoop;

use crate::app::App;
use crate::config::UiConfig;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();

    let config = UiConfig::from_env();
    info!(?config, "starting imgui demo");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    app.finish()
}
