use tracing::error;
use tracing::info;

use super::sample::Sample;

pub fn on_destroy(sample: &mut Sample) {
    if let Some(resources) = &mut sample.resources {
        // Resources must not be released while the GPU may still reference them.
        match resources.frames.wait_idle() {
            Ok(fence) => info!(%fence, "gpu idle"),
            Err(e) => error!("Error waiting for GPU idle on destroy: {e}"),
        }
    }
    info!("Sample destroyed.");
}
