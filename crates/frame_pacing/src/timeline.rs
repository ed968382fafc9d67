use crate::FenceValue;

/// The queue + fence pair a frame is paced against.
///
/// `signal` enqueues a GPU-side write of `value` behind all work submitted so
/// far. `wait_for` blocks the calling thread, with no timeout, until
/// `completed() >= value`.
pub trait GpuTimeline {
    type Error: std::error::Error + Send + Sync + 'static;

    fn signal(&mut self, value: FenceValue) -> Result<(), Self::Error>;

    fn completed(&self) -> FenceValue;

    fn wait_for(&mut self, value: FenceValue) -> Result<(), Self::Error>;

    /// Waits only if the GPU has not reached `value` yet. Returns whether it blocked.
    fn wait_until_reached(&mut self, value: FenceValue) -> Result<bool, Self::Error> {
        if self.completed() >= value {
            return Ok(false);
        }
        self.wait_for(value)?;
        Ok(true)
    }
}
