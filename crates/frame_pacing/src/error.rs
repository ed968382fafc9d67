use thiserror::Error;

#[derive(Debug, Error)]
pub enum PacingError<E>
where
    E: std::error::Error + 'static,
{
    #[error("a frame ring needs at least one slot")]
    EmptyRing,
    #[error("slot {index} is out of range for a ring of depth {depth}")]
    SlotOutOfRange { index: usize, depth: usize },
    #[error("gpu timeline failed")]
    Timeline(#[from] E),
}
