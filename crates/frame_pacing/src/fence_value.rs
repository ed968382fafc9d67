use std::fmt;

/// A point on the GPU timeline.
///
/// Zero means "nothing signalled yet"; the first value a queue signals is 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FenceValue(pub u64);

impl FenceValue {
    pub const ZERO: FenceValue = FenceValue(0);
    pub const FIRST: FenceValue = FenceValue(1);

    pub fn next(self) -> FenceValue {
        FenceValue(self.0 + 1)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FenceValue {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments_by_one() {
        assert_eq!(FenceValue::ZERO.next(), FenceValue::FIRST);
        assert_eq!(FenceValue(41).next(), FenceValue(42));
    }

    #[test]
    fn ordering_follows_the_counter() {
        assert!(FenceValue(3) > FenceValue(2));
        assert!(FenceValue::ZERO.is_zero());
        assert!(!FenceValue::FIRST.is_zero());
    }
}
