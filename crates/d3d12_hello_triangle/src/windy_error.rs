use frame_pacing::PacingError;

pub type MyResult<T, E = MyReport> = core::result::Result<T, E>;

/// Report type for everything above the raw Win32 calls.
///
/// `windows::core::Error` and frame pacing failures both convert into it, so
/// sample code can mix the two with `?`.
pub struct MyReport {
    inner: eyre::Report,
}

impl MyReport {
    pub fn into_inner(self) -> eyre::Report {
        self.inner
    }
}

impl From<eyre::Report> for MyReport {
    fn from(report: eyre::Report) -> Self {
        Self { inner: report }
    }
}

impl From<MyReport> for eyre::Report {
    fn from(report: MyReport) -> Self {
        report.inner
    }
}

impl std::fmt::Display for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::fmt::Debug for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

impl From<windows::core::Error> for MyReport {
    fn from(error: windows::core::Error) -> Self {
        Self {
            inner: eyre::Report::new(WrappedWindowsError::from(error)),
        }
    }
}

impl From<PacingError<windows::core::Error>> for MyReport {
    fn from(error: PacingError<windows::core::Error>) -> Self {
        match error {
            PacingError::Timeline(error) => Self::from(error),
            other => Self {
                inner: eyre::Report::new(other),
            },
        }
    }
}

pub struct WrappedWindowsError {
    inner: windows::core::Error,
}

impl From<windows::core::Error> for WrappedWindowsError {
    fn from(error: windows::core::Error) -> Self {
        Self { inner: error }
    }
}

impl std::error::Error for WrappedWindowsError {}

impl std::fmt::Display for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#010X})", self.inner.message(), self.inner.code().0)
    }
}

impl std::fmt::Debug for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
