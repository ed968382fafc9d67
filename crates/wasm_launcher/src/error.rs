use std::path::PathBuf;

use thiserror::Error;

pub const EXIT_REGISTER_NATIVES: i32 = -1;
pub const EXIT_OPEN_MODULE: i32 = -2;
pub const EXIT_ENTRY_NOT_FOUND: i32 = -3;
pub const EXIT_OUTPUT: i32 = 1;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to register native symbols: {0}")]
    RegisterNatives(String),
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load module: {0}")]
    Load(String),
    #[error("failed to instantiate module: {0}")]
    Instantiate(String),
    #[error("entry point `{0}` not found")]
    EntryNotFound(String),
    #[error("failed to write launch output")]
    Output(#[source] std::io::Error),
}

impl LaunchError {
    /// Process exit status for this failure.
    ///
    /// Anything that stops us from getting a module out of the file shares
    /// the open-failure code; anything that stops us from reaching the export
    /// shares the not-found code. A closed stdout is a plain failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::RegisterNatives(_) => EXIT_REGISTER_NATIVES,
            LaunchError::Io { .. } | LaunchError::Load(_) => EXIT_OPEN_MODULE,
            LaunchError::Instantiate(_) | LaunchError::EntryNotFound(_) => EXIT_ENTRY_NOT_FOUND,
            LaunchError::Output(_) => EXIT_OUTPUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_launch_stage() {
        assert_eq!(LaunchError::RegisterNatives("dup".into()).exit_code(), -1);
        let io = LaunchError::Io {
            path: PathBuf::from("missing.wasm"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(io.exit_code(), -2);
        assert_eq!(LaunchError::Load("bad magic".into()).exit_code(), -2);
        assert_eq!(LaunchError::EntryNotFound("wasm_main".into()).exit_code(), -3);
        let closed = LaunchError::Output(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(closed.exit_code(), 1);
    }

    #[test]
    fn io_error_names_the_path() {
        let io = LaunchError::Io {
            path: PathBuf::from("missing.wasm"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(io.to_string(), "failed to read missing.wasm");
    }
}
