use tracing::debug;
use wasmi::Caller;
use wasmi::Linker;
use wasmi::StoreLimits;

use crate::LaunchError;

/// Import module name the native callbacks are registered under.
pub const NATIVE_MODULE: &str = "engine";
pub const FOO_TEST: &str = "foo_test";

/// Per-store host data.
pub struct HostState {
    pub(crate) limits: StoreLimits,
    output: Vec<String>,
    echo: bool,
}

impl HostState {
    pub fn new(limits: StoreLimits, echo: bool) -> Self {
        Self {
            limits,
            output: Vec::new(),
            echo,
        }
    }

    /// Lines the native callbacks printed, oldest first.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    fn emit(&mut self, line: String) {
        if self.echo {
            println!("{line}");
        }
        self.output.push(line);
    }
}

/// `engine.foo_test: (i32, i32) -> i32`. Prints both operands and returns their sum.
fn foo_native(mut caller: Caller<'_, HostState>, a: i32, b: i32) -> i32 {
    debug!(a, b, "foo_test called");
    let host = caller.data_mut();
    host.emit(format!("a = {a}"));
    host.emit(format!("b = {b}"));
    a.wrapping_add(b)
}

pub fn register_natives(linker: &mut Linker<HostState>) -> Result<(), LaunchError> {
    linker
        .func_wrap(NATIVE_MODULE, FOO_TEST, foo_native)
        .map_err(|e| LaunchError::RegisterNatives(e.to_string()))?;
    Ok(())
}
