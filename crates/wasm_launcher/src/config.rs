pub const DEFAULT_STACK_SIZE: u32 = 8092;
pub const DEFAULT_HEAP_SIZE: u32 = 8092 * 1024;
pub const DEFAULT_ENTRY: &str = "wasm_main";
pub const DEFAULT_ARGS: [i32; 2] = [8, 1];

// Rough size of one interpreter call frame, used to turn the stack budget
// into a call depth limit.
const STACK_BYTES_PER_FRAME: usize = 32;

/// Budgets and call target for a single launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Execution stack budget in bytes.
    pub stack_size: u32,
    /// Upper bound on linear memory in bytes.
    pub heap_size: u32,
    pub entry: String,
    pub args: Vec<i32>,
    /// Print native callback output to stdout as well as recording it.
    pub echo_host_output: bool,
}

impl LaunchConfig {
    pub fn max_recursion_depth(&self) -> usize {
        (self.stack_size as usize / STACK_BYTES_PER_FRAME).max(1)
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            heap_size: DEFAULT_HEAP_SIZE,
            entry: DEFAULT_ENTRY.to_owned(),
            args: DEFAULT_ARGS.to_vec(),
            echo_host_output: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_launcher_constants() {
        let config = LaunchConfig::default();
        assert_eq!(config.stack_size, 8092);
        assert_eq!(config.heap_size, 8092 * 1024);
        assert_eq!(config.entry, "wasm_main");
        assert_eq!(config.args, vec![8, 1]);
    }

    #[test]
    fn tiny_stacks_still_allow_one_frame() {
        let config = LaunchConfig {
            stack_size: 1,
            ..LaunchConfig::default()
        };
        assert_eq!(config.max_recursion_depth(), 1);
    }
}
