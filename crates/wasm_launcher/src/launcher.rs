use std::io::Write;
use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;
use wasmi::Config;
use wasmi::Engine;
use wasmi::Func;
use wasmi::Instance;
use wasmi::Linker;
use wasmi::Module;
use wasmi::Store;
use wasmi::StoreLimitsBuilder;
use wasmi::Val;
use wasmi::ValType;

use crate::host::register_natives;
use crate::host::HostState;
use crate::LaunchConfig;
use crate::LaunchError;

/// Result of the single entry point call.
///
/// A trap is not a launch failure: the runtime's message is handed back so
/// the caller can print it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    Returned(Vec<i32>),
    Trapped(String),
}

/// One runtime instance: engine, store (with the heap limit) and a linker that
/// already carries the native callbacks.
pub struct Launcher {
    engine: Engine,
    store: Store<HostState>,
    linker: Linker<HostState>,
}

impl Launcher {
    pub fn new(config: &LaunchConfig) -> Result<Self, LaunchError> {
        let mut wasm_config = Config::default();
        wasm_config.set_max_recursion_depth(config.max_recursion_depth());
        let engine = Engine::new(&wasm_config);

        let limits = StoreLimitsBuilder::new()
            .memory_size(config.heap_size as usize)
            .build();
        let mut store = Store::new(&engine, HostState::new(limits, config.echo_host_output));
        store.limiter(|host| &mut host.limits);

        let mut linker = Linker::new(&engine);
        register_natives(&mut linker)?;

        info!(
            stack_size = config.stack_size,
            heap_size = config.heap_size,
            "wasm runtime initialized"
        );
        Ok(Self {
            engine,
            store,
            linker,
        })
    }

    pub fn load_file(&self, path: &Path) -> Result<Module, LaunchError> {
        let bytes = std::fs::read(path).map_err(|source| LaunchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), len = bytes.len(), "read module");
        self.load_bytes(&bytes)
    }

    /// Parses and validates `bytes`. Truncated or corrupt input is reported
    /// as [`LaunchError::Load`] with the runtime's diagnostic.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Module, LaunchError> {
        Module::new(&self.engine, bytes).map_err(|e| LaunchError::Load(e.to_string()))
    }

    pub fn instantiate(&mut self, module: &Module) -> Result<Instance, LaunchError> {
        self.linker
            .instantiate_and_start(&mut self.store, module)
            .map_err(|e| LaunchError::Instantiate(e.to_string()))
    }

    /// Finds an exported function. Non-function exports count as missing.
    pub fn lookup(&self, instance: &Instance, entry: &str) -> Result<Func, LaunchError> {
        instance
            .get_func(&self.store, entry)
            .ok_or_else(|| LaunchError::EntryNotFound(entry.to_owned()))
    }

    pub fn call(
        &mut self,
        instance: &Instance,
        entry: &str,
        args: &[i32],
    ) -> Result<CallOutcome, LaunchError> {
        let func = self.lookup(instance, entry)?;
        self.invoke(func, entry, args)
    }

    /// Calls `func` once with `args`.
    ///
    /// Extra arguments are dropped. Too few arguments, or a signature that is
    /// not all `i32`, fails the call like a trap would: the outcome carries
    /// the message and the launch itself still succeeds.
    pub fn invoke(&mut self, func: Func, entry: &str, args: &[i32]) -> Result<CallOutcome, LaunchError> {
        let ty = func.ty(&self.store);
        let wanted = ty.params().len();
        if args.len() < wanted {
            warn!(entry, wanted, given = args.len(), "too few arguments for entry point");
            return Ok(CallOutcome::Trapped(format!(
                "entry point `{entry}` expects {wanted} argument(s), got {}",
                args.len()
            )));
        }
        let all_i32 = |types: &[ValType]| types.iter().all(|ty| *ty == ValType::I32);
        if !all_i32(ty.params()) || !all_i32(ty.results()) {
            warn!(entry, ?ty, "entry point is not an i32 function");
            return Ok(CallOutcome::Trapped(format!(
                "entry point `{entry}` has signature {ty:?}, only i32 parameters and results are supported"
            )));
        }

        let args = &args[..wanted];
        let inputs: Vec<Val> = args.iter().map(|&arg| Val::I32(arg)).collect();
        let mut outputs = vec![Val::I32(0); ty.results().len()];
        info!(entry, ?args, "calling entry point");
        match func.call(&mut self.store, &inputs, &mut outputs) {
            Ok(()) => Ok(CallOutcome::Returned(
                outputs.iter().filter_map(Val::i32).collect(),
            )),
            Err(error) => {
                warn!(entry, %error, "entry point trapped");
                Ok(CallOutcome::Trapped(error.to_string()))
            }
        }
    }

    pub fn host_output(&self) -> &[String] {
        self.store.data().output()
    }
}

/// Loads `path` with the default budgets and calls `entry` once.
pub fn run(path: &Path, entry: &str, args: &[i32]) -> Result<CallOutcome, LaunchError> {
    let config = LaunchConfig {
        entry: entry.to_owned(),
        args: args.to_vec(),
        ..LaunchConfig::default()
    };
    run_with(&config, path)
}

pub fn run_with(config: &LaunchConfig, path: &Path) -> Result<CallOutcome, LaunchError> {
    let mut launcher = Launcher::new(config)?;
    let module = launcher.load_file(path)?;
    let instance = launcher.instantiate(&module)?;
    launcher.call(&instance, &config.entry, &config.args)
}

/// Runs the launch end to end and writes the console transcript to `out`:
/// `call <entry>`, then either `<entry> function return: <v>` or the trap
/// message. A trapped call is still a successful launch.
pub fn launch(config: &LaunchConfig, path: &Path, out: &mut impl Write) -> Result<CallOutcome, LaunchError> {
    let mut launcher = Launcher::new(config)?;
    let module = launcher.load_file(path)?;
    let instance = launcher.instantiate(&module)?;
    let func = launcher.lookup(&instance, &config.entry)?;

    writeln!(out, "call {}", config.entry).map_err(LaunchError::Output)?;
    let outcome = launcher.invoke(func, &config.entry, &config.args)?;
    let written = match &outcome {
        CallOutcome::Returned(values) => {
            let rendered: Vec<String> = values.iter().map(i32::to_string).collect();
            writeln!(out, "{} function return: {}", config.entry, rendered.join(", "))
        }
        CallOutcome::Trapped(message) => writeln!(out, "{message}"),
    };
    written.map_err(LaunchError::Output)?;
    Ok(outcome)
}
