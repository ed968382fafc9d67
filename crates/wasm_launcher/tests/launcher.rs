use std::io::Write;

use proptest::prelude::*;
use wasm_encoder::CodeSection;
use wasm_encoder::EntityType;
use wasm_encoder::ExportKind;
use wasm_encoder::ExportSection;
use wasm_encoder::Function;
use wasm_encoder::FunctionSection;
use wasm_encoder::ImportSection;
use wasm_encoder::Instruction;
use wasm_encoder::MemorySection;
use wasm_encoder::MemoryType;
use wasm_encoder::Module;
use wasm_encoder::TypeSection;
use wasm_encoder::ValType;
use wasm_launcher::launch;
use wasm_launcher::run;
use wasm_launcher::CallOutcome;
use wasm_launcher::LaunchConfig;
use wasm_launcher::LaunchError;
use wasm_launcher::Launcher;

fn quiet_config() -> LaunchConfig {
    LaunchConfig {
        echo_host_output: false,
        ..LaunchConfig::default()
    }
}

/// `wasm_main(a, b) = engine.foo_test(a, b) * 2`
fn calls_native_module() -> Vec<u8> {
    let mut module = Module::new();

    let mut types = TypeSection::new();
    types
        .ty()
        .function([ValType::I32, ValType::I32], [ValType::I32]);
    module.section(&types);

    let mut imports = ImportSection::new();
    imports.import("engine", "foo_test", EntityType::Function(0));
    module.section(&imports);

    let mut funcs = FunctionSection::new();
    funcs.function(0);
    module.section(&funcs);

    let mut exports = ExportSection::new();
    exports.export("wasm_main", ExportKind::Func, 1);
    module.section(&exports);

    let mut codes = CodeSection::new();
    let mut func = Function::new([]);
    func.instruction(&Instruction::LocalGet(0));
    func.instruction(&Instruction::LocalGet(1));
    func.instruction(&Instruction::Call(0));
    func.instruction(&Instruction::I32Const(2));
    func.instruction(&Instruction::I32Mul);
    func.instruction(&Instruction::End);
    codes.function(&func);
    module.section(&codes);

    module.finish()
}

/// A module with one memory and a `wasm_main: () -> i32` built from `body`.
fn nullary_main(body: &[Instruction<'_>], export_memory_as_main: bool) -> Vec<u8> {
    let mut module = Module::new();

    let mut types = TypeSection::new();
    types.ty().function([], [ValType::I32]);
    module.section(&types);

    let mut funcs = FunctionSection::new();
    funcs.function(0);
    module.section(&funcs);

    let mut memories = MemorySection::new();
    memories.memory(MemoryType {
        minimum: 1,
        maximum: None,
        memory64: false,
        shared: false,
        page_size_log2: None,
    });
    module.section(&memories);

    let mut exports = ExportSection::new();
    if export_memory_as_main {
        exports.export("wasm_main", ExportKind::Memory, 0);
    } else {
        exports.export("wasm_main", ExportKind::Func, 0);
    }
    module.section(&exports);

    let mut codes = CodeSection::new();
    let mut func = Function::new([]);
    for instruction in body {
        func.instruction(instruction);
    }
    func.instruction(&Instruction::End);
    codes.function(&func);
    module.section(&codes);

    module.finish()
}

fn launch_bytes(bytes: &[u8], entry: &str, args: &[i32]) -> Result<(CallOutcome, Vec<String>), LaunchError> {
    let mut launcher = Launcher::new(&quiet_config())?;
    let module = launcher.load_bytes(bytes)?;
    let instance = launcher.instantiate(&module)?;
    let outcome = launcher.call(&instance, entry, args)?;
    Ok((outcome, launcher.host_output().to_vec()))
}

#[test]
fn native_callback_is_linked_and_called() {
    let (outcome, output) = launch_bytes(&calls_native_module(), "wasm_main", &[8, 1]).unwrap();
    assert_eq!(outcome, CallOutcome::Returned(vec![18]));
    assert_eq!(output, vec!["a = 8".to_owned(), "b = 1".to_owned()]);
}

#[test]
fn run_reads_the_module_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&calls_native_module()).unwrap();

    let outcome = run(file.path(), "wasm_main", &[20, 22]).unwrap();
    assert_eq!(outcome, CallOutcome::Returned(vec![84]));
}

#[test]
fn missing_file_is_an_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&dir.path().join("absent.wasm"), "wasm_main", &[8, 1]).unwrap_err();
    assert!(matches!(err, LaunchError::Io { .. }));
    assert_eq!(err.exit_code(), -2);
}

#[test]
fn unknown_export_is_not_found() {
    let err = launch_bytes(&calls_native_module(), "main", &[8, 1]).unwrap_err();
    assert!(matches!(&err, LaunchError::EntryNotFound(name) if name == "main"));
    assert_eq!(err.exit_code(), -3);
}

#[test]
fn non_function_export_is_not_callable() {
    let bytes = nullary_main(&[Instruction::I32Const(0)], true);
    let err = launch_bytes(&bytes, "wasm_main", &[]).unwrap_err();
    assert!(matches!(err, LaunchError::EntryNotFound(_)));
}

#[test]
fn extra_default_arguments_are_dropped_for_a_nullary_entry() {
    let bytes = nullary_main(&[Instruction::I32Const(42)], false);
    let args = LaunchConfig::default().args;
    let (outcome, _) = launch_bytes(&bytes, "wasm_main", &args).unwrap();
    assert_eq!(outcome, CallOutcome::Returned(vec![42]));
}

#[test]
fn too_few_arguments_fail_the_call_not_the_launch() {
    let (outcome, output) = launch_bytes(&calls_native_module(), "wasm_main", &[1]).unwrap();
    assert!(matches!(&outcome, CallOutcome::Trapped(message) if message.contains("expects 2")));
    assert!(output.is_empty());
}

#[test]
fn non_i32_entry_fails_the_call_not_the_launch() {
    let mut module = Module::new();
    let mut types = TypeSection::new();
    types.ty().function([ValType::F64], [ValType::I32]);
    module.section(&types);
    let mut funcs = FunctionSection::new();
    funcs.function(0);
    module.section(&funcs);
    let mut exports = ExportSection::new();
    exports.export("wasm_main", ExportKind::Func, 0);
    module.section(&exports);
    let mut codes = CodeSection::new();
    let mut func = Function::new([]);
    func.instruction(&Instruction::I32Const(7));
    func.instruction(&Instruction::End);
    codes.function(&func);
    module.section(&codes);

    let (outcome, _) = launch_bytes(&module.finish(), "wasm_main", &[8, 1]).unwrap();
    assert!(matches!(outcome, CallOutcome::Trapped(_)));
}

fn module_on_disk(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

fn transcript(config: &LaunchConfig, path: &std::path::Path) -> (Result<CallOutcome, LaunchError>, String) {
    let mut out = Vec::new();
    let result = launch(config, path, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn launch_prints_the_call_and_the_return_value() {
    let file = module_on_disk(&calls_native_module());
    let (result, text) = transcript(&quiet_config(), file.path());
    assert_eq!(result.unwrap(), CallOutcome::Returned(vec![18]));
    assert_eq!(text, "call wasm_main\nwasm_main function return: 18\n");
}

#[test]
fn launch_prints_a_trap_and_still_succeeds() {
    let file = module_on_disk(&nullary_main(&[Instruction::Unreachable], false));
    let (result, text) = transcript(&quiet_config(), file.path());
    let Ok(CallOutcome::Trapped(message)) = result else {
        panic!("expected a trapped call, got {result:?}");
    };
    assert_eq!(text, format!("call wasm_main\n{message}\n"));
}

#[test]
fn launch_failures_print_nothing_and_carry_their_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let (result, text) = transcript(&quiet_config(), &dir.path().join("absent.wasm"));
    assert_eq!(result.unwrap_err().exit_code(), -2);
    assert!(text.is_empty());

    let file = module_on_disk(b"not a module");
    let (result, text) = transcript(&quiet_config(), file.path());
    assert_eq!(result.unwrap_err().exit_code(), -2);
    assert!(text.is_empty());

    let file = module_on_disk(&calls_native_module());
    let config = LaunchConfig {
        entry: "main".to_owned(),
        ..quiet_config()
    };
    let (result, text) = transcript(&config, file.path());
    assert_eq!(result.unwrap_err().exit_code(), -3);
    assert!(text.is_empty());
}

#[test]
fn trap_message_is_surfaced() {
    let bytes = nullary_main(&[Instruction::Unreachable], false);
    let (outcome, _) = launch_bytes(&bytes, "wasm_main", &[]).unwrap();
    assert!(matches!(outcome, CallOutcome::Trapped(message) if !message.is_empty()));
}

#[test]
fn unbounded_recursion_traps_instead_of_overflowing() {
    let bytes = nullary_main(&[Instruction::Call(0)], false);
    let (outcome, _) = launch_bytes(&bytes, "wasm_main", &[]).unwrap();
    assert!(matches!(outcome, CallOutcome::Trapped(_)));
}

#[test]
fn memory_growth_is_capped_by_the_heap_budget() {
    // 200 pages is well past the 8092 KiB heap budget.
    let bytes = nullary_main(&[Instruction::I32Const(200), Instruction::MemoryGrow(0)], false);
    let (outcome, _) = launch_bytes(&bytes, "wasm_main", &[]).unwrap();
    assert_eq!(outcome, CallOutcome::Returned(vec![-1]));

    let bytes = nullary_main(&[Instruction::I32Const(1), Instruction::MemoryGrow(0)], false);
    let (outcome, _) = launch_bytes(&bytes, "wasm_main", &[]).unwrap();
    assert_eq!(outcome, CallOutcome::Returned(vec![1]));
}

#[test]
fn garbage_is_a_load_failure() {
    let launcher = Launcher::new(&quiet_config()).unwrap();
    let err = launcher.load_bytes(b"definitely not wasm").unwrap_err();
    assert!(matches!(err, LaunchError::Load(_)));
    assert_eq!(err.exit_code(), -2);
}

#[test]
fn cutting_into_the_code_section_is_a_load_failure() {
    let bytes = calls_native_module();
    let launcher = Launcher::new(&quiet_config()).unwrap();
    let err = launcher.load_bytes(&bytes[..bytes.len() - 2]).unwrap_err();
    assert!(matches!(err, LaunchError::Load(_)));
}

proptest! {
    #[test]
    fn truncated_modules_never_panic(cut in 0usize..64) {
        let bytes = calls_native_module();
        let cut = cut.min(bytes.len());
        let launcher = Launcher::new(&quiet_config()).unwrap();
        match launcher.load_bytes(&bytes[..cut]) {
            Ok(_) | Err(LaunchError::Load(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupted_modules_never_panic(index in 0usize..64, value in any::<u8>()) {
        let mut bytes = calls_native_module();
        let index = index % bytes.len();
        bytes[index] = value;
        let launcher = Launcher::new(&quiet_config()).unwrap();
        match launcher.load_bytes(&bytes) {
            Ok(_) | Err(LaunchError::Load(_)) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
