//! CLI command implementations.

use std::fs::File;
use std::io::BufReader;

use stackasm_common::Program;
use stackasm_vm::{Config, FramePolicy, VM};

/// Program run when `run` is given no input file.
pub const DEFAULT_PROGRAM: &str = "res/test.asm";

/// Load, resolve and execute a program, printing its result.
pub fn run(args: &[String]) -> Result<(), i32> {
    let options = parse_run_args(args)?;
    let program = read_program(&options.input)?;

    let frame_sizes = stackasm_resolver::resolve(&program).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;

    let mut vm = VM::new(&program, &frame_sizes, options.config);
    let trace = options.trace;
    let result = vm.execute_traced(|step| {
        if trace {
            eprintln!("trace: {step}");
        }
    });

    match result {
        Ok(value) => {
            println!("{value}");
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Resolve frame sizes and check every call and branch target.
pub fn check(args: &[String]) -> Result<(), i32> {
    let input = required_input(args, "check")?;
    let program = read_program(input)?;

    match stackasm_resolver::check(&program) {
        Ok(_) => {
            println!(
                "OK: {input} ({} instructions, {} labels)",
                program.len(),
                program.labels.len()
            );
            Ok(())
        }
        Err(errors) => {
            for e in &errors {
                eprintln!("error: {e}");
            }
            Err(2)
        }
    }
}

/// Print the frame size of every label, in name order.
pub fn sizes(args: &[String]) -> Result<(), i32> {
    let input = required_input(args, "sizes")?;
    let program = read_program(input)?;

    let frame_sizes = stackasm_resolver::resolve(&program).map_err(|e| {
        eprintln!("error: {e}");
        2
    })?;

    for (label, size) in &frame_sizes {
        println!("{label} {size}");
    }
    Ok(())
}

/// Print the normalised listing of a program.
pub fn list(args: &[String]) -> Result<(), i32> {
    let input = required_input(args, "list")?;
    let program = read_program(input)?;
    print!("{}", stackasm_loader::list(&program));
    Ok(())
}

// ---- Helpers ----

struct RunOptions {
    input: String,
    config: Config,
    trace: bool,
}

fn parse_run_args(args: &[String]) -> Result<RunOptions, i32> {
    let mut input = None;
    let mut config = Config::default();
    let mut trace = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--entry" => {
                let label = flag_value(&mut iter, "--entry")?;
                config.entry = label.to_lowercase();
            }
            "--max-depth" => {
                let value = flag_value(&mut iter, "--max-depth")?;
                config.max_call_depth = value.parse().map_err(|_| {
                    eprintln!("error: --max-depth requires a number, got '{value}'");
                    1
                })?;
            }
            "--strict-frames" => config.frame_policy = FramePolicy::Strict,
            "--trace" => trace = true,
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                eprintln!("Usage: stackasm run [input.asm] [--entry LABEL] [--strict-frames] [--max-depth N] [--trace]");
                return Err(1);
            }
            path => {
                if input.is_some() {
                    eprintln!("error: run takes a single input file");
                    return Err(1);
                }
                input = Some(path.to_string());
            }
        }
    }

    Ok(RunOptions {
        input: input.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
        config,
        trace,
    })
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, i32> {
    iter.next().ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        1
    })
}

fn required_input<'a>(args: &'a [String], command: &str) -> Result<&'a str, i32> {
    match args.first() {
        Some(input) => Ok(input.as_str()),
        None => {
            eprintln!("error: {command} requires an input file");
            eprintln!("Usage: stackasm {command} <input.asm>");
            Err(1)
        }
    }
}

fn read_program(input: &str) -> Result<Program, i32> {
    let file = File::open(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    stackasm_loader::load_reader(BufReader::new(file)).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}
