//! stackasm CLI — load, check and run stack-machine programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/load error
//! - 2: Resolve or target-check failure
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "sizes" => commands::sizes(&args[2..]),
        "list" => commands::list(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: stackasm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run [input.asm] [options]   Load, resolve and execute (default: {})", commands::DEFAULT_PROGRAM);
    eprintln!("  check <input.asm>           Resolve frame sizes and check call targets");
    eprintln!("  sizes <input.asm>           Print the frame size of every label");
    eprintln!("  list <input.asm>            Print the normalised program listing");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --entry LABEL       Start label (default: main)");
    eprintln!("  --strict-frames     Fail on a push into a full frame");
    eprintln!("  --max-depth N       Maximum nested calls");
    eprintln!("  --trace             Print every executed instruction to stderr");
}
