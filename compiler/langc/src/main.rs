//! Lang CLI
//!
//! Runs and inspects Lang scripts.

use std::path::Path;

use lang_eval::stdout_handler;
use langc::commands::{parse_file, run_file};
use langc::{init_tracing, parse_run_options};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: lang run [options] <file.lang> [args...]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --timeout=<ms>      Stop the script after <ms> milliseconds");
                eprintln!("  --max-depth=<n>     Maximum function call depth (default: 1024)");
                std::process::exit(1);
            }
            run(&args[2..]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: lang parse <file.lang>");
                std::process::exit(1);
            }
            match parse_file(Path::new(&args[2])) {
                Ok(tree) => print!("{tree}"),
                Err(error) => {
                    eprintln!("error: {error}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Lang {}", lang_eval::LANG_VERSION);
        }
        _ => {
            // If it looks like a script, run it
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lang"))
            {
                run(&args[1..]);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn run(args: &[String]) {
    let options = match parse_run_options(args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    match run_file(&options, stdout_handler()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lang scripting language");
    println!();
    println!("Usage: lang <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lang>      Run a script");
    println!("  parse <file.lang>    Parse and display the AST");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --timeout=<ms>      Stop the script after <ms> milliseconds");
    println!("  --max-depth=<n>     Maximum function call depth (default: 1024)");
    println!();
    println!("Arguments after the script path are available as &LANG_ARGS.");
    println!();
    println!("Examples:");
    println!("  lang run main.lang");
    println!("  lang run --timeout=5000 main.lang input.txt");
    println!("  lang main.lang                  # same as `lang run main.lang`");
    println!("  lang parse main.lang");
    println!();
    println!("Set RUST_LOG=lang_eval=debug to trace execution.");
}
