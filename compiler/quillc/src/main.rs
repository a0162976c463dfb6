//! quill CLI
//!
//! Inspection commands for the lexer and bytecode model.

use quill_lexer::LexerOptions;
use quillc::commands::{lex_source, list_opcodes, literals_source, read_source, CommandError};
use quillc::report::render_lex_error;

fn main() {
    quillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let mut stdout = std::io::stdout().lock();

    let result = match command.as_str() {
        "lex" | "literals" => {
            let Some((path, options)) = parse_file_args(&args[2..]) else {
                eprintln!("Usage: quill {command} <file.js> [--strict]");
                std::process::exit(1);
            };
            run_on_file(path, |source| {
                if command == "lex" {
                    lex_source(path, source, options, &mut stdout)
                } else {
                    literals_source(path, source, options, &mut stdout)
                }
            })
        }
        "opcodes" => list_opcodes(&mut stdout),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("quill {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        if !matches!(err, CommandError::Lex(_)) {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}

/// Read `path` and run `command` on it, rendering lex errors against the
/// source.
fn run_on_file(
    path: &str,
    command: impl FnOnce(&[u8]) -> Result<(), CommandError>,
) -> Result<(), CommandError> {
    let source = read_source(path)?;
    let result = command(&source);
    if let Err(CommandError::Lex(err)) = &result {
        render_lex_error(path, &source, err);
    }
    result
}

/// `<file> [--strict]`, in any order.
fn parse_file_args(args: &[String]) -> Option<(&str, LexerOptions)> {
    let mut options = LexerOptions::default();
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--strict" | "-s" => options.strict = true,
            flag if flag.starts_with('-') => {
                eprintln!("warning: ignoring unknown option '{flag}'");
            }
            file if path.is_none() => path = Some(file),
            extra => eprintln!("warning: ignoring extra argument '{extra}'"),
        }
    }
    path.map(|path| (path, options))
}

fn print_usage() {
    println!("quill - JavaScript lexer and bytecode inspection tool");
    println!();
    println!("Usage: quill <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.js> [--strict]        Print the token stream");
    println!("  literals <file.js> [--strict]   Print the literal pool and byte code size");
    println!("  opcodes                         List the basic and extended opcodes");
    println!("  help                            Show this help message");
    println!("  version                         Show version information");
    println!();
    println!("Set RUST_LOG=quill_lexer=trace to trace every scanned token.");
}
