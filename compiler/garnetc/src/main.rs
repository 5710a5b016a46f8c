//! Garnet lexer CLI.

use garnetc::commands::{check_files, lex_files};
use garnetc::options::Options;
use garnetc::tracing_setup::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    match command.as_str() {
        "lex" | "check" => {
            let options = match Options::parse(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(2);
                }
            };
            if options.paths.is_empty() {
                eprintln!("Usage: garnet {command} <file>... [options]");
                std::process::exit(2);
            }
            let ok = if command == "lex" {
                lex_files(&options)
            } else {
                check_files(&options)
            };
            if !ok {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("garnet {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("Garnet lexer");
    println!();
    println!("Usage: garnet <command> [options] <file>...");
    println!();
    println!("Commands:");
    println!("  lex <file>...        Print every token and trivia span");
    println!("  check <file>...      Report lexical errors and warnings");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --locals=a,b         Treat these names as local variables");
    println!("  --verbose, -v        Also report verbose-only warnings");
    println!("  --trace-state        Show the expression state after each token (lex)");
    println!("  --color, --no-color  Force or disable colored diagnostics");
    println!();
    println!("Environment:");
    println!("  GARNET_LOG           Tracing filter, e.g. garnet_lexer=debug");
}
