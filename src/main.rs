// impish: an interpreter for the Imp language

mod interpreter;
mod memory;
mod parser;

use std::fs;
use std::path::Path;

use interpreter::engine::Interpreter;
use parser::parser::Parser;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("impish");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.imp>", program_name);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} demos/showcase.imp", program_name);
        std::process::exit(1);
    }

    let input_file = &args[1];

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        std::process::exit(1);
    }

    // Read source code
    let source = match fs::read_to_string(input_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading '{}': {}", input_file, e);
            std::process::exit(1);
        }
    };

    // Parse the source code
    let mut parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Execute and print whatever the program produced, even on failure:
    // output order must match program order up to the point of the error.
    let mut interpreter = Interpreter::new(program);
    let result = interpreter.run();

    for line in interpreter.output() {
        println!("{}", line);
    }

    if let Err(e) = result {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
