mod cli;
mod error_handling;
mod generator;
mod grammar;
mod parser;
mod reduce;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let parsed = match parser::parse_file(&cli.file) {
        Ok(parsed) => parsed,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    for warning in &parsed.warnings {
        eprintln!("{}", warning);
    }

    let mut grammar = parsed.grammar;
    if let Some(start) = cli.start.clone() {
        grammar.set_axiom(start);
    }
    if cli.reduce {
        grammar = reduce::reduce(&grammar);
    }

    let Some(amount) = cli.amount else {
        print!("{}", grammar);
        return ExitCode::SUCCESS;
    };

    for _ in 0..amount {
        match generator::generate(&grammar, cli.file.clone()) {
            Ok(sentence) => println!("{}", sentence),
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
