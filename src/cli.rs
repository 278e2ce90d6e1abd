use std::path::PathBuf;

use clap::Parser;

use crate::grammar::Symbol;
use crate::parser::is_nonterminal_token;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Start symbol, written `<name>` (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL", value_parser = parse_start)]
    pub start: Option<Symbol>,

    /// Remove nonterminals that derive nothing or cannot be reached
    #[arg(short, long)]
    pub reduce: bool,

    /// Generate this many sentences instead of printing the grammar
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub amount: Option<u32>
}

fn parse_start(token: &str) -> Result<Symbol, String> {
    if is_nonterminal_token(token) {
        Ok(Symbol::Nonterminal(token.to_string()))
    } else {
        Err(format!("`{}` is not a nonterminal, write it as `<name>`", token))
    }
}
