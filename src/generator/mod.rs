/*
    This module generates sentences
*/

use rand::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

use crate::grammar::*;
use crate::error_handling::*;

// Past this depth the alternative with the fewest nonterminals is taken
const SHORTEST_DEPTH: usize = 24;
// Past this depth generation gives up
const MAX_DEPTH: usize = 256;

#[derive(Debug, PartialEq, Error)]
pub enum GenerateErrorType {
    // The grammar has no start symbol and none was given
    #[error("The grammar has no axiom")]
    MissingAxiom,
    // An undefined nonterminal was used
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // The derivation never bottoms out
    #[error("Derivation of `{0}` is deeper than {max} rules", max = MAX_DEPTH)]
    DepthExceeded(String),
}

impl ErrorType for GenerateErrorType {}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// Generates a sentence starting with the axiom
pub fn generate(grammar: &Grammar, file: PathBuf) -> GenResult {
    generate_with_rng(grammar, grammar.axiom(), &mut thread_rng())
        .map_err(|error| GenerateError { location: Location::file(file), error })
}

pub fn generate_with_rng(grammar: &Grammar, start: Option<&Symbol>, rng: &mut impl Rng) -> Result<String, GenerateErrorType> {
    let start = start.ok_or(GenerateErrorType::MissingAxiom)?;

    let mut words = Vec::new();
    generate_symbol(start, grammar, rng, 0, &mut words)?;

    Ok(words.join(" "))
}

fn expandable_count(grammar: &Grammar, alternative: &Alternative) -> usize {
    alternative.iter().filter(|symbol| grammar.rewrite(symbol).is_some()).count()
}

fn choose_alternative<'a>(grammar: &Grammar, rewrite: &'a Rewrite, rng: &mut impl Rng, depth: usize) -> Option<&'a Alternative> {
    if depth >= SHORTEST_DEPTH {
        rewrite.iter().min_by_key(|alternative| expandable_count(grammar, alternative))
    } else {
        rewrite.choose(rng)
    }
}

fn generate_symbol<'a>(symbol: &'a Symbol, grammar: &'a Grammar, rng: &mut impl Rng, depth: usize, words: &mut Vec<&'a str>) -> Result<(), GenerateErrorType> {
    let Some(rewrite) = grammar.rewrite(symbol) else {
        if !symbol.is_terminal() {
            return Err(GenerateErrorType::UndefinedNonterminal(symbol.to_string()));
        }
        words.push(symbol.text());
        return Ok(());
    };

    if depth >= MAX_DEPTH {
        return Err(GenerateErrorType::DepthExceeded(symbol.to_string()));
    }

    // A nonterminal with no alternatives derives nothing, like ε
    if let Some(alternative) = choose_alternative(grammar, rewrite, rng, depth) {
        for child in alternative {
            generate_symbol(child, grammar, rng, depth + 1, words)?;
        }
    }

    Ok(())
}
