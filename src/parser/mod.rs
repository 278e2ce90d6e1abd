/*
    This module parses extended BNF files
*/

mod desugar;
mod lexer;
mod productions;
mod resolver;
mod verifier;

use std::fs;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::Token;
use productions::RawProduction;
use resolver::Session;
use thiserror::Error;

pub use resolver::is_nonterminal_token;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A production has no `::=`
    #[error("Expected `::=` in `{0}`")]
    MissingSeparator(String),
    // Something other than a single nonterminal is being defined
    #[error("Expected a single nonterminal before `::=`, found `{0}`")]
    MalformedHead(String),
    // A `<` without its `>`
    #[error("Unclosed nonterminal `{0}`")]
    UnclosedNonterminal(String),
    // A quoted terminal without its closing quote
    #[error("Unmatched quote in `{0}`")]
    UnmatchedQuote(String),
    // A `*` or `+` with nothing before it
    #[error("Repetition operator `{0}` has nothing to repeat")]
    DanglingOperator(char),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::MissingSeparator(a), CompileErrorType::MissingSeparator(b)) => a == b,
            (CompileErrorType::MalformedHead(a), CompileErrorType::MalformedHead(b)) => a == b,
            (CompileErrorType::UnclosedNonterminal(a), CompileErrorType::UnclosedNonterminal(b)) => a == b,
            (CompileErrorType::UnmatchedQuote(a), CompileErrorType::UnmatchedQuote(b)) => a == b,
            (CompileErrorType::DanglingOperator(a), CompileErrorType::DanglingOperator(b)) => a == b,
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false
        }
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum CompileWarningType {
    #[error("The rule `{0}` is duplicated, it will be considered once")]
    DuplicateRule(DuplicateRule),
    #[error("`{0}` is never defined, it is treated as a terminal")]
    UndefinedNonterminal(String),
}

impl ErrorType for CompileWarningType {
    const COLOUR: u8 = 33;
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;
pub type CompileWarning = Error<CompileWarningType>;
pub type CompileWarnings = Errors<CompileWarningType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::file(file.to_path_buf()),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// A production with its head checked and its alternatives lexed
#[derive(PartialEq, Debug)]
struct Production {
    head: String,
    alternatives: Vec<Vec<Token>>,
    location: Location
}

#[derive(Debug)]
pub struct ParsedGrammar {
    pub grammar: Grammar,
    pub warnings: CompileWarnings
}

fn parse_head(head: &str) -> Result<String> {
    match lexer::lex_alternative(head)?.as_slice() {
        [Token::Nonterminal(name)] if resolver::is_nonterminal_token(name) => Ok(name.clone()),
        _ => Err(CompileErrorType::MalformedHead(head.to_string()))
    }
}

fn lex_rewrite(alternative: &str) -> Result<Vec<Token>> {
    // ε has to be caught here, the lexer would make it a terminal
    if alternative == EPSILON {
        Ok(Vec::new())
    } else {
        lexer::lex_alternative(alternative)
    }
}

fn lex_production(raw: &RawProduction, location: Location) -> LineResult<Production> {
    raw.split()
        .and_then(|(head, alternatives)| {
            let head = parse_head(head)?;
            let alternatives: Vec<Vec<Token>> = alternatives.into_iter().map(lex_rewrite).collect::<Result<_>>()?;
            Ok((head, alternatives))
        })
        .map(|(head, alternatives)| Production {
            head,
            alternatives,
            location: location.clone()
        })
        .map_err(|error| CompileError { location, error })
}

fn grammar_from_productions(productions: &[Production]) -> FileResult<ParsedGrammar> {
    let mut session = Session::new();

    // Intern every written nonterminal before any name is minted so that a
    // repetition can never be named like a user symbol
    for production in productions {
        session.resolve(&production.head);
        for token in production.alternatives.iter().flatten() {
            if let Token::Nonterminal(name) = token {
                session.resolve(name);
            }
        }
    }

    let mut grammar = Grammar::new();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for production in productions {
        let head = session.resolve(&production.head);

        // Set before desugaring, otherwise the first minted nonterminal would
        // become the axiom
        if grammar.axiom().is_none() {
            grammar.set_axiom(head.clone());
        }

        for tokens in &production.alternatives {
            match desugar::desugar(tokens, &mut session, &mut grammar) {
                Ok(alternative) => {
                    if let Some(duplicate) = grammar.add_rule(head.clone(), alternative) {
                        warnings.push(CompileWarning {
                            location: production.location.clone(),
                            error: CompileWarningType::DuplicateRule(duplicate)
                        });
                    }
                }
                Err(error) => errors.push(CompileError {
                    location: production.location.clone(),
                    error
                })
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    warnings.extend(verifier::verify_rules(productions, &grammar));

    Ok(ParsedGrammar { grammar, warnings })
}

// `path` is only used to locate errors
pub fn parse_str(source: &str, path: &Path) -> FileResult<ParsedGrammar> {
    let (productions, errors): (Vec<_>, Vec<_>) = productions::split_productions(source)
        .iter()
        .map(|raw| lex_production(raw, Location {
            file: path.to_path_buf(),
            line: raw.line
        }))
        .partition_result();

    let parsed = grammar_from_productions(&productions);
    if errors.is_empty() {
        return parsed;
    }

    // The productions that lexed are still desugared so that their errors
    // are reported along with the others
    let mut errors: CompileErrors = errors;
    if let Err(desugar_errors) = parsed {
        errors.extend(desugar_errors);
        errors.sort_by_key(|error| error.location.line);
    }

    Err(errors)
}

pub fn parse_file(path: &Path) -> FileResult<ParsedGrammar> {
    let source = fs::read_to_string(path).map_err(|e| vec![io_error(e, path)])?;
    parse_str(&source, path)
}
