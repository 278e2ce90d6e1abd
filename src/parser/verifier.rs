use crate::grammar::{Grammar, Symbol};
use super::CompileWarningType::UndefinedNonterminal;
use super::lexer::Token;
use super::resolver::is_nonterminal_token;
use super::{CompileWarning, CompileWarnings, Production};

fn get_production_undefined_symbols(production: &Production, grammar: &Grammar) -> CompileWarnings {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals, `<>` being a terminal. Then keep the ones that never got
    // a rule.
    production.alternatives.iter()
        .flatten()
        .filter_map(|token| match token {
            Token::Nonterminal(name) if is_nonterminal_token(name) => Some(name),
            _ => None
        })
        .filter(|name| !grammar.nonterminals().contains(&Symbol::Nonterminal(name.to_string())))
        .map(|name| CompileWarning {
            location: production.location.to_owned(),
            error: UndefinedNonterminal(name.to_owned())
        })
        .collect()
}

// Nonterminals that are referenced but never defined stay terminals in the
// grammar, which is allowed but most likely a typo
pub(super) fn verify_rules(productions: &[Production], grammar: &Grammar) -> CompileWarnings {
    productions.iter()
        .flat_map(|production| get_production_undefined_symbols(production, grammar))
        .collect()
}
