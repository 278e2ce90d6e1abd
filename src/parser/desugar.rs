use crate::grammar::{Alternative, Grammar, Symbol};
use super::lexer::{Operator, Token};
use super::resolver::Session;
use super::{CompileErrorType, Result};

// Adds the rules that make `aux` derive what `base` followed by `operator`
// derives
fn add_repetition(grammar: &mut Grammar, aux: &Symbol, base: &Symbol, operator: Operator) {
    let rules = match operator {
        Operator::Star => [vec![base.clone(), aux.clone()], vec![]],
        Operator::Plus => [vec![base.clone()], vec![base.clone(), aux.clone()]]
    };

    for alternative in rules {
        let duplicate = grammar.add_rule(aux.clone(), alternative);
        debug_assert!(duplicate.is_none(), "minted symbol {} already had rules", aux);
    }
}

// Turns the tokens of one alternative into its symbols, replacing every
// `X*` and `X+` by a fresh nonterminal whose rules go straight into `grammar`
pub fn desugar(tokens: &[Token], session: &mut Session, grammar: &mut Grammar) -> Result<Alternative> {
    let mut alternative = Vec::with_capacity(tokens.len());
    let mut rest = tokens;

    while let Some((token, tail)) = rest.split_first() {
        // Terminal tokens are taken literally, a quoted `"<a>"` stays a terminal
        let symbol = match token {
            Token::Nonterminal(s) => session.resolve(s),
            Token::Terminal(s) => Symbol::Terminal(s.clone()),
            Token::Repeat(operator) => return Err(CompileErrorType::DanglingOperator(operator.symbol()))
        };

        match tail.first() {
            Some(Token::Repeat(operator)) => {
                let aux = session.mint(&symbol, *operator);
                add_repetition(grammar, &aux, &symbol, *operator);
                alternative.push(aux);
                rest = &tail[1..];
            }
            _ => {
                alternative.push(symbol);
                rest = tail;
            }
        }
    }

    Ok(alternative)
}
