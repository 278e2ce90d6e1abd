use itertools::{Itertools, PeekingNext};

use super::productions::{ESCAPE, QUOTE};
use super::{CompileErrorType, Result};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Operator {
    // Zero or more
    Star,
    // One or more
    Plus
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Operator::Star => "star",
            Operator::Plus => "plus"
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Star => '*',
            Operator::Plus => '+'
        }
    }
}

#[derive(PartialEq, Debug)]
pub enum Token {
    Nonterminal(String),
    Terminal(String),
    Repeat(Operator)
}

fn is_terminal_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '<' | '*' | '+' | QUOTE)
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open bracket
    let name: String = line.peeking_take_while(|&c| c != '>').collect();

    // Check if there is a close bracket and consume it if there is
    if line.next() != Some('>') {
        return Err(CompileErrorType::UnclosedNonterminal(format!("<{}", name)));
    }

    Ok(Token::Nonterminal(format!("<{}>", name)))
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Token {
    Token::Terminal(line.peeking_take_while(|&c| is_terminal_char(c)).collect())
}

// Everything between the quotes is one terminal, operators and brackets included
pub fn lex_quoted_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text: String = line.peeking_take_while(|&c| c != QUOTE).collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some(QUOTE) {
        return Err(CompileErrorType::UnmatchedQuote(format!("{}{}", QUOTE, token_text)));
    }

    Ok(Token::Terminal(token_text))
}

// `\"` is a terminal made of a single quote
pub fn lex_escape(line: &mut impl PeekingNext<Item = char>) -> Token {
    line.next(); // Consume backslash
    if line.peeking_next(|&c| c == QUOTE).is_some() {
        return Token::Terminal(QUOTE.to_string());
    }

    let rest: String = line.peeking_take_while(|&c| is_terminal_char(c)).collect();
    Token::Terminal(format!("{}{}", ESCAPE, rest))
}

pub fn lex_alternative(alternative: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut chars = alternative.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '<' => tokens.push(lex_nonterminal(&mut chars)?),
            QUOTE => tokens.push(lex_quoted_terminal(&mut chars)?),
            ESCAPE => tokens.push(lex_escape(&mut chars)),
            '*' => {
                chars.next();
                tokens.push(Token::Repeat(Operator::Star));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Repeat(Operator::Plus));
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => tokens.push(lex_terminal(&mut chars))
        }
    }

    Ok(tokens)
}
