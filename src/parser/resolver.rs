use std::collections::HashMap;

use crate::grammar::Symbol;
use super::lexer::Operator;

// A token is a nonterminal only when it is written `<name>`
pub fn is_nonterminal_token(token: &str) -> bool {
    token.len() > 2 && token.starts_with('<') && token.ends_with('>')
}

pub fn symbol_from_token(token: &str) -> Symbol {
    if is_nonterminal_token(token) {
        Symbol::Nonterminal(token.to_string())
    } else {
        Symbol::Terminal(token.to_string())
    }
}

// State shared by every production of one parse: the interned symbols and
// the counter used to name the nonterminals introduced by `*` and `+`
pub struct Session {
    cache: HashMap<String, Symbol>,
    counter: usize
}

impl Session {
    pub fn new() -> Self {
        Session {
            cache: HashMap::new(),
            counter: 1
        }
    }

    pub fn resolve(&mut self, token: &str) -> Symbol {
        if let Some(symbol) = self.cache.get(token) {
            return symbol.clone();
        }

        let symbol = symbol_from_token(token);
        self.cache.insert(token.to_string(), symbol.clone());
        symbol
    }

    // Creates a nonterminal named after `base` that no other token of this
    // session resolves to
    pub fn mint(&mut self, base: &Symbol, operator: Operator) -> Symbol {
        let base_name = match base {
            Symbol::Nonterminal(name) => name
                .strip_prefix('<')
                .and_then(|name| name.strip_suffix('>'))
                .unwrap_or(name),
            Symbol::Terminal(name) => name.as_str(),
        };

        loop {
            let name = format!("<{}_{}_{}>", base_name, operator.name(), self.counter);
            self.counter += 1;

            if !self.cache.contains_key(&name) {
                return self.resolve(&name);
            }
        }
    }
}
