/*
    This module removes useless symbols from grammars
*/

use std::collections::HashSet;

use crate::grammar::*;

// Symbols with no rules of their own are terminals here, whatever their variant
fn is_expandable(grammar: &Grammar, symbol: &Symbol) -> bool {
    grammar.nonterminals().contains(symbol)
}

fn derives_from(grammar: &Grammar, alternative: &Alternative, allowed: &HashSet<&Symbol>) -> bool {
    alternative.iter().all(|symbol| !is_expandable(grammar, symbol) || allowed.contains(symbol))
}

// Nonterminals that derive at least one string of terminals
fn generating_symbols(grammar: &Grammar) -> HashSet<&Symbol> {
    let mut generating = HashSet::new();

    loop {
        let found: Vec<&Symbol> = grammar.rules()
            .filter(|(head, _)| !generating.contains(head))
            .filter(|(_, rewrite)| rewrite.iter().any(|alternative| derives_from(grammar, alternative, &generating)))
            .map(|(head, _)| head)
            .collect();

        if found.is_empty() {
            return generating;
        }
        generating.extend(found);
    }
}

// Nonterminals the axiom can reach through rules made of generating symbols
fn reachable_symbols<'a>(grammar: &'a Grammar, generating: &HashSet<&Symbol>) -> HashSet<&'a Symbol> {
    let mut reachable = HashSet::new();
    let mut pending: Vec<&Symbol> = grammar.axiom()
        .filter(|axiom| generating.contains(axiom))
        .into_iter()
        .collect();

    while let Some(head) = pending.pop() {
        if !reachable.insert(head) {
            continue;
        }

        let Some(rewrite) = grammar.rewrite(head) else {
            continue;
        };
        for alternative in rewrite.iter().filter(|alternative| derives_from(grammar, alternative, generating)) {
            pending.extend(alternative.iter().filter(|symbol| is_expandable(grammar, symbol)));
        }
    }

    reachable
}

// Builds a copy of `grammar` without the nonterminals that derive no string
// of terminals and those the axiom cannot reach, along with every rule that
// mentions them. The axiom is kept even when it generates nothing.
pub fn reduce(grammar: &Grammar) -> Grammar {
    let generating = generating_symbols(grammar);
    let reachable = reachable_symbols(grammar, &generating);

    let mut reduced = Grammar::new();
    if let Some(axiom) = grammar.axiom() {
        reduced.set_axiom(axiom.clone());
    }

    for (head, rewrite) in grammar.rules().filter(|(head, _)| reachable.contains(head)) {
        for alternative in rewrite.iter().filter(|alternative| derives_from(grammar, alternative, &generating)) {
            reduced.add_rule(head.clone(), alternative.clone());
        }
    }

    reduced
}
