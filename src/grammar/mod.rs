/*
    This module is for storing and manipulating grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule. The variant is part of the identity, so
// `Terminal("x")` and `Nonterminal("x")` are different symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => s,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// Written for an alternative with no symbols
pub const EPSILON: &str = "ε";

// The symbols in a single alternative. Empty means ε
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

// Returned by `Grammar::add_rule` when the rule was already present
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRule {
    pub head: Symbol,
    pub alternative: Alternative,
}

impl Display for DuplicateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.head, render_alternative(&self.alternative))
    }
}

pub fn render_alternative(alternative: &Alternative) -> String {
    if alternative.is_empty() {
        EPSILON.to_string()
    } else {
        alternative.iter().join(" ")
    }
}

#[derive(Debug, Default, Clone)]
pub struct Grammar {
    axiom: Option<Symbol>,
    symbols: HashSet<Symbol>,
    terminals: HashSet<Symbol>,
    nonterminals: HashSet<Symbol>,
    rules: HashMap<Symbol, Rewrite>,
    // Heads in the order they were first defined
    heads: Vec<Symbol>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axiom(&self) -> Option<&Symbol> {
        self.axiom.as_ref()
    }

    pub fn set_axiom(&mut self, axiom: Symbol) {
        self.axiom = Some(axiom);
    }

    pub fn symbols(&self) -> &HashSet<Symbol> {
        &self.symbols
    }

    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    pub fn rewrite(&self, head: &Symbol) -> Option<&Rewrite> {
        self.rules.get(head)
    }

    // Every head with its alternatives, in definition order
    pub fn rules(&self) -> impl Iterator<Item = (&Symbol, &Rewrite)> {
        self.heads.iter().map(|head| (head, &self.rules[head]))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    // Adds `head -> alternative`. The first head ever added becomes the
    // axiom unless one was set before. A symbol only counts as a nonterminal
    // once it has been used as a head, until then it is kept as a terminal.
    // Returns the rejected rule if it was already present under `head`
    pub fn add_rule(&mut self, head: Symbol, alternative: Alternative) -> Option<DuplicateRule> {
        if self.axiom.is_none() {
            self.axiom = Some(head.clone());
        }

        self.terminals.remove(&head);
        self.symbols.insert(head.clone());
        self.nonterminals.insert(head.clone());
        if !self.rules.contains_key(&head) {
            self.heads.push(head.clone());
        }

        for symbol in &alternative {
            self.symbols.insert(symbol.clone());
            if !self.nonterminals.contains(symbol) {
                self.terminals.insert(symbol.clone());
            }
        }

        let rewrite = self.rules.entry(head.clone()).or_default();
        if rewrite.contains(&alternative) {
            return Some(DuplicateRule { head, alternative });
        }
        rewrite.push(alternative);

        None
    }
}

fn render_set(set: &HashSet<Symbol>) -> String {
    if set.is_empty() {
        "None".to_string()
    } else {
        set.iter().map(Symbol::text).sorted().join(", ")
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.axiom {
            Some(axiom) => writeln!(f, "Axiom: {}", axiom)?,
            None => writeln!(f, "Axiom: None")?,
        }
        writeln!(f, "Terminals: {}", render_set(self.terminals()))?;
        writeln!(f, "Nonterminals: {}", render_set(self.nonterminals()))?;
        writeln!(f, "Symbols: {}", render_set(self.symbols()))?;

        if self.rules.is_empty() {
            return writeln!(f, "Rules: None");
        }
        writeln!(f, "Rules:")?;
        for (head, rewrite) in self.rules().sorted_by(|(a, _), (b, _)| a.text().cmp(b.text())) {
            for alternative in rewrite {
                writeln!(f, "    {} -> {}", head, render_alternative(alternative))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn symbol_identity_includes_variant() {
        assert_eq!(s_terminal("x"), s_terminal("x"));
        assert_ne!(s_terminal("<x>"), s_nonterminal("<x>"));

        let set: HashSet<Symbol> = [s_nonterminal("<a>"), s_nonterminal("<a>"), s_terminal("<a>")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(s_terminal("a").is_terminal());
        assert!(!s_nonterminal("<a>").is_terminal());
    }

    #[test]
    fn first_head_becomes_axiom() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.axiom(), None);

        grammar.add_rule(s_nonterminal("<expr>"), vec![s_nonterminal("<term>")]);
        grammar.add_rule(s_nonterminal("<term>"), vec![s_terminal("1")]);
        assert_eq!(grammar.axiom(), Some(&s_nonterminal("<expr>")));

        grammar.set_axiom(s_nonterminal("<term>"));
        assert_eq!(grammar.axiom(), Some(&s_nonterminal("<term>")));
    }

    #[test]
    fn explicit_axiom_is_kept() {
        let mut grammar = Grammar::new();
        grammar.set_axiom(s_nonterminal("<start>"));
        grammar.add_rule(s_nonterminal("<other>"), vec![]);
        assert_eq!(grammar.axiom(), Some(&s_nonterminal("<start>")));
    }

    #[test]
    fn duplicate_rule_is_reported_once() {
        let mut grammar = Grammar::new();
        let head = s_nonterminal("<a>");
        let body = vec![s_terminal("x"), s_nonterminal("<b>")];

        assert_eq!(grammar.add_rule(head.clone(), body.clone()), None);
        let duplicate = grammar.add_rule(head.clone(), body.clone());
        assert_eq!(duplicate, Some(DuplicateRule { head: head.clone(), alternative: body.clone() }));
        assert_eq!(grammar.rewrite(&head).map(Vec::len), Some(1));
        assert_eq!(grammar.rule_count(), 1);

        // Same symbols in another order are a different rule
        assert_eq!(grammar.add_rule(head.clone(), vec![s_nonterminal("<b>"), s_terminal("x")]), None);
        assert_eq!(grammar.rule_count(), 2);
    }

    #[test]
    fn head_migrates_from_terminals() {
        let mut grammar = Grammar::new();
        grammar.add_rule(s_nonterminal("<a>"), vec![s_nonterminal("<b>")]);
        assert!(grammar.terminals().contains(&s_nonterminal("<b>")));

        grammar.add_rule(s_nonterminal("<b>"), vec![s_terminal("x")]);
        assert!(!grammar.terminals().contains(&s_nonterminal("<b>")));
        assert!(grammar.nonterminals().contains(&s_nonterminal("<b>")));
        assert!(grammar.terminals().is_disjoint(grammar.nonterminals()));
        assert_eq!(grammar.symbols().len(), 3);
    }

    #[test]
    fn self_reference_is_not_a_terminal() {
        let mut grammar = Grammar::new();
        let aux = s_nonterminal("<d_star_1>");
        grammar.add_rule(aux.clone(), vec![s_nonterminal("<d>"), aux.clone()]);
        grammar.add_rule(aux.clone(), vec![]);

        assert!(!grammar.terminals().contains(&aux));
        assert_eq!(grammar.rewrite(&aux), Some(&vec![vec![s_nonterminal("<d>"), aux.clone()], vec![]]));
    }

    #[test]
    fn rules_keep_definition_order() {
        let mut grammar = Grammar::new();
        grammar.add_rule(s_nonterminal("<z>"), vec![s_terminal("1")]);
        grammar.add_rule(s_nonterminal("<a>"), vec![s_terminal("2")]);
        grammar.add_rule(s_nonterminal("<z>"), vec![s_terminal("3")]);

        let heads: Vec<_> = grammar.rules().map(|(head, _)| head.text()).collect();
        assert_eq!(heads, vec!["<z>", "<a>"]);
    }

    #[test]
    fn display_is_sorted() {
        let mut grammar = Grammar::new();
        grammar.add_rule(s_nonterminal("<s>"), vec![s_terminal("b"), s_nonterminal("<n>")]);
        grammar.add_rule(s_nonterminal("<n>"), vec![s_terminal("a")]);
        grammar.add_rule(s_nonterminal("<n>"), vec![]);

        let expected = "\
Axiom: <s>
Terminals: a, b
Nonterminals: <n>, <s>
Symbols: <n>, <s>, a, b
Rules:
    <n> -> a
    <n> -> ε
    <s> -> b <n>
";
        assert_eq!(grammar.to_string(), expected);
    }

    #[test]
    fn display_empty_grammar() {
        let expected = "\
Axiom: None
Terminals: None
Nonterminals: None
Symbols: None
Rules: None
";
        assert_eq!(Grammar::new().to_string(), expected);
    }
}
