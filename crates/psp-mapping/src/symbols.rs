//! Operator vocabularies of the target logics.
//!
//! One reduction serves every temporal target; only the symbol table and the
//! interval style change between them.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::errors::MappingError;

/// The ten named operator symbols a target logic may define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Always,
    Eventually,
    Next,
    Implication,
    Not,
    And,
    Or,
    Until,
    WeakUntil,
    Infinity,
}

impl Symbol {
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Always => "always",
            Symbol::Eventually => "eventually",
            Symbol::Next => "next",
            Symbol::Implication => "implication",
            Symbol::Not => "not",
            Symbol::And => "and",
            Symbol::Or => "or",
            Symbol::Until => "until",
            Symbol::WeakUntil => "weak-until",
            Symbol::Infinity => "infinity",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character set used for the LTL and MTL tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notation {
    #[default]
    Unicode,
    Ascii,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unicode" => Ok(Notation::Unicode),
            "ascii" => Ok(Notation::Ascii),
            other => Err(format!("unknown notation '{other}'")),
        }
    }
}

static UNICODE: [(Symbol, &str); 10] = [
    (Symbol::Always, "☐"),
    (Symbol::Eventually, "◇"),
    (Symbol::Next, "○"),
    (Symbol::Implication, "→"),
    (Symbol::Not, "¬"),
    (Symbol::And, "∧"),
    (Symbol::Or, "∨"),
    (Symbol::Until, "U"),
    (Symbol::WeakUntil, "W"),
    (Symbol::Infinity, "∞"),
];

static ASCII: [(Symbol, &str); 10] = [
    (Symbol::Always, "[]"),
    (Symbol::Eventually, "<>"),
    (Symbol::Next, "X"),
    (Symbol::Implication, "->"),
    (Symbol::Not, "!"),
    (Symbol::And, "&&"),
    (Symbol::Or, "||"),
    (Symbol::Until, "U"),
    (Symbol::WeakUntil, "W"),
    (Symbol::Infinity, "inf"),
];

static TBV: [(Symbol, &str); 10] = [
    (Symbol::Always, "G"),
    (Symbol::Eventually, "F"),
    (Symbol::Next, "X"),
    (Symbol::Implication, "->"),
    (Symbol::Not, "!"),
    (Symbol::And, "&&"),
    (Symbol::Or, "||"),
    (Symbol::Until, "U"),
    (Symbol::WeakUntil, "W"),
    (Symbol::Infinity, "inf"),
];

static PRISM: [(Symbol, &str); 9] = [
    (Symbol::Always, "G"),
    (Symbol::Eventually, "F"),
    (Symbol::Next, "X"),
    (Symbol::Implication, "=>"),
    (Symbol::Not, "!"),
    (Symbol::And, "&"),
    (Symbol::Or, "|"),
    (Symbol::Until, "U"),
    (Symbol::WeakUntil, "W"),
];

/// Symbol table of one target logic. Undefined symbols fail on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDefinitions {
    logic: &'static str,
    symbols: IndexMap<Symbol, &'static str>,
}

impl LanguageDefinitions {
    pub fn new(logic: &'static str) -> Self {
        Self {
            logic,
            symbols: IndexMap::new(),
        }
    }

    pub fn with(mut self, symbol: Symbol, text: &'static str) -> Self {
        self.symbols.insert(symbol, text);
        self
    }

    fn from_table(logic: &'static str, table: &[(Symbol, &'static str)]) -> Self {
        table
            .iter()
            .fold(Self::new(logic), |defs, (sym, text)| defs.with(*sym, *text))
    }

    /// LTL has no interval notation, so it leaves infinity undefined.
    pub fn ltl(notation: Notation) -> Self {
        let table = match notation {
            Notation::Unicode => &UNICODE[..9],
            Notation::Ascii => &ASCII[..9],
        };
        Self::from_table("LTL", table)
    }

    pub fn mtl(notation: Notation) -> Self {
        let table = match notation {
            Notation::Unicode => &UNICODE[..],
            Notation::Ascii => &ASCII[..],
        };
        Self::from_table("MTL", table)
    }

    pub fn tbv() -> Self {
        Self::from_table("TBV", &TBV)
    }

    pub fn prism() -> Self {
        Self::from_table("Prism", &PRISM)
    }

    pub fn logic(&self) -> &'static str {
        self.logic
    }

    pub fn get(&self, symbol: Symbol) -> Result<&'static str, MappingError> {
        self.symbols
            .get(&symbol)
            .copied()
            .ok_or_else(|| MappingError::MissingSymbol {
                logic: self.logic.to_string(),
                symbol: symbol.name().to_string(),
            })
    }

    pub fn has(&self, symbol: Symbol) -> bool {
        self.symbols.contains_key(&symbol)
    }
}

/// How interval annotations are printed after a temporal operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalStyle {
    /// The logic has no interval syntax; any annotation is inexpressible.
    Unsupported,
    /// `[l,u]`, `[l,u)`, `[l,∞)`.
    Bracketed,
    /// PRISM path bounds: `<=u`, `<u`, `>=l`, `[l,u]`.
    Relational,
}

/// Interval vocabulary of one target logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLanguageDefinitions {
    pub style: IntervalStyle,
    /// Drop `[0,∞)` annotations instead of printing them.
    pub elide_unbounded: bool,
}

impl TimeLanguageDefinitions {
    pub const UNTIMED: Self = Self {
        style: IntervalStyle::Unsupported,
        elide_unbounded: false,
    };
    pub const MTL: Self = Self {
        style: IntervalStyle::Bracketed,
        elide_unbounded: false,
    };
    pub const TBV: Self = Self {
        style: IntervalStyle::Bracketed,
        elide_unbounded: true,
    };
    pub const PRISM: Self = Self {
        style: IntervalStyle::Relational,
        elide_unbounded: true,
    };
}
