//! Token model shared by the renderers and the postprocessors.

use crate::symbols::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Always,
    Eventually,
    Next,
    Implication,
    Not,
    And,
    Or,
    Until,
    WeakUntil,
}

impl OperatorKind {
    pub fn symbol(self) -> Symbol {
        match self {
            OperatorKind::Always => Symbol::Always,
            OperatorKind::Eventually => Symbol::Eventually,
            OperatorKind::Next => Symbol::Next,
            OperatorKind::Implication => Symbol::Implication,
            OperatorKind::Not => Symbol::Not,
            OperatorKind::And => Symbol::And,
            OperatorKind::Or => Symbol::Or,
            OperatorKind::Until => Symbol::Until,
            OperatorKind::WeakUntil => Symbol::WeakUntil,
        }
    }

    pub fn is_unary_temporal(self) -> bool {
        matches!(
            self,
            OperatorKind::Always | OperatorKind::Eventually | OperatorKind::Next
        )
    }

    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            OperatorKind::Not | OperatorKind::And | OperatorKind::Or | OperatorKind::Implication
        )
    }
}

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Event(String),
    Operator { kind: OperatorKind, text: String },
    BracketOpen,
    BracketClose,
    Space,
    /// Interval annotation printed right after a temporal operator.
    TimeBound(String),
    Text(String),
    /// A bound the target cannot express. Prints nothing.
    Error(String),
}

impl Element {
    pub fn operator(kind: OperatorKind, text: impl Into<String>) -> Self {
        Element::Operator {
            kind,
            text: text.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Element::Event(s) | Element::TimeBound(s) | Element::Text(s) => s,
            Element::Operator { text, .. } => text,
            Element::BracketOpen => "(",
            Element::BracketClose => ")",
            Element::Space => " ",
            Element::Error(_) => "",
        }
    }

    pub fn operator_kind(&self) -> Option<OperatorKind> {
        match self {
            Element::Operator { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_operator(&self, kind: OperatorKind) -> bool {
        self.operator_kind() == Some(kind)
    }

    /// Time bounds and inexpressible-bound markers both annotate an operator.
    pub fn is_annotation(&self) -> bool {
        matches!(self, Element::TimeBound(_) | Element::Error(_))
    }
}

/// Concatenate token contents into the final formula string.
pub fn linearize(elements: &[Element]) -> String {
    elements.iter().map(Element::content).collect()
}

/// Messages of all inexpressible-bound markers, deduplicated in order.
pub fn error_messages(elements: &[Element]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for e in elements {
        if let Element::Error(msg) = e {
            if !out.contains(&msg.as_str()) {
                out.push(msg);
            }
        }
    }
    out
}
