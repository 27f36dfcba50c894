//! Operators
//!
//! Every operator an operation node can carry, with its source lexeme,
//! arity and precedence.
//!
//! Precedence levels (lower binds tighter):
//! - 1: `[]` get item
//! - 2: `**`
//! - 3: prefix `-` `+` `!` `~` `^` `@` `+|` `-|`
//! - 4: `*` `/` `//` `%`
//! - 5: `+` `-` `|||`
//! - 6: `<<` `>>` `>>>`
//! - 7: `&`
//! - 8: `^`
//! - 9: `|`
//! - 10: `<` `>` `<=` `>=`
//! - 11: `==` `!=` `===` `!==`
//! - 12: `&&`
//! - 13: `||`
//! - 14: `??` `?:`
//! - 15: `? :`

/// Number of operands an operator takes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperatorArity {
    Unary,
    Binary,
    Ternary,
}

/// Operators of the Lang expression grammar.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Unary
    /// `+x`
    Pos,
    /// `-x` (negation, text and array reversal)
    Inv,
    /// `!x`
    Not,
    /// `~x`
    BitwiseNot,
    /// `^x`
    DeepCopy,
    /// `@x`
    Len,
    /// `+|x`
    Inc,
    /// `-|x`
    Dec,

    // Binary
    GetItem,
    Pow,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Add,
    Sub,
    Concat,
    Lshift,
    Rshift,
    Rzshift,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    And,
    Or,
    NullCoalescing,
    Elvis,

    // Ternary
    /// `c ? a : b`
    Conditional,
}

impl Operator {
    /// Source lexeme, used in AST dumps and error messages.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pos => "+",
            Self::Inv => "-",
            Self::Not => "!",
            Self::BitwiseNot => "~",
            Self::DeepCopy => "^",
            Self::Len => "@",
            Self::Inc => "+|",
            Self::Dec => "-|",
            Self::GetItem => "[]",
            Self::Pow => "**",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Concat => "|||",
            Self::Lshift => "<<",
            Self::Rshift => ">>",
            Self::Rzshift => ">>>",
            Self::BitwiseAnd => "&",
            Self::BitwiseXor => "^",
            Self::BitwiseOr => "|",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::StrictEquals => "===",
            Self::StrictNotEquals => "!==",
            Self::And => "&&",
            Self::Or => "||",
            Self::NullCoalescing => "??",
            Self::Elvis => "?:",
            Self::Conditional => "?:",
        }
    }

    pub const fn arity(self) -> OperatorArity {
        match self {
            Self::Pos
            | Self::Inv
            | Self::Not
            | Self::BitwiseNot
            | Self::DeepCopy
            | Self::Len
            | Self::Inc
            | Self::Dec => OperatorArity::Unary,
            Self::Conditional => OperatorArity::Ternary,
            _ => OperatorArity::Binary,
        }
    }

    /// Precedence level; a lower number binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::GetItem => 1,
            Self::Pow => 2,
            Self::Pos
            | Self::Inv
            | Self::Not
            | Self::BitwiseNot
            | Self::DeepCopy
            | Self::Len
            | Self::Inc
            | Self::Dec => 3,
            Self::Mul | Self::Div | Self::FloorDiv | Self::Mod => 4,
            Self::Add | Self::Sub | Self::Concat => 5,
            Self::Lshift | Self::Rshift | Self::Rzshift => 6,
            Self::BitwiseAnd => 7,
            Self::BitwiseXor => 8,
            Self::BitwiseOr => 9,
            Self::Less | Self::Greater | Self::LessEquals | Self::GreaterEquals => 10,
            Self::Equals | Self::NotEquals | Self::StrictEquals | Self::StrictNotEquals => 11,
            Self::And => 12,
            Self::Or => 13,
            Self::NullCoalescing | Self::Elvis => 14,
            Self::Conditional => 15,
        }
    }

    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow | Self::Conditional)
    }

    /// Operators whose right operand is only evaluated on demand.
    pub const fn is_short_circuit(self) -> bool {
        matches!(
            self,
            Self::And | Self::Or | Self::NullCoalescing | Self::Elvis | Self::Conditional
        )
    }

    /// The binary operator a compound assignment (`$a += 1`) applies.
    pub fn from_compound_assignment(lexeme: &str) -> Option<Self> {
        let op = match lexeme {
            "+=" => Self::Add,
            "-=" => Self::Sub,
            "*=" => Self::Mul,
            "/=" => Self::Div,
            "//=" => Self::FloorDiv,
            "%=" => Self::Mod,
            "**=" => Self::Pow,
            "&=" => Self::BitwiseAnd,
            "|=" => Self::BitwiseOr,
            "^=" => Self::BitwiseXor,
            "<<=" => Self::Lshift,
            ">>=" => Self::Rshift,
            ">>>=" => Self::Rzshift,
            "??=" => Self::NullCoalescing,
            "|||=" => Self::Concat,
            _ => return None,
        };
        Some(op)
    }
}
