//! The closed set of runtime error and warning kinds.
//!
//! Codes are stable: scripts compare `$LANG_ERRNO` against them and every
//! kind is published as `$LANG_ERRNO_<NAME>` / `$LANG_ERROR_<NAME>`.
//! Negative codes are warnings.

use std::fmt;

use lang_ir::ParsingError;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InterpretingError {
    NoError,

    // Errors
    FinalVarChange,
    ToManyInnerLinks,
    NoLangFile,
    FileNotFound,
    InvalidFuncPtr,
    StackOverflow,
    NoTerminal,
    InvalidArgCount,
    InvalidLogLevel,
    InvalidArrPtr,
    NoHexNum,
    NoChar,
    NoNum,
    DivByZero,
    NegativeArrayLen,
    EmptyArray,
    LengthNan,
    IndexOutOfBounds,
    ArgCountNotArrLen,
    InvalidFuncPtrLoop,
    InvalidArguments,
    FunctionNotFound,
    Eof,
    SystemError,
    NegativeRepeatCount,
    TransKeyNotFound,
    FunctionNotSupported,
    BracketMismatch,
    ContFlowArgMissing,
    InvalidAstNode,
    InvalidPtr,
    IncompatibleDataType,
    LangArraysCopy,
    LangVerError,
    InvalidConPart,
    InvalidFormat,
    InvalidAssignment,

    // Warnings
    DeprecatedFuncCall,
    NoTerminalWarning,
    LangVerWarning,
    InvalidExecFlagData,
    VarShadowingWarning,
    UndefEscapeSequence,
}

impl InterpretingError {
    pub const ALL: [InterpretingError; 44] = [
        Self::NoError,
        Self::FinalVarChange,
        Self::ToManyInnerLinks,
        Self::NoLangFile,
        Self::FileNotFound,
        Self::InvalidFuncPtr,
        Self::StackOverflow,
        Self::NoTerminal,
        Self::InvalidArgCount,
        Self::InvalidLogLevel,
        Self::InvalidArrPtr,
        Self::NoHexNum,
        Self::NoChar,
        Self::NoNum,
        Self::DivByZero,
        Self::NegativeArrayLen,
        Self::EmptyArray,
        Self::LengthNan,
        Self::IndexOutOfBounds,
        Self::ArgCountNotArrLen,
        Self::InvalidFuncPtrLoop,
        Self::InvalidArguments,
        Self::FunctionNotFound,
        Self::Eof,
        Self::SystemError,
        Self::NegativeRepeatCount,
        Self::TransKeyNotFound,
        Self::FunctionNotSupported,
        Self::BracketMismatch,
        Self::ContFlowArgMissing,
        Self::InvalidAstNode,
        Self::InvalidPtr,
        Self::IncompatibleDataType,
        Self::LangArraysCopy,
        Self::LangVerError,
        Self::InvalidConPart,
        Self::InvalidFormat,
        Self::InvalidAssignment,
        Self::DeprecatedFuncCall,
        Self::NoTerminalWarning,
        Self::LangVerWarning,
        Self::InvalidExecFlagData,
        Self::VarShadowingWarning,
        Self::UndefEscapeSequence,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::FinalVarChange => 1,
            Self::ToManyInnerLinks => 2,
            Self::NoLangFile => 3,
            Self::FileNotFound => 4,
            Self::InvalidFuncPtr => 5,
            Self::StackOverflow => 6,
            Self::NoTerminal => 7,
            Self::InvalidArgCount => 8,
            Self::InvalidLogLevel => 9,
            Self::InvalidArrPtr => 10,
            Self::NoHexNum => 11,
            Self::NoChar => 12,
            Self::NoNum => 13,
            Self::DivByZero => 14,
            Self::NegativeArrayLen => 15,
            Self::EmptyArray => 16,
            Self::LengthNan => 17,
            Self::IndexOutOfBounds => 18,
            Self::ArgCountNotArrLen => 19,
            Self::InvalidFuncPtrLoop => 20,
            Self::InvalidArguments => 21,
            Self::FunctionNotFound => 22,
            Self::Eof => 23,
            Self::SystemError => 24,
            Self::NegativeRepeatCount => 25,
            Self::TransKeyNotFound => 26,
            Self::FunctionNotSupported => 27,
            Self::BracketMismatch => 28,
            Self::ContFlowArgMissing => 29,
            Self::InvalidAstNode => 30,
            Self::InvalidPtr => 31,
            Self::IncompatibleDataType => 32,
            Self::LangArraysCopy => 33,
            Self::LangVerError => 34,
            Self::InvalidConPart => 35,
            Self::InvalidFormat => 36,
            Self::InvalidAssignment => 37,
            Self::DeprecatedFuncCall => -1,
            Self::NoTerminalWarning => -2,
            Self::LangVerWarning => -3,
            Self::InvalidExecFlagData => -4,
            Self::VarShadowingWarning => -5,
            Self::UndefEscapeSequence => -6,
        }
    }

    /// Upper snake case name, as used in `$LANG_ERROR_<NAME>`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NO_ERROR",
            Self::FinalVarChange => "FINAL_VAR_CHANGE",
            Self::ToManyInnerLinks => "TO_MANY_INNER_LINKS",
            Self::NoLangFile => "NO_LANG_FILE",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::InvalidFuncPtr => "INVALID_FUNC_PTR",
            Self::StackOverflow => "STACK_OVERFLOW",
            Self::NoTerminal => "NO_TERMINAL",
            Self::InvalidArgCount => "INVALID_ARG_COUNT",
            Self::InvalidLogLevel => "INVALID_LOG_LEVEL",
            Self::InvalidArrPtr => "INVALID_ARR_PTR",
            Self::NoHexNum => "NO_HEX_NUM",
            Self::NoChar => "NO_CHAR",
            Self::NoNum => "NO_NUM",
            Self::DivByZero => "DIV_BY_ZERO",
            Self::NegativeArrayLen => "NEGATIVE_ARRAY_LEN",
            Self::EmptyArray => "EMPTY_ARRAY",
            Self::LengthNan => "LENGTH_NAN",
            Self::IndexOutOfBounds => "INDEX_OUT_OF_BOUNDS",
            Self::ArgCountNotArrLen => "ARG_COUNT_NOT_ARR_LEN",
            Self::InvalidFuncPtrLoop => "INVALID_FUNC_PTR_LOOP",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::FunctionNotFound => "FUNCTION_NOT_FOUND",
            Self::Eof => "EOF",
            Self::SystemError => "SYSTEM_ERROR",
            Self::NegativeRepeatCount => "NEGATIVE_REPEAT_COUNT",
            Self::TransKeyNotFound => "TRANS_KEY_NOT_FOUND",
            Self::FunctionNotSupported => "FUNCTION_NOT_SUPPORTED",
            Self::BracketMismatch => "BRACKET_MISMATCH",
            Self::ContFlowArgMissing => "CONT_FLOW_ARG_MISSING",
            Self::InvalidAstNode => "INVALID_AST_NODE",
            Self::InvalidPtr => "INVALID_PTR",
            Self::IncompatibleDataType => "INCOMPATIBLE_DATA_TYPE",
            Self::LangArraysCopy => "LANG_ARRAYS_COPY",
            Self::LangVerError => "LANG_VER_ERROR",
            Self::InvalidConPart => "INVALID_CON_PART",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidAssignment => "INVALID_ASSIGNMENT",
            Self::DeprecatedFuncCall => "DEPRECATED_FUNC_CALL",
            Self::NoTerminalWarning => "NO_TERMINAL_WARNING",
            Self::LangVerWarning => "LANG_VER_WARNING",
            Self::InvalidExecFlagData => "INVALID_EXEC_FLAG_DATA",
            Self::VarShadowingWarning => "VAR_SHADOWING_WARNING",
            Self::UndefEscapeSequence => "UNDEF_ESCAPE_SEQUENCE",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::NoError => "No Error",
            Self::FinalVarChange => "LANG or final vars mustn't be changed",
            Self::ToManyInnerLinks => "To many inner links",
            Self::NoLangFile => "No .lang-File",
            Self::FileNotFound => "File not found",
            Self::InvalidFuncPtr => "Function pointer is invalid",
            Self::StackOverflow => "Stack overflow",
            Self::NoTerminal => "No terminal available",
            Self::InvalidArgCount => "Invalid argument count",
            Self::InvalidLogLevel => "Invalid log level",
            Self::InvalidArrPtr => "Invalid array pointer",
            Self::NoHexNum => "No hexadecimal number",
            Self::NoChar => "No char",
            Self::NoNum => "No number",
            Self::DivByZero => "Dividing by 0",
            Self::NegativeArrayLen => "Negative array length",
            Self::EmptyArray => "Empty array",
            Self::LengthNan => "Length NAN",
            Self::IndexOutOfBounds => "Index out of bounds",
            Self::ArgCountNotArrLen => "Argument count is not array length",
            Self::InvalidFuncPtrLoop => "Invalid function pointer",
            Self::InvalidArguments => "Invalid arguments",
            Self::FunctionNotFound => "Function not found",
            Self::Eof => "End of file was reached early",
            Self::SystemError => "System Error",
            Self::NegativeRepeatCount => "Negative repeat count",
            Self::TransKeyNotFound => "Translation key does not exist",
            Self::FunctionNotSupported => "Function not supported",
            Self::BracketMismatch => "Bracket mismatch",
            Self::ContFlowArgMissing => {
                "Control flow statement condition(s) or argument(s) is/are missing"
            }
            Self::InvalidAstNode => "Invalid AST node or AST node order",
            Self::InvalidPtr => "Invalid pointer",
            Self::IncompatibleDataType => "Incompatible data type",
            Self::LangArraysCopy => "&LANG arrays can not be copied",
            Self::LangVerError => "Lang file's version is not compatible with this version",
            Self::InvalidConPart => "Invalid statement in control flow statement",
            Self::InvalidFormat => "Invalid format sequence",
            Self::InvalidAssignment => "Invalid assignment",
            Self::DeprecatedFuncCall => "A deprecated predefined function was called",
            Self::NoTerminalWarning => "No terminal available",
            Self::LangVerWarning => "Lang file's version is not compatible with this version",
            Self::InvalidExecFlagData => "Execution flag or data is invalid",
            Self::VarShadowingWarning => "Variable name shadows an other variable",
            Self::UndefEscapeSequence => "An undefined escape sequence was used",
        }
    }

    pub const fn is_warning(self) -> bool {
        self.code() < 0
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|error| error.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|error| error.name() == name)
    }
}

impl From<ParsingError> for InterpretingError {
    fn from(error: ParsingError) -> Self {
        match error {
            ParsingError::BracketMismatch => Self::BracketMismatch,
            ParsingError::ContFlowArgMissing => Self::ContFlowArgMissing,
            ParsingError::Eof => Self::Eof,
            ParsingError::InvalidConPart => Self::InvalidConPart,
            ParsingError::InvalidAssignment => Self::InvalidAssignment,
            ParsingError::InvalidParameter => Self::InvalidAstNode,
        }
    }
}

impl fmt::Display for InterpretingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
