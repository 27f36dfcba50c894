//! Parser tests over whole expressions and scripts.

mod expression_tests;
mod script_tests;
