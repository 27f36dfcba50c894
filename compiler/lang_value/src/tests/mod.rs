//! Operator and comparison tests, kept apart from the value definitions.

mod compare_tests;
