mod engine_tests;
mod flags_tests;
