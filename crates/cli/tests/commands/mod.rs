//! Subcommand tests, one module per command.

mod delete_tests;
mod get_tests;
mod global_options_tests;
mod list_tests;
mod set_tests;
