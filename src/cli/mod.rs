pub mod args;
pub mod commands;
pub mod prompt;

pub use args::{Cli, Commands, SettingsArgs};
pub use commands::{enrich, run, EnrichRequest, RunOutcome};
pub use prompt::{Prompter, SaveDecision};
