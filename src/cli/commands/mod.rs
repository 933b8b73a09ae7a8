pub mod config;
pub mod expense;
pub mod period;
pub mod system;
pub mod user;

use crate::cli::core::{CliMode, CommandError, ShellContext};
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = system::definitions()
        .into_iter()
        .chain(user::definitions())
        .chain(period::definitions())
        .chain(expense::definitions())
        .chain(config::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}

pub(crate) fn can_prompt(context: &ShellContext) -> bool {
    context.mode() == CliMode::Interactive
}

pub(crate) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}
