use crate::{
    config::{Config, ConfigManager},
    core::session::Session,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach. Owned by the shell loop.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}
