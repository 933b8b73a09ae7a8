//! Shell context construction, dispatch, rendering, and error reporting.

use std::{io, path::PathBuf};

use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigManager},
    core::{
        clock::SystemClock,
        session::{Confirmer, Outcome, Session, SessionResult},
        utils::PathResolver,
    },
    domain::AppState,
    errors::TrackerError,
    storage::{JsonFileStore, StateRepository},
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};
use super::ui::{Screen, ViewOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Builds a context whose store and config live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let store = JsonFileStore::new(Some(base.clone()))?;
        let session = Session::new(StateRepository::new(Box::new(store)), Box::new(SystemClock));
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        apply_output_preferences(&config);

        Ok(ShellContext {
            mode,
            registry,
            session,
            config_manager,
            config,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action("Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(TrackerError::NotLoggedIn) => {
                cli_io::print_error(TrackerError::NotLoggedIn);
                cli_io::print_hint("Try `login alice` to get started.");
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn state(&self) -> Result<&AppState, CommandError> {
        Ok(self.session.state()?)
    }

    /// LoggedOut → LoggedIn, followed by the first full render.
    pub(crate) fn login(&mut self, username: &str) -> CommandResult {
        self.session.login(username)?;
        self.render()?;
        if let Some(name) = self.session.username() {
            cli_io::print_success(format!("Logged in as `{name}`."));
        }
        Ok(())
    }

    pub(crate) fn screen(&self) -> Screen {
        let clear = self.mode == CliMode::Interactive && self.config.clear_screen;
        Screen::new(clear, ViewOptions::from_config(&self.config))
    }

    /// Rebuilds the whole view from the current state.
    pub(crate) fn render(&self) -> CommandResult {
        let state = self.session.state()?;
        let username = self.session.username().unwrap_or_default();
        self.screen().render(username, state)?;
        Ok(())
    }

    /// Confirmation source for destructive commands. `--yes` or `assume_yes`
    /// pre-approve; script mode declines anything not pre-approved.
    pub(crate) fn confirmer(&self, yes_flag: bool) -> ShellConfirmer {
        ShellConfirmer {
            mode: self.mode,
            preapproved: yes_flag || self.config.assume_yes,
        }
    }

    /// Re-renders after an applied change; declined and missing targets do not.
    pub(crate) fn report_outcome(&self, outcome: Outcome, message: &str) -> CommandResult {
        match outcome {
            Outcome::Applied => {
                self.render()?;
                cli_io::print_success(message);
            }
            Outcome::Declined => cli_io::print_info("Cancelled."),
            Outcome::NotFound => {}
        }
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        apply_output_preferences(&self.config);
        Ok(())
    }
}

fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        color: config.color,
    });
}

pub(crate) struct ShellConfirmer {
    mode: CliMode,
    preapproved: bool,
}

impl Confirmer for ShellConfirmer {
    fn confirm(&mut self, prompt: &str) -> SessionResult<bool> {
        if self.preapproved {
            return Ok(true);
        }
        match self.mode {
            CliMode::Interactive => cli_io::confirm_action(prompt, false)
                .map_err(|err| TrackerError::Prompt(err.to_string())),
            CliMode::Script => {
                cli_io::print_info(format!("{prompt} Declined; pass --yes to confirm."));
                Ok(false)
            }
        }
    }
}

/// A period or expense as typed by the user: a 1-based position from the
/// history view, or a full id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reference {
    Position(usize),
    Id(Uuid),
}

impl Reference {
    pub(crate) fn parse(token: &str) -> Result<Self, CommandError> {
        let token = token.trim();
        if let Ok(position) = token.parse::<usize>() {
            return Ok(Reference::Position(position));
        }
        Uuid::parse_str(token).map(Reference::Id).map_err(|_| {
            CommandError::InvalidArguments(format!(
                "`{token}` is neither a position nor an id"
            ))
        })
    }
}

/// Resolves a period reference. `None` means nothing matches.
pub(crate) fn resolve_period(state: &AppState, token: &str) -> Result<Option<Uuid>, CommandError> {
    Ok(match Reference::parse(token)? {
        Reference::Position(position) => position
            .checked_sub(1)
            .and_then(|index| state.periods.get(index))
            .map(|period| period.id),
        Reference::Id(id) => Some(id),
    })
}

pub(crate) fn resolve_expense(
    state: &AppState,
    period_id: Uuid,
    token: &str,
) -> Result<Option<Uuid>, CommandError> {
    Ok(match Reference::parse(token)? {
        Reference::Position(position) => state.period(period_id).and_then(|period| {
            position
                .checked_sub(1)
                .and_then(|index| period.expenses.get(index))
                .map(|expense| expense.id)
        }),
        Reference::Id(id) => Some(id),
    })
}

/// Splits `--yes`/`-y` out of the argument list.
pub(crate) fn split_yes_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let mut yes = false;
    let rest = args
        .iter()
        .copied()
        .filter(|arg| {
            let flag = matches!(*arg, "--yes" | "-y");
            yes |= flag;
            !flag
        })
        .collect();
    (rest, yes)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{ExpenseService, PeriodService};
    use crate::domain::Bucket;
    use chrono::Utc;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        PeriodService::start_new(&mut state, 0, 0, Utc::now());
        ExpenseService::add(&mut state, "tea", 3, Bucket::Hot, Utc::now()).unwrap();
        state
    }

    #[test]
    fn positions_are_one_based() {
        let state = sample_state();
        let period = state.periods[0].id;
        assert_eq!(resolve_period(&state, "1").unwrap(), Some(period));
        assert_eq!(resolve_period(&state, "0").unwrap(), None);
        assert_eq!(resolve_period(&state, "2").unwrap(), None);
        let expense = state.periods[0].expenses[0].id;
        assert_eq!(resolve_expense(&state, period, "1").unwrap(), Some(expense));
        assert_eq!(resolve_expense(&state, period, "9").unwrap(), None);
    }

    #[test]
    fn ids_are_passed_through() {
        let state = sample_state();
        let id = Uuid::new_v4();
        assert_eq!(resolve_period(&state, &id.to_string()).unwrap(), Some(id));
        assert!(resolve_period(&state, "first").is_err());
    }

    #[test]
    fn yes_flag_is_removed_from_arguments() {
        let (rest, yes) = split_yes_flag(&["1", "--yes", "2"]);
        assert_eq!(rest, ["1", "2"]);
        assert!(yes);
        let (rest, yes) = split_yes_flag(&["-x"]);
        assert_eq!(rest, ["-x"]);
        assert!(!yes);
    }
}
