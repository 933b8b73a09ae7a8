use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

use super::{can_prompt, usage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Open a user's tracker",
            "login [username]",
            cmd_login,
        ),
        CommandEntry::new(
            "summary",
            "Show the active period summary",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "history",
            "List every period with its expenses",
            "history",
            cmd_history,
        ),
        CommandEntry::new(
            "show",
            "Redraw the summary and history",
            "show",
            cmd_show,
        ),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    // Names may contain spaces, same as at the interactive username prompt.
    let username = match args {
        [] if can_prompt(context) => io::prompt_text("Username", None)?,
        [] => return Err(usage("login <username>")),
        words => words.join(" "),
    };
    context.login(&username)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.state()?;
    let username = context.session.username().unwrap_or_default();
    context.screen().render_summary(username, state);
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.state()?;
    context.screen().render_history(state);
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render()
}
