use tracing::debug;
use uuid::Uuid;

use crate::cli::core::{
    resolve_period, split_yes_flag, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{ViewOptions, PRESENT_MARKER};
use crate::core::services::coerce_salary;
use crate::domain::Money;

use super::{can_prompt, usage};

const PERIOD_USAGE: &str = "period <new [hot] [cold]|delete [n|id]> [--yes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "period",
        "Start a new salary period or delete one",
        PERIOD_USAGE,
        cmd_period,
    )]
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (args, yes) = split_yes_flag(args);
    let Some((action, rest)) = args.split_first() else {
        return Err(usage(PERIOD_USAGE));
    };
    match action.to_ascii_lowercase().as_str() {
        "new" => period_new(context, rest, yes),
        "delete" => period_delete(context, rest, yes),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown period action `{other}`"
        ))),
    }
}

fn period_new(context: &mut ShellContext, args: &[&str], yes: bool) -> CommandResult {
    let (current_hot, current_cold) = context
        .state()?
        .active_period()
        .map(|period| (period.salary_hot, period.salary_cold))
        .unwrap_or((0, 0));

    let (hot, cold) = if args.is_empty() && can_prompt(context) {
        let hot = io::prompt_text("Hot salary", Some(current_hot.to_string()))?;
        let cold = io::prompt_text("Cold salary", Some(current_cold.to_string()))?;
        (coerce_salary(&hot), coerce_salary(&cold))
    } else {
        (salary_arg(args, 0), salary_arg(args, 1))
    };

    let mut confirmer = context.confirmer(yes);
    let outcome = context
        .session
        .start_period_cycle(hot, cold, &mut confirmer)?;
    context.report_outcome(outcome, "Started a new period.")
}

/// Missing or malformed salaries count as zero.
fn salary_arg(args: &[&str], index: usize) -> Money {
    args.get(index).map_or(0, |raw| coerce_salary(raw))
}

fn period_delete(context: &mut ShellContext, args: &[&str], yes: bool) -> CommandResult {
    let period_id = match args.first() {
        Some(token) => match resolve_period(context.state()?, token)? {
            Some(id) => id,
            None => {
                debug!(reference = *token, "no period at reference");
                return Ok(());
            }
        },
        None if can_prompt(context) => match select_period(context)? {
            Some(id) => id,
            None => {
                io::print_info("Cancelled.");
                return Ok(());
            }
        },
        None => return Err(usage("period delete <n|id> [--yes]")),
    };

    let mut confirmer = context.confirmer(yes);
    let outcome = context.session.delete_period(period_id, &mut confirmer)?;
    context.report_outcome(outcome, "Period deleted.")
}

fn select_period(context: &ShellContext) -> Result<Option<Uuid>, CommandError> {
    let state = context.state()?;
    let options = ViewOptions::from_config(&context.config);
    let items: Vec<String> = state
        .periods
        .iter()
        .enumerate()
        .map(|(index, period)| {
            let end = period
                .end_date
                .map(|at| options.timestamp(at))
                .unwrap_or_else(|| PRESENT_MARKER.to_string());
            format!(
                "[{}] {} → {}",
                index + 1,
                options.timestamp(period.start_date),
                end
            )
        })
        .collect();
    let choice = io::select_index("Select period to delete", &items)?;
    Ok(choice
        .and_then(|index| state.periods.get(index))
        .map(|period| period.id))
}
