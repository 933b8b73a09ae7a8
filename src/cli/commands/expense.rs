use tracing::debug;
use uuid::Uuid;

use crate::cli::core::{
    resolve_expense, resolve_period, split_yes_flag, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::ViewOptions;
use crate::core::services::parse_amount;
use crate::domain::Bucket;

use super::{can_prompt, usage};

const EXPENSE_USAGE: &str =
    "expense <add <name> <amount> <hot|cold>|edit [n m] [amount] [--yes]|delete <n|id> <m|id>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Add, edit or delete expenses",
        EXPENSE_USAGE,
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (args, yes) = split_yes_flag(args);
    let Some((action, rest)) = args.split_first() else {
        return Err(usage(EXPENSE_USAGE));
    };
    match action.to_ascii_lowercase().as_str() {
        "add" => expense_add(context, rest),
        "edit" => expense_edit(context, rest, yes),
        "delete" => expense_delete(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense action `{other}`"
        ))),
    }
}

fn expense_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.state()?;
    let (name, amount, bucket) = match args {
        [] if can_prompt(context) => {
            let name = io::prompt_text("Expense name", None)?;
            let amount = io::prompt_text("Amount", None)?;
            let buckets: Vec<String> = Bucket::ALL.iter().map(|b| b.to_string()).collect();
            let Some(index) = io::select_index("Bucket", &buckets)? else {
                io::print_info("Cancelled.");
                return Ok(());
            };
            (name, amount, Bucket::ALL[index])
        }
        // Unquoted multi-word names are joined back together.
        [name @ .., amount, bucket] if !name.is_empty() => {
            (name.join(" "), amount.to_string(), bucket.parse::<Bucket>()?)
        }
        _ => return Err(usage("expense add <name> <amount> <hot|cold>")),
    };

    let amount = parse_amount(&amount)?;
    context.session.add_expense(&name, amount, bucket)?;
    context.render()?;
    io::print_success(format!("Added `{}` to {bucket}.", name.trim()));
    Ok(())
}

fn expense_edit(context: &mut ShellContext, args: &[&str], yes: bool) -> CommandResult {
    let target = match args {
        [period, expense, ..] => resolve_pair(context, period, expense)?,
        [] if can_prompt(context) => match select_expense(context, "Select expense to edit")? {
            Some(target) => Some(target),
            None => {
                io::print_info("Cancelled.");
                return Ok(());
            }
        },
        _ => return Err(usage("expense edit <n> <m> <amount> [--yes]")),
    };
    let Some((period_id, expense_id)) = target else {
        return Ok(());
    };

    let raw_amount = match args.get(2) {
        Some(raw) => raw.to_string(),
        None if can_prompt(context) => {
            let current = context
                .state()?
                .period(period_id)
                .and_then(|period| period.expense(expense_id))
                .map(|expense| expense.amount.to_string());
            io::prompt_text("New amount", current)?
        }
        None => return Err(usage("expense edit <n> <m> <amount> [--yes]")),
    };
    let amount = parse_amount(&raw_amount)?;

    let mut confirmer = context.confirmer(yes);
    let outcome = context
        .session
        .edit_expense_amount(period_id, expense_id, amount, &mut confirmer)?;
    context.report_outcome(outcome, "Expense updated.")
}

fn expense_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = match args {
        [period, expense, ..] => resolve_pair(context, period, expense)?,
        [] if can_prompt(context) => {
            match select_expense(context, "Select expense to delete")? {
                Some(target) => Some(target),
                None => {
                    io::print_info("Cancelled.");
                    return Ok(());
                }
            }
        }
        _ => return Err(usage("expense delete <n|id> <m|id>")),
    };
    let Some((period_id, expense_id)) = target else {
        return Ok(());
    };

    let outcome = context.session.delete_expense(period_id, expense_id)?;
    context.report_outcome(outcome, "Expense deleted.")
}

fn resolve_pair(
    context: &ShellContext,
    period: &str,
    expense: &str,
) -> Result<Option<(Uuid, Uuid)>, CommandError> {
    let state = context.state()?;
    let Some(period_id) = resolve_period(state, period)? else {
        debug!(reference = period, "no period at reference");
        return Ok(None);
    };
    let expense_id = resolve_expense(state, period_id, expense)?;
    if expense_id.is_none() {
        debug!(period = %period_id, reference = expense, "no expense at reference");
    }
    Ok(expense_id.map(|id| (period_id, id)))
}

fn select_expense(
    context: &ShellContext,
    prompt: &str,
) -> Result<Option<(Uuid, Uuid)>, CommandError> {
    let state = context.state()?;
    let options = ViewOptions::from_config(&context.config);
    let mut targets = Vec::new();
    let mut items = Vec::new();
    for (period_index, period) in state.periods.iter().enumerate() {
        for (expense_index, expense) in period.expenses.iter().enumerate() {
            targets.push((period.id, expense.id));
            items.push(format!(
                "{}.{}  {}  {}  {}",
                period_index + 1,
                expense_index + 1,
                expense.name,
                options.amount(expense.amount),
                expense.bucket
            ));
        }
    }
    if items.is_empty() {
        io::print_info("No expenses recorded.");
        return Ok(None);
    }
    let choice = io::select_index(prompt, &items)?;
    Ok(choice.and_then(|index| targets.get(index).copied()))
}
