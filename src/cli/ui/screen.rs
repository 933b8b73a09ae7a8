use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use super::{render_history, render_summary, ViewOptions};
use crate::{cli::output, domain::AppState};

/// Full-view renderer: every call redraws the summary and the whole history.
pub struct Screen {
    clear: bool,
    options: ViewOptions,
}

impl Screen {
    pub fn new(clear: bool, options: ViewOptions) -> Self {
        Self { clear, options }
    }

    pub fn render(&self, username: &str, state: &AppState) -> io::Result<()> {
        if self.clear {
            let mut stdout = io::stdout();
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
            stdout.flush()?;
        }
        self.render_summary(username, state);
        self.render_history(state);
        Ok(())
    }

    pub fn render_summary(&self, username: &str, state: &AppState) {
        output::section(format!("Summary for {username}"));
        match state.active_period() {
            Some(period) => render_summary(period, &self.options)
                .into_iter()
                .for_each(output::plain),
            None => output::plain("No active period."),
        }
    }

    pub fn render_history(&self, state: &AppState) {
        output::section("History");
        render_history(&state.periods, state.active_period_id, &self.options)
            .into_iter()
            .for_each(output::plain);
    }
}
