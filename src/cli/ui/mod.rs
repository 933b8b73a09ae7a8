//! Text rendering of the tracker state. Views return plain lines; styling and
//! terminal control live in [`screen`].

pub mod history;
pub mod screen;
pub mod summary;
pub mod table;

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local, Utc,
};

use crate::{
    config::{Config, DEFAULT_DATE_FORMAT},
    domain::Money,
};

pub use history::render_history;
pub use screen::Screen;
pub use summary::render_summary;

pub const PRESENT_MARKER: &str = "present";

/// Display settings shared by every view.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub currency_label: String,
    pub date_format: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency_label: config.currency_label.clone(),
            date_format: config.date_format.clone(),
        }
    }

    /// Literal integer display, optionally prefixed with the currency label.
    pub fn amount(&self, amount: Money) -> String {
        if self.currency_label.is_empty() {
            amount.to_string()
        } else {
            format!("{} {amount}", self.currency_label)
        }
    }

    /// Local-time rendering of a stored UTC timestamp. Falls back to the
    /// default pattern when the configured one does not parse.
    pub fn timestamp(&self, at: DateTime<Utc>) -> String {
        let format = if is_valid_date_format(&self.date_format) {
            self.date_format.as_str()
        } else {
            DEFAULT_DATE_FORMAT
        };
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        at.with_timezone(&Local)
            .format_with_items(items.iter())
            .to_string()
    }
}

pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn amount_uses_label_when_present() {
        let mut options = ViewOptions::default();
        assert_eq!(options.amount(-15000), "Rp -15000");
        options.currency_label.clear();
        assert_eq!(options.amount(42), "42");
    }

    #[test]
    fn invalid_date_format_falls_back_to_default() {
        let options = ViewOptions {
            currency_label: String::new(),
            date_format: "%Q broken".into(),
        };
        let at = Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap();
        let fallback = ViewOptions::default().timestamp(at);
        assert_eq!(options.timestamp(at), fallback);
        assert!(!is_valid_date_format("%Q"));
        assert!(is_valid_date_format("%Y-%m-%d"));
    }
}
