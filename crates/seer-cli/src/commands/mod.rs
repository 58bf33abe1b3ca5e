pub mod request;
pub mod run;

use colored::{ColoredString, Colorize};

use seer_core::RequestOutcome;

/// Short colored label for a request outcome.
fn outcome_label(outcome: &RequestOutcome) -> ColoredString {
    match outcome {
        RequestOutcome::Delivered(_) => "delivered".green(),
        RequestOutcome::Rejected => "rejected".yellow(),
        RequestOutcome::Inactive => "inactive".dimmed(),
    }
}

/// Colored yes/no for a boolean outcome.
fn yes_no(value: bool) -> ColoredString {
    if value { "yes".green() } else { "no".red() }
}
