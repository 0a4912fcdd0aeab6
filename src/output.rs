use console::style;

use crate::error::PipectlError;

fn bright_red(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).bright().red()
}

fn dim(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).dim()
}

/// Error message followed by each underlying cause, separated by `: `.
fn render_error(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// Prints a failed invocation to stderr.
///
/// Argument errors get a usage hint underneath the message.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", bright_red("Error:"), render_error(err));

    if err
        .downcast_ref::<PipectlError>()
        .is_some_and(PipectlError::is_argument_error)
    {
        eprintln!("{}", dim("usage: pipectl stop <repo/name> [pipeline] [step]"));
    }
}
