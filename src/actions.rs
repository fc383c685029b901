//! Workflow annotations.
//!
//! On a runner, lines of the form `::warning::message` written to stdout are
//! turned into annotations on the workflow run.

use log::debug;
use std::io::Write;

#[cfg_attr(test, mockall::automock)]
pub trait Annotations: Send + Sync {
    fn warning(&self, message: &str);
}

/// Writes workflow commands to stdout.
pub struct WorkflowCommands;

impl Annotations for WorkflowCommands {
    fn warning(&self, message: &str) {
        debug!("Emitting warning annotation: {}", message);
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", format_command("warning", message));
    }
}

/// Formats a workflow command, escaping the message so it stays on one line.
pub fn format_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
