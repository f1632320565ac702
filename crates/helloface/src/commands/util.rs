//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use helloface_core::{
    FaceService, Submission, Verdict, WorkflowController, WorkflowOperation, WorkflowState,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Both ends of the terminal are interactive, so prompts can be shown.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Use `value` if given; otherwise ask on a terminal. Without a terminal
/// the field stays empty and form validation reports it.
pub fn field_or_prompt(value: Option<String>, label: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None if is_interactive() => Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err),
        None => Ok(String::new()),
    }
}

fn spinner(message: &'static str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Submit the held frame and wait for the verdict, showing the busy label
/// while the request is outstanding.
///
/// Service failures come back as `Err`, mapped like any other core error.
pub async fn submit<S, Op>(
    workflow: &WorkflowController<S, Op>,
    input: Op::Input,
    global: &GlobalOpts,
) -> Result<Verdict, CliError>
where
    S: FaceService,
    Op: WorkflowOperation,
{
    let pb = spinner(workflow.kind().busy_label(), global.quiet);
    let result = workflow.submit(input).await;
    pb.finish_and_clear();

    match result? {
        Submission::Applied(WorkflowState::Succeeded(verdict)) => Ok(verdict),
        Submission::Applied(WorkflowState::Failed { error, .. }) => Err(error.into()),
        Submission::Applied(other) => Err(CliError::Internal(format!(
            "submission ended in state '{}'",
            other.name()
        ))),
        Submission::InFlight | Submission::Stale => {
            Err(CliError::Internal("submission was superseded".into()))
        }
    }
}
