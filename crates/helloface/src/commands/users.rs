//! User directory handlers: list with search, delete with confirmation.

use std::sync::Arc;

use tabled::Tabled;

use helloface_core::{ConfirmDelete, DeleteOutcome, Session, UserRecord};

use crate::cli::{GlobalOpts, OutputFormat, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Enrolled")]
    enrolled: String,
}

impl From<&Arc<UserRecord>> for UserRow {
    fn from(u: &Arc<UserRecord>) -> Self {
        Self {
            id: format!("#{}", u.id),
            name: u.display_name.clone(),
            email: u.contact_email.clone(),
            enrolled: u.enrolled_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List { filter } => {
            let directory = session.directory(Arc::new(|_: &UserRecord| false));
            directory.refresh().await?;

            let query = filter.unwrap_or_default();
            let users = directory.filtered(&query);

            if users.is_empty() && matches!(global.output, OutputFormat::Table) {
                if !global.quiet {
                    if directory.is_empty() {
                        eprintln!("No users enrolled yet");
                    } else {
                        eprintln!("No users match '{query}'");
                    }
                }
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Delete { id } => {
            if !global.yes && !util::is_interactive() {
                return Err(CliError::NonInteractiveRequiresYes {
                    action: format!("users delete {id}"),
                });
            }

            let yes = global.yes;
            let confirm: ConfirmDelete = Arc::new(move |user: &UserRecord| {
                let prompt = format!(
                    "Delete {} ({})? Their face data is removed permanently.",
                    user.display_name, user.contact_email
                );
                util::confirm(&prompt, yes).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "confirmation prompt failed");
                    false
                })
            });

            let directory = session.directory(confirm);
            directory.refresh().await?;

            match directory.delete(id).await? {
                DeleteOutcome::Deleted { message } => {
                    if !global.quiet {
                        eprintln!("{message}");
                    }
                }
                DeleteOutcome::Declined => {
                    if !global.quiet {
                        eprintln!("Aborted");
                    }
                }
                DeleteOutcome::AlreadyInFlight => {
                    return Err(CliError::Internal(format!(
                        "a delete for user #{id} is already in progress"
                    )));
                }
            }
            Ok(())
        }
    }
}
