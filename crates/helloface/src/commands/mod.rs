//! Command dispatch: bridges CLI args -> core workflows -> output formatting.

pub mod config_cmd;
pub mod enroll;
pub mod recognize;
pub mod status;
pub mod users;
pub mod util;

use helloface_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(session, global).await,
        Command::Enroll(args) => enroll::handle(session, args, global).await,
        Command::Recognize(args) => recognize::handle(session, args, global).await,
        Command::Users(args) => users::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
