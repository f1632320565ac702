//! Enrollment: capture a photo, collect name and email, submit.

use helloface_core::presenter::{present, present_verdict};
use helloface_core::{EnrollmentForm, Session, StillImageSource, Verdict};

use crate::cli::{EnrollArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: EnrollArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let workflow = session.enrollment();
    let mut camera = session.capture(StillImageSource::new(args.image));

    workflow.capture(&mut camera).await?;
    camera.release();

    let color = output::should_color(&global.color);
    if !global.quiet && matches!(global.output, OutputFormat::Table) {
        let captured = present(workflow.kind(), &workflow.state());
        eprintln!("{}", output::render_presentation(&captured, color));
    }

    let form = EnrollmentForm::new(
        util::field_or_prompt(args.name, "Name")?,
        util::field_or_prompt(args.email, "Email")?,
    );

    let result = util::submit(&workflow, form, global).await;
    workflow.close();
    let verdict = result?;

    let out = output::render_single(
        &global.output,
        &verdict,
        |v| output::render_presentation(&present_verdict(v), color),
        plain_id,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The new user's id when the service echoed it, else its message.
fn plain_id(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Enrolled(receipt) => receipt
            .user
            .as_ref()
            .map_or_else(|| receipt.message.clone(), |u| u.id.to_string()),
        Verdict::Recognized(outcome) => outcome.message().to_owned(),
    }
}
