//! Recognition: capture a photo and identify who is in it.

use helloface_core::presenter::present_verdict;
use helloface_core::{RecognitionOutcome, Session, StillImageSource, Verdict};

use crate::cli::{GlobalOpts, RecognizeArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// No match is a valid answer and exits 0; only failures set a non-zero
/// exit code.
pub async fn handle(
    session: &Session,
    args: RecognizeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let workflow = session.recognition();
    let mut camera = session.capture(StillImageSource::new(args.image));

    workflow.capture(&mut camera).await?;
    camera.release();

    let result = util::submit(&workflow, (), global).await;
    workflow.close();
    let verdict = result?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &verdict,
        |v| output::render_presentation(&present_verdict(v), color),
        plain_id,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Matched user id, or nothing when nobody matched.
fn plain_id(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Recognized(RecognitionOutcome::Matched { user, .. }) => user.id.to_string(),
        _ => String::new(),
    }
}
