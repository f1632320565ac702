//! Service status: banner, health and statistics in one view.

use serde::Serialize;

use helloface_core::presenter::present_overview;
use helloface_core::{HealthStatus, ServiceInfo, Session, SystemStats};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    base_url: String,
    service: Option<ServiceInfo>,
    health: Option<HealthStatus>,
    stats: Option<SystemStats>,
}

/// Each part is fetched independently; a partial failure still prints what
/// came back. Only a service that answers nothing is an error.
pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let (info, overview) = tokio::join!(session.service_info(), session.overview());

    if let (Err(e), Err(_), Err(_)) = (&info, &overview.health, &overview.stats) {
        return Err(e.clone().into());
    }

    let color = output::should_color(&global.color);
    let report = StatusReport {
        base_url: session.config().base_url.to_string(),
        service: info.as_ref().ok().cloned(),
        health: overview.health.as_ref().ok().cloned(),
        stats: overview.stats.as_ref().ok().cloned(),
    };

    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            let banner = match &r.service {
                Some(s) => match &s.version {
                    Some(v) => format!("{} (v{v})\n{}", s.message, r.base_url),
                    None => format!("{}\n{}", s.message, r.base_url),
                },
                None => r.base_url.clone(),
            };
            format!(
                "{banner}\n\n{}",
                output::render_presentations(&present_overview(&overview), color)
            )
        },
        |r| {
            r.health
                .as_ref()
                .map_or_else(|| "unavailable".to_owned(), |h| h.status.clone())
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
