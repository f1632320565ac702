//! Resolves the effective `ClientConfig` for one invocation.
//!
//! Precedence: command-line flag, then `HELLOFACE_*` env var (both via
//! clap), then the active profile, then built-in defaults.

use std::time::Duration;

use secrecy::SecretString;

use helloface_config::{self as hf_config, Config};
use helloface_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Sorted, comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the client configuration from the config file and global flags.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = hf_config::load_config_or_default();
    resolve_with(global, &cfg)
}

fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => hf_config::profile_to_client_config(profile, &cfg.defaults)?,
        // Naming a profile that does not exist is a mistake; falling off the
        // default profile is not.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => ClientConfig {
            timeout: Duration::from_secs(cfg.defaults.timeout),
            auto_reset_after: Duration::from_secs(cfg.defaults.auto_reset_secs),
            ..ClientConfig::local()?
        },
    };

    if let Some(ref url) = global.url {
        client.base_url = hf_config::parse_base_url(url)?;
    }
    if let Some(ref token) = global.token {
        client.api_token = Some(SecretString::from(token.clone()));
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(
        profile = %profile_name,
        base_url = %client.base_url,
        timeout_secs = client.timeout.as_secs(),
        "resolved client config"
    );
    Ok(client)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use helloface_config::Profile;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["helloface"];
        argv.extend_from_slice(args);
        argv.push("status");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(name.into(), profile);
        cfg
    }

    #[test]
    fn no_profile_falls_back_to_localhost() {
        let client = resolve_with(&global(&[]), &Config::default()).unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("http://lab:8000");
        profile.timeout = Some(5);
        let cfg = config_with("default", profile);

        let client = resolve_with(
            &global(&["--url", "http://other:9000", "--timeout", "12", "--token", "t0k"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(client.base_url.as_str(), "http://other:9000/");
        assert_eq!(client.timeout, Duration::from_secs(12));
        assert_eq!(client.api_token.unwrap().expose_secret(), "t0k");
    }

    #[test]
    fn profile_values_apply() {
        let mut profile = Profile::new("http://lab:8000");
        profile.auto_reset_secs = Some(7);
        let cfg = config_with("lab", profile);

        let client = resolve_with(&global(&["--profile", "lab"]), &cfg).unwrap();
        assert_eq!(client.base_url.as_str(), "http://lab:8000/");
        assert_eq!(client.auto_reset_after, Duration::from_secs(7));
    }

    #[test]
    fn explicit_missing_profile_is_an_error() {
        let cfg = config_with("lab", Profile::new("http://lab:8000"));
        let err = resolve_with(&global(&["--profile", "prod"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "lab");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = resolve_with(&global(&["--url", "ftp://lab"]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "base_url"));
    }
}
