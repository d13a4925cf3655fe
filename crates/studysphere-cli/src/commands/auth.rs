//! Auth commands - Login, Register, Logout, and Status
//!
//! Provides the `studysphere auth` CLI subcommands which:
//! 1. `login`    - Verifies an email/password pair against Firebase and
//!    shows the resulting session.
//! 2. `register` - Creates an account, then sets the display name as a
//!    strictly sequenced follow-up.
//! 3. `logout`   - Signs out of the current session, if there is one.
//! 4. `status`   - Shows the current session state.
//!
//! Sessions are held in memory only, so `logout` and `status` consult the
//! session gate of a freshly built flow; nothing is persisted between runs.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use studysphere_core::config::Config;
use studysphere_core::domain::{AuthError, Credentials, RegistrationRequest, Session};
use studysphere_core::usecases::AuthenticateUseCase;
use studysphere_firebase::client::FirebaseClient;
use studysphere_firebase::provider::FirebaseIdentityProvider;

use crate::notify::ConsoleNotifier;
use crate::output::{OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Firebase Web API key (overrides config and environment)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Register a new account
    Register {
        /// Display name for the new account
        #[arg(long)]
        name: String,
        /// Account email address
        #[arg(long)]
        email: String,
        /// Account password (at least 6 characters)
        #[arg(long)]
        password: String,
        /// Firebase Web API key (overrides config and environment)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Sign out of the current session
    Logout,
    /// Check authentication status
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: Option<&str>) -> Result<()> {
        let fmt = format.formatter();
        let config = load_config(config_path);

        match self {
            AuthCommand::Login {
                email,
                password,
                api_key,
            } => {
                let usecase = build_usecase(api_key.as_deref(), &config, format)?;
                let result = usecase
                    .submit_login(&Credentials::new(email, password))
                    .await;
                report_submission(&*fmt, format, result)
            }
            AuthCommand::Register {
                name,
                email,
                password,
                api_key,
            } => {
                let usecase = build_usecase(api_key.as_deref(), &config, format)?;
                let result = usecase
                    .submit_registration(&RegistrationRequest::new(name, email, password))
                    .await;
                report_submission(&*fmt, format, result)
            }
            AuthCommand::Logout => {
                let usecase = build_usecase(None, &config, format).ok();
                self.execute_logout(&*fmt, usecase.as_ref())
            }
            AuthCommand::Status => {
                let usecase = build_usecase(None, &config, format).ok();
                self.execute_status(&*fmt, format, usecase.as_ref())
            }
        }
    }

    /// Execute logout: consult the session gate, sign out if a user is
    /// signed in. Sessions live only for the length of one invocation, so
    /// a fresh process never has one to clear.
    fn execute_logout(
        &self,
        fmt: &dyn OutputFormatter,
        usecase: Option<&AuthenticateUseCase>,
    ) -> Result<()> {
        match usecase {
            Some(usecase) if usecase.current_session().is_authenticated() => {
                usecase.logout();
                fmt.success("Logged out");
            }
            _ => {
                fmt.info("No session configured. Nothing to log out.");
                fmt.info("Sessions are not persisted between invocations.");
            }
        }
        Ok(())
    }

    /// Execute status check against the session gate.
    fn execute_status(
        &self,
        fmt: &dyn OutputFormatter,
        format: OutputFormat,
        usecase: Option<&AuthenticateUseCase>,
    ) -> Result<()> {
        let session = usecase
            .map(AuthenticateUseCase::current_session)
            .unwrap_or_default();

        if format.is_json() {
            fmt.print_json(&session_json(&session));
        } else if session.is_authenticated() {
            print_session(fmt, format, &session);
        } else {
            fmt.info("Authentication status: Not signed in");
            fmt.info("Run 'studysphere auth login' to sign in");
        }
        Ok(())
    }
}

/// Loads the config from the given path, or the default location.
fn load_config(config_path: Option<&str>) -> Config {
    match config_path {
        Some(path) => Config::load_or_default(Path::new(path)),
        None => Config::load_or_default(&Config::default_path()),
    }
}

/// Resolves the API key: `--api-key` flag, then `auth.api_key` in the
/// config file, then the environment.
fn resolve_api_key(
    cli_api_key: Option<&str>,
    config: &Config,
    env_api_key: Option<String>,
) -> Result<String> {
    cli_api_key
        .map(str::to_string)
        .or_else(|| config.auth.api_key.clone())
        .or(env_api_key)
        .context(
            "No API key provided. Use --api-key, set auth.api_key in config.yaml, \
             or export STUDYSPHERE_API_KEY",
        )
}

/// Wires up the authentication flow against the configured provider.
fn build_usecase(
    cli_api_key: Option<&str>,
    config: &Config,
    format: OutputFormat,
) -> Result<AuthenticateUseCase> {
    let api_key = resolve_api_key(
        cli_api_key,
        config,
        std::env::var("STUDYSPHERE_API_KEY").ok(),
    )?;

    let client = match &config.auth.endpoint {
        Some(endpoint) => FirebaseClient::with_base_url(api_key, endpoint),
        None => FirebaseClient::new(api_key),
    };

    let provider = Arc::new(FirebaseIdentityProvider::new(client));
    let notifier = Arc::new(ConsoleNotifier::new(format.is_json()));

    Ok(AuthenticateUseCase::new(provider, notifier))
}

/// Reports a login/registration outcome and sets the exit code.
///
/// Provider failures were already surfaced through the notifier, so they
/// only terminate the process; local failures (validation) are reported
/// here before exiting.
fn report_submission(
    fmt: &dyn OutputFormatter,
    format: OutputFormat,
    result: Result<Session, AuthError>,
) -> Result<()> {
    match result {
        Ok(session) => {
            print_session(fmt, format, &session);
            Ok(())
        }
        Err(err) => {
            if err.provider_message().is_none() {
                fmt.error(&err.to_string());
            }
            std::process::exit(1);
        }
    }
}

/// Renders a session as a JSON value for `--json` output.
fn session_json(session: &Session) -> serde_json::Value {
    match session.profile() {
        Some(profile) => serde_json::json!({
            "authenticated": true,
            "user_id": profile.user_id().as_str(),
            "display_name": profile.display_name(),
            "email": profile.email().map(|e| e.as_str()),
        }),
        None => serde_json::json!({ "authenticated": false }),
    }
}

/// Displays the session established by a login or registration.
fn print_session(fmt: &dyn OutputFormatter, format: OutputFormat, session: &Session) {
    let Some(profile) = session.profile() else {
        fmt.info("Not signed in");
        return;
    };

    info!(user_id = %profile.user_id(), "Session established");

    if format.is_json() {
        fmt.print_json(&session_json(session));
    } else {
        match profile.display_name() {
            Some(name) => fmt.success(&format!("Signed in as {} ({})", name, profile.user_id())),
            None => fmt.success(&format!("Signed in as {}", profile.user_id())),
        }
        if let Some(email) = profile.email() {
            fmt.info(&format!("Email: {}", email));
        }
    }
}
