//! Classi - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Classi - customs classification chat widget
#[derive(Parser, Debug)]
#[command(name = "classi")]
#[command(version)]
#[command(about = "Terminal chat widget for the Bahamas customs classification service")]
pub struct Args {
    /// Base URL of the classification service
    #[arg(long)]
    pub server: Option<String>,

    /// Bearer token for authentication (or set CLASSI_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Start with the widget minimized
    #[arg(long)]
    pub minimized: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = classi::config::load_config_with_precedence(args.config.clone())?;
        let merged = classi::config::merge_config(config_file);
        let with_env = classi::config::apply_env_overrides(merged);

        // Boolean flags only override when explicitly set.
        let minimized_override = if args.minimized { Some(true) } else { None };
        classi::config::apply_cli_overrides(with_env, args.server.clone(), minimized_override)
    };

    classi::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Resolve the session from --token or CLASSI_TOKEN. A missing or
    // rejected token is not fatal: the app runs with the widget suppressed,
    // matching the widget's session gate.
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("CLASSI_TOKEN").ok())
        .filter(|t| !t.is_empty());

    let session = match token {
        Some(token) => match classi::session::Session::authenticate(&config.server_url, &token) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "authentication failed, widget disabled");
                None
            }
        },
        None => {
            warn!("no token provided, widget disabled");
            None
        }
    };

    // Without a session the transport is never exercised (the widget is
    // suppressed), so an empty token is fine.
    let auth_token = session
        .as_ref()
        .map(|s| s.token().to_string())
        .unwrap_or_default();
    let transport: Arc<dyn classi::transport::ChatTransport> = Arc::new(
        classi::transport::HttpTransport::new(&config.server_url, auth_token)?,
    );

    let styles = classi::view::MessageStyles::with_color_config(
        classi::view::ColorConfig::from_env_and_args(args.no_color),
    );

    let mut app = classi::view::TuiApp::new(&config, session, transport, styles)?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["classi", "--help"]);
        // Help returns Err with DisplayHelp, which is success
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["classi", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["classi"]);
        assert_eq!(args.server, None);
        assert_eq!(args.token, None);
        assert!(!args.minimized);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_server_flag() {
        let args = Args::parse_from(["classi", "--server", "https://classi.example.com"]);
        assert_eq!(args.server, Some("https://classi.example.com".to_string()));
    }

    #[test]
    fn test_token_flag() {
        let args = Args::parse_from(["classi", "--token", "tok-abc"]);
        assert_eq!(args.token, Some("tok-abc".to_string()));
    }

    #[test]
    fn test_minimized_flag() {
        let args = Args::parse_from(["classi", "--minimized"]);
        assert!(args.minimized);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["classi", "--no-color"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["classi", "--config", "/tmp/classi.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/classi.toml")));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Args::try_parse_from(["classi", "--frobnicate"]);
        assert!(result.is_err());
    }
}
