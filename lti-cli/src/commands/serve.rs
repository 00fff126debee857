//! Serve command for running the tool provider
//!
//! Loads the layered configuration, applies command line overrides and runs
//! the HTTP server until it is interrupted.

use anyhow::Result;
use clap::Args;
use lti_server::LtiServer;
use tracing::info;

use crate::config::{ConfigLoader, ToolConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Base URL consumers use to reach the tool
    #[arg(long)]
    pub public_url: Option<String>,

    /// OAuth consumer key (overrides config)
    #[arg(long)]
    pub consumer_key: Option<String>,

    /// OAuth consumer secret (overrides config)
    #[arg(long, env = "LTI_TOOL_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    apply_overrides(&mut config, args);

    let server_config = config.server_config();
    info!(
        consumer_key = %server_config.oauth.consumer_key,
        "Starting LTI tool on {}",
        server_config.addr()
    );

    let server = LtiServer::new(server_config)?;
    server.run().await.map_err(Into::into)
}

fn apply_overrides(config: &mut ToolConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(public_url) = args.public_url {
        config.server.public_url = Some(public_url);
    }
    if let Some(key) = args.consumer_key {
        config.oauth.consumer_key = key;
    }
    if let Some(secret) = args.consumer_secret {
        config.oauth.consumer_secret = secret;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn test_serve_args_defaults_leave_config_alone() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.serve.port.is_none());
        assert!(cli.serve.host.is_none());
        assert!(cli.serve.consumer_key.is_none());

        let mut config = ToolConfig::default();
        apply_overrides(&mut config, cli.serve);
        assert_eq!(config.server.port, 9292);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_serve_args_override_config() {
        let cli = TestCli::parse_from([
            "test",
            "--port",
            "8080",
            "--host",
            "0.0.0.0",
            "--consumer-key",
            "canvas",
            "--consumer-secret",
            "s3cret",
            "--public-url",
            "https://tool.example",
        ]);

        let mut config = ToolConfig::default();
        apply_overrides(&mut config, cli.serve);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.oauth.consumer_key, "canvas");
        assert_eq!(config.oauth.consumer_secret, "s3cret");
        assert_eq!(
            config.server.public_url.as_deref(),
            Some("https://tool.example")
        );
    }

    #[test]
    fn test_serve_short_port_flag() {
        let cli = TestCli::parse_from(["test", "-p", "9000"]);
        assert_eq!(cli.serve.port, Some(9000));
    }
}
