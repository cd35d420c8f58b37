//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::connector::{CheckResult, Connector, Message};
use crate::error::{Error, Result, ResultExt};
use crate::source::AppStoreConnectSource;
use crate::types::JsonValue;
use futures::StreamExt;
use serde_json::json;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    source: AppStoreConnectSource,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            source: AppStoreConnectSource::new(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Discover => self.discover().await,
            Commands::Read { streams } => self.read(streams.as_deref()).await,
        }
    }

    /// Configuration as given, before validation.
    ///
    /// Inline JSON takes precedence over the config file.
    fn raw_config(&self) -> Result<JsonValue> {
        if let Some(json_str) = &self.cli.config_json {
            serde_json::from_str(json_str).context("Invalid --config-json")
        } else if let Some(path) = &self.cli.config {
            SourceConfig::read_value(path)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Err(Error::config("No configuration given (use --config or --config-json)"))
        }
    }

    /// Validated configuration, normalized back to JSON
    fn load_config(&self) -> Result<JsonValue> {
        let config = SourceConfig::from_value(&self.raw_config()?).context("Invalid configuration")?;
        Ok(serde_json::to_value(config)?)
    }

    /// Show spec
    fn spec(&self) -> Result<()> {
        let spec = self.source.spec();

        self.output_message(&json!({
            "type": "SPEC",
            "spec": {
                "documentationUrl": spec.documentation_url,
                "connectionSpecification": spec.connection_specification
            }
        }));

        Ok(())
    }

    /// Check connection.
    ///
    /// Configuration problems are reported as a failed status, not an error.
    async fn check(&self) -> Result<()> {
        let result = match self.raw_config() {
            Ok(config) => self.source.check(&config).await?,
            Err(e) if self.has_config_source() => {
                CheckResult::failure(format!("Invalid configuration: {e}"))
            }
            Err(e) => return Err(e),
        };

        self.output_message(&connection_status(&result));
        Ok(())
    }

    fn has_config_source(&self) -> bool {
        self.cli.config_json.is_some() || self.cli.config.is_some()
    }

    /// Discover streams
    async fn discover(&self) -> Result<()> {
        let config = self.load_config()?;
        let catalog = self.source.discover(&config).await?;

        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": catalog
        }));

        Ok(())
    }

    /// Read streams, one message per line
    async fn read(&self, streams: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let selected = parse_stream_list(streams);

        let mut messages = self.source.read(&config, &selected).await?;
        let mut records = 0u64;

        while let Some(message) = messages.next().await {
            match message {
                Ok(message) => {
                    if message.is_record() {
                        records += 1;
                    }
                    self.output_message(&message.to_json());
                }
                Err(e) => {
                    error!(error = %e, records, "Read failed");
                    self.output_message(&Message::error(e.to_string()).to_json());
                    return Err(e);
                }
            }
        }

        info!(records, "Read complete");
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// `CONNECTION_STATUS` envelope for a check result
fn connection_status(result: &CheckResult) -> JsonValue {
    let status = if result.success { "SUCCEEDED" } else { "FAILED" };
    json!({
        "type": "CONNECTION_STATUS",
        "connectionStatus": {
            "status": status,
            "message": result.message
        }
    })
}

/// Split a comma-separated stream list, dropping blanks
fn parse_stream_list(streams: Option<&str>) -> Vec<String> {
    streams
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
