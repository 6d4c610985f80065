//! CLI definitions for the `chatbridge` binary.
//!
//! Every serve option can also come from the environment (or a `.env` file),
//! so `chatbridge serve` with no flags is the usual deployment.

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;

use chatbridge_infra::config::BridgeConfig;
use chatbridge_types::config::{
    DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_PORT,
    DEFAULT_STREAM_BASE_URL, ServerConfig,
};

/// Bridge a chat platform to a language model.
#[derive(Parser)]
#[command(name = "chatbridge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "CHATBRIDGE_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Apply database migrations and exit.
    Migrate {
        /// SQLite connection URL.
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Do not apply embedded migrations at startup.
    #[arg(long, env = "CHATBRIDGE_SKIP_MIGRATIONS")]
    pub skip_migrations: bool,

    #[arg(long, env = "STREAM_API_KEY")]
    pub stream_api_key: String,

    #[arg(long, env = "STREAM_API_SECRET", hide_env_values = true)]
    pub stream_api_secret: String,

    #[arg(long, env = "STREAM_BASE_URL", default_value = DEFAULT_STREAM_BASE_URL)]
    pub stream_base_url: String,

    #[arg(long = "openai-api-key", env = "OPEN_AI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    #[arg(long = "openai-base-url", env = "OPEN_AI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// Completion model.
    #[arg(long, env = "OPEN_AI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
}

impl ServeArgs {
    pub fn into_config(self, enable_otel: bool) -> BridgeConfig {
        BridgeConfig {
            database_url: self.database_url,
            run_migrations: !self.skip_migrations,
            server: ServerConfig {
                host: self.host,
                port: self.port,
            },
            stream_api_key: self.stream_api_key,
            stream_api_secret: SecretString::from(self.stream_api_secret),
            stream_base_url: self.stream_base_url,
            openai_api_key: SecretString::from(self.openai_api_key),
            openai_base_url: self.openai_base_url,
            model: self.model,
            enable_otel,
        }
    }
}
