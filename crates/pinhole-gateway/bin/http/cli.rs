use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "PINHOLE_GATEWAY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "PINHOLE_GATEWAY_PUBLIC_BASE_URL";
pub const DEFAULT_VALIDITY_ENV: &str = "PINHOLE_GATEWAY_DEFAULT_VALIDITY_MINUTES";
pub const GENERATOR_ENV: &str = "PINHOLE_GATEWAY_GENERATOR";
pub const GENERATOR_PREFIX_ENV: &str = "PINHOLE_GATEWAY_GENERATOR_PREFIX";
pub const CODE_LENGTH_ENV: &str = "PINHOLE_GATEWAY_CODE_LENGTH";
pub const MAX_GENERATION_ATTEMPTS_ENV: &str = "PINHOLE_GATEWAY_MAX_GENERATION_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "PINHOLE_GATEWAY_LOG_FORMAT";
pub const ACCESS_LOG_ENV: &str = "PINHOLE_GATEWAY_ACCESS_LOG";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_GENERATOR_PREFIX: &str = "pin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "random")]
    Random,
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pinhole-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base of returned short links; defaults to `http://<Host>` per request.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(
        long,
        env = DEFAULT_VALIDITY_ENV,
        default_value_t = pinhole_registry::settings::DEFAULT_VALIDITY_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub default_validity_minutes: i64,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Random
    )]
    pub generator: GeneratorArg,

    /// Prefix for the `seq` generator.
    #[arg(long, env = GENERATOR_PREFIX_ENV, default_value = DEFAULT_GENERATOR_PREFIX)]
    pub generator_prefix: String,

    /// Code length for the `random` generator.
    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = pinhole_generator::random::DEFAULT_LENGTH)]
    pub code_length: usize,

    #[arg(
        long,
        env = MAX_GENERATION_ATTEMPTS_ENV,
        default_value_t = pinhole_registry::settings::DEFAULT_MAX_GENERATION_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_generation_attempts: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    /// Appends one line per request to this file.
    #[arg(long, env = ACCESS_LOG_ENV)]
    pub access_log: Option<PathBuf>,
}
