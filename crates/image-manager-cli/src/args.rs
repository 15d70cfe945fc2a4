//! CLI argument definitions for image-manager.

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use image_manager_core::config::{DEFAULT_CONFIG_PATH, Overrides};

use crate::logging::Verbosity;

/// Garbage-collect stale VM image templates on S3-compatible storage.
///
/// ## Examples
///
/// Check one object, using bucket and threshold from ./config.json:
///   image-manager check --object templates/debian-12.raw
///
/// Remove it if it is older than 72 hours:
///   image-manager check --object templates/debian-12.raw --expiry-hours 72 --remove-expired
///
/// Start from an example config:
///   image-manager --config-path /etc/image-manager.json write-example-config
#[derive(Parser, Debug)]
#[command(name = "image-manager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file [default: ./config.json]
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Show debug information (turns --quiet off)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only report warnings and errors (no result lines)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether an object is over the expiry threshold
    Check(CheckArgs),

    /// Write an example config to --config-path (never overwrites)
    WriteExampleConfig,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Object key to check
    #[arg(long)]
    pub object: String,

    /// Bucket name (overrides DefaultBucket)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Expiry threshold in hours (overrides DefaultExpiryTime)
    #[arg(long)]
    pub expiry_hours: Option<u32>,

    /// Timeout for each storage call in milliseconds (overrides DefaultTimeoutMS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Remove the object if it is over the expiry threshold
    #[arg(long)]
    pub remove_expired: bool,
}

impl CheckArgs {
    /// Flags given on the command line, to be layered over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bucket: self.bucket.clone(),
            expiry_hours: self.expiry_hours,
            timeout_ms: self.timeout_ms,
        }
    }
}

impl Cli {
    pub fn config_path(&self) -> &Path {
        self.config_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.debug, self.quiet)
    }

    /// Flag combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if matches!(self.command, Command::WriteExampleConfig) && self.config_path.is_none() {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "write-example-config needs an explicit --config-path",
            ));
        }
        Ok(())
    }
}
