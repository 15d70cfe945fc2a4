//! Subcommand execution.

use std::io::Write;
use std::path::Path;

use image_manager_core::ImageManagerError;
use image_manager_core::app::ExpiryEvaluator;
use image_manager_core::config::{ConfigError, ConfigFile, Overrides, Settings};
use image_manager_core::domain::{EvaluationOutcome, ObjectRef};
use image_manager_core::impls::S3ObjectStore;
use image_manager_core::ports::{Clock, ObjectStore};
use tracing::{debug, info};

use crate::args::{CheckArgs, Cli, Command};
use crate::exit::ExitStatus;
use crate::logging::Verbosity;

pub async fn execute(cli: &Cli) -> Result<ExitStatus, ImageManagerError> {
    match &cli.command {
        Command::WriteExampleConfig => write_example_config(cli.config_path()),
        Command::Check(args) => {
            // (A) 設定ファイル + フラグ → Settings
            let settings = load_settings(cli.config_path(), args.overrides())?;
            debug!(?settings, "resolved settings");

            // (B) ストレージクライアントを用意
            let store = S3ObjectStore::connect(&settings.s3_config()).await?;

            // (C) 1 件だけ評価して終了コードを決める
            let evaluator = ExpiryEvaluator::new(store);
            check(&evaluator, &settings, args, cli.verbosity(), &mut std::io::stdout()).await
        }
    }
}

/// Defaults < config file < explicit flags.
pub fn load_settings(path: &Path, overrides: Overrides) -> Result<Settings, ConfigError> {
    let file = ConfigFile::load(path)?;
    debug!(path = %path.display(), config = ?file, "loaded config");
    Settings::resolve(file, overrides)
}

fn write_example_config(path: &Path) -> Result<ExitStatus, ImageManagerError> {
    ConfigFile::write_example(path)?;
    info!(path = %path.display(), "wrote example config");
    Ok(ExitStatus::Success)
}

/// Evaluate `args.object` and write one result line to `out` unless quiet.
pub async fn check<S: ObjectStore, C: Clock>(
    evaluator: &ExpiryEvaluator<S, C>,
    settings: &Settings,
    args: &CheckArgs,
    verbosity: Verbosity,
    out: &mut impl Write,
) -> Result<ExitStatus, ImageManagerError> {
    let object = ObjectRef::new(&settings.bucket, &args.object);
    let policy = settings.expiry_policy(args.remove_expired);

    let outcome = evaluator.evaluate(&object, &policy).await?;

    if verbosity.reports() {
        // a closed stdout must not change the exit code
        let _ = writeln!(out, "{}", describe(&object, &outcome));
    }
    Ok(ExitStatus::from_outcome(&outcome))
}

pub fn describe(object: &ObjectRef, outcome: &EvaluationOutcome) -> String {
    match outcome {
        EvaluationOutcome::NotExpired => format!("{object} not-expired"),
        EvaluationOutcome::ExpiredKept => format!("{object} expired"),
        EvaluationOutcome::ExpiredDeleted => format!("{object} expired, removed"),
        EvaluationOutcome::ExpiredDeleteFailed(e) => {
            format!("{object} expired, removal failed: {e}")
        }
    }
}
