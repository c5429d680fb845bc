//! Recommend command implementation for the recnews CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use recnews_core::{DEFAULT_TOP_K, RecommendRequest, Recommendation, Recommender, SnapshotTables};
use recnews_hybrid::{HybridRecommender, ModelConfig, Snapshot};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_RANK, ARG_STRATEGY, ARG_TOP_K, ARG_TOP_P, ARG_USE_HISTORY, ARG_USER_ID,
    CliError, DEFAULT_DATABASE, ENV_USER_ID,
};

/// Entry point used to rank candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Cosine similarity over latent factors.
    #[default]
    Latent,
    /// Items read by peers in the reader's cluster.
    Cluster,
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a warehouse snapshot from SQLite, fit the latent-factor \
                 model, and print the reader's recommendations as a JSON \
                 array. Options can come from CLI flags, configuration files, \
                 or RECNEWS_* environment variables.",
    about = "Recommend articles for one reader"
)]
#[ortho_config(prefix = "RECNEWS")]
pub(crate) struct RecommendArgs {
    /// Reader to recommend for.
    #[arg(value_name = ARG_USER_ID)]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// SQLite snapshot to load (defaults to `recnews.db`).
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Ranking strategy (defaults to `latent`).
    #[arg(long = ARG_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Number of items to return, between 1 and 50 (defaults to 5).
    #[arg(long = ARG_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Candidate pool size, at least 5 (defaults to every candidate).
    #[arg(long = ARG_TOP_P, value_name = "n")]
    #[serde(default)]
    pub(crate) top_p: Option<usize>,
    /// Personalise from history; `false` ranks by popularity (defaults to `true`).
    #[arg(long = ARG_USE_HISTORY, value_name = "bool", action = clap::ArgAction::Set)]
    #[serde(default)]
    pub(crate) use_history: Option<bool>,
    /// Latent dimensions kept by the factorisation (defaults to 2).
    #[arg(long = ARG_RANK, value_name = "k")]
    #[serde(default)]
    pub(crate) rank: Option<usize>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the SQLite snapshot.
    pub(crate) database: Utf8PathBuf,
    /// Entry point to call.
    pub(crate) strategy: Strategy,
    /// Validated request parameters.
    pub(crate) request: RecommendRequest,
    /// Model parameters for the snapshot build.
    pub(crate) model: ModelConfig,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.database, ARG_DATABASE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let user_id = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_USER_ID,
        })?;
        let request = RecommendRequest::new(
            user_id,
            args.top_k.unwrap_or(DEFAULT_TOP_K),
            args.top_p,
            args.use_history.unwrap_or(true),
        )?;
        let model = args
            .rank
            .map_or_else(ModelConfig::default, |rank| ModelConfig { rank });

        Ok(Self {
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            strategy: args.strategy.unwrap_or_default(),
            request,
            model,
        })
    }
}

/// Produces the raw tables for the current invocation.
pub(super) trait SnapshotLoader {
    fn load(&self, config: &RecommendConfig) -> Result<SnapshotTables, CliError>;
}

/// Reads tables from the configured SQLite database.
pub(super) struct SqliteSnapshotLoader;

impl SnapshotLoader for SqliteSnapshotLoader {
    fn load(&self, config: &RecommendConfig) -> Result<SnapshotTables, CliError> {
        config.validate_sources()?;
        recnews_data::load_snapshot(&config.database).map_err(|source| CliError::LoadSnapshot {
            path: config.database.clone(),
            source,
        })
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &SqliteSnapshotLoader, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    loader: &dyn SnapshotLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommendations = execute_recommend(&config, loader)?;
    write_recommendations(writer, &recommendations)
}

fn execute_recommend(
    config: &RecommendConfig,
    loader: &dyn SnapshotLoader,
) -> Result<Vec<Recommendation>, CliError> {
    let tables = loader.load(config)?;
    let recommender = HybridRecommender::new(Snapshot::build(tables, config.model)?);
    let request = &config.request;
    let recommendations = match config.strategy {
        Strategy::Latent => recommender.by_latent_factors(request),
        Strategy::Cluster => recommender.by_cluster(request)?,
    };
    if recommendations.is_empty() {
        return Err(CliError::NoRecommendations {
            user_id: request.user_id().to_owned(),
        });
    }
    info!(
        "recommended {} items for {} via {:?}",
        recommendations.len(),
        request.user_id(),
        config.strategy
    );
    Ok(recommendations)
}

fn write_recommendations(
    writer: &mut dyn Write,
    recommendations: &[Recommendation],
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(recommendations)
        .map_err(CliError::SerialiseRecommendations)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
