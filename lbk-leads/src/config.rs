//! Service configuration resolution for lbk-leads
//!
//! Priority per setting: command line (including its env fallback) → TOML →
//! compiled default. The root folder additionally honors
//! `LEADBOOK_ROOT_FOLDER` through [`RootFolderResolver`].

use std::path::PathBuf;

use lbk_common::config::{CompiledDefaults, RootFolderResolver, TomlConfig};
use tracing::info;

use crate::services::DuplicatePolicy;

/// Fully resolved settings for one service run
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub duplicate_policy: DuplicatePolicy,
}

impl ServiceConfig {
    pub fn resolve(
        cli_port: Option<u16>,
        cli_root_folder: Option<PathBuf>,
        toml: &TomlConfig,
    ) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = RootFolderResolver::new()
            .with_cli_arg(cli_root_folder)
            .with_toml_config(toml)
            .resolve();

        let port = cli_port.or(toml.port).unwrap_or(defaults.port);

        let duplicate_policy = if toml.import.reprocess_duplicates {
            DuplicatePolicy::Reconcile
        } else {
            DuplicatePolicy::Skip
        };

        Self {
            root_folder,
            port,
            log_level: toml.logging.level.clone(),
            log_file: toml.logging.file.clone().or(defaults.log_file),
            duplicate_policy,
        }
    }

    pub fn log_summary(&self) {
        info!(
            root_folder = %self.root_folder.display(),
            port = self.port,
            log_level = %self.log_level,
            duplicate_policy = ?self.duplicate_policy,
            "Configuration resolved"
        );
    }
}
