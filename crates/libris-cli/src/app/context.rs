//! Application context for the Libris CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file so
//! handlers take a single parameter.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use libris_core::{Catalog, CsvFileStore, DEFAULT_LOAN_DAYS};

use crate::cli::Cli;
use crate::config::LibrisConfig;
use crate::ui::UiContext;

use super::resolver::{load_config, resolve_data_dir};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<LibrisConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it on first use.
    pub fn config(&self) -> anyhow::Result<&LibrisConfig> {
        self.config.get_or_try_init(load_config)
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli.data_dir.as_deref(), self.config()?)
    }

    /// Loan length: explicit flag, then `[loans] default_days`, then 14.
    pub fn loan_days(&self, explicit: Option<u32>) -> anyhow::Result<u32> {
        if let Some(days) = explicit {
            return Ok(days);
        }
        Ok(self
            .config()?
            .loans
            .default_days
            .unwrap_or(DEFAULT_LOAN_DAYS))
    }

    /// Open the catalog over the resolved data directory.
    pub fn open_catalog(&self) -> anyhow::Result<Catalog<CsvFileStore>> {
        let dir = self.data_dir()?;
        let store = CsvFileStore::open(dir)?;
        Ok(Catalog::open(store)?)
    }

    /// `--no-color`, or `[ui] color = false` in a config that loads.
    pub fn color_disabled(&self) -> bool {
        self.cli.no_color || matches!(self.config(), Ok(config) if config.ui.color == Some(false))
    }

    /// UI context for this invocation; `json` is the command's `--json` flag.
    pub fn ui(&self, json: bool) -> anyhow::Result<UiContext> {
        self.config()?;
        Ok(UiContext::from_env(json, self.color_disabled()))
    }
}
