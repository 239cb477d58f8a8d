//! Wiring from configuration to a ready [`Controller`].

use std::sync::Arc;

use anyhow::Context;

use workact_ai::HttpCompletionClient;
use workact_auth::AllowList;
use workact_catalog::electrical_works;
use workact_infra::{Archiver, JsonFileHistoryStore, TextFileRenderer};

use crate::config::BotConfig;
use crate::controller::Controller;

pub fn build_controller(config: &BotConfig) -> anyhow::Result<Controller> {
    let catalog = electrical_works().context("default work catalog is invalid")?;

    let allow_list = AllowList::new(config.authorized_users.iter().copied());
    if allow_list.is_empty() {
        tracing::warn!("AUTHORIZED_USERS is empty; every operator will be refused");
    }
    if config.llm.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY not set; /ask_gpt requests will be sent without auth");
    }

    let ai = HttpCompletionClient::new(config.llm.clone()).context("failed to build completion client")?;

    let archiver = Archiver::new(
        Arc::new(TextFileRenderer::new(&config.documents_dir)),
        Arc::new(JsonFileHistoryStore::new(&config.history_file)),
    );

    tracing::info!(
        operators = allow_list.len(),
        work_types = catalog.entries().len(),
        history = %config.history_file.display(),
        documents = %config.documents_dir.display(),
        "bot configured"
    );

    Ok(Controller::new(
        Arc::new(allow_list),
        Arc::new(catalog),
        archiver,
        Arc::new(ai),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BotConfig::from_lookup(|_| None).unwrap();
        config.history_file = dir.path().join("history.json");
        config.documents_dir = dir.path().to_path_buf();

        let controller = build_controller(&config).unwrap();
        assert_eq!(controller.sessions().active_count(), 0);
    }
}
