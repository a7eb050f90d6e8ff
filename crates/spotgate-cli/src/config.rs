//! Configuration loading with command line overrides

use anyhow::Context;
use spotgate_selector::{ClassifierSpec, SelectorConfig, StatisticsConfig};

/// Load the selector configuration and apply CLI overrides
pub fn load(cli: &crate::Cli) -> anyhow::Result<SelectorConfig> {
    let mut config = SelectorConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    apply_overrides(&mut config, cli);
    Ok(config)
}

/// Override classifier ids and the statistics source; parameters are kept
fn apply_overrides(config: &mut SelectorConfig, cli: &crate::Cli) {
    if let Some(id) = &cli.unigram_classifier {
        override_id(&mut config.unigram_classifier, id);
    }

    if let Some(id) = &cli.ngram_classifier {
        override_id(&mut config.ngram_classifier, id);
    }

    if let Some(path) = &cli.statistics {
        config.statistics = StatisticsConfig::File { path: path.clone() };
    }
}

fn override_id(spec: &mut ClassifierSpec, id: &str) {
    spec.id = id.to_string();
}
