use super::ConfigError;
use crate::audit::RuleConfig;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolves the audit policy: optional JSON file first, then per-field
/// environment overrides. The merged policy must validate.
pub(super) fn load_rules() -> Result<RuleConfig, ConfigError> {
    let mut rules = match env::var("DEAL_AUDIT_RULES_FILE") {
        Ok(path) if !path.trim().is_empty() => read_rules_file(PathBuf::from(path))?,
        _ => RuleConfig::standard(),
    };

    if let Some(min) = float_override("DEAL_AUDIT_CPM_MIN")? {
        rules.market_cpm.min = min;
    }
    if let Some(max) = float_override("DEAL_AUDIT_CPM_MAX")? {
        rules.market_cpm.max = max;
    }
    if let Ok(raw) = env::var("DEAL_AUDIT_MAX_SEGMENTS") {
        rules.max_segments = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidOverride {
                variable: "DEAL_AUDIT_MAX_SEGMENTS",
                value: raw,
            })?;
    }

    rules.validate().map_err(ConfigError::InvalidRules)?;
    Ok(rules)
}

fn read_rules_file(path: PathBuf) -> Result<RuleConfig, ConfigError> {
    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::RulesFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::RulesParse { path, source })
}

fn float_override(variable: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidOverride {
                variable,
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}
