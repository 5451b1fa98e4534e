use crate::error::{AlignError, Result};
use crate::layout::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_MAX_ITERATIONS: usize = 10;
pub const DEFAULT_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignConfig {
    pub strategy: Strategy,
    pub max_iterations: usize,
    /// Relative tolerance; scaled by the larger slide dimension.
    pub epsilon: f32,
    /// Fail instead of warning when overlaps survive the iteration cap.
    pub strict: bool,
    /// Per-slide strategy overrides keyed by slide index.
    pub slide_overrides: BTreeMap<usize, Strategy>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::PreserveOrder,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            strict: false,
            slide_overrides: BTreeMap::new(),
        }
    }
}

impl AlignConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(AlignError::config(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Strategy for slide `index`: configured override, then the slide's own
    /// choice, then the deck's, then the configured default.
    pub fn strategy_for(
        &self,
        index: usize,
        slide: Option<Strategy>,
        deck: Option<Strategy>,
    ) -> Strategy {
        self.slide_overrides
            .get(&index)
            .copied()
            .or(slide)
            .or(deck)
            .unwrap_or(self.strategy)
    }

    /// Absolute comparison tolerance for a slide of the given size.
    pub fn tolerance(&self, width: f32, height: f32) -> f32 {
        let scale = width.max(height);
        (self.epsilon * scale).max(f32::EPSILON * scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub align: AlignConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    strategy: Option<Strategy>,
    max_iterations: Option<usize>,
    epsilon: Option<f32>,
    strict: Option<bool>,
    slide_overrides: Option<BTreeMap<String, Strategy>>,
    pretty: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config file body. JSON5 syntax (comments, trailing commas) is accepted.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(v) = parsed.strategy {
        config.align.strategy = v;
    }
    if let Some(v) = parsed.max_iterations {
        config.align.max_iterations = v;
    }
    if let Some(v) = parsed.epsilon {
        config.align.epsilon = v;
    }
    if let Some(v) = parsed.strict {
        config.align.strict = v;
    }
    if let Some(overrides) = parsed.slide_overrides {
        for (key, strategy) in overrides {
            let index: usize = key.trim().parse().map_err(|_| {
                anyhow::anyhow!("slideOverrides key `{key}` is not a slide index")
            })?;
            config.align.slide_overrides.insert(index, strategy);
        }
    }
    if let Some(v) = parsed.pretty {
        config.output.pretty = v;
    }

    config.align.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.align.strategy, Strategy::PreserveOrder);
        assert_eq!(config.align.max_iterations, 10);
        assert!(!config.align.strict);
        assert!(config.output.pretty);
    }

    #[test]
    fn parses_json5_with_overrides() {
        let config = parse_config(
            r#"{
                // deck-wide default
                strategy: "compact",
                maxIterations: 4,
                strict: true,
                slideOverrides: { "2": "balanced" },
                pretty: false,
            }"#,
        )
        .expect("config");
        assert_eq!(config.align.strategy, Strategy::Compact);
        assert_eq!(config.align.max_iterations, 4);
        assert!(config.align.strict);
        assert!(!config.output.pretty);
        assert_eq!(
            config.align.slide_overrides.get(&2),
            Some(&Strategy::Balanced)
        );
    }

    #[test]
    fn rejects_bad_override_key_and_epsilon() {
        assert!(parse_config(r#"{ slideOverrides: { "first": "compact" } }"#).is_err());
        assert!(parse_config(r#"{ epsilon: -1 }"#).is_err());
        assert!(parse_config(r#"{ strategy: "random" }"#).is_err());
    }

    #[test]
    fn strategy_precedence() {
        let mut config = AlignConfig::default().with_strategy(Strategy::Compact);
        config.slide_overrides.insert(1, Strategy::Balanced);
        assert_eq!(config.strategy_for(0, None, None), Strategy::Compact);
        assert_eq!(
            config.strategy_for(0, None, Some(Strategy::PreserveOrder)),
            Strategy::PreserveOrder
        );
        assert_eq!(
            config.strategy_for(0, Some(Strategy::Balanced), Some(Strategy::PreserveOrder)),
            Strategy::Balanced
        );
        assert_eq!(
            config.strategy_for(1, Some(Strategy::PreserveOrder), None),
            Strategy::Balanced
        );
    }

    #[test]
    fn tolerance_scales_with_slide() {
        let config = AlignConfig::default();
        let tol = config.tolerance(1280.0, 720.0);
        assert!((tol - 1.28e-3).abs() < 1e-6);
    }

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load_config(None).expect("config"), Config::default());
    }
}
