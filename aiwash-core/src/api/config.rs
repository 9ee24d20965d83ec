//! Configuration API for sentence classification

use crate::error::{Error, Result};

/// Default tuning constants
pub mod defaults {
    /// Actionable/Speculative indifference threshold
    pub const TAU: f32 = 0.07;

    /// Irrelevant-closeness epsilon for the two-stage check
    pub const EPS_IRR: f32 = 0.03;

    /// Minimum token count below which a sentence skips rule gating
    pub const MIN_TOKENS: usize = 6;
}

/// Classification configuration
///
/// All thresholds are caller-tunable; the defaults are the consolidated
/// values the engine was validated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Gate obvious Irrelevant sentences before scoring and apply the
    /// Irrelevant-closeness check after it
    pub two_stage: bool,
    /// Apply additive score nudges after centroid scoring
    pub rule_boosts: bool,
    /// Actionable/Speculative margin below which the tie-break applies
    pub tau: f32,
    /// Epsilon for treating Irrelevant as tied with the A/S top score
    pub eps_irr: f32,
    /// Token count below which the sentence falls straight through to raw
    /// centroid scoring
    pub min_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            two_stage: true,
            rule_boosts: true,
            tau: defaults::TAU,
            eps_irr: defaults::EPS_IRR,
            min_tokens: defaults::MIN_TOKENS,
        }
    }
}

impl ClassifierConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.tau.is_finite() || self.tau < 0.0 {
            return Err(Error::Configuration(
                "tau must be a finite non-negative value".into(),
            ));
        }
        if !self.eps_irr.is_finite() || self.eps_irr < 0.0 {
            return Err(Error::Configuration(
                "eps_irr must be a finite non-negative value".into(),
            ));
        }
        if self.min_tokens == 0 {
            return Err(Error::Configuration(
                "min_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`ClassifierConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    two_stage: Option<bool>,
    rule_boosts: Option<bool>,
    tau: Option<f32>,
    eps_irr: Option<f32>,
    min_tokens: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the two-stage Irrelevant logic
    pub fn two_stage(mut self, enabled: bool) -> Self {
        self.two_stage = Some(enabled);
        self
    }

    /// Enable or disable post-scoring rule boosts
    pub fn rule_boosts(mut self, enabled: bool) -> Self {
        self.rule_boosts = Some(enabled);
        self
    }

    /// Set the A/S indifference threshold
    pub fn tau(mut self, tau: f32) -> Self {
        self.tau = Some(tau);
        self
    }

    /// Set the Irrelevant-closeness epsilon
    pub fn eps_irr(mut self, eps_irr: f32) -> Self {
        self.eps_irr = Some(eps_irr);
        self
    }

    /// Set the fragment-shortcut token threshold
    pub fn min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = Some(min_tokens);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClassifierConfig> {
        let mut config = ClassifierConfig::default();

        if let Some(two_stage) = self.two_stage {
            config.two_stage = two_stage;
        }
        if let Some(rule_boosts) = self.rule_boosts {
            config.rule_boosts = rule_boosts;
        }
        if let Some(tau) = self.tau {
            config.tau = tau;
        }
        if let Some(eps_irr) = self.eps_irr {
            config.eps_irr = eps_irr;
        }
        if let Some(min_tokens) = self.min_tokens {
            config.min_tokens = min_tokens;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_overrides_thresholds() {
        let config = ClassifierConfig::builder()
            .tau(0.05)
            .eps_irr(0.02)
            .min_tokens(4)
            .two_stage(false)
            .build()
            .unwrap();
        assert_eq!(config.tau, 0.05);
        assert_eq!(config.eps_irr, 0.02);
        assert_eq!(config.min_tokens, 4);
        assert!(!config.two_stage);
        assert!(config.rule_boosts);
    }

    #[test]
    fn rejects_negative_tau() {
        assert!(ClassifierConfig::builder().tau(-0.1).build().is_err());
    }

    #[test]
    fn rejects_zero_min_tokens() {
        assert!(ClassifierConfig::builder().min_tokens(0).build().is_err());
    }
}
