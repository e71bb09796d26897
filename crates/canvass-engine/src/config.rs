//! Engine configuration
//!
//! Every threshold the engine uses lives here and is passed in explicitly.
//! The engine never reads the environment.

use crate::{EngineError, Result};
use canvass_domain::ValidationStage;
use serde::{Deserialize, Serialize};

/// Graduation thresholds for one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThresholds {
    /// Distinct tagged interviews required
    pub min_interviews: usize,
    /// Minimum average assumption confidence
    pub min_confidence: f64,
    /// Maximum invalidated assumptions tolerated
    pub max_invalidated: usize,
}

impl StageThresholds {
    /// Thresholds from the static stage table
    pub fn for_stage(stage: ValidationStage) -> Self {
        let def = stage.definition();
        Self {
            min_interviews: def.minimum_interviews,
            min_confidence: def.graduation_criteria.min_confidence,
            max_invalidated: def.graduation_criteria.max_invalidated,
        }
    }
}

/// Configuration for stage evaluation and validation eligibility
///
/// # Examples
///
/// ```
/// use canvass_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.minimum_interviews_for_validation, 3);
/// assert_eq!(config.minimum_beachhead_interviews, 5);
/// assert!(config.validate().is_ok());
/// ```
///
/// Loaded from TOML, every field is optional:
///
/// ```toml
/// minimum_interviews_for_validation = 3
/// minimum_beachhead_interviews = 5
/// minimum_support_ratio = 0.6
/// maximum_support_ratio_for_invalidation = 0.3
/// confidence_to_validate = 4
/// confidence_to_invalidate = 2
/// stage_weights = [40, 40, 20]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tags an assumption needs before a status can be suggested
    pub minimum_interviews_for_validation: usize,

    /// Beachhead-segment interviews a stage 1 assumption needs
    pub minimum_beachhead_interviews: usize,

    /// Support ratio at or above which validation is suggested
    pub minimum_support_ratio: f64,

    /// Support ratio at or below which invalidation is suggested
    pub maximum_support_ratio_for_invalidation: f64,

    /// Confidence floor applied when a validation is accepted
    pub confidence_to_validate: u8,

    /// Confidence ceiling applied when an invalidation is accepted
    pub confidence_to_invalidate: u8,

    /// Per-stage graduation thresholds, stage 1 first
    pub stages: [StageThresholds; 3],

    /// Weight (in percent) of each stage in overall progress
    pub stage_weights: [u8; 3],
}

impl Default for EngineConfig {
    /// Defaults: 3 tags to validate, 5 beachhead interviews, support ratio
    /// thresholds 0.6 / 0.3, stage interview minimums 5/5/3, minimum
    /// confidence 4/4/3, invalidation limits 0/1/2, weights 40/40/20.
    fn default() -> Self {
        Self {
            minimum_interviews_for_validation: 3,
            minimum_beachhead_interviews: 5,
            minimum_support_ratio: 0.6,
            maximum_support_ratio_for_invalidation: 0.3,
            confidence_to_validate: 4,
            confidence_to_invalidate: 2,
            stages: [
                StageThresholds::for_stage(ValidationStage::One),
                StageThresholds::for_stage(ValidationStage::Two),
                StageThresholds::for_stage(ValidationStage::Three),
            ],
            stage_weights: [40, 40, 20],
        }
    }
}

impl EngineConfig {
    /// Lower bars, for classroom exercises with few interviews
    pub fn lenient() -> Self {
        Self {
            minimum_interviews_for_validation: 2,
            minimum_beachhead_interviews: 3,
            minimum_support_ratio: 0.5,
            maximum_support_ratio_for_invalidation: 0.25,
            stages: [
                StageThresholds {
                    min_interviews: 3,
                    min_confidence: 3.5,
                    max_invalidated: 1,
                },
                StageThresholds {
                    min_interviews: 3,
                    min_confidence: 3.5,
                    max_invalidated: 2,
                },
                StageThresholds {
                    min_interviews: 2,
                    min_confidence: 3.0,
                    max_invalidated: 3,
                },
            ],
            ..Self::default()
        }
    }

    /// Higher bars, for teams preparing to raise or launch
    pub fn strict() -> Self {
        Self {
            minimum_interviews_for_validation: 5,
            minimum_beachhead_interviews: 8,
            minimum_support_ratio: 0.7,
            maximum_support_ratio_for_invalidation: 0.2,
            stages: [
                StageThresholds {
                    min_interviews: 10,
                    min_confidence: 4.0,
                    max_invalidated: 0,
                },
                StageThresholds {
                    min_interviews: 8,
                    min_confidence: 4.0,
                    max_invalidated: 0,
                },
                StageThresholds {
                    min_interviews: 5,
                    min_confidence: 3.5,
                    max_invalidated: 1,
                },
            ],
            ..Self::default()
        }
    }

    /// Thresholds for one stage
    pub fn stage(&self, stage: ValidationStage) -> &StageThresholds {
        &self.stages[stage.index()]
    }

    /// Weight of one stage, as a fraction of 1
    pub fn stage_weight(&self, stage: ValidationStage) -> f64 {
        f64::from(self.stage_weights[stage.index()]) / 100.0
    }

    /// Check that the configuration is internally consistent
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("minimum_support_ratio", self.minimum_support_ratio),
            (
                "maximum_support_ratio_for_invalidation",
                self.maximum_support_ratio_for_invalidation,
            ),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.maximum_support_ratio_for_invalidation >= self.minimum_support_ratio {
            return Err(EngineError::Config(format!(
                "maximum_support_ratio_for_invalidation ({}) must be below minimum_support_ratio ({})",
                self.maximum_support_ratio_for_invalidation, self.minimum_support_ratio
            )));
        }

        for (name, value) in [
            ("confidence_to_validate", self.confidence_to_validate),
            ("confidence_to_invalidate", self.confidence_to_invalidate),
        ] {
            if !(1..=5).contains(&value) {
                return Err(EngineError::Config(format!(
                    "{} must be between 1 and 5, got {}",
                    name, value
                )));
            }
        }

        if self.minimum_interviews_for_validation == 0 {
            return Err(EngineError::Config(
                "minimum_interviews_for_validation must be at least 1".to_string(),
            ));
        }

        for stage in ValidationStage::ALL {
            let t = self.stage(stage);
            if t.min_interviews == 0 {
                return Err(EngineError::Config(format!(
                    "{} min_interviews must be at least 1",
                    stage
                )));
            }
            if !(1.0..=5.0).contains(&t.min_confidence) {
                return Err(EngineError::Config(format!(
                    "{} min_confidence must be within [1, 5], got {}",
                    stage, t.min_confidence
                )));
            }
        }

        let total: u32 = self.stage_weights.iter().map(|w| u32::from(*w)).sum();
        if total != 100 {
            return Err(EngineError::Config(format!(
                "stage_weights must sum to 100, got {}",
                total
            )));
        }

        Ok(())
    }
}
