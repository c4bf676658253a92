use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ease::Ease;
use crate::viewport::Tier;

/// Travel and duration scale applied on mobile.
pub const MOBILE_TRAVEL: f64 = 0.7;
pub const MOBILE_DURATION: f64 = 0.8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("duration `{0}` must be positive, got {1}")]
    Duration(&'static str, f64),
    #[error("stagger `{0}` must not be negative, got {1}")]
    Stagger(&'static str, f64),
    #[error("blur `{0}` must not be negative, got {1}")]
    Blur(&'static str, f64),
    #[error("opacity `{0}` must be within 0..=1, got {1}")]
    Opacity(&'static str, f64),
    #[error("couldn't parse animation config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    pub fast: f64,
    pub medium: f64,
    pub slow: f64,
    pub extra_slow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eases {
    pub smooth: Ease,
    pub snappy: Ease,
    pub bounce: Ease,
    pub gentle: Ease,
    pub text_reveal: Ease,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaggerTier {
    pub text: f64,
    pub elements: f64,
    pub cards: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurTier {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tiered<T> {
    pub mobile: T,
    pub desktop: T,
}

impl<T: Copy> Tiered<T> {
    pub fn get(&self, tier: Tier) -> T {
        match tier {
            Tier::Mobile => self.mobile,
            Tier::Desktop => self.desktop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub opacity: Range,
    pub y: Range,
}

/// Named animation presets shared by every section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub duration: Durations,
    pub ease: Eases,
    pub stagger: Tiered<StaggerTier>,
    pub blur: Tiered<BlurTier>,
    pub defaults: Defaults,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Durations {
                fast: 0.2,
                medium: 0.4,
                slow: 0.6,
                extra_slow: 0.8,
            },
            ease: Eases {
                smooth: Ease::SMOOTH,
                snappy: Ease::SNAPPY,
                bounce: Ease::BackOut(1.2),
                gentle: Ease::Power(1, super::ease::EaseDir::InOut),
                text_reveal: Ease::SMOOTH,
            },
            stagger: Tiered {
                mobile: StaggerTier {
                    text: 0.03,
                    elements: 0.06,
                    cards: 0.09,
                },
                desktop: StaggerTier {
                    text: 0.08,
                    elements: 0.15,
                    cards: 0.2,
                },
            },
            blur: Tiered {
                mobile: BlurTier {
                    start: 2.0,
                    end: 0.0,
                },
                desktop: BlurTier {
                    start: 8.0,
                    end: 0.0,
                },
            },
            defaults: Defaults {
                opacity: Range { from: 0.0, to: 1.0 },
                y: Range {
                    from: 40.0,
                    to: 0.0,
                },
            },
        }
    }
}

impl AnimationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.duration;
        for (name, v) in [
            ("fast", d.fast),
            ("medium", d.medium),
            ("slow", d.slow),
            ("extra_slow", d.extra_slow),
        ] {
            if !(v > 0.0) {
                return Err(ConfigError::Duration(name, v));
            }
        }
        for (name, tier) in [("mobile", self.stagger.mobile), ("desktop", self.stagger.desktop)] {
            for v in [tier.text, tier.elements, tier.cards] {
                if !(v >= 0.0) {
                    return Err(ConfigError::Stagger(name, v));
                }
            }
        }
        for (name, tier) in [("mobile", self.blur.mobile), ("desktop", self.blur.desktop)] {
            for v in [tier.start, tier.end] {
                if !(v >= 0.0) {
                    return Err(ConfigError::Blur(name, v));
                }
            }
        }
        for (name, v) in [
            ("from", self.defaults.opacity.from),
            ("to", self.defaults.opacity.to),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Opacity(name, v));
            }
        }
        Ok(())
    }

    /// Vertical travel for `px` of desktop travel, scaled down on mobile.
    pub fn travel(&self, tier: Tier, px: f64) -> f64 {
        match tier {
            Tier::Mobile => px * MOBILE_TRAVEL,
            Tier::Desktop => px,
        }
    }

    pub fn scaled_duration(&self, tier: Tier, seconds: f64) -> f64 {
        match tier {
            Tier::Mobile => seconds * MOBILE_DURATION,
            Tier::Desktop => seconds,
        }
    }
}
