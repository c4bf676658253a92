use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EaseParseError {
    #[error("unknown ease curve: {0}")]
    Unknown(String),
    #[error("invalid overshoot in {0}")]
    Overshoot(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

/// Easing curves, named the way animation presets usually spell them
/// (`power2.out`, `back.out(1.2)`, ...).
///
/// `PowerN` is a polynomial of degree `N + 1`, so `power1` is quadratic and
/// `power4` is quintic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    Power(u8, EaseDir),
    BackOut(f64),
}

impl Ease {
    pub const SMOOTH: Ease = Ease::Power(2, EaseDir::Out);
    pub const SNAPPY: Ease = Ease::Power(3, EaseDir::Out);

    /// Maps linear progress in `[0, 1]` to eased progress. Endpoints are exact.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Ease::Linear => t,
            Ease::Power(n, dir) => {
                let p = n as i32 + 1;
                match dir {
                    EaseDir::In => t.powi(p),
                    EaseDir::Out => 1.0 - (1.0 - t).powi(p),
                    EaseDir::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(p) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(p) / 2.0
                        }
                    }
                }
            }
            Ease::BackOut(s) => {
                let t1 = t - 1.0;
                t1 * t1 * ((s + 1.0) * t1 + s) + 1.0
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::SMOOTH
    }
}

impl FromStr for Ease {
    type Err = EaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == "linear" || name == "none" {
            return Ok(Ease::Linear);
        }
        if let Some(rest) = name.strip_prefix("back.out") {
            if rest.is_empty() {
                return Ok(Ease::BackOut(1.7));
            }
            let amount = rest
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .and_then(|r| r.trim().parse::<f64>().ok())
                .ok_or_else(|| EaseParseError::Overshoot(name.to_string()))?;
            return Ok(Ease::BackOut(amount));
        }
        let (power, dir) = name
            .split_once('.')
            .ok_or_else(|| EaseParseError::Unknown(name.to_string()))?;
        let n = match power {
            "power1" => 1,
            "power2" => 2,
            "power3" => 3,
            "power4" => 4,
            _ => return Err(EaseParseError::Unknown(name.to_string())),
        };
        let dir = match dir {
            "in" => EaseDir::In,
            "out" => EaseDir::Out,
            "inOut" => EaseDir::InOut,
            _ => return Err(EaseParseError::Unknown(name.to_string())),
        };
        Ok(Ease::Power(n, dir))
    }
}

impl TryFrom<String> for Ease {
    type Error = EaseParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "linear"),
            Ease::Power(n, dir) => {
                let dir = match dir {
                    EaseDir::In => "in",
                    EaseDir::Out => "out",
                    EaseDir::InOut => "inOut",
                };
                write!(f, "power{n}.{dir}")
            }
            Ease::BackOut(s) => write!(f, "back.out({s})"),
        }
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("power2.out".parse::<Ease>(), Ok(Ease::Power(2, EaseDir::Out)));
        assert_eq!("power1.inOut".parse::<Ease>(), Ok(Ease::Power(1, EaseDir::InOut)));
        assert_eq!("back.out(1.2)".parse::<Ease>(), Ok(Ease::BackOut(1.2)));
        assert_eq!("none".parse::<Ease>(), Ok(Ease::Linear));
        assert!("elastic.out".parse::<Ease>().is_err());
        assert!("power9.out".parse::<Ease>().is_err());
        assert!(matches!(
            "back.out(x)".parse::<Ease>(),
            Err(EaseParseError::Overshoot(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for ease in [
            Ease::Linear,
            Ease::Power(4, EaseDir::In),
            Ease::Power(3, EaseDir::InOut),
        ] {
            assert_eq!(ease.to_string().parse::<Ease>(), Ok(ease));
        }
    }

    #[test]
    fn test_endpoints_are_exact() {
        let curves = [
            Ease::Linear,
            Ease::Power(1, EaseDir::In),
            Ease::Power(2, EaseDir::Out),
            Ease::Power(3, EaseDir::InOut),
            Ease::BackOut(1.2),
            Ease::BackOut(1.7),
        ];
        for ease in curves {
            assert_eq!(ease.apply(0.0), 0.0, "{ease}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease}");
            assert_eq!(ease.apply(-0.5), 0.0, "{ease}");
            assert_eq!(ease.apply(1.5), 1.0, "{ease}");
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        let ease = Ease::Power(2, EaseDir::Out);
        assert!(ease.apply(0.25) > 0.25);
        assert!((ease.apply(0.5) - 0.875).abs() < 1e-9);
        // back.out overshoots before settling
        assert!(Ease::BackOut(1.7).apply(0.7) > 1.0);
    }
}
