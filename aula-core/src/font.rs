use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Font scaling scheme applied to the document root.
///
/// The two schemes are alternatives: a deployment configures exactly one and
/// every stored `fontSize` value is interpreted in that scheme's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontStrategy {
    /// Percentage of the user agent's base size, advanced by a fixed step.
    Percent {
        base: f64,
        step: f64,
        max: f64,
        large: f64,
    },
    /// Absolute pixel size, grown multiplicatively.
    Pixel {
        base: f64,
        factor: f64,
        max: f64,
        large: f64,
    },
}

impl Default for FontStrategy {
    fn default() -> Self {
        Self::Percent {
            base: 100.0,
            step: 10.0,
            max: 150.0,
            large: 120.0,
        }
    }
}

impl FontStrategy {
    /// Size of unscaled text, and the value the cycle wraps back to.
    #[must_use]
    pub const fn base(&self) -> f64 {
        match *self {
            Self::Percent { base, .. } | Self::Pixel { base, .. } => base,
        }
    }

    /// Largest size the cycle reaches before wrapping.
    #[must_use]
    pub const fn max(&self) -> f64 {
        match *self {
            Self::Percent { max, .. } | Self::Pixel { max, .. } => max,
        }
    }

    /// Size used by presets that ask for "larger text".
    #[must_use]
    pub const fn large(&self) -> f64 {
        match *self {
            Self::Percent { large, .. } | Self::Pixel { large, .. } => large,
        }
    }

    /// Advance one step, wrapping to the base once the bound would be exceeded.
    #[must_use]
    pub fn next(&self, current: f64) -> f64 {
        let candidate = match *self {
            Self::Percent { step, .. } => current + step,
            Self::Pixel { factor, .. } => round_hundredths(current * factor),
        };
        if candidate > self.max() {
            self.base()
        } else {
            candidate
        }
    }

    /// Inline `font-size` value for the document root.
    #[must_use]
    pub fn css_value(&self, size: f64) -> String {
        match self {
            Self::Percent { .. } => format!("{}%", format_size(size)),
            Self::Pixel { .. } => format!("{}px", format_size(size)),
        }
    }

    /// Parse a persisted value. Values outside `[base, max]` are rejected.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let trimmed = raw
            .trim()
            .trim_end_matches('%')
            .trim_end_matches("px")
            .trim();
        let value: f64 = trimmed.parse().ok()?;
        (value.is_finite() && value >= self.base() && value <= self.max()).then_some(value)
    }

    /// Check that the configured bounds describe a cycle that terminates.
    ///
    /// # Errors
    ///
    /// Returns an error when the base, bound, growth or preset values are inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base();
        let max = self.max();
        if !(base.is_finite() && base > 0.0) {
            return Err(ConfigError::FontBase { base });
        }
        if max <= base {
            return Err(ConfigError::FontBounds { base, max });
        }
        match *self {
            Self::Percent { step, .. } if step <= 0.0 => {
                return Err(ConfigError::FontGrowth { growth: step });
            }
            Self::Pixel { factor, .. } if factor <= 1.0 => {
                return Err(ConfigError::FontGrowth { growth: factor });
            }
            _ => {}
        }
        let large = self.large();
        if large < base || large > max {
            return Err(ConfigError::FontPreset { large, base, max });
        }
        Ok(())
    }
}

/// Stringify a size the way it is persisted (`110`, `17.6`).
#[must_use]
pub fn format_size(size: f64) -> String {
    format!("{}", round_hundredths(size))
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> FontStrategy {
        FontStrategy::Pixel {
            base: 16.0,
            factor: 1.1,
            max: 24.0,
            large: 20.0,
        }
    }

    #[test]
    fn percent_steps_then_wraps_at_bound() {
        let strategy = FontStrategy::default();
        let mut size = strategy.base();
        let mut seen = Vec::new();
        for _ in 0..7 {
            size = strategy.next(size);
            seen.push(size);
        }
        assert_eq!(seen, vec![110.0, 120.0, 130.0, 140.0, 150.0, 100.0, 110.0]);
    }

    #[test]
    fn pixel_grows_multiplicatively_and_resets_above_bound() {
        let strategy = pixel();
        let sizes: Vec<f64> = std::iter::successors(Some(16.0), |s| Some(strategy.next(*s)))
            .take(7)
            .collect();
        assert_eq!(sizes, vec![16.0, 17.6, 19.36, 21.3, 23.43, 16.0, 17.6]);
    }

    #[test]
    fn css_values_carry_units() {
        assert_eq!(FontStrategy::default().css_value(110.0), "110%");
        assert_eq!(pixel().css_value(17.6), "17.6px");
    }

    #[test]
    fn parse_accepts_legacy_forms_and_rejects_out_of_range() {
        let strategy = FontStrategy::default();
        assert_eq!(strategy.parse("120"), Some(120.0));
        assert_eq!(strategy.parse(" 130% "), Some(130.0));
        assert_eq!(strategy.parse("90"), None);
        assert_eq!(strategy.parse("400"), None);
        assert_eq!(strategy.parse("grande"), None);
        assert_eq!(strategy.parse("NaN"), None);
        assert_eq!(pixel().parse("17.6px"), Some(17.6));
    }

    #[test]
    fn validate_rejects_non_terminating_cycles() {
        let flat = FontStrategy::Pixel {
            base: 16.0,
            factor: 1.0,
            max: 24.0,
            large: 20.0,
        };
        assert!(matches!(
            flat.validate(),
            Err(ConfigError::FontGrowth { .. })
        ));
        let inverted = FontStrategy::Percent {
            base: 100.0,
            step: 10.0,
            max: 90.0,
            large: 100.0,
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::FontBounds { .. })
        ));
        assert!(FontStrategy::default().validate().is_ok());
    }
}
