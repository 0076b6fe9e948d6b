//! Strongly-typed settings loading (Figment-based).
//!
//! Settings are loaded from a TOML file merged with environment variables
//! (prefixed with `GENCAM_`, nested keys separated by `__`), then
//! validated. Every field carries a serde default, so an absent file
//! yields a usable configuration.
//!
//! # Environment Variable Overrides
//!
//! ```text
//! GENCAM_STARTUP__TARGET_GAIN=0.25
//! GENCAM_SEQUENCER__EXPOSURE_TIMES_US=[100.0, 250.0]
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CamError, CamResult};

/// Top-level settings for the camera stack.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// One-shot startup parameterization.
    #[serde(default)]
    pub startup: StartupConfig,
    /// Exposure sequencer cycle.
    #[serde(default)]
    pub sequencer: SequencerConfig,
}

/// Parameters applied once at device open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Fixed gain as a fraction of the hardware gain range:
    /// 0 selects the hardware minimum, 1 the maximum.
    #[serde(default = "default_target_gain")]
    pub target_gain: f64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            target_gain: default_target_gain(),
        }
    }
}

/// Requested exposure cycle for the sequencer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SequencerConfig {
    /// Ordered exposure times in microseconds, one sequencer set each.
    #[serde(default)]
    pub exposure_times_us: Vec<f64>,
}

fn default_target_gain() -> f64 {
    0.0
}

impl Settings {
    /// Load settings from an optional TOML file and the environment.
    ///
    /// Precedence (highest to lowest): environment variables, the TOML
    /// file, built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`CamError::Config`] if the file or environment cannot be
    /// parsed, or a [`CamError::Configuration`] if validation fails.
    pub fn load(path: Option<&Path>) -> CamResult<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let settings: Self = figment
            .merge(Env::prefixed("GENCAM_").split("__"))
            .extract()
            .map_err(CamError::Config)?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings after loading.
    ///
    /// Checks:
    /// - `target_gain` lies in `[0, 1]`
    /// - every requested exposure time is finite and positive
    pub fn validate(&self) -> CamResult<()> {
        if !(0.0..=1.0).contains(&self.startup.target_gain) {
            return Err(CamError::Configuration(format!(
                "Invalid target_gain {}. Must lie in [0, 1]",
                self.startup.target_gain
            )));
        }

        for &exposure in &self.sequencer.exposure_times_us {
            if !exposure.is_finite() || exposure <= 0.0 {
                return Err(CamError::Configuration(format!(
                    "Invalid exposure time {exposure} us. Must be finite and positive"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.startup.target_gain, 0.0);
        assert!(settings.sequencer.exposure_times_us.is_empty());
    }

    #[test]
    fn toml_file_is_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[startup]\ntarget_gain = 0.75\n\n[sequencer]\nexposure_times_us = [100.0, 250.0]"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.startup.target_gain, 0.75);
        assert_eq!(settings.sequencer.exposure_times_us, vec![100.0, 250.0]);
    }

    #[test]
    #[serial]
    fn environment_overrides_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[startup]\ntarget_gain = 0.75").unwrap();

        std::env::set_var("GENCAM_STARTUP__TARGET_GAIN", "0.25");
        let settings = Settings::load(Some(file.path()));
        std::env::remove_var("GENCAM_STARTUP__TARGET_GAIN");

        assert_eq!(settings.unwrap().startup.target_gain, 0.25);
    }

    #[test]
    fn out_of_range_target_gain_is_rejected() {
        let settings = Settings {
            startup: StartupConfig { target_gain: 1.5 },
            sequencer: SequencerConfig::default(),
        };
        assert!(matches!(
            settings.validate(),
            Err(CamError::Configuration(_))
        ));
    }

    #[test]
    fn non_positive_exposure_is_rejected() {
        let settings = Settings {
            startup: StartupConfig::default(),
            sequencer: SequencerConfig {
                exposure_times_us: vec![100.0, -5.0],
            },
        };
        assert!(settings.validate().is_err());
    }
}
