use crate::{error::Error, profile::ExerciseKind};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub exercise: ExerciseKind,
    pub reps_per_set: u32,
    pub total_sets: u32,
    pub min_pose_confidence: f32,
    pub min_part_confidence: f32,
    pub rest_seconds: u32,
    /// Ear-confidence margin required to switch body side; 0 re-decides every frame.
    pub side_hysteresis: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::Squat,
            reps_per_set: 10,
            total_sets: 3,
            min_pose_confidence: 0.2,
            min_part_confidence: 0.6,
            rest_seconds: 90,
            side_hysteresis: 0.0,
        }
    }
}

fn check_confidence(name: &'static str, value: f32) -> Result<(), Error> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::ConfidenceOutOfRange(name, value))
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.reps_per_set == 0 {
            return Err(Error::NonPositive("reps_per_set"));
        }
        if self.total_sets == 0 {
            return Err(Error::NonPositive("total_sets"));
        }
        if self.rest_seconds == 0 {
            return Err(Error::NonPositive("rest_seconds"));
        }
        check_confidence("min_pose_confidence", self.min_pose_confidence)?;
        check_confidence("min_part_confidence", self.min_part_confidence)?;
        if !(self.side_hysteresis >= 0.0 && self.side_hysteresis < 1.0) {
            return Err(Error::HysteresisOutOfRange(self.side_hysteresis));
        }
        Ok(())
    }

    pub fn load<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| Error::ReadConfig(e, path.to_path_buf()))?;
        let config: Self = toml::from_str(&content).map_err(Error::ParseConfig)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(Error::SerializeConfig)?;
        fs::write(path, content).map_err(|e| Error::WriteConfig(e, path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use crate::{error::Error, profile::ExerciseKind};

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_counts_rejected() {
        let config = SessionConfig {
            reps_per_set: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::NonPositive("reps_per_set"))
        ));

        let config = SessionConfig {
            rest_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::NonPositive("rest_seconds"))
        ));
    }

    #[test]
    fn confidence_must_be_a_probability() {
        for bad in &[0.0, -0.1, 1.5, f32::NAN] {
            let config = SessionConfig {
                min_part_confidence: *bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::ConfidenceOutOfRange("min_part_confidence", _))
            ));
        }
    }

    #[test]
    fn hysteresis_bounds() {
        let config = SessionConfig {
            side_hysteresis: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::HysteresisOutOfRange(_))
        ));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SessionConfig =
            toml::from_str("exercise = \"bicep-curl\"\nreps_per_set = 8\n").unwrap();
        assert_eq!(config.exercise, ExerciseKind::BicepCurl);
        assert_eq!(config.reps_per_set, 8);
        assert_eq!(config.total_sets, 3);
        assert_eq!(config.rest_seconds, 90);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("repcoach-config-{}.toml", std::process::id()));
        let config = SessionConfig {
            exercise: ExerciseKind::PushUp,
            total_sets: 4,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("repcoach-does-not-exist.toml");
        assert!(matches!(
            SessionConfig::load(&path),
            Err(Error::ReadConfig(_, p)) if p == path
        ));
    }
}
