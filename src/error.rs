#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration value {0} must be positive")]
    NonPositive(&'static str),

    #[error("configuration value {0} must be in (0, 1], got {1}")]
    ConfidenceOutOfRange(&'static str, f32),

    #[error("side hysteresis must be in [0, 1), got {0}")]
    HysteresisOutOfRange(f32),

    #[error("unknown exercise type: {0:?}")]
    UnknownExercise(String),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("failed to convert usize value to landmark kind: {0}")]
    ConvertUSizeToLandmarkKind(usize),

    #[error("confidence score must be in [0, 1], got {0}")]
    ScoreOutOfRange(f32),

    #[error("expected {0} landmarks per frame, got {1}")]
    LandmarkCount(usize, usize),

    #[error("failed to read config file: {1:?}")]
    ReadConfig(#[source] std::io::Error, std::path::PathBuf),

    #[error("failed to parse config file")]
    ParseConfig(#[source] toml::de::Error),

    #[error("failed to serialize config")]
    SerializeConfig(#[source] toml::ser::Error),

    #[error("failed to write config file: {1:?}")]
    WriteConfig(#[source] std::io::Error, std::path::PathBuf),

    #[error("failed to read frame log")]
    ReadFrames(#[source] std::io::Error),

    #[error("failed to parse frame record on line {1}")]
    ParseFrame(#[source] serde_json::Error, usize),

    #[error("failed to serialize session result")]
    SerializeResult(#[source] serde_json::Error),

    #[error("failed to write session result")]
    WriteResult(#[source] std::io::Error),
}
