use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("Malformed audio container: {0}")]
    ContainerFormat(String),

    #[error("Noise level {0} is outside [0, 1]")]
    InvalidNoiseLevel(f32),

    #[error("Character {ch:?} at position {position} does not fit in a single byte")]
    UnrepresentableChar { ch: char, position: usize },

    #[error("Insufficient data")]
    InsufficientData,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<hound::Error> for ModemError {
    fn from(err: hound::Error) -> Self {
        ModemError::ContainerFormat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ModemError>;
