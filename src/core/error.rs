use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtraAttackError {
    #[error("Unknown weapon type: {0}")]
    UnknownWeaponType(String),

    #[error("Unknown attack mode: {0}")]
    UnknownAttackMode(String),

    #[error("Config parse error in {source_name}: {message}")]
    ConfigParse { source_name: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtraAttackError>;
