use thiserror::Error;

/// Result type alias using `KeywordClusterError`.
pub type Result<T> = std::result::Result<T, KeywordClusterError>;

/// Error type for all fallible operations in this crate.
/// 類似度・intent・クラスタリング自体は失敗しない
/// 設定の読み込み・検証とレポートの (de)serialize だけがエラーを返す
/// IO エラー (設定ファイルが読めない等) はそのまま `Io` で返す
#[derive(Debug, Error)]
pub enum KeywordClusterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl KeywordClusterError {
    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a Config error with source
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_json::Error> for KeywordClusterError {
    fn from(err: serde_json::Error) -> Self {
        KeywordClusterError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_cbor::Error> for KeywordClusterError {
    fn from(err: serde_cbor::Error) -> Self {
        KeywordClusterError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
