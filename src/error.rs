use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid css input at {line}:{column}: {message}")]
    InvalidCssInput {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),
}

impl ChartError {
    pub(crate) fn css(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::InvalidCssInput {
            line,
            column,
            message: message.into(),
        }
    }
}
