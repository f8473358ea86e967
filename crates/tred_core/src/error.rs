use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("range {position}+{length} is outside text of {text_len} chars")]
    InvalidRange {
        position: usize,
        length: usize,
        text_len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppearanceError {
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("invalid font: {0}")]
    InvalidFont(String),
}
