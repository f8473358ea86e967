use thiserror::Error;
use tred_core::error::PanelError;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error("no unit at index {0}")]
    UnknownUnit(usize),
}
