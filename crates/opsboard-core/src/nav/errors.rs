use crate::errors::OpsboardError;

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("No route mapped for menu label '{label}'")]
    UnknownLabel { label: String },
}

impl OpsboardError for NavError {
    fn error_code(&self) -> &'static str {
        match self {
            NavError::UnknownLabel { .. } => "NAV_UNKNOWN_LABEL",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
