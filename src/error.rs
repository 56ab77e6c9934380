use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenAction {
    Request,
    Exit,
}

impl fmt::Display for FullscreenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullscreenAction::Request => f.write_str("request"),
            FullscreenAction::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("fullscreen {action} rejected: {reason}")]
    Fullscreen { action: FullscreenAction, reason: String },

    #[error("no window or document available")]
    NoDocument,

    #[error("invalid player config: {0}")]
    Config(#[from] serde_json::Error),
}
