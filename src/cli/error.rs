//! Command-level errors.

use thiserror::Error;

use crate::errors::Error;

/// Errors returned by a command. Any of them ends the process with status 1.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The bridge given with `--bridge` did not answer.
    #[error("failed to find bridge {address}: {source}")]
    BridgeNotFound {
        address: String,
        #[source]
        source: Error,
    },

    #[error("no bridge found")]
    NoBridgeFound,

    /// Discovery returned several bridges and none was selected.
    #[error("{count} bridges found, use --bridge=<ip-address>")]
    AmbiguousBridges { count: usize },

    #[error("the {command} command needs --config=<file>")]
    MissingConfig { command: &'static str },

    #[error("{0}")]
    Client(#[from] Error),

    #[error("failed to convert to yaml ({0})")]
    Encode(serde_yaml::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CommandError::NoBridgeFound.to_string(), "no bridge found");
        assert_eq!(
            CommandError::AmbiguousBridges { count: 3 }.to_string(),
            "3 bridges found, use --bridge=<ip-address>"
        );
        let err = CommandError::BridgeNotFound {
            address: "10.0.0.5".to_string(),
            source: Error::NoUser("10.0.0.5".to_string()),
        };
        assert!(err.to_string().starts_with("failed to find bridge 10.0.0.5: "));
    }
}
