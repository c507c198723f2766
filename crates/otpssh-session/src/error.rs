// ABOUTME: Error types for the session bridge using thiserror.
// ABOUTME: Covers connect, handshake/auth, channel setup, terminal I/O and exec failures.

use std::io;
use thiserror::Error;

/// Errors that can occur while opening or relaying a remote session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// TCP connection to the target failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// SSH key exchange or an authentication round trip failed.
    #[error("SSH handshake with {addr} failed: {source}")]
    Handshake {
        addr: String,
        #[source]
        source: russh::Error,
    },

    /// The server answered the one-time password with a failure.
    #[error("server rejected the one-time password for {user}")]
    AuthRejected { user: String },

    /// The server kept sending keyboard-interactive challenges.
    #[error("server sent more than {0} keyboard-interactive rounds")]
    AuthRoundsExceeded(usize),

    /// Opening the channel or sending a pty/shell request failed.
    #[error("{what} request failed: {source}")]
    Channel {
        what: &'static str,
        #[source]
        source: russh::Error,
    },

    /// The server replied with a failure to a pty or shell request.
    #[error("server refused the {0} request")]
    Refused(&'static str),

    /// The channel closed before the server replied to a request.
    #[error("channel closed while waiting for the {0} reply")]
    ClosedDuring(&'static str),

    /// Reading the local terminal or writing to it failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The external ssh client could not be started.
    #[error("failed to launch {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;
