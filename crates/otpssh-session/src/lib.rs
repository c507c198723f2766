// ABOUTME: Session bridge for otpssh
// ABOUTME: In-process SSH with pty relay, or exec into the system ssh client

pub mod bridge;
pub mod error;
pub mod exec;
pub mod relay;
pub mod ssh;

pub use bridge::{SessionBridge, SessionOutcome};
pub use error::{Result, SessionError};
pub use exec::{askpass_response, ExecBridge, ASKPASS_SECRET_ENV};
pub use ssh::{answer_prompts, SshBridge};
