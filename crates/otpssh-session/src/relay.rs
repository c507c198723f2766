// ABOUTME: Multiplexed relay between the local terminal and a remote shell channel.
// ABOUTME: One loop owns stdout/stderr writes so nothing is lost when the channel closes.

use async_trait::async_trait;
use russh::client::Msg;
use russh::{ChannelMsg, ChannelReadHalf, ChannelWriteHalf};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;

const INPUT_CHUNK: usize = 4096;

/// Something the remote side told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    ExitStatus(u32),
    Eof,
    Closed,
}

impl RemoteEvent {
    /// Maps a russh channel message; `None` for messages the relay ignores.
    pub fn from_msg(msg: ChannelMsg) -> Option<Self> {
        match msg {
            ChannelMsg::Data { data } => Some(RemoteEvent::Stdout(data.to_vec())),
            // Extended data type 1 is SSH_EXTENDED_DATA_STDERR.
            ChannelMsg::ExtendedData { data, ext: 1 } => Some(RemoteEvent::Stderr(data.to_vec())),
            ChannelMsg::ExitStatus { exit_status } => Some(RemoteEvent::ExitStatus(exit_status)),
            ChannelMsg::Eof => Some(RemoteEvent::Eof),
            ChannelMsg::Close => Some(RemoteEvent::Closed),
            _ => None,
        }
    }
}

/// Read half of the remote shell.
#[async_trait]
pub trait RemoteOutput: Send {
    /// Next event from the remote side; `None` once the channel is gone.
    async fn next_event(&mut self) -> Option<RemoteEvent>;
}

/// Write half of the remote shell, owned by the input pump.
#[async_trait]
pub trait RemoteInput: Send + 'static {
    async fn send(&mut self, data: &[u8]) -> io::Result<()>;

    async fn send_eof(&mut self) -> io::Result<()>;
}

#[async_trait]
impl RemoteOutput for ChannelReadHalf {
    async fn next_event(&mut self) -> Option<RemoteEvent> {
        loop {
            let msg = self.wait().await?;
            if let Some(event) = RemoteEvent::from_msg(msg) {
                return Some(event);
            }
        }
    }
}

#[async_trait]
impl RemoteInput for ChannelWriteHalf<Msg> {
    async fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.data(data).await.map_err(io::Error::other)
    }

    async fn send_eof(&mut self) -> io::Result<()> {
        self.eof().await.map_err(io::Error::other)
    }
}

/// Local terminal streams for a relay.
pub struct LocalTerminal<I, O, E> {
    pub input: I,
    pub stdout: O,
    pub stderr: E,
}

impl LocalTerminal<tokio::io::Stdin, tokio::io::Stdout, tokio::io::Stderr> {
    pub fn stdio() -> Self {
        Self {
            input: tokio::io::stdin(),
            stdout: tokio::io::stdout(),
            stderr: tokio::io::stderr(),
        }
    }
}

/// Relays until the remote channel closes, returning the remote exit status.
///
/// `early` holds events that arrived before the relay started (while waiting
/// for the shell reply); they are written first. Local input is forwarded by
/// a separate pump task that owns `remote_input`, so draining remote output
/// never waits on window space for a send. Local input EOF is forwarded as
/// channel EOF. The pump is aborted when the channel closes.
pub async fn relay<R, W, I, O, E>(
    remote_output: &mut R,
    remote_input: W,
    early: Vec<RemoteEvent>,
    terminal: LocalTerminal<I, O, E>,
) -> Result<Option<u32>>
where
    R: RemoteOutput,
    W: RemoteInput,
    I: AsyncRead + Unpin + Send + 'static,
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let LocalTerminal {
        input,
        mut stdout,
        mut stderr,
    } = terminal;

    let mut exit_status = None;
    for event in early {
        if !apply(event, &mut stdout, &mut stderr, &mut exit_status).await? {
            return Ok(exit_status);
        }
    }

    let pump = spawn_input_pump(input, remote_input);

    let result = loop {
        let Some(event) = remote_output.next_event().await else {
            debug!("remote channel gone");
            break Ok(exit_status);
        };
        match apply(event, &mut stdout, &mut stderr, &mut exit_status).await {
            Ok(true) => {}
            Ok(false) => break Ok(exit_status),
            Err(e) => break Err(e),
        }
    };

    pump.abort();
    result
}

/// Applies one remote event; returns false once the channel has closed.
async fn apply<O, E>(
    event: RemoteEvent,
    stdout: &mut O,
    stderr: &mut E,
    exit_status: &mut Option<u32>,
) -> Result<bool>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    match event {
        RemoteEvent::Stdout(bytes) => {
            stdout.write_all(&bytes).await?;
            stdout.flush().await?;
        }
        RemoteEvent::Stderr(bytes) => {
            stderr.write_all(&bytes).await?;
            stderr.flush().await?;
        }
        RemoteEvent::ExitStatus(code) => {
            debug!(code, "remote shell exited");
            *exit_status = Some(code);
        }
        RemoteEvent::Eof => debug!("remote EOF"),
        RemoteEvent::Closed => return Ok(false),
    }
    Ok(true)
}

fn spawn_input_pump<I, W>(mut input: I, mut remote: W) -> JoinHandle<()>
where
    I: AsyncRead + Unpin + Send + 'static,
    W: RemoteInput,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; INPUT_CHUNK];
        loop {
            match input.read(&mut buf).await {
                Ok(0) => {
                    debug!("local input closed, sending EOF");
                    if let Err(e) = remote.send_eof().await {
                        debug!("failed to send EOF: {}", e);
                    }
                    break;
                }
                Ok(n) => {
                    if let Err(e) = remote.send(&buf[..n]).await {
                        debug!("remote stopped accepting input: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read local input: {}", e);
                    break;
                }
            }
        }
    })
}
