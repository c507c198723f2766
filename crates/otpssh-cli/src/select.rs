// ABOUTME: Server table rendering and numeric target selection.
// ABOUTME: Allows three attempts at a number in 1..=N before giving up.

use colored::Colorize;
use otpssh_core::Target;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Invalid answers tolerated before selection fails.
pub const MAX_ATTEMPTS: usize = 3;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("no servers configured")]
    Empty,

    #[error("Reached max invalid attempt {0}")]
    Exhausted(usize),

    #[error("unknown server {0:?}")]
    UnknownServer(String),

    #[error("failed to read selection: {0}")]
    Io(#[from] io::Error),
}

/// Prints the numbered server table.
pub fn render_table<W: Write>(servers: &[Target], out: &mut W) -> io::Result<()> {
    let number_width = "Number".len().max(servers.len().to_string().len());
    let name_width = servers
        .iter()
        .map(|s| s.name.len())
        .chain(["Server Name".len()])
        .max()
        .unwrap_or_default();

    writeln!(
        out,
        "{}",
        format!(
            "{:<number_width$}  {:<name_width$}  {}",
            "Number", "Server Name", "IP"
        )
        .bold()
    )?;
    for (i, server) in servers.iter().enumerate() {
        writeln!(
            out,
            "{:<number_width$}  {:<name_width$}  {}",
            i + 1,
            server.name,
            server.ip.dimmed()
        )?;
    }
    Ok(())
}

/// Shows the table and reads a server number from `input`.
pub fn select_target<'a, R, W>(
    servers: &'a [Target],
    input: &mut R,
    out: &mut W,
) -> Result<&'a Target, SelectionError>
where
    R: BufRead,
    W: Write,
{
    if servers.is_empty() {
        return Err(SelectionError::Empty);
    }

    render_table(servers, out)?;
    writeln!(out)?;
    writeln!(
        out,
        "Enter the number of the server you want to log in. eg: 1"
    )?;

    let mut line = String::new();
    for attempt in 1..=MAX_ATTEMPTS {
        out.flush()?;
        line.clear();
        input.read_line(&mut line)?;

        if let Some(index) = parse_choice(&line, servers.len()) {
            return Ok(&servers[index]);
        }
        if attempt < MAX_ATTEMPTS {
            writeln!(
                out,
                "Please enter a valid number between 1 and {}!",
                servers.len()
            )?;
        }
    }

    Err(SelectionError::Exhausted(MAX_ATTEMPTS))
}

/// Parses a 1-based choice into a 0-based index.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// Finds a server by name for `--server`.
pub fn by_name<'a>(servers: &'a [Target], name: &str) -> Result<&'a Target, SelectionError> {
    servers
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| SelectionError::UnknownServer(name.to_string()))
}
