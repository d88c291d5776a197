//! External process invocation.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use super::error::{BuildError, BuildResult};

/// Characters of child stdout kept for error reports.
pub const OUTPUT_TAIL_CHARS: usize = 1000;

/// Rolling window over the end of a process's output.
///
/// Raw bytes are kept and decoded once, so a character split across two reads
/// survives intact.
#[derive(Debug, Clone, Default)]
pub struct OutputTail {
    bytes: Vec<u8>,
    limit: usize,
}

impl OutputTail {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);

        // Enough bytes for `limit` characters of up to four bytes, plus a partial one.
        let keep = self.limit.saturating_mul(4).saturating_add(3);
        let excess = self.bytes.len().saturating_sub(keep);
        if excess > 0 {
            self.bytes.drain(..excess);
        }
    }

    /// The last `limit` characters seen so far.
    pub fn to_string_lossy(&self) -> String {
        let start = self
            .bytes
            .iter()
            .position(|byte| byte & 0xC0 != 0x80)
            .unwrap_or(self.bytes.len());
        let text = String::from_utf8_lossy(&self.bytes[start..]);
        let skip = text.chars().count().saturating_sub(self.limit);
        text.chars().skip(skip).collect()
    }

    pub fn into_string(self) -> String {
        self.to_string_lossy()
    }
}

/// Runs `program` to completion, keeping the tail of its stdout.
///
/// A non-zero exit becomes [`BuildError::ProcessFailed`] carrying that tail. The
/// child is killed if the returned future is dropped before it exits.
pub async fn run<I, S>(program: &Path, args: I) -> BuildResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    log::debug!("spawning {}", program.display());

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| BuildError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    let mut stdout = child.stdout.take();
    let reader = tokio::spawn(async move {
        let mut tail = OutputTail::new(OUTPUT_TAIL_CHARS);
        if let Some(stdout) = stdout.as_mut() {
            let mut buffer = [0u8; 4096];
            while let Ok(read) = stdout.read(&mut buffer).await {
                if read == 0 {
                    break;
                }
                tail.push(&buffer[..read]);
            }
        }
        tail.into_string()
    });

    let status = child
        .wait()
        .await
        .map_err(|err| BuildError::io(program, err))?;

    let output = reader.await?;

    if !status.success() {
        log::warn!("{} failed, last output:\n{output}", program.display());
        return Err(BuildError::ProcessFailed {
            program: program.to_path_buf(),
            status: status.to_string(),
            output,
        });
    }

    Ok(output)
}
