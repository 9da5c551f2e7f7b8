// Stdio bridge to the Google Sheets tool server.
//
// The tool server is spawned as a child process and the host's input/output
// is plumbed straight through to it:
//
//   host input  ──▶ child stdin
//   host output ◀── child stdout
//   user        ◀── child stderr (inherited, untouched)
//
// Bytes are copied as-is. Message framing belongs to the MCP protocol that
// runs on top of this pipe, so nothing here parses or buffers by line.

use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::core::tool_server::{DownstreamServiceError, ToolServerLaunch, ToolServerLauncher};

pub struct StdioBridge<R, W> {
    host_in: Mutex<R>,
    host_out: Mutex<W>,
}

impl<R, W> StdioBridge<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(host_in: R, host_out: W) -> Self {
        Self {
            host_in: Mutex::new(host_in),
            host_out: Mutex::new(host_out),
        }
    }

    /// Gives the host streams back, e.g. to inspect what a test server wrote.
    #[allow(dead_code)]
    pub fn into_inner(self) -> (R, W) {
        (self.host_in.into_inner(), self.host_out.into_inner())
    }

    fn spawn(launch: &ToolServerLaunch) -> Result<tokio::process::Child, DownstreamServiceError> {
        let mut command = Command::new(&launch.command.program);
        command
            .args(&launch.command.args)
            .envs(launch.env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        command
            .spawn()
            .map_err(|source| DownstreamServiceError::Launch {
                program: launch.command.program.clone(),
                source,
            })
    }
}

#[async_trait]
impl<R, W> ToolServerLauncher for StdioBridge<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn serve(&self, launch: &ToolServerLaunch) -> Result<ExitStatus, DownstreamServiceError> {
        let mut child = Self::spawn(launch)?;
        tracing::debug!(pid = ?child.id(), "Tool server spawned");

        let mut child_in = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "tool server stdin not piped"))?;
        let mut child_out = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "tool server stdout not piped"))?;

        // The pumps borrow the host streams; dropping them here also closes
        // the child's stdin if the host never reached EOF.
        {
            let mut host_in = self.host_in.lock().await;
            let mut host_out = self.host_out.lock().await;
            let host_in: &mut R = &mut host_in;
            let host_out: &mut W = &mut host_out;

            // Host -> server. Dropping `child_in` closes the pipe, which is how
            // the server learns the host is done.
            let upstream = async move {
                let copied = tokio::io::copy(host_in, &mut child_in).await;
                drop(child_in);
                match copied {
                    Ok(bytes) => {
                        tracing::debug!(bytes, "Host input closed");
                        Ok(())
                    }
                    // The server stopped reading. Its exit status says why.
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                        tracing::debug!("Tool server closed its stdin");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            };

            // Server -> host, until the server closes stdout.
            let downstream = async move {
                let bytes = tokio::io::copy(&mut child_out, &mut *host_out).await?;
                host_out.flush().await?;
                Ok::<u64, io::Error>(bytes)
            };

            tokio::pin!(upstream);
            tokio::pin!(downstream);

            let mut upstream_done = false;
            loop {
                tokio::select! {
                    result = &mut upstream, if !upstream_done => {
                        result?;
                        upstream_done = true;
                    }
                    result = &mut downstream => {
                        let bytes = result?;
                        tracing::debug!(bytes, "Tool server output closed");
                        break;
                    }
                }
            }
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(status)
        } else {
            Err(DownstreamServiceError::Exited(status))
        }
    }
}
