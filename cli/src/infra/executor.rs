//! Infrastructure implementation of the `NodeExecutor` port.
//!
//! The simulated fabric (built and owned by an external emulator) exposes
//! one named network namespace per node. `NetnsExecutor` runs each
//! command inside the node's namespace via `ip netns exec`; when a node
//! has no namespace of its own (single-namespace development setups) the
//! command runs directly on the host.
//!
//! Stdout and stderr are folded into one returned string — the engine
//! judges device responses by text content, never by exit code.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, DEFAULT_EXEC_TIMEOUT, NodeExecutor};

/// Executes node commands inside named network namespaces.
pub struct NetnsExecutor<R: CommandRunner> {
    runner: R,
    /// When false, commands run directly on the host instead of inside
    /// `ip netns exec <node>`.
    namespaced: bool,
}

impl<R: CommandRunner> NetnsExecutor<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            namespaced: true,
        }
    }

    /// Passthrough mode: run commands on the host, ignoring node names.
    #[must_use]
    pub fn passthrough(runner: R) -> Self {
        Self {
            runner,
            namespaced: false,
        }
    }

    async fn run(&self, node: &str, command: &str, timeout: Duration) -> Result<String> {
        let output = if self.namespaced {
            self.runner
                .run_with_timeout("ip", &["netns", "exec", node, "sh", "-c", command], timeout)
                .await?
        } else {
            self.runner
                .run_with_timeout("sh", &["-c", command], timeout)
                .await?
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }
        Ok(text)
    }
}

impl<R: CommandRunner> NodeExecutor for NetnsExecutor<R> {
    async fn exec(&self, node: &str, command: &str) -> Result<String> {
        self.run(node, command, DEFAULT_EXEC_TIMEOUT).await
    }

    async fn exec_with_timeout(
        &self,
        node: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<String> {
        self.run(node, command, timeout).await
    }
}
