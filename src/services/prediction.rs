//! Orchestration of the out-of-process predictor.
//!
//! Contract with the predictor: one JSON request document on stdin, one JSON
//! response document on stdout, diagnostics on stderr only. Exit code 0 means
//! a structurally valid response is on stdout; any other code means failure
//! and stdout is ignored.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::PredictorConfig;
use crate::error::{AppError, Result};
use crate::models::{PredictionRequest, PredictionResponse};

#[derive(Debug, Clone)]
pub struct PredictionService {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl PredictionService {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &PredictorConfig) -> Self {
        Self::new(
            config.command.clone(),
            vec![config.script.clone()],
            config.timeout(),
        )
    }

    /// Runs one predictor subprocess for this request. Each call owns its own
    /// child process and pipes; concurrent calls share nothing.
    ///
    /// The child is spawned with `kill_on_drop`, so both the timeout elapsing
    /// and caller-side cancellation terminate it instead of leaking it.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let payload = serde_json::to_vec(request)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::PredictionProcess(format!(
                    "failed to launch predictor '{}': {}",
                    self.command, e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Internal("predictor stdin not captured".to_string()))?;

        // Feed stdin while wait_with_output drains stdout and stderr, so a
        // chatty or stdin-ignoring predictor cannot deadlock on a full pipe.
        let exchange = async {
            let (write_result, output) = tokio::join!(
                async {
                    let result = async {
                        stdin.write_all(&payload).await?;
                        stdin.shutdown().await
                    }
                    .await;
                    // Closing the pipe is what delivers EOF to the child;
                    // shutdown alone does not close a ChildStdin.
                    drop(stdin);
                    result
                },
                child.wait_with_output(),
            );

            if let Err(e) = write_result {
                // The predictor may exit before reading all of its input;
                // its exit code and stderr tell the real story.
                tracing::debug!("predictor stdin write aborted: {}", e);
            }

            output
        };

        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result
                .map_err(|e| AppError::PredictionProcess(format!("predictor I/O failed: {}", e)))?,
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "predictor timed out");
                return Err(AppError::PredictionTimeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::PredictionProcess(format!(
                "exit status {}: {}",
                output
                    .status
                    .code()
                    .map_or_else(|| "killed".to_string(), |c| c.to_string()),
                stderr.trim()
            )));
        }

        let response: PredictionResponse =
            serde_json::from_slice(&output.stdout).map_err(|e| {
                AppError::PredictionParse(format!("predictor stdout is not a valid response: {}", e))
            })?;

        if !response.success {
            return Err(AppError::PredictionProcess(
                "predictor reported failure in its response".to_string(),
            ));
        }

        tracing::info!(points = response.predictions.len(), "prediction completed");
        Ok(response)
    }
}
