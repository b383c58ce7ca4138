//! External OCR command, time-boxed.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::{Builder, Handle};
use tracing::debug;

use gmv_core::models::config::RecognizerConfig;
use gmv_core::{RecognitionError, TextRecognizer};

const INPUT_PLACEHOLDER: &str = "{input}";

/// Runs an OCR program and reads the recognized text from its stdout.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout_ms: u64,
}

impl CommandRecognizer {
    pub fn from_config(config: &RecognizerConfig) -> anyhow::Result<Self> {
        let Some((program, args)) = config.command.split_first() else {
            anyhow::bail!("recognizer.command is empty; set it with 'gmv config set'");
        };

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout_ms: config.timeout_ms,
        })
    }

    fn command_args(&self, image: &Path) -> Vec<String> {
        let image = image.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &image))
            .collect();

        if !self.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            args.push(image);
        }
        args
    }

    /// Run the program and collect its stdout, all within the time box.
    ///
    /// The deadline covers reading the output as well as the exit, so a
    /// background process holding stdout open cannot extend it. The child
    /// is killed when the deadline passes.
    pub async fn recognize_async(&self, image: &Path) -> Result<String, RecognitionError> {
        let args = self.command_args(image);
        debug!("Running recognizer: {} {:?}", self.program, args);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RecognitionError::Command(format!("{}: {}", self.program, e)))?;

        let output = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| RecognitionError::Timeout(self.timeout_ms))??;

        if !output.status.success() {
            return Err(RecognitionError::Command(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TextRecognizer for CommandRecognizer {
    /// Blocking entry point. Call it from a blocking thread when a runtime is running.
    fn recognize(&self, image: &Path) -> Result<String, RecognitionError> {
        match Handle::try_current() {
            Ok(handle) => handle.block_on(self.recognize_async(image)),
            Err(_) => Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(self.recognize_async(image)),
        }
    }
}
