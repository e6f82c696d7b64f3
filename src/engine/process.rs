use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};
use tracing::{debug, trace};

use super::{Engine, LocatedError, ResultPage, ResumeToken, Suggester};
use crate::config::ConnectionConfig;

/// Bridges to an external engine command.
///
/// Every call spawns the command, writes one JSON request to its stdin and
/// reads the reply from stdout. A zero exit status carries a result page; a
/// non-zero status carries a JSON error object with optional token offsets.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: String,
    args: Vec<String>,
    connection: ConnectionConfig,
}

impl ProcessEngine {
    /// Returns `None` when the command line is blank.
    pub fn new(command_line: &str, connection: ConnectionConfig) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_owned);
        let program = words.next()?;

        Some(ProcessEngine {
            program,
            args: words.collect(),
            connection,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        // Own process group: Ctrl-C at the terminal reaches the shell's
        // latch only, and the running query is left to finish.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command
    }

    fn invoke(&self, request: &Value) -> Result<Output, LocatedError> {
        let mut child = self.command().spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                LocatedError::new(format!("execution engine not found: {}", self.program))
            } else {
                LocatedError::new(format!("failed to start execution engine: {}", e))
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            let body = request.to_string();
            match stdin.write_all(body.as_bytes()) {
                Ok(()) => {}
                // The engine may answer without reading the whole request.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("engine closed its input early");
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(LocatedError::new(format!("failed to send query: {}", e)));
                }
            }
        }

        child
            .wait_with_output()
            .map_err(|e| LocatedError::new(format!("execution engine failed: {}", e)))
    }
}

impl Engine for ProcessEngine {
    fn execute(
        &mut self,
        query: &str,
        resume: Option<&ResumeToken>,
    ) -> Result<ResultPage, LocatedError> {
        let request = json!({
            "query": query,
            "resume": resume,
            "connection": self.connection,
        });
        debug!(program = %self.program, resumed = resume.is_some(), "executing query");

        let output = self.invoke(&request)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(status = %output.status, bytes = output.stdout.len(), "engine replied");

        if !output.status.success() {
            return Err(parse_failure(&stdout, &output));
        }

        if stdout.trim().is_empty() {
            return Ok(ResultPage::default());
        }

        serde_json::from_str::<Value>(&stdout)
            .map(ResultPage::from_json)
            .map_err(|e| LocatedError::new(format!("malformed engine reply: {}", e)))
    }
}

impl Suggester for ProcessEngine {
    fn suggest(&self, partial: &str) -> String {
        match self.invoke(&json!({ "suggest": partial })) {
            Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
                .trim_end_matches(|c: char| c == '\r' || c == '\n')
                .to_string(),
            Ok(output) => {
                debug!(status = %output.status, "suggestion failed");
                String::new()
            }
            Err(e) => {
                debug!(error = %e, "suggestion failed");
                String::new()
            }
        }
    }
}

fn parse_failure(stdout: &str, output: &Output) -> LocatedError {
    serde_json::from_str::<LocatedError>(stdout.trim()).unwrap_or_else(|_| {
        let message = stdout.trim();
        if message.is_empty() {
            LocatedError::new(format!("execution engine exited with {}", output.status))
        } else {
            LocatedError::new(message)
        }
    })
}
