use std::process::Command;

use thiserror::Error;

/// Path of the xrandr binary, matching a stock X11 install.
pub const XRANDR: &str = "/usr/bin/xrandr";

/// Error type for external tool invocations
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
    },
    #[error("{command} produced non-UTF-8 output")]
    Output { command: String },
}

/// Produces the enumeration text describing the system's outputs
pub trait OutputSource {
    fn enumerate(&self) -> Result<String, ProcessError>;
}

/// Consumes a composed argument list and applies it to the system
pub trait ApplySink {
    fn apply(&self, args: &[String]) -> Result<(), ProcessError>;
}

/// Queries outputs by running `xrandr --properties` against one X display
pub struct XrandrSource {
    xdisplay: String,
}

impl XrandrSource {
    pub fn new(xdisplay: &str) -> Self {
        Self {
            xdisplay: xdisplay.to_string(),
        }
    }
}

impl OutputSource for XrandrSource {
    fn enumerate(&self) -> Result<String, ProcessError> {
        let output = Command::new(XRANDR)
            .arg("--properties")
            .env("DISPLAY", &self.xdisplay)
            .output()
            .map_err(|source| ProcessError::Spawn {
                command: format!("{XRANDR} --properties"),
                source,
            })?;
        if !output.status.success() {
            return Err(ProcessError::Failed {
                command: format!("{XRANDR} --properties"),
                status: output.status,
            });
        }
        String::from_utf8(output.stdout).map_err(|_| ProcessError::Output {
            command: format!("{XRANDR} --properties"),
        })
    }
}

/// Applies a layout by running xrandr with the composed arguments
pub struct XrandrSink {
    xdisplay: String,
}

impl XrandrSink {
    pub fn new(xdisplay: &str) -> Self {
        Self {
            xdisplay: xdisplay.to_string(),
        }
    }
}

impl ApplySink for XrandrSink {
    fn apply(&self, args: &[String]) -> Result<(), ProcessError> {
        log::info!("applying layout...");
        let status = Command::new(XRANDR)
            .args(args)
            .env("DISPLAY", &self.xdisplay)
            .status()
            .map_err(|source| ProcessError::Spawn {
                command: XRANDR.to_string(),
                source,
            })?;
        if !status.success() {
            return Err(ProcessError::Failed {
                command: XRANDR.to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Sink for `--pretend` mode: only reports what would have been executed
pub struct PrintSink;

impl ApplySink for PrintSink {
    fn apply(&self, args: &[String]) -> Result<(), ProcessError> {
        log::info!("pretend mode; would run: {} {}", XRANDR, args.join(" "));
        Ok(())
    }
}
