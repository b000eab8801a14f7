use std::collections::BTreeSet;

use thiserror::Error;

use crate::edid::{self, EdidError};

/// Output name prefixes that identify an internal laptop panel. Laptop
/// displays may not carry a serial number, so the port name is the only
/// stable way to identify them.
pub const LAPTOP_PORT_PREFIXES: [&str; 2] = ["eDP", "LVDS"];

/// Error type for parsing `xrandr --properties` output
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to decode EDID of output {output:?}: {source}")]
    Edid {
        output: String,
        #[source]
        source: EdidError,
    },
}

/// A connected output whose EDID decoded successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEvent {
    /// The xrandr output name, e.g. `HDMI1`
    pub output: String,
    /// The serial number extracted from the EDID
    pub serial: u32,
    /// Whether the output name marks an internal laptop panel
    pub is_laptop: bool,
}

/// Everything detection learned from one `xrandr --properties` run
#[derive(Debug, Default)]
pub struct Detection {
    /// Every output name encountered, connected or not. Ordered, so that
    /// commands derived from it come out deterministic.
    pub outputs: BTreeSet<String>,
    /// One event per connected output, in encounter order
    pub events: Vec<ResolutionEvent>,
}

enum State {
    SeekConnectedOutput,
    SeekEdid,
    AccumulateEdid,
}

/// Parses the full text of `xrandr --properties` into a [`Detection`].
///
/// A state machine over lines: find the next output status line; for a
/// connected output find its `EDID:` property; accumulate the indented hex
/// lines below it; on the first line that is not hex, decode the block and
/// emit an event. An EDID decode failure is fatal, since it means the
/// enumeration output deviated from the expected format.
pub fn parse_properties(text: &str) -> Result<Detection, ParseError> {
    let mut parser = Parser::new();
    for line in text.lines() {
        parser.line(line)?;
    }
    parser.finish()
}

struct Parser {
    state: State,
    detection: Detection,
    output: String,
    is_laptop: bool,
    hex: String,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::SeekConnectedOutput,
            detection: Detection::default(),
            output: String::new(),
            is_laptop: false,
            hex: String::new(),
        }
    }

    fn line(&mut self, line: &str) -> Result<(), ParseError> {
        match self.state {
            State::SeekConnectedOutput => self.seek_output(line),
            State::SeekEdid => {
                if is_edid_start(line) {
                    self.state = State::AccumulateEdid;
                }
            }
            State::AccumulateEdid => {
                if let Some(hex) = hex_content(line) {
                    self.hex.push_str(hex);
                } else {
                    self.finalize()?;
                    // The terminating line may itself be the next output's
                    // status line. Losing it here would drop that output,
                    // so feed it back through the initial state.
                    self.seek_output(line);
                }
            }
        }
        Ok(())
    }

    fn seek_output(&mut self, line: &str) {
        let Some((name, connected)) = output_status(line) else {
            return;
        };
        self.detection.outputs.insert(name.to_string());
        if !connected {
            return;
        }
        self.output = name.to_string();
        self.is_laptop = LAPTOP_PORT_PREFIXES.iter().any(|p| name.starts_with(p));
        self.state = State::SeekEdid;
    }

    fn finalize(&mut self) -> Result<(), ParseError> {
        let serial = edid::parse_hex(&self.hex)
            .and_then(|bytes| edid::decode_serial(&bytes))
            .map_err(|source| ParseError::Edid {
                output: self.output.clone(),
                source,
            })?;
        log::debug!(
            "output {} has serial {:#010x} (laptop: {})",
            self.output,
            serial,
            self.is_laptop
        );
        self.detection.events.push(ResolutionEvent {
            output: std::mem::take(&mut self.output),
            serial,
            is_laptop: self.is_laptop,
        });
        self.hex.clear();
        self.state = State::SeekConnectedOutput;
        Ok(())
    }

    fn finish(mut self) -> Result<Detection, ParseError> {
        if matches!(self.state, State::AccumulateEdid) {
            self.finalize()?;
        }
        Ok(self.detection)
    }
}

/// Matches `<name> (connected|disconnected) ...` at the start of a line.
fn output_status(line: &str) -> Option<(&str, bool)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    match tokens.next()? {
        "connected" => Some((name, true)),
        "disconnected" => Some((name, false)),
        _ => None,
    }
}

fn is_edid_start(line: &str) -> bool {
    line.starts_with(char::is_whitespace) && line.trim_start().starts_with("EDID:")
}

/// Returns the trimmed content of an indented line made of hex digits only.
fn hex_content(line: &str) -> Option<&str> {
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    let content = line.trim();
    if !content.is_empty() && content.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(content)
    } else {
        None
    }
}
