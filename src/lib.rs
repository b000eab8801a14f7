//! A library to automatically configure multi-monitor layouts via xrandr.
//!
//! Detected displays are identified by the serial number in their EDID and
//! matched against a user-authored catalog of named displays; the first
//! configured layout whose displays are all connected is turned into an
//! xrandr argument list, with every unused output explicitly disabled.

mod command;
mod config;
mod edid;
mod layout;
mod process;
mod resolve;
mod xrandr;

pub use command::*;
pub use config::*;
pub use edid::*;
pub use layout::*;
pub use process::*;
pub use resolve::*;
pub use xrandr::*;
