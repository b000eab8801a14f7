use crate::config::DisplayConfig;
use crate::xrandr::ResolutionEvent;

/// A configured display together with what detection learned about it
#[derive(Debug, Clone)]
pub struct DisplayState {
    config: DisplayConfig,
    output: Option<String>,
    connected: bool,
}

impl DisplayState {
    /// The configured display name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The xrandr output this display was detected on, once resolved
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn matches(&self, event: &ResolutionEvent) -> bool {
        match self.config.serial {
            Some(serial) => serial == event.serial && self.config.is_laptop == event.is_laptop,
            // No serial configured: the laptop flag is the whole identity.
            None => event.is_laptop,
        }
    }
}

/// The display catalog for one run. Built from the static configuration,
/// annotated exactly once by [`Catalog::resolve`], read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    displays: Vec<DisplayState>,
}

impl Catalog {
    pub fn new(displays: &[DisplayConfig]) -> Self {
        Self {
            displays: displays
                .iter()
                .map(|config| DisplayState {
                    config: config.clone(),
                    output: None,
                    connected: false,
                })
                .collect(),
        }
    }

    /// Matches detection events against the catalog. For each event the
    /// first still-unresolved display (in declaration order) with the same
    /// identity is marked connected; on duplicate identities declaration
    /// order is the tie-break. Events with no catalog match are logged and
    /// dropped.
    pub fn resolve(&mut self, events: &[ResolutionEvent]) {
        for event in events {
            match self
                .displays
                .iter_mut()
                .find(|d| !d.connected && d.matches(event))
            {
                Some(display) => {
                    display.output = Some(event.output.clone());
                    display.connected = true;
                    log::info!(
                        "display {:?} (output {}) is connected",
                        display.config.name,
                        event.output
                    );
                }
                None => log::warn!(
                    "output {} (serial {:#010x}, laptop: {}) not found in config",
                    event.output,
                    event.serial,
                    event.is_laptop
                ),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DisplayState> {
        self.displays.iter().find(|d| d.config.name == name)
    }

    pub fn is_connected(&self, name: &str) -> bool {
        self.get(name).is_some_and(DisplayState::is_connected)
    }
}
