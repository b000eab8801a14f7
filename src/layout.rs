use thiserror::Error;

use crate::config::Layout;
use crate::resolve::Catalog;

/// Error type for layout selection
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("no layout matched the connected set of displays")]
    NoLayoutMatched,
}

/// Returns the first configured layout all of whose displays are connected.
///
/// Layouts are tried in declaration order; ordering in the config file is
/// the selection mechanism, not specificity. A layout with an unconnected
/// display is skipped with a log line and evaluation moves on.
pub fn select_layout<'a>(catalog: &Catalog, layouts: &'a [Layout]) -> Result<&'a Layout, SelectError> {
    for layout in layouts {
        match layout
            .displays
            .iter()
            .find(|p| !catalog.is_connected(&p.display))
        {
            Some(missing) => log::info!(
                "layout {:?} excluded - display {:?} not connected",
                layout.name,
                missing.display
            ),
            None => {
                log::info!("layout {:?} matches connected displays", layout.name);
                return Ok(layout);
            }
        }
    }
    Err(SelectError::NoLayoutMatched)
}
