use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::Layout;
use crate::resolve::Catalog;

/// Error type for command composition
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    #[error("layout display {0:?} is not resolved to an output")]
    Unresolved(String),
}

/// Composes the xrandr argument list for the selected layout.
///
/// Placements are emitted in declaration order: enable the output with
/// `--auto`, mark it `--primary` if flagged, then one positioning argument
/// pair per relative location. Every output detection saw but the layout
/// does not use is explicitly switched `--off` afterwards; without this,
/// outputs enabled by a previous layout would stay on. Unused outputs come
/// out in lexicographic order so the composed command is reproducible.
///
/// Referencing a display that never resolved to an output is an error, even
/// though the selector guarantees it for the layout's own displays; relative
/// locations may name displays outside the layout.
pub fn compose_args(
    catalog: &Catalog,
    layout: &Layout,
    all_outputs: &BTreeSet<String>,
) -> Result<Vec<String>, ComposeError> {
    let output_of = |name: &str| -> Result<&str, ComposeError> {
        catalog
            .get(name)
            .and_then(|d| d.output())
            .ok_or_else(|| ComposeError::Unresolved(name.to_string()))
    };

    let mut unused = all_outputs.clone();
    let mut args = Vec::new();
    for placement in &layout.displays {
        let output = output_of(&placement.display)?;
        args.extend(["--output", output, "--auto"].map(String::from));
        if placement.primary {
            args.push("--primary".to_string());
        }
        for position in &placement.positions {
            args.push(format!("--{}", position.direction));
            args.push(output_of(&position.display)?.to_string());
        }
        unused.remove(output);
    }

    for output in &unused {
        args.extend(["--output", output, "--off"].map(String::from));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Direction, DisplayConfig, Placement, RelativePosition};
    use crate::xrandr::ResolutionEvent;

    fn catalog() -> Catalog {
        let configs = [("a", 1), ("b", 2), ("ghost", 3)].map(|(name, serial)| DisplayConfig {
            name: name.to_string(),
            serial: Some(serial),
            is_laptop: false,
        });
        let mut catalog = Catalog::new(&configs);
        catalog.resolve(&[
            ResolutionEvent {
                output: "outA".to_string(),
                serial: 1,
                is_laptop: false,
            },
            ResolutionEvent {
                output: "outB".to_string(),
                serial: 2,
                is_laptop: false,
            },
        ]);
        catalog
    }

    fn placement(display: &str, primary: bool, positions: &[(Direction, &str)]) -> Placement {
        Placement {
            display: display.to_string(),
            primary,
            positions: positions
                .iter()
                .map(|(direction, display)| RelativePosition {
                    direction: *direction,
                    display: display.to_string(),
                })
                .collect(),
        }
    }

    fn outputs(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn composes_enable_primary_position_then_off() {
        let layout = Layout {
            name: "desk".to_string(),
            displays: vec![
                placement("a", true, &[]),
                placement("b", false, &[(Direction::RightOf, "a")]),
            ],
        };
        let args = compose_args(&catalog(), &layout, &outputs(&["outA", "outB", "outC"])).unwrap();
        assert_eq!(
            args,
            [
                "--output", "outA", "--auto", "--primary",
                "--output", "outB", "--auto", "--right-of", "outA",
                "--output", "outC", "--off",
            ]
        );
    }

    #[test]
    fn unused_outputs_are_disabled_lexicographically() {
        let layout = Layout {
            name: "solo".to_string(),
            displays: vec![placement("a", false, &[])],
        };
        let args = compose_args(&catalog(), &layout, &outputs(&["outC", "outA", "outB"])).unwrap();
        assert_eq!(
            args,
            [
                "--output", "outA", "--auto",
                "--output", "outB", "--off",
                "--output", "outC", "--off",
            ]
        );
    }

    #[test]
    fn unresolved_position_reference_is_an_error() {
        let layout = Layout {
            name: "broken".to_string(),
            displays: vec![placement("a", false, &[(Direction::Above, "ghost")])],
        };
        let err = compose_args(&catalog(), &layout, &outputs(&["outA"])).unwrap_err();
        assert_eq!(err, ComposeError::Unresolved("ghost".to_string()));
    }
}
