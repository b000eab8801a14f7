//! End-to-end run over fixture xrandr output: parse, resolve against a
//! config, select a layout and compose the final argument list.

use std::collections::BTreeSet;

use monitors::{Catalog, Config, OutputSource, ProcessError, compose_args, parse_properties, select_layout};

const CONFIG: &str = r#"{
    "displays": [
        {"name": "laptop", "is-laptop": true},
        {"name": "office-left", "serial": 1122867},
        {"name": "office-right", "serial": 1122868}
    ],
    "layouts": [
        {"name": "office", "displays": [
            {"display": "office-left", "primary": true},
            {"display": "office-right",
             "relative-locations": [{"location": "right-of", "display": "office-left"}]},
            {"display": "laptop",
             "relative-locations": [{"location": "left-of", "display": "office-left"}]}
        ]},
        {"name": "mobile", "displays": [{"display": "laptop", "primary": true}]}
    ]
}"#;

/// Serves canned `xrandr --properties` text instead of spawning a process.
struct FixtureSource(String);

impl OutputSource for FixtureSource {
    fn enumerate(&self) -> Result<String, ProcessError> {
        Ok(self.0.clone())
    }
}

fn edid_hex(serial: u32) -> String {
    let mut block = vec![0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
    block.extend_from_slice(&[0; 4]);
    block.extend_from_slice(&serial.to_le_bytes());
    let hex: String = block.iter().map(|b| format!("{b:02x}")).collect();
    format!("\tEDID:\n\t\t{hex}\n")
}

// Only the laptop panel is attached: the office layout must be skipped and
// the mobile layout applied, with every other output switched off.
#[test]
fn laptop_only_falls_through_to_mobile_layout() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut text = String::from(
        "Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n\
         eDP1 connected primary 1920x1080+0+0 (normal left inverted) 310mm x 170mm\n",
    );
    text.push_str(&edid_hex(7));
    text.push_str("\tBacklight: 50\n");
    text.push_str("DP1 disconnected (normal left inverted right x axis y axis)\n");
    text.push_str("HDMI1 disconnected (normal left inverted right x axis y axis)\n");

    let config = Config::from_json(CONFIG).unwrap();
    let enumeration = FixtureSource(text).enumerate().unwrap();
    let detection = parse_properties(&enumeration).unwrap();
    assert_eq!(
        detection.outputs,
        BTreeSet::from(["DP1".to_string(), "HDMI1".to_string(), "eDP1".to_string()])
    );

    let mut catalog = Catalog::new(&config.displays);
    catalog.resolve(&detection.events);
    assert!(catalog.is_connected("laptop"));
    assert!(!catalog.is_connected("office-left"));

    let layout = select_layout(&catalog, &config.layouts).unwrap();
    assert_eq!(layout.name, "mobile");

    let args = compose_args(&catalog, layout, &detection.outputs).unwrap();
    assert_eq!(
        args,
        [
            "--output", "eDP1", "--auto", "--primary",
            "--output", "DP1", "--off",
            "--output", "HDMI1", "--off",
        ]
    );
}

// All three displays attached, including two office monitors whose EDID
// blocks butt directly against the next output's status line.
#[test]
fn full_office_layout_is_selected_and_composed() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut text = String::from("eDP1 connected 1920x1080+0+0 (normal) 310mm x 170mm\n");
    text.push_str(&edid_hex(7));
    // No separator: the status line itself terminates the EDID block.
    text.push_str("DP1 connected 2560x1440+1920+0 (normal) 600mm x 340mm\n");
    text.push_str(&edid_hex(1122867));
    text.push_str("DP2 connected 2560x1440+4480+0 (normal) 600mm x 340mm\n");
    text.push_str(&edid_hex(1122868));

    let config = Config::from_json(CONFIG).unwrap();
    let detection = parse_properties(&text).unwrap();
    assert_eq!(detection.events.len(), 3);

    let mut catalog = Catalog::new(&config.displays);
    catalog.resolve(&detection.events);

    let layout = select_layout(&catalog, &config.layouts).unwrap();
    assert_eq!(layout.name, "office");

    let args = compose_args(&catalog, layout, &detection.outputs).unwrap();
    assert_eq!(
        args,
        [
            "--output", "DP1", "--auto", "--primary",
            "--output", "DP2", "--auto", "--right-of", "DP1",
            "--output", "eDP1", "--auto", "--left-of", "DP1",
        ]
    );
}
