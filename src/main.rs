//! The CLI interface for monitors
//!
//! Use the `--help` flag to see the available options.
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use monitors::{
    ApplySink, Catalog, Config, OutputSource, PrintSink, XRANDR, XrandrSink, XrandrSource,
    compose_args, parse_properties, select_layout,
};
use structopt::StructOpt;

/// Default config file location, relative to the home directory
const DEFAULT_CONFIG_PATH: &str = ".config/monitors/config.json";

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "monitors",
    about = "Applies the first configured multi-monitor layout whose displays are all connected."
)]
struct Opts {
    /// Path to the config file (default: ~/.config/monitors/config.json)
    #[structopt(short, long)]
    config_path: Option<PathBuf>,
    /// Print what would have been executed and exit
    #[structopt(short, long)]
    pretend: bool,
    /// Which X display to manage
    #[structopt(short, long, default_value = ":0")]
    xdisplay: String,
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
}

/// Entry point for `monitors`.
fn main() -> Result<()> {
    let _ = color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    let config_path = match opts.config_path {
        Some(path) => path,
        None => dirs::home_dir()
            .ok_or_else(|| eyre!("failed to determine the home directory"))?
            .join(DEFAULT_CONFIG_PATH),
    };
    let config = Config::load(&config_path)?;
    log::debug!("Loaded config:\n{:#?}", config);

    let text = XrandrSource::new(&opts.xdisplay).enumerate()?;
    let detection = parse_properties(&text)?;
    log::debug!("Detected outputs:\n{:#?}", detection);

    let mut catalog = Catalog::new(&config.displays);
    catalog.resolve(&detection.events);

    let layout = select_layout(&catalog, &config.layouts)?;
    let args = compose_args(&catalog, layout, &detection.outputs)?;
    log::info!("xrandr cmd: {} {}", XRANDR, args.join(" "));

    let sink: Box<dyn ApplySink> = if opts.pretend {
        Box::new(PrintSink)
    } else {
        Box::new(XrandrSink::new(&opts.xdisplay))
    };
    sink.apply(&args)?;

    Ok(())
}
