use std::{
    fmt,
    fs::{self, File},
    io::stdin,
    path::PathBuf,
    sync::Arc,
};

use clap::Parser;
use log::{info, warn};
use simplelog::{Config, WriteLogger};

use crate::{
    config::{AppConfig, ConfigError},
    service::{
        data_manager::DataManager,
        gameapi::transport::{ReqwestTransport, TransportError},
        reveal::{NoFileBrowser, RevealInFileBrowser, SystemFileBrowser},
    },
    ui::{browser::SkinBrowser, repl, ReplError},
};

mod config;
mod model;
mod service;
mod ui;

/// Browse League of Legends champion skins and download them
#[derive(Parser, Debug)]
#[command(name = "skindrop")]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder downloaded skins are stored in [default: Documents/skin-cache]
    #[arg(short = 'c', long = "cache-dir")]
    cache_dir: Option<PathBuf>,

    /// Log file location [default: <temp>/skindrop/skindrop.log]
    #[arg(short = 'l', long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug messages too
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Never open the system file browser
    #[arg(long = "no-reveal")]
    no_reveal: bool,
}

#[derive(Debug)]
enum StartupError {
    Config(ConfigError),
    Transport(TransportError),
    Repl(ReplError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StartupError::Config(err) => write!(f, "Error occured while initializing:\n{}", err),
            StartupError::Transport(err) => write!(f, "Error occured while initializing:\n{}", err),
            StartupError::Repl(err) => write!(f, "Error occured while running the browser:\n{}", err),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(error: ConfigError) -> Self {
        StartupError::Config(error)
    }
}

impl From<TransportError> for StartupError {
    fn from(error: TransportError) -> Self {
        StartupError::Transport(error)
    }
}

impl From<ReplError> for StartupError {
    fn from(error: ReplError) -> Self {
        StartupError::Repl(error)
    }
}

fn init_logging(config: &AppConfig) {
    if let Some(folder) = config.log_file.parent() {
        let _ = fs::create_dir_all(folder);
    }
    if let Ok(file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, Config::default(), file);
    }
}

fn start(args: Args) -> Result<(), StartupError> {
    let config = AppConfig::new(args.cache_dir, args.log_file, args.verbose)?;
    init_logging(&config);
    info!("Starting skindrop, cache folder is {}", config.cache_dir.display());

    let transport = Arc::new(ReqwestTransport::new()?);
    let manager = DataManager::new(transport, &config);
    let file_browser: Box<dyn RevealInFileBrowser> = if args.no_reveal {
        Box::new(NoFileBrowser)
    } else {
        Box::new(SystemFileBrowser)
    };

    let mut browser = SkinBrowser::new(manager, file_browser);
    browser.load_catalog();
    repl::run(browser)?;

    info!("Bye");
    Ok(())
}

fn main() {
    let args = Args::parse();

    match start(args) {
        Ok(()) => return,
        Err(error) => {
            warn!("{}", error);
            println!("{}\n", error);
        }
    }

    let mut s = String::new();
    println!("Press Enter to exit");
    let _ = stdin().read_line(&mut s);
}
