use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// 3D viewer for neural-network computation graphs
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Pre-parsed model JSON to open at startup - optional, can also
    /// drag-and-drop an ONNX file for server-side parsing
    #[arg(value_name = "MODEL_JSON")]
    pub model: Option<PathBuf>,

    /// Parse-server base URL (overrides NETLENS_SERVER)
    #[arg(short = 's', long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// Parse depth sent with uploads
    #[arg(short = 'd', long = "depth", value_name = "N")]
    pub depth: Option<u32>,

    /// Enable debug logging to file (default: netlens.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
