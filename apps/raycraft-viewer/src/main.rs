//! Raycraft Viewer
//!
//! Generates a block world and ray traces it from a first-person player who
//! walks, jumps, and breaks or places blocks.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p raycraft-viewer -- [OPTIONS]
//! ```
//!
//! ## Controls
//!
//! - `W/A/S/D` or arrows: move, `Space`: jump
//! - Mouse: look (while the cursor is captured), `Escape`: release/capture cursor
//! - Left/right mouse: break/place, wheel or `E`/`Q`: select block
//! - `.`/`,`: raise/lower render detail
//! - `F3`: cycle debug view, `F2`: save a screenshot
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;
mod options;

use raycraft_app::{run_app, AppConfig};

use crate::app::{Viewer, TITLE};

const WIDTH: u32 = 856;
const HEIGHT: u32 = 480;
const TARGET_FPS: u32 = 120;

fn main() -> anyhow::Result<()> {
    // Check for help flag before starting the app
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    run_app::<Viewer>(
        AppConfig::new(TITLE)
            .with_size(WIDTH, HEIGHT)
            .with_target_fps(TARGET_FPS),
    )
}

fn print_help() {
    eprintln!(
        "Raycraft Viewer

USAGE:
    cargo run -p raycraft-viewer -- [OPTIONS]

WORLD OPTIONS:
    --seed <N>              World seed (default: random, logged at startup)

RENDER OPTIONS:
    --detail <N>            Render detail level from -4 to 6 (default: 2)
                            Level d renders 107*2^d x 60*2^d pixels
    --no-shadows            Disable shadow rays

SCREENSHOT OPTIONS:
    -S, --screenshot        Enable screenshot capture mode
    -o, --output <PATTERN>  Output path pattern (use {{}} for frame number)
                            Default: screenshot_{{}}.png
    -f, --frames <FRAMES>   Frame indices to capture
                            Examples: \"0\" \"0,10,20\" \"0-5\" \"0,5-10,20\"
                            Default: 0
    --exit-after            Exit after capturing all specified frames

OTHER:
    -h, --help              Print this help message

EXAMPLES:
    # Random world
    cargo run -p raycraft-viewer

    # Fixed world at HD detail
    cargo run -p raycraft-viewer -- --seed 42 --detail 3

    # Capture a few frames and exit
    cargo run -p raycraft-viewer -- --seed 42 -S -f 0,30,60 -o shot_{{}}.png --exit-after

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
