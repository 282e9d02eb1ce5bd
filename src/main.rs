use callscope::core::clock::Clock;
use callscope::core::config::{self, CliOverrides};
use callscope::core::source::DataSource;
use callscope::core::state::Dashboard;
use callscope::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "callscope", about = "Participant timeline dashboard for a recorded call")]
struct Args {
    /// Meeting JSON file (defaults to the bundled sample)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Logical width of the timeline axis
    #[arg(long)]
    canvas_width: Option<f64>,

    /// Offset used when formatting times
    #[arg(long, value_enum)]
    clock: Option<Clock>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to callscope.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("callscope.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config error, using defaults: {}", e);
        Default::default()
    });
    let cli = CliOverrides {
        data_file: args.data,
        canvas_width: args.canvas_width,
        clock: args.clock,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Callscope starting up (clock: {}, canvas width: {}, data: {})",
        resolved.clock.label(),
        resolved.canvas_width,
        resolved
            .data_file
            .as_ref()
            .map_or_else(|| "sample".to_string(), |p| p.display().to_string())
    );

    // Data problems are reported before the terminal switches modes.
    let meeting = match DataSource::from_config(&resolved).load() {
        Ok(meeting) => meeting,
        Err(e) => {
            log::error!("Failed to load meeting: {}", e);
            eprintln!("callscope: {}", e);
            std::process::exit(1);
        }
    };
    let dashboard = match Dashboard::new(meeting, &resolved) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            log::error!("Failed to lay out meeting: {}", e);
            eprintln!("callscope: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Dashboard ready ({} participants)", dashboard.participant_count());
    tui::run(dashboard)
}
