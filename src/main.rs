use clap::Parser;
use clockface::logging::{init_logging, LoggingConfig};
use clockface::{
    Clock, ClockConfig, ClockError, FixedTime, MeasureSpec, SystemClock, TimeSample, TimeSource,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "clockface", version, about = "Analog clock face")]
struct Cli {
    /// Window width in logical pixels (the at-most width bound with --dump)
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Window height in logical pixels (the at-most height bound with --dump)
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Fixed face radius in pixels, overriding layout negotiation
    #[arg(long)]
    radius: Option<u32>,

    /// Font file for the hour labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Delay between redraws in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Freeze the clock at HH:MM[:SS] instead of following local time
    #[arg(long, value_parser = parse_time)]
    at: Option<TimeSample>,

    #[arg(long, default_value = "Clock")]
    title: String,

    /// Print one frame's draw commands instead of opening a window
    #[arg(long)]
    dump: bool,

    /// Log filter in env_logger syntax (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log: Option<String>,
}

fn parse_time(value: &str) -> Result<TimeSample, String> {
    value.parse().map_err(|err: ClockError| err.to_string())
}

fn main() -> Result<(), ClockError> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
    });

    let config = ClockConfig::builder()
        .title(cli.title.clone())
        .window_width(cli.width)
        .window_height(cli.height)
        .maybe_fixed_radius(cli.radius)
        .redraw_interval(Duration::from_millis(cli.interval_ms.max(1)))
        .maybe_font_path(cli.font.clone())
        .build();

    match cli.at {
        Some(time) => launch(&cli, Clock::with_source(config, FixedTime(time))),
        None => launch(&cli, Clock::with_source(config, SystemClock::new())),
    }
}

fn launch<S: TimeSource>(cli: &Cli, clock: Clock<S>) -> Result<(), ClockError> {
    if !cli.dump {
        return clock.show();
    }

    let mut view = clock.into_view()?;
    let measurement = view.layout(MeasureSpec::AtMost(cli.width), MeasureSpec::AtMost(cli.height));
    println!(
        "size {} radius {} scale {:.3}",
        measurement.size,
        measurement.radius,
        measurement.scale()
    );
    for command in view.scene().commands() {
        println!("{command:?}");
    }
    Ok(())
}
