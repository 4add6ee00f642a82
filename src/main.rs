use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use string2hid::{
    DEFAULT_DEVICE, DeviceSink, Engine, EngineError, MemorySink, ReportSink, parse_duration,
};
use tracing::error;

const ESCAPE_HELP: &str = "\
Escapes:
  \\\\            backslash
  \\n            enter
  \\t \\b \\d \\e   tab, backspace, delete, escape
  \\c \\s \\a \\g   ctrl, shift, alt, gui/win
  \\-            pause for --delay
  \\\"...\\\"       press up to 6 keys at once

Examples:
  string2hid 'ls -la\\n'
  string2hid 'bla*' /dev/hidg1
  string2hid '\\\"\\a\\t\\\"'             alt + tab
  string2hid '\\\"\\af\\\"\\-\\-test\\n'    alt + f, wait 2s, type test + enter";

#[derive(Parser, Debug)]
#[command(
    name = "string2hid",
    about = "Type a string into a USB HID keyboard gadget",
    after_long_help = ESCAPE_HELP,
    version
)]
struct Args {
    /// Text to type, using the escape syntax shown in --help
    text: String,

    /// HID gadget device to write to
    #[arg(default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Length of the `\-` pause (`ms` or `s`)
    #[arg(long, default_value = "1s", value_parser = parse_delay)]
    delay: Duration,

    /// Print the reports as hex instead of writing to the device
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy)]
enum Status {
    Success = 0,
    InvalidInput = 1,
    PressWrite = 2,
    DeviceOpen = 3,
    ReleaseWrite = 4,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

fn parse_delay(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| format!("{e:#}"))
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                Status::InvalidInput.into()
            } else {
                Status::Success.into()
            };
        }
    };
    setup_logging(args.verbose);

    let status = if args.dry_run {
        dry_run(&args).await
    } else {
        type_to_device(&args).await
    };
    status.into()
}

async fn type_to_device(args: &Args) -> Status {
    let sink = match DeviceSink::open(&args.device)
        .await
        .with_context(|| format!("Failed to open device: {}", args.device.display()))
    {
        Ok(sink) => sink,
        Err(err) => {
            error!("{err:#}");
            return Status::DeviceOpen;
        }
    };
    run(Engine::with_delay(sink, args.delay), &args.text).await.0
}

async fn dry_run(args: &Args) -> Status {
    let (status, sink) = run(Engine::with_delay(MemorySink::new(), args.delay), &args.text).await;
    for report in &sink.reports {
        let hex: Vec<String> = report.iter().map(|b| format!("{b:02x}")).collect();
        println!("{}", hex.join(" "));
    }
    status
}

async fn run<S: ReportSink>(mut engine: Engine<S>, text: &str) -> (Status, S) {
    let result = engine
        .type_str(text)
        .await
        .context("Failed to type input");
    let status = match &result {
        Ok(_) => Status::Success,
        Err(err) => {
            error!("{err:#}");
            match err.downcast_ref::<EngineError>() {
                Some(EngineError::PressWrite(_)) => Status::PressWrite,
                Some(EngineError::ReleaseWrite(_)) => Status::ReleaseWrite,
                _ => Status::InvalidInput,
            }
        }
    };
    (status, engine.into_sink())
}
