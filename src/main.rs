use std::env;
use std::process;

use scratch_reveal::{
    InputContext, PointerSample, ScratchConfig, ScratchSession, SessionHooks, ThresholdMode,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "--verbose" || arg == "-v");
    let debug = args.iter().any(|arg| arg == "--debug");
    let version = args.iter().any(|arg| arg == "--version" || arg == "-V");

    // Handle version flag
    if version {
        eprintln!("scratch-reveal version {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    // Set log level based on flags
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // Initialize logger with proper stderr output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("scratch-reveal demo {}", env!("CARGO_PKG_VERSION"));

    // One shared input context, as a host page would have
    let input = InputContext::new();
    let hooks = SessionHooks::new()
        .on_enable(|| eprintln!("[event] enable"))
        .on_scratch(|| eprintln!("[event] scratch"))
        .on_complete(|ratio| eprintln!("[event] complete at ratio {ratio:.3}"))
        .on_reset(|| eprintln!("[event] reset"));

    let config = ScratchConfig {
        completion_threshold: Some(0.4),
        threshold_mode: ThresholdMode::Uniform,
        ..Default::default()
    };

    let mut session = ScratchSession::bind(config, hooks, input.clone(), 200, 100).await?;
    let completion = session.completion();

    // Replay a synthetic zig-zag gesture across the card
    input.pointer_down();
    let path = [
        (10.0, 10.0),
        (190.0, 30.0),
        (10.0, 50.0),
        (190.0, 70.0),
        (10.0, 90.0),
    ];
    for (x, y) in path {
        session.on_pointer(PointerSample::moved(x, y))?;
        eprintln!("ratio after stroke: {:.3}", session.ratio());
        if session.is_revealed() {
            break;
        }
    }
    input.pointer_up();
    session.pointer_released();

    if !session.is_revealed() {
        // a real host would keep scratching; the demo forces the reveal
        session.destroy()?;
    }

    completion.wait().await;
    eprintln!("card revealed, final ratio {:.3}", session.ratio());

    Ok(())
}
