//! Basic slogger usage
//!
//! Demonstrates the global logger, source annotation and context fields.
//!
//! Run with: cargo run --example basic_usage

use slogger::prelude::*;
use slogger::{fields, info, warn_ctx};

#[derive(Clone)]
struct RequestId(String);

fn main() -> Result<()> {
    // Defaults: Info level, JSON lines on stdout
    slogger::info("service starting", fields!("version" => env!("CARGO_PKG_VERSION")));
    slogger::debug("hidden at the default level", []);

    // Reconfigure from SLOGGER_* variables plus call-site annotation
    slogger::set_config(
        Config::from_env()?
            .with_source(true)
            .with_trim_path_prefix("demos")
            .with_output(Sink::stdout())
            .with_context_fields_extractor(|ctx: &Context| {
                ctx.value::<RequestId>()
                    .map(|id| fields!("request_id" => id.0.as_str()))
                    .unwrap_or_default()
            }),
    );

    info!("listening", "port" => 8080, "tls" => false);

    let ctx = Context::background().with_value(RequestId("req-7f3a".to_string()));
    warn_ctx!(&ctx, "slow request", "elapsed_ms" => 1250);

    // Plain text lines through the legacy logger
    let legacy = StandardLogger::new(Level::Info, vec![Sink::stderr()]);
    legacy.print("legacy subsystem ready")?;

    Ok(())
}
