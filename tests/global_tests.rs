//! Tests for the process-wide logger, its free functions and macros
//!
//! The global logger is shared by every test in this binary, so each test
//! holds `GLOBAL_LOCK` while it reconfigures and logs.

use parking_lot::Mutex;
use slogger::{fields, Config, Context, Field, Level, SharedBuffer, Sink, StandardLogger};
use std::thread;

static GLOBAL_LOCK: Mutex<()> = parking_lot::const_mutex(());

fn parse(line: &str) -> serde_json::Value {
    serde_json::from_str(line).expect("each line should be a JSON object")
}

fn capture(config: Config) -> SharedBuffer {
    let buffer = SharedBuffer::new();
    slogger::set_config(config.with_output(buffer.clone().into()));
    buffer
}

#[test]
fn test_default_config() {
    let _guard = GLOBAL_LOCK.lock();
    slogger::set_config(Config::default());

    let config = slogger::config();
    assert_eq!(config.level, Level::Info);
    assert!(!config.add_source);
    assert!(config.outputs.is_empty());
    assert!(config.handler.is_none());
    assert!(config.context_fields_extractor.is_none());
    assert!(slogger::logger().enabled(Level::Info));
}

#[test]
fn test_config_read_back_and_reapplied() {
    let _guard = GLOBAL_LOCK.lock();
    let first = capture(Config::new());

    slogger::set_config(slogger::config().with_level(Level::Debug));
    slogger::debug("debug after raising verbosity", []);
    assert_eq!(slogger::config().level, Level::Debug);
    assert_eq!(first.lines().len(), 1);

    let second = SharedBuffer::new();
    slogger::set_config(slogger::config().with_outputs(vec![second.clone().into()]));
    slogger::info("after switching sinks", []);

    assert_eq!(first.lines().len(), 1);
    assert_eq!(second.lines().len(), 1);
    assert!(second.contents().contains("after switching sinks"));
}

#[test]
fn test_free_functions_respect_level() {
    let _guard = GLOBAL_LOCK.lock();
    let buffer = capture(Config::new().with_level(Level::Info));

    slogger::debug("debug", []);
    slogger::info("info", []);
    slogger::warn("warn", []);
    slogger::error("error", [Field::new("code", 500)]);

    let messages: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| parse(line)["msg"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, ["info", "warn", "error"]);
}

#[test]
fn test_set_config_redirects_later_records_only() {
    let _guard = GLOBAL_LOCK.lock();
    let old = capture(Config::new());
    slogger::info("before", []);

    let new = capture(Config::new());
    slogger::info("after", []);

    assert_eq!(old.lines().len(), 1);
    assert!(old.contents().contains("before"));
    assert_eq!(new.lines().len(), 1);
    assert!(new.contents().contains("after"));
}

#[test]
fn test_context_functions_use_extractor() {
    let _guard = GLOBAL_LOCK.lock();
    let buffer = capture(
        Config::new()
            .with_level(Level::Debug)
            .with_context_fields_extractor(|_| fields!("a" => 1, "b" => 2)),
    );
    let ctx = Context::background();

    slogger::debug_ctx(&ctx, "debug", []);
    slogger::info_ctx(&ctx, "info", []);
    slogger::warn_ctx(&ctx, "warn", []);
    slogger::error_ctx(&ctx, "error", []);
    slogger::info("plain", []);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 5);
    for line in &lines[..4] {
        let record = parse(line);
        assert_eq!(record["a"], 1);
        assert_eq!(record["b"], 2);
    }
    assert!(parse(&lines[4]).get("a").is_none());
}

#[test]
fn test_free_functions_annotate_call_site() {
    let _guard = GLOBAL_LOCK.lock();
    let buffer = capture(Config::new().with_source(true));

    let line = line!() + 1;
    slogger::warn("from a free function", []);
    let ctx_line = line!() + 1;
    slogger::error_ctx(&Context::background(), "from a context function", []);

    let lines = buffer.lines();
    assert_eq!(parse(&lines[0])["source"], format!("{}:{}", file!(), line));
    assert_eq!(parse(&lines[1])["source"], format!("{}:{}", file!(), ctx_line));
}

#[test]
fn test_macros_annotate_call_site() {
    let _guard = GLOBAL_LOCK.lock();
    let buffer = capture(
        Config::new()
            .with_level(Level::Debug)
            .with_source(true)
            .with_context_fields_extractor(|_| fields!("tenant" => "acme")),
    );

    let line = line!() + 1;
    slogger::info!("listening", "port" => 8080, "tls" => false);
    let ctx_line = line!() + 1;
    slogger::error_ctx!(&Context::background(), "handshake failed");
    slogger::debug!("no fields");
    slogger::log!(Level::Warn, "explicit level", "retries" => 3,);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 4);

    let first = parse(&lines[0]);
    assert_eq!(first["msg"], "listening");
    assert_eq!(first["port"], 8080);
    assert_eq!(first["tls"], false);
    assert_eq!(first["source"], format!("{}:{}", file!(), line));

    let second = parse(&lines[1]);
    assert_eq!(second["level"], "ERROR");
    assert_eq!(second["tenant"], "acme");
    assert_eq!(second["source"], format!("{}:{}", file!(), ctx_line));

    assert_eq!(parse(&lines[2])["level"], "DEBUG");
    assert_eq!(parse(&lines[3])["retries"], 3);
}

#[test]
fn test_reconfiguring_while_logging() {
    let _guard = GLOBAL_LOCK.lock();
    let buffers: Vec<SharedBuffer> = (0..4).map(|_| SharedBuffer::new()).collect();
    slogger::set_config(Config::new().with_output(buffers[0].clone().into()));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                for i in 0..250 {
                    slogger::info("tick", fields!("thread" => t, "i" => i));
                }
            })
        })
        .collect();

    for buffer in &buffers[1..] {
        slogger::set_config(Config::new().with_output(buffer.clone().into()));
        thread::yield_now();
    }

    for writer in writers {
        writer.join().expect("logging thread panicked");
    }

    // Every record lands whole in exactly one of the configured sinks
    let total: usize = buffers
        .iter()
        .map(|buffer| {
            let lines = buffer.lines();
            for line in &lines {
                assert_eq!(parse(line)["msg"], "tick");
            }
            lines.len()
        })
        .sum();
    assert_eq!(total, 1000);
}

#[test]
fn test_set_logger_installs_prebuilt_logger() {
    let _guard = GLOBAL_LOCK.lock();
    let buffer = SharedBuffer::new();
    let logger = slogger::Logger::new(
        Config::new()
            .with_level(Level::Error)
            .with_output(Sink::from(buffer.clone())),
    );
    slogger::set_logger(logger);

    slogger::warn("filtered", []);
    slogger::error("kept", []);

    assert_eq!(buffer.lines().len(), 1);
    assert_eq!(slogger::logger().config().level, Level::Error);
    assert_eq!(slogger::logger().metrics().filtered_count(), 1);
}

#[test]
fn test_standard_logger_backs_log_facade() {
    let buffer = SharedBuffer::new();
    StandardLogger::new(Level::Info, vec![buffer.clone().into()])
        .install()
        .expect("no other log backend in this test binary");

    log::debug!("below the level");
    log::warn!("cache miss rate {}%", 40);

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let record = parse(&lines[0]);
    assert_eq!(record["level"], "WARN");
    assert_eq!(record["msg"], "cache miss rate 40%");

    // Only one backend can ever be installed
    let second = StandardLogger::new(Level::Info, vec![SharedBuffer::new().into()]);
    assert!(second.install().is_err());
}
