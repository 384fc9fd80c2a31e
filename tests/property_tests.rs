//! Property-based tests for slogger using proptest

use proptest::prelude::*;
use slogger::prelude::*;
use slogger::source_annotation;
use std::collections::HashSet;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
    ]
}

/// Keys that never collide with the record's own keys.
fn field_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_filter("reserved key", |key| {
        !matches!(key.as_str(), "time" | "level" | "msg" | "source")
    })
}

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Int(i64),
    Flag(bool),
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::Text),
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Flag),
    ]
}

fn path_component() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn buffered(level: Level) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(
        Config::new()
            .with_level(level)
            .with_output(buffer.clone().into()),
    );
    (logger, buffer)
}

proptest! {
    /// Level names parse back to the same level
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: Level = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(level.to_string(), level.to_str());
    }

    /// Ordering follows severity
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.severity() <= b.severity());
        prop_assert_eq!(a < b, a.severity() < b.severity());
    }

    /// A record is written iff its level is at least the minimum level
    #[test]
    fn test_level_filtering(min in any_level(), level in any_level(), message in ".{0,40}") {
        let (logger, buffer) = buffered(min);
        logger.log(level, message.clone(), []);

        let lines = buffer.lines();
        if level >= min {
            prop_assert_eq!(lines.len(), 1);
            let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
            prop_assert_eq!(record["level"].as_str(), Some(level.to_str()));
            prop_assert_eq!(record["msg"].as_str(), Some(message.as_str()));
        } else {
            prop_assert!(lines.is_empty());
            prop_assert_eq!(logger.metrics().filtered_count(), 1);
        }
    }

    /// Arbitrary field values survive the trip through a JSON line
    #[test]
    fn test_fields_roundtrip(
        entries in prop::collection::vec((field_key(), field_value()), 0..8)
    ) {
        let mut seen = HashSet::new();
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect();

        let fields: Vec<Field> = entries
            .iter()
            .map(|(key, value)| match value {
                Value::Text(text) => Field::new(key.as_str(), text.as_str()),
                Value::Int(n) => Field::new(key.as_str(), *n),
                Value::Flag(flag) => Field::new(key.as_str(), *flag),
            })
            .collect();

        let (logger, buffer) = buffered(Level::Debug);
        logger.info("roundtrip", fields);

        let contents = buffer.contents();
        prop_assert_eq!(contents.matches('\n').count(), 1);
        prop_assert!(contents.ends_with('\n'));

        let record: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        for (key, value) in &entries {
            match value {
                Value::Text(text) => prop_assert_eq!(record[key].as_str(), Some(text.as_str())),
                Value::Int(n) => prop_assert_eq!(record[key].as_i64(), Some(*n)),
                Value::Flag(flag) => prop_assert_eq!(record[key].as_bool(), Some(*flag)),
            }
        }
    }

    /// A leading prefix is removed by whole components
    #[test]
    fn test_source_annotation_trims_leading_prefix(
        prefix in prop::collection::vec(path_component(), 1..4),
        rest in prop::collection::vec(path_component(), 1..4),
        line in 1u32..100_000,
    ) {
        let prefix = prefix.join("/");
        let rest = format!("{}.rs", rest.join("/"));
        let file = format!("{}/{}", prefix, rest);

        let source = source_annotation(&file, line, &prefix);
        prop_assert_eq!(&source, &format!("{}:{}", rest, line));
        let prefix_dir = format!("{}/", prefix);
        prop_assert!(!source.starts_with(&prefix_dir));
    }

    /// A prefix that is not a leading path prefix leaves the path alone
    #[test]
    fn test_source_annotation_keeps_unrelated_path(
        file in prop::collection::vec(path_component(), 1..4),
        other in path_component(),
        line in 1u32..100_000,
    ) {
        let file = format!("{}.rs", file.join("/"));
        let prefix = format!("{}_elsewhere", other);

        prop_assert_eq!(
            source_annotation(&file, line, &prefix),
            format!("{}:{}", file, line)
        );
        prop_assert_eq!(source_annotation(&file, line, ""), format!("{}:{}", file, line));
    }
}
