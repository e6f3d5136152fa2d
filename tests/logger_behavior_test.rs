use rask_logger::sink::Channel;
use rask_logger::{
    ConsoleLogger, ConsoleSink, ErrorValue, Indent, LogEntry, Logger, LoggerError, MemoryChannels,
    Payload, Severity,
};
use serde_json::{Value, json};
use std::collections::HashSet;

fn memory_logger(threshold: Severity) -> ConsoleLogger<MemoryChannels> {
    Logger::new(
        threshold,
        ConsoleSink::with_channels(MemoryChannels::new(), Indent::None),
    )
}

fn all_lines(logger: &ConsoleLogger<MemoryChannels>) -> Vec<Value> {
    let channels = logger.sink().channels();
    channels
        .stderr_lines()
        .into_iter()
        .chain(channels.stdout_lines())
        .map(|line| serde_json::from_str(&line).unwrap())
        .collect()
}

#[test]
fn test_warn_threshold_suppresses_debug() {
    let logger = memory_logger(Severity::Warn);
    logger.debug("hello").unwrap();
    assert_eq!(logger.sink().channels().total_lines(), 0);
}

#[test]
fn test_debug_threshold_emits_debug_to_stdout() {
    let logger = memory_logger(Severity::Debug);
    logger.debug("hello").unwrap();

    let channels = logger.sink().channels();
    assert!(channels.stderr_lines().is_empty());
    let lines = channels.lines(Channel::Stdout);
    assert_eq!(lines.len(), 1);

    let record: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["level"], "debug");
    assert_eq!(record["message"], "hello");
    assert!(record["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(record.get("type").is_none());
}

#[test]
fn test_error_with_meta_scenario() {
    let logger = memory_logger(Severity::Error);
    logger
        .error(LogEntry::message("boom").with_meta(Payload::object().with("code", 5)))
        .unwrap();

    let lines = logger.sink().channels().stderr_lines();
    assert_eq!(lines.len(), 1);
    let mut record: Value = serde_json::from_str(&lines[0]).unwrap();
    let id = record
        .as_object_mut()
        .and_then(|object| object.remove("id"))
        .unwrap();
    assert!(id.as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(
        record,
        json!({"level": "error", "message": "boom", "meta": {"code": 5}})
    );
}

#[test]
fn test_threshold_matrix_through_console() {
    for threshold in Severity::ALL {
        let logger = memory_logger(threshold);
        for level in Severity::ALL {
            logger.log(level, format!("at {level}")).unwrap();
        }

        let emitted: Vec<String> = all_lines(&logger)
            .iter()
            .map(|record| record["level"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = Severity::ALL
            .iter()
            .filter(|level| level.rank() <= threshold.rank())
            .map(ToString::to_string)
            .collect();

        let mut emitted_sorted = emitted.clone();
        emitted_sorted.sort();
        let mut expected_sorted = expected.clone();
        expected_sorted.sort();
        assert_eq!(emitted_sorted, expected_sorted, "threshold={threshold}");
    }
}

#[test]
fn test_string_sugar_matches_structured_entry() {
    let logger = memory_logger(Severity::Info);
    logger.info("same text").unwrap();
    logger.info(LogEntry::message("same text")).unwrap();

    let mut records = all_lines(&logger);
    assert_eq!(records.len(), 2);
    let first_id = records[0].as_object_mut().unwrap().remove("id").unwrap();
    let second_id = records[1].as_object_mut().unwrap().remove("id").unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(records[0], records[1]);
}

#[test]
fn test_generated_ids_are_distinct() {
    let logger = memory_logger(Severity::Info);
    for i in 0..500 {
        logger.info(format!("record {i}")).unwrap();
    }

    let ids: HashSet<String> = all_lines(&logger)
        .iter()
        .map(|record| record["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn test_supplied_id_and_reference_id_are_kept() {
    let logger = memory_logger(Severity::Info);
    logger
        .info(LogEntry::message("child").with_id("X").with_reference_id("parent-1"))
        .unwrap();

    let records = all_lines(&logger);
    assert_eq!(records[0]["id"], "X");
    assert_eq!(records[0]["reference_id"], "parent-1");
}

#[test]
fn test_cyclic_meta_is_logged_with_sentinel() {
    let logger = memory_logger(Severity::Info);
    let meta = Payload::object().with("name", "node");
    meta.insert("parent", meta.clone());

    logger.info(LogEntry::message("cycle").with_meta(meta.clone())).unwrap();
    meta.remove("parent");

    let records = all_lines(&logger);
    assert_eq!(records[0]["meta"]["parent"], "[Circular ~.meta]");
    assert_eq!(records[0]["meta"]["name"], "node");
}

#[test]
fn test_error_meta_round_trip() {
    let logger = memory_logger(Severity::Warn);
    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");

    logger
        .warn(LogEntry::message("retrying").with_meta(Payload::object().with("error", ErrorValue::from(failure))))
        .unwrap();

    let records = all_lines(&logger);
    let error = &records[0]["meta"]["error"];
    for field in ["name", "message", "stack"] {
        assert!(
            error[field].as_str().is_some_and(|s| !s.is_empty()),
            "{field} should be non-empty"
        );
    }
    assert_eq!(error["message"], "upstream timed out");
    assert_eq!(error["code"], "TimedOut");
}

#[test]
fn test_unknown_threshold_name_fails_fast() {
    let result = Logger::from_level_name(
        "loud",
        ConsoleSink::with_channels(MemoryChannels::new(), Indent::None),
    );
    assert!(matches!(result, Err(LoggerError::Config(_))));
}

#[test]
fn test_logger_is_shareable_across_threads() {
    let logger = std::sync::Arc::new(memory_logger(Severity::Info));
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("worker {worker} line {i}")).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok());
    }

    let records = all_lines(&logger);
    assert_eq!(records.len(), 200);
    assert!(records.iter().all(|record| record["level"] == "info"));
}
