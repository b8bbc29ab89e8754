// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent units of work under tokio, each in its own isolated context.

#![cfg(not(target_arch = "wasm32"))]

use nestlog::{InMemoryLogger, Isolated, LogContext, NumberedIndent, Scope};
use std::sync::Arc;
use std::time::Duration;

fn install(prefix: &str) -> Arc<InMemoryLogger> {
    let logger = Arc::new(InMemoryLogger::new());
    LogContext::reset(
        Scope::builder(prefix)
            .indent(NumberedIndent)
            .logger(logger.clone())
            .build(),
    );
    logger
}

/// Logs `name` three times, yielding in between. Returns the counter of each line.
async fn unit(name: &'static str) -> Vec<u64> {
    let mut seen = Vec::new();
    for _ in 0..3 {
        nestlog::log(name).unwrap();
        seen.push(LogContext::current_path().last());
        tokio::task::yield_now().await;
    }
    seen
}

fn lines_ending_with(lines: &[String], suffix: &str) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.ends_with(suffix))
        .cloned()
        .collect()
}

#[tokio::test]
async fn joined_units_count_independently() {
    let logger = install("MAIN");
    nestlog::log("gather:").unwrap();

    let (a, b) = tokio::join!(Isolated::new(unit("a")), Isolated::new(unit("b")));
    assert_eq!(a, vec![1, 2, 3]);
    assert_eq!(b, vec![1, 2, 3]);
    assert_eq!(LogContext::current_path().counters(), &[1, 0]);

    let lines = logger.drain_lines();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "[MAIN        ] 1. gather");
    for name in ["a", "b"] {
        assert_eq!(
            lines_ending_with(&lines, &format!(" {name}")),
            vec![
                format!("[MAIN        ] 1. 1. {name}"),
                format!("[MAIN        ] 1. 2. {name}"),
                format!("[MAIN        ] 1. 3. {name}"),
            ]
        );
    }
}

#[tokio::test]
async fn spawned_units_finish_in_any_order() {
    let logger = install("SPAWN");
    nestlog::log("workers:").unwrap();

    let mut handles = Vec::new();
    for (name, delay) in [("slow", 30), ("fast", 1)] {
        handles.push(tokio::spawn(Isolated::new(async move {
            nestlog::log(format!("{name}:")).unwrap();
            tokio::time::sleep(Duration::from_millis(delay)).await;
            nestlog::log("done").unwrap();
            LogContext::current_path()
        })));
    }
    for handle in handles {
        let path = handle.await.unwrap();
        assert_eq!(path.counters(), &[1, 1, 1]);
    }

    assert_eq!(LogContext::current_path().counters(), &[1, 0]);
    let lines = logger.drain_lines();
    assert_eq!(lines_ending_with(&lines, "done").len(), 2);
    assert!(lines.iter().all(|line| !line.contains(" 2. ")));
}

#[tokio::test]
async fn cancelled_unit_leaves_caller_untouched() {
    let logger = install("CANCEL");
    nestlog::log("before").unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_millis(5),
        Isolated::new(async {
            nestlog::log("deep:").unwrap();
            nestlog::log("deeper:").unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        }),
    )
    .await;
    assert!(outcome.is_err());

    nestlog::log("after").unwrap();
    assert_eq!(
        logger.drain_lines(),
        vec![
            "[CANCEL      ] 1. before",
            "[CANCEL      ] 2. deep",
            "[CANCEL      ] 2. 1. deeper",
            "[CANCEL      ] 2. after",
        ]
    );
}

#[tokio::test]
async fn isolated_unit_keeps_active_scope() {
    let logger = install("OUTER");
    let inner_logger = Arc::new(InMemoryLogger::new());
    let inner = Scope::builder("INNER")
        .indent(NumberedIndent)
        .logger(inner_logger.clone())
        .build();

    let unit = {
        let _guard = inner.enter();
        Isolated::new(async {
            nestlog::log("from the unit").unwrap();
            LogContext::current().stack_depth()
        })
    };
    //the guard is gone, the unit still logs through INNER
    assert_eq!(unit.await, 1);
    assert!(logger.drain_lines().is_empty());
    assert_eq!(inner_logger.drain_logs(), "[INNER       ] 0. 1. from the unit");
}

#[tokio::test]
async fn cancelled_unit_holding_a_scope_guard() {
    let logger = install("ROOT");
    let mid_logger = Arc::new(InMemoryLogger::new());
    let mid = Scope::builder("MID")
        .indent(NumberedIndent)
        .logger(mid_logger.clone())
        .build();
    let unit_logger = Arc::new(InMemoryLogger::new());
    let unit_scope = Scope::builder("UNIT")
        .indent(NumberedIndent)
        .logger(unit_logger.clone())
        .build();

    let _mid = mid.enter();
    nestlog::log("waiting:").unwrap();
    let path = LogContext::current_path();

    let outcome = tokio::time::timeout(
        Duration::from_millis(5),
        Isolated::new(async move {
            let _guard = unit_scope.enter();
            nestlog::log("inside").unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        }),
    )
    .await;
    assert!(outcome.is_err());

    assert_eq!(LogContext::current_scope(), mid);
    assert_eq!(LogContext::current().stack_depth(), 2);
    assert_eq!(LogContext::current_path(), path);
    assert!(logger.drain_warnings().is_empty());
    assert!(mid_logger.drain_warnings().is_empty());
    assert!(unit_logger.drain_warnings().is_empty());
}

#[tokio::test]
async fn cancelled_unit_holding_a_nest_guard() {
    let logger = install("OUTER");
    nestlog::log("outer:").unwrap();
    assert_eq!(LogContext::current_path().counters(), &[1, 0]);

    let outcome = tokio::time::timeout(
        Duration::from_millis(5),
        Isolated::new(async {
            let _nested = nestlog::log("unit").unwrap().enter();
            tokio::time::sleep(Duration::from_secs(5)).await;
        }),
    )
    .await;
    assert!(outcome.is_err());

    assert_eq!(LogContext::current().stack_depth(), 1);
    assert_eq!(LogContext::current_path().counters(), &[1, 0]);
    assert!(logger.drain_warnings().is_empty());
    nestlog::log("after").unwrap();
    assert_eq!(
        logger.drain_lines(),
        vec![
            "[OUTER       ] 1. outer",
            "[OUTER       ] 1. 1. unit",
            "[OUTER       ] 1. 1. after",
        ]
    );
}
