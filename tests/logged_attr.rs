// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `#[logged]` attribute on sync and async functions.

#![cfg(not(target_arch = "wasm32"))]

use nestlog::decorate::CallArgs;
use nestlog::{InMemoryLogger, Isolated, LogContext, NumberedIndent, Scope, logged};
use std::sync::Arc;

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

#[logged("some other function")]
fn some_other_function() {
    nestlog::log("probably important").unwrap();
    prints_args_in_log(11);
}

#[logged("x = {x}")]
fn prints_args_in_log(x: i32) {
    nestlog::log(format!("should have printed x={x}")).unwrap();
}

fn describe_copy(args: &CallArgs) -> String {
    format!(
        "copy {} -> {}",
        args.get("from").unwrap_or("?"),
        args.get("to").unwrap_or("?")
    )
}

#[logged(from_args = describe_copy, prefix = "FS")]
fn copy(from: &str, to: &str, _force: bool) -> usize {
    nestlog::log("copying").unwrap();
    from.len() + to.len()
}

#[logged("early return")]
fn early_return(stop: bool) -> Result<u32, String> {
    if stop {
        return Err("stopped".to_string());
    }
    nestlog::log("kept going").unwrap();
    Ok(1)
}

#[logged("quiet", dont_advance)]
fn quiet() {}

#[logged(":too far")]
fn closes_at_root() {}

struct Counter {
    total: u32,
}

impl Counter {
    #[logged("add {n}")]
    fn add(&mut self, n: u32) -> u32 {
        self.total += n;
        self.total
    }
}

#[logged("fetch {id}")]
async fn fetch(id: u32) -> u32 {
    nestlog::log("waiting").unwrap();
    tokio::task::yield_now().await;
    id * 2
}

#[test]
fn sync_body_is_nested() {
    let logger = install("MAIN");
    some_other_function();
    nestlog::log("finished").unwrap();
    assert_eq!(
        logger.drain_lines(),
        vec![
            "[MAIN        ] 1. some other function",
            "[MAIN        ] 1. 1. probably important",
            "[MAIN        ] 1. 2. x = 11",
            "[MAIN        ] 1. 2. 1. should have printed x=11",
            "[MAIN        ] 2. finished",
        ]
    );
}

#[test]
fn message_from_arguments() {
    let logger = install("MAIN");
    assert_eq!(copy("a", "bc", true), 3);
    assert_eq!(
        logger.drain_lines(),
        vec![
            "[FS          ] 1. copy \"a\" -> \"bc\"",
            "[MAIN        ] 1. 1. copying",
        ]
    );
}

#[test]
fn early_return_closes_level() {
    let logger = install("MAIN");
    assert!(early_return(true).is_err());
    assert_eq!(early_return(false), Ok(1));
    assert_eq!(LogContext::current_path().counters(), &[2]);
    assert_eq!(
        logger.drain_lines(),
        vec![
            "[MAIN        ] 1. early return",
            "[MAIN        ] 2. early return",
            "[MAIN        ] 2. 1. kept going",
        ]
    );
}

#[test]
fn options_and_methods() {
    let logger = install("MAIN");
    quiet();
    let mut counter = Counter { total: 1 };
    assert_eq!(counter.add(2), 3);
    assert_eq!(
        logger.drain_lines(),
        vec!["[MAIN        ] 0. quiet", "[MAIN        ] 1. add 2"]
    );
}

#[test]
#[should_panic(expected = "can't deindent below the root level")]
fn protocol_violation_panics() {
    let _logger = install("MAIN");
    closes_at_root();
}

#[tokio::test]
async fn async_functions_log_without_nesting() {
    let logger = install("MAIN");
    assert_eq!(fetch(4).await, 8);
    assert_eq!(
        logger.drain_lines(),
        vec!["[MAIN        ] 1. fetch 4", "[MAIN        ] 2. waiting"]
    );
}

#[tokio::test]
async fn async_functions_under_isolation() {
    let logger = install("MAIN");
    nestlog::log("fetching:").unwrap();
    let (a, b) = tokio::join!(Isolated::new(fetch(1)), Isolated::new(fetch(2)));
    assert_eq!(a + b, 6);

    let mut lines = logger.drain_lines();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "[MAIN        ] 1. 1. fetch 1",
            "[MAIN        ] 1. 1. fetch 2",
            "[MAIN        ] 1. 2. waiting",
            "[MAIN        ] 1. 2. waiting",
            "[MAIN        ] 1. fetching",
        ]
    );
}
