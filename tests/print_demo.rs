// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints a realistic session to stdout. Run with `--nocapture` to look at it.

#![cfg(not(target_arch = "wasm32"))]

use nestlog::decorate::CallArgs;
use nestlog::{Isolated, LogContext, NumberedIndent, Scope, SpaceIndent, logged};
use std::time::Duration;

#[logged("x = {x}")]
fn prints_args_in_log(x: i32) {
    nestlog::log(format!("should have printed x={x}")).unwrap();
}

#[logged("some other function")]
fn some_other_function() {
    nestlog::log("probably important").unwrap();
    {
        let _nested = nestlog::log("very important").unwrap().enter();
        nestlog::log("a detail").unwrap();
        nestlog::log("another detail").unwrap();
        prints_args_in_log(11);
    }
    nestlog::log("finished now").unwrap();
}

#[test]
fn sync_session() {
    nestlog::log("this line goes to the root scope").unwrap();

    let scope = Scope::new("NOT GLOBAL");
    scope.scoped(|| {
        nestlog::log("something").unwrap();
        nestlog::log("another thing").unwrap();
        {
            let _nested = nestlog::log("something else").unwrap().enter();
            some_other_function();
            nestlog::log("still something else").unwrap();
        }
        nestlog::log("ok, finished").unwrap();
    });
    assert_eq!(LogContext::current_path().depth(), 1);
}

fn running(args: &CallArgs) -> String {
    format!("running test {}", args.get("j").unwrap_or("?"))
}

#[logged(from_args = running)]
async fn worker(j: u32) {
    let scope = Scope::builder(format!("LOGGER{j}"))
        .indent(SpaceIndent::default())
        .build();
    let _guard = scope.enter();
    nestlog::log("test").unwrap();
    for i in 0..3 {
        {
            let _nested = nestlog::log("wait").unwrap().enter();
            nestlog::log("start waiting").unwrap();
            tokio::time::sleep(Duration::from_millis(u64::from(5 * (3 - j)))).await;
        }
        nestlog::log(format!("log{i}")).unwrap();
    }
}

#[tokio::test]
async fn async_session() {
    let main = Scope::builder("MAIN").indent(NumberedIndent).build();
    let _guard = main.enter();
    tokio::join!(
        Isolated::new(worker(0)),
        Isolated::new(worker(1)),
        Isolated::new(worker(2)),
    );
    assert_eq!(LogContext::current_scope(), main);
}
