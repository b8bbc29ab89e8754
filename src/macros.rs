// SPDX-License-Identifier: MIT OR Apache-2.0

/**
Formats a message and logs it with the active scope.

Takes the same arguments as [format!] and returns what [log](crate::log()) returns.

```
nestlog::log!("loading {} files:", 3).unwrap();
let name = "config.toml";
nestlog::log!("{name}").unwrap();
nestlog::log!(":loaded").unwrap();
```
*/
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log(::std::format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use crate::context::LogContext;
    use crate::indent::SpaceIndent;
    use crate::inmemory_logger::InMemoryLogger;
    use crate::scope::Scope;
    use std::sync::Arc;

    #[test]
    fn formats_then_logs() {
        let logger = Arc::new(InMemoryLogger::new());
        LogContext::reset(
            Scope::builder("M")
                .no_prefix()
                .indent(SpaceIndent::new('-'))
                .logger(logger.clone())
                .build(),
        );
        let count = 2;
        crate::log!("copying {count} files:").unwrap();
        crate::log!("file {}", 1).unwrap();
        crate::log!("file {}", 2).unwrap();
        crate::log!(":copied").unwrap();
        assert_eq!(
            logger.drain_lines(),
            vec!["copying 2 files", "-file 1", "-file 2", "copied"]
        );
    }
}
