// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::ScopeWarning;
use crate::log_record::LogRecord;
use crate::logger::Logger;
use std::sync::Arc;

/**
Forwards every record and warning to each of its loggers, in order.

```
use nestlog::{FanoutLogger, InMemoryLogger, Logger, StdOutLogger};
use std::sync::Arc;

let memory = Arc::new(InMemoryLogger::new());
let loggers: Vec<Arc<dyn Logger>> = vec![Arc::new(StdOutLogger::new()), memory.clone()];
let both = FanoutLogger::new(loggers);
assert_eq!(both.loggers().len(), 2);
```
*/
#[derive(Debug, Clone, Default)]
pub struct FanoutLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl FanoutLogger {
    pub fn new(loggers: Vec<Arc<dyn Logger>>) -> Self {
        Self { loggers }
    }

    pub fn push(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn loggers(&self) -> &[Arc<dyn Logger>] {
        &self.loggers
    }
}

impl Logger for FanoutLogger {
    fn finish_log_record(&self, record: &LogRecord<'_>) {
        for logger in &self.loggers {
            logger.finish_log_record(record);
        }
    }

    fn warn(&self, warning: &ScopeWarning) {
        for logger in &self.loggers {
            logger.warn(warning);
        }
    }

    fn prepare_to_die(&self) {
        for logger in &self.loggers {
            logger.prepare_to_die();
        }
    }
}
