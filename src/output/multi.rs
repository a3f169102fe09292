//! Fan-out sink
//!
//! Delivers every page to each configured sink. One sink failing does not
//! starve the others; the first error is reported after all deliveries.

use crate::output::traits::{PageResult, Sink, SinkResult};

/// Sink that forwards each page to every inner sink.
pub struct MultiSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }
}

impl Sink for MultiSink {
    fn accept(&mut self, result: PageResult) -> SinkResult<()> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(error) = sink.accept(result.clone()) {
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
