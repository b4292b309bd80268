//! Observer for background compression.

use crate::result::CompressResult;

/// Receives the lifecycle of one background compression.
///
/// All three methods run on the task that awaited the compression, never on
/// the worker thread, so an implementation may own caller-side state without
/// synchronisation.
pub trait CompressCallback {
    /// Called once before any work starts.
    fn on_start(&mut self) {}

    /// Called with the outcome when it reports success.
    fn on_success(&mut self, result: CompressResult);

    /// Called with a message when the outcome reports failure or the worker died.
    fn on_error(&mut self, message: String);
}

/// Event log for tests; records every callback in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingCallback {
    pub events: Vec<CallbackEvent>,
    pub threads: Vec<std::thread::ThreadId>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CallbackEvent {
    Start,
    Success(CompressResult),
    Error(String),
}

#[cfg(test)]
impl CompressCallback for RecordingCallback {
    fn on_start(&mut self) {
        self.threads.push(std::thread::current().id());
        self.events.push(CallbackEvent::Start);
    }

    fn on_success(&mut self, result: CompressResult) {
        self.threads.push(std::thread::current().id());
        self.events.push(CallbackEvent::Success(result));
    }

    fn on_error(&mut self, message: String) {
        self.threads.push(std::thread::current().id());
        self.events.push(CallbackEvent::Error(message));
    }
}
