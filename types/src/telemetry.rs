//! Process-wide allocation telemetry (spec.md §5, §9).
//!
//! Strictly observational: nothing in this workspace calls into an actual
//! global allocator hook (that instrumentation is out of scope, per
//! spec.md §1). This module exists so a caller can wire one in without the
//! rest of the core knowing or caring.

use std::sync::Mutex;

pub trait AllocationSink: Send {
    fn record_allocation(&mut self, bytes: usize);
    fn record_deallocation(&mut self, bytes: usize);
}

#[derive(Debug, Default)]
struct NoopSink;

impl AllocationSink for NoopSink {
    fn record_allocation(&mut self, _bytes: usize) {}
    fn record_deallocation(&mut self, _bytes: usize) {}
}

static TELEMETRY_SINK: Mutex<Option<Box<dyn AllocationSink>>> = Mutex::new(None);

/// Installs a custom sink. Pass `None` to restore the default no-op sink.
pub fn set_sink(sink: Option<Box<dyn AllocationSink>>) {
    let mut guard = TELEMETRY_SINK.lock().expect("telemetry mutex poisoned");
    *guard = sink;
}

pub fn record_allocation(bytes: usize) {
    let mut guard = TELEMETRY_SINK.lock().expect("telemetry mutex poisoned");
    match guard.as_mut() {
        Some(sink) => sink.record_allocation(bytes),
        None => {}
    }
}

pub fn record_deallocation(bytes: usize) {
    let mut guard = TELEMETRY_SINK.lock().expect("telemetry mutex poisoned");
    match guard.as_mut() {
        Some(sink) => sink.record_deallocation(bytes),
        None => {}
    }
}
