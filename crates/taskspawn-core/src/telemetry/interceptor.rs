//! Call/success/exception wrapping for facade operations

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;

use super::sink::{AnalyticsSink, EventAttrs};
use crate::error::Result;

/// Summaries of the named arguments of one instrumented call.
///
/// For each argument this records `arg:{name}:type`, plus `arg:{name}:length`
/// for strings, arrays and maps, and `arg:{name}:value` for booleans and
/// numbers. Summarization never fails: an argument whose `Serialize` impl
/// errors is dropped from the event and the call proceeds.
#[derive(Debug, Default, Clone)]
pub struct CallArgs {
    attrs: EventAttrs,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one named serializable argument.
    pub fn arg<T: Serialize>(mut self, name: &str, value: &T) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.summarize(name, &value);
        }
        self
    }

    /// Record only a type label for an argument that carries no serializable
    /// payload (callbacks, handles).
    pub fn tag(mut self, name: &str, label: &str) -> Self {
        self.attrs
            .insert(format!("arg:{name}:type"), Value::from(label));
        self
    }

    fn summarize(&mut self, name: &str, value: &Value) {
        let type_tag = match value {
            Value::Null => "none",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Object(_) => "map",
        };
        self.attrs
            .insert(format!("arg:{name}:type"), Value::from(type_tag));

        match value {
            Value::String(s) => {
                self.attrs
                    .insert(format!("arg:{name}:length"), Value::from(s.chars().count()));
            }
            Value::Array(items) => {
                self.attrs
                    .insert(format!("arg:{name}:length"), Value::from(items.len()));
            }
            Value::Object(map) => {
                self.attrs
                    .insert(format!("arg:{name}:length"), Value::from(map.len()));
            }
            Value::Bool(_) | Value::Number(_) => {
                self.attrs
                    .insert(format!("arg:{name}:value"), value.clone());
            }
            Value::Null => {}
        }
    }

    fn into_attrs(self) -> EventAttrs {
        self.attrs
    }
}

/// Wraps facade operations with analytics events.
///
/// Emission is synchronous at operation entry and exit, so nested
/// instrumented calls produce correctly ordered event streams.
#[derive(Clone)]
pub struct Interceptor {
    sink: Arc<dyn AnalyticsSink>,
}

impl Interceptor {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Wrap an infallible operation (projections, worker control).
    pub fn read<T>(&self, op: &str, args: CallArgs, f: impl FnOnce() -> T) -> T {
        self.emit(op, "call", args.into_attrs());
        let started = Instant::now();
        let value = f();
        self.emit(op, "success", duration_attrs(started));
        value
    }

    /// Wrap a fallible operation. The error value is returned unchanged; the
    /// interceptor only decides which terminal event to emit.
    pub fn call<T>(&self, op: &str, args: CallArgs, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.emit(op, "call", args.into_attrs());
        let started = Instant::now();
        let result = f();
        match &result {
            Ok(_) => self.emit(op, "success", duration_attrs(started)),
            Err(_) => self.emit(op, "exception", duration_attrs(started)),
        }
        result
    }

    /// Wrap an awaitable operation, measuring through completion.
    pub async fn call_async<T, F>(&self, op: &str, args: CallArgs, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.emit(op, "call", args.into_attrs());
        let started = Instant::now();
        let result = fut.await;
        match &result {
            Ok(_) => self.emit(op, "success", duration_attrs(started)),
            Err(_) => self.emit(op, "exception", duration_attrs(started)),
        }
        result
    }

    fn emit(&self, op: &str, phase: &str, attrs: EventAttrs) {
        self.sink.emit(&format!("api:{op}:{phase}"), attrs);
    }
}

fn duration_attrs(started: Instant) -> EventAttrs {
    let mut attrs = EventAttrs::new();
    attrs.insert(
        "duration".to_string(),
        Value::from(started.elapsed().as_millis() as u64),
    );
    attrs
}
