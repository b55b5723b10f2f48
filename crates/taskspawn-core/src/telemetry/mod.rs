//! Instrumentation around the public control surface
//!
//! Every public operation of the facade is wrapped with three kinds of
//! analytics events:
//! - `api:{op}:call` - when the operation is entered, with argument summaries
//! - `api:{op}:success` - on normal return, with elapsed duration
//! - `api:{op}:exception` - on error return, with elapsed duration
//!
//! The sink receiving these events is a collaborator; this module only
//! guarantees the per-invocation ordering (call, then exactly one of
//! success/exception) and that summarizing arguments can never fail an
//! operation.

mod interceptor;
mod sink;

pub use interceptor::{CallArgs, Interceptor};
pub use sink::{AnalyticsSink, EventAttrs, NullSink};
