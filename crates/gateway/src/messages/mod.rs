//! Result envelopes and continuation shapes

mod continuation;
mod envelope;

pub use continuation::{Completion, Continuation};
pub use envelope::{
    DataResult, ERROR_PAYLOAD_MISMATCH, ListResult, ResultEnvelope, RspError, UnitResult,
};
