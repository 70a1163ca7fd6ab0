//! Core request types.

mod request;

pub use request::RestRequest;
