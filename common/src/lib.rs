//! Wire model shared by the presenter and the browser front end.
//!
//! Every type here mirrors a JSON payload exchanged with the analysis server:
//! `model` holds the domain snapshots, `requests` the bodies we send, and
//! `responses` the envelopes we receive.

pub mod model;
pub mod requests;
pub mod responses;
