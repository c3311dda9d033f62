#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod stubs;

pub(crate) use http::assert_error_response;
pub(crate) use stubs::{StubLedger, StubRateProvider, fixed_id};
