//! TSI wire formats: request signing, response decoding and the mapping of
//! partner codes onto payment outcomes.

pub mod error_codes;
pub mod mac;
pub mod mapper;
pub mod request;
pub mod response;
