//! enquiry-relay — forwards structured enquiry form submissions as email.

pub mod config;
pub mod error;
pub mod routes;
pub mod submission;
pub mod transport;
