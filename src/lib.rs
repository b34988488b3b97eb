//! gradebook - examination results, letter grades and GPA over HTTP
//!
//! - [`grading`]: marks to grades, grade points and GPA
//! - [`store`]: in-memory result repository
//! - [`http_server`]: axum JSON API
//! - [`cli`]: command line entry

pub mod cli;
pub mod grading;
pub mod http_server;
pub mod store;
