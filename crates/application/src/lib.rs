//! Application services and ports.

#![forbid(unsafe_code)]

mod access_check_service;
mod access_index_ports;

pub use access_check_service::AccessCheckService;
pub use access_index_ports::{
    AccessIndex, AccessIndexStats, AccessIndexStrategy, GrantEventSource,
};
