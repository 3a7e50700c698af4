//! Allocation endpoints

pub(crate) mod create;
pub(crate) mod export;
mod request;
