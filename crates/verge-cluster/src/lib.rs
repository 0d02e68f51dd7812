//! # verge-cluster
//!
//! Logical compute device discovery and scoped multi-device execution for
//! Verge's one-process-per-GPU (OPG) style batch computations.
//!
//! Devices here are logical workers: one worker thread per provisioned
//! device. Visibility comes from the `VERGE_VISIBLE_DEVICES` environment
//! variable when set, otherwise from the number of available CPU cores.
//! An [`OpgContext`] provisions an exact device count for a scope and
//! releases it on every exit path, panics included.

pub mod context;
pub mod devices;

pub use context::OpgContext;
pub use devices::{get_visible_devices, Device, VISIBLE_DEVICES_ENV};
