// ABOUTME: Validated domain types for workloads, namespaces, and images.
// ABOUTME: Invalid values are rejected at parse time so later stages can trust them.

mod image_ref;
mod label;
mod namespace;
mod workload_name;

pub use image_ref::{ImageRef, ParseImageRefError};
pub use label::{LabelError, MAX_LABEL_LEN};
pub use namespace::Namespace;
pub use workload_name::WorkloadName;
