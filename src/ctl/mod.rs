//! Controller-facing glue.
//!
//! The OpenFlow handling itself lives outside this crate; what arrives
//! here is its distilled output: link-discovery records and switch
//! enter/leave notifications. This module turns those into routing-table
//! resyncs, packet-in port answers and a loop-free flood domain.

mod flood;
mod plane;

use serde::{Deserialize, Serialize};

pub use flood::flood_domain;
pub use plane::ControlPlane;

/// One discovered unidirectional link: `src` reaches `dst` through
/// `src`'s port `port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEvent {
    pub src: String,
    pub dst: String,
    pub port: u16,
}

impl LinkEvent {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, port: u16) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            port,
        }
    }
}
