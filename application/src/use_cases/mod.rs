//! Use cases for the council

pub mod dispatch_consensus;
pub mod report_status;
