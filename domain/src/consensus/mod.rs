//! Consensus domain
//!
//! A council request is answered by every enabled provider. The successful
//! answers are folded into a [`ConsensusResult`]:
//!
//! ```text
//! responses ──► best      (max confidence, ties → enumeration order)
//!           ──► mean      (arithmetic mean of successes only)
//!           ──► agreement (mean > high → High, > medium → Medium, else Low)
//! ```

pub mod agreement;
pub mod response;
pub mod result;

pub use agreement::{Agreement, AgreementThresholds};
pub use response::{ProviderFailure, ProviderResponse, validate_confidence};
pub use result::{ConsensusResult, ConsensusSummary};
