//! Global edits: one value applied to a field on every variable.

mod proposal;
mod reconcile;
mod report;
mod state;

pub use proposal::{GlobalProposals, Proposal};
pub use reconcile::{reconcile, reset};
pub use report::generate_report;
pub use state::{GlobalFieldEntry, GlobalFieldState};
