//! Canonical owner strings.

use crate::types::Owner;

/// Maps an ownership descriptor to its canonical display string.
///
/// Returns `None` for a missing owner and for shapes that are not recognized, so callers
/// can tell "unknown" apart from a real owner.
pub fn actual_owner(owner: Option<&Owner>) -> Option<String> {
    match owner? {
        Owner::Immutable => Some("Immutable".to_string()),
        Owner::AddressOwner(address) => Some(address.clone()),
        Owner::ObjectOwner(id) => Some(id.clone()),
        Owner::Shared {
            initial_shared_version,
        } => Some(format!("Shared-{initial_shared_version}")),
        Owner::ConsensusV2 { start_version } => Some(format!("ConsensusV2-{start_version}")),
        Owner::Unknown(_) => None,
    }
}
