//! Embeddable-capacity planning per codec.

use crate::error::{Error, Result};
use crate::stego::component::Geometry;
use crate::stego::lsbi;
use crate::stego::StegoMethod;

/// Maximum number of payload bytes the carrier can hold with `method`.
///
/// LSB1 stores 1 bit per component, LSB4 stores 4. LSBI stores 1 bit per
/// green/blue component and reserves four of them for the pattern map.
pub fn max_payload_bytes(method: StegoMethod, geo: &Geometry) -> usize {
    match method {
        StegoMethod::Lsb1 => geo.total_components() / 8,
        StegoMethod::Lsb4 => geo.total_components() / 2,
        StegoMethod::Lsbi => {
            geo.eligible_components()
                .saturating_sub(lsbi::PATTERN_MAP_BITS)
                / 8
        }
    }
}

/// Validate that a payload of `payload_len` bytes fits before embedding.
pub fn ensure_fits(method: StegoMethod, geo: &Geometry, payload_len: usize) -> Result<()> {
    let available = max_payload_bytes(method, geo);
    if payload_len > available {
        return Err(Error::InsufficientCapacity {
            needed: payload_len,
            available,
        });
    }
    Ok(())
}
