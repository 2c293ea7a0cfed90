//! LSBI codec: LSB embedding with adaptive inversion.
//!
//! Only green and blue components carry data; red components are skipped
//! everywhere and never counted toward capacity. The first four eligible
//! components are reserved for a 4-bit pattern map. Embedding runs in two
//! passes: pass A overwrites LSBs while tallying, per 2-bit pattern class,
//! how many carrier bits the overwrite flipped; classes where flipping was
//! the majority are flagged in the map, and pass B inverts the stored bit
//! of every flagged component. Flagged classes therefore store the
//! complement of the message bit, which restores the original LSB of the
//! majority of their components; extraction undoes the inversion using the
//! recovered map.
//!
//! The map nibble is written MSB-first: the first reserved component
//! carries the flag of pattern class 3. The same convention is applied on
//! extraction.

use crate::error::{Error, Result};
use crate::stego::component::{Channel, Geometry};

/// Number of leading eligible components reserved for the pattern map.
pub const PATTERN_MAP_BITS: usize = 4;

/// Pattern class of a component: bits 1-2 of the byte.
fn pattern_of(byte: u8) -> usize {
    ((byte >> 1) & 0x03) as usize
}

/// Eligible (green/blue) components with index below `offset`.
fn eligible_before(offset: usize) -> usize {
    offset - offset / 3
}

/// Majority-vote decision table: flag a pattern class for inversion when
/// overwriting flipped more of its carrier LSBs than it preserved.
pub fn stats_to_mask(changed: &[usize; 4], unchanged: &[usize; 4]) -> u8 {
    let mut mask = 0u8;
    for p in 0..4 {
        if changed[p] > unchanged[p] {
            mask |= 1 << p;
        }
    }
    mask
}

/// Advance `cursor` past `count` eligible components.
fn skip_eligible(geo: &Geometry, offset: usize, count: usize) -> Option<usize> {
    let mut cursor = offset;
    let mut seen = 0;
    while seen < count {
        let component = geo.locate(cursor)?;
        cursor += 1;
        if component.channel != Channel::Red {
            seen += 1;
        }
    }
    Some(cursor)
}

/// Write the map nibble, MSB-first, into the LSBs of the first
/// `PATTERN_MAP_BITS` eligible components at `offset`.
fn write_pattern_map(pixels: &mut [u8], geo: &Geometry, offset: usize, mask: u8) -> Result<usize> {
    let mut cursor = offset;
    let mut written = 0;
    while written < PATTERN_MAP_BITS {
        let component = geo.locate(cursor).ok_or(Error::InsufficientCapacity {
            needed: 1,
            available: 0,
        })?;
        cursor += 1;
        if component.channel == Channel::Red {
            continue;
        }
        let bit = (mask >> (PATTERN_MAP_BITS - 1 - written)) & 1;
        pixels[component.offset] = (pixels[component.offset] & 0xFE) | bit;
        written += 1;
    }
    Ok(cursor)
}

/// Read the map nibble back; returns the mask and the cursor after the
/// reserved components.
fn read_pattern_map(pixels: &[u8], geo: &Geometry, offset: usize) -> Result<(u8, usize)> {
    let mut cursor = offset;
    let mut read = 0;
    let mut mask = 0u8;
    while read < PATTERN_MAP_BITS {
        let component = geo.locate(cursor).ok_or(Error::InsufficientCapacity {
            needed: 1,
            available: 0,
        })?;
        cursor += 1;
        if component.channel == Channel::Red {
            continue;
        }
        mask |= (pixels[component.offset] & 1) << (PATTERN_MAP_BITS - 1 - read);
        read += 1;
    }
    Ok((mask, cursor))
}

/// Embed `num_bits` of `data` (MSB-first) into the eligible components
/// starting at `offset`, pattern map included.
///
/// Returns the component cursor after the last data component.
pub fn embed(
    pixels: &mut [u8],
    geo: &Geometry,
    data: &[u8],
    num_bits: usize,
    offset: usize,
) -> Result<usize> {
    if num_bits > data.len() * 8 {
        return Err(Error::InvalidArgument(format!(
            "bit count {num_bits} exceeds data length {} bytes",
            data.len()
        )));
    }

    let needed = (num_bits + 7) / 8;
    let eligible_remaining = geo
        .eligible_components()
        .saturating_sub(eligible_before(offset));
    let available = eligible_remaining.saturating_sub(PATTERN_MAP_BITS) / 8;
    if num_bits + PATTERN_MAP_BITS > eligible_remaining {
        return Err(Error::InsufficientCapacity { needed, available });
    }

    let data_start = skip_eligible(geo, offset, PATTERN_MAP_BITS)
        .ok_or(Error::InsufficientCapacity { needed, available })?;

    // Pass A: overwrite LSBs, tallying per pattern class whether the
    // write flipped the carrier bit.
    let mut changed = [0usize; 4];
    let mut unchanged = [0usize; 4];
    let mut cursor = data_start;
    let mut bit_index = 0;
    while bit_index < num_bits {
        let component = geo
            .locate(cursor)
            .ok_or(Error::InsufficientCapacity { needed, available })?;
        cursor += 1;
        if component.channel == Channel::Red {
            continue;
        }
        let original = pixels[component.offset];
        let bit = (data[bit_index / 8] >> (7 - (bit_index % 8))) & 1;
        pixels[component.offset] = (original & 0xFE) | bit;
        if pixels[component.offset] == original {
            unchanged[pattern_of(original)] += 1;
        } else {
            changed[pattern_of(original)] += 1;
        }
        bit_index += 1;
    }

    let mask = stats_to_mask(&changed, &unchanged);
    write_pattern_map(pixels, geo, offset, mask)?;

    // Pass B: invert the stored bit of every flagged component. The
    // pattern is recomputed from the current byte; pass A only toggles
    // bit 0, so the classification matches what extraction will see.
    let mut cursor = data_start;
    let mut bit_index = 0;
    while bit_index < num_bits {
        let component = geo
            .locate(cursor)
            .ok_or(Error::InsufficientCapacity { needed, available })?;
        cursor += 1;
        if component.channel == Channel::Red {
            continue;
        }
        if mask & (1 << pattern_of(pixels[component.offset])) != 0 {
            pixels[component.offset] ^= 1;
        }
        bit_index += 1;
    }

    Ok(cursor)
}

/// Stateful LSBI extractor: the pattern map is read once, then payload
/// bits are decoded across successive calls that thread the cursor.
#[derive(Debug)]
pub struct LsbiDecoder {
    mask: u8,
    cursor: usize,
}

impl LsbiDecoder {
    /// Read the pattern map from the reserved components; payload decoding
    /// starts immediately after.
    pub fn begin(pixels: &[u8], geo: &Geometry) -> Result<Self> {
        let (mask, cursor) = read_pattern_map(pixels, geo, 0)?;
        Ok(Self { mask, cursor })
    }

    /// The pattern map recovered from the carrier.
    pub fn pattern_map(&self) -> u8 {
        self.mask
    }

    /// Decode `num_bits` payload bits, undoing the inversion of flagged
    /// pattern classes.
    pub fn read_bits(&mut self, pixels: &[u8], geo: &Geometry, num_bits: usize) -> Result<Vec<u8>> {
        let needed = (num_bits + 7) / 8;
        let mut out = vec![0u8; needed];
        let mut bit_index = 0;
        while bit_index < num_bits {
            let component = geo
                .locate(self.cursor)
                .ok_or(Error::InsufficientCapacity {
                    needed,
                    available: bit_index / 8,
                })?;
            self.cursor += 1;
            if component.channel == Channel::Red {
                continue;
            }
            let byte = pixels[component.offset];
            let mut bit = byte & 1;
            if self.mask & (1 << pattern_of(byte)) != 0 {
                bit ^= 1;
            }
            out[bit_index / 8] |= bit << (7 - (bit_index % 8));
            bit_index += 1;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned_carrier(geo: &Geometry) -> Vec<u8> {
        (0..geo.row_stride() * geo.height())
            .map(|i| (i * 37 + 11) as u8)
            .collect()
    }

    /// Mask that pass A statistics would produce for `data` embedded into
    /// the untouched `pixels`, computed without mutating anything.
    fn expected_mask(pixels: &[u8], geo: &Geometry, data: &[u8], num_bits: usize) -> u8 {
        let mut changed = [0usize; 4];
        let mut unchanged = [0usize; 4];
        let mut cursor = skip_eligible(geo, 0, PATTERN_MAP_BITS).unwrap();
        let mut bit_index = 0;
        while bit_index < num_bits {
            let component = geo.locate(cursor).unwrap();
            cursor += 1;
            if component.channel == Channel::Red {
                continue;
            }
            let original = pixels[component.offset];
            let bit = (data[bit_index / 8] >> (7 - (bit_index % 8))) & 1;
            if original & 1 == bit {
                unchanged[pattern_of(original)] += 1;
            } else {
                changed[pattern_of(original)] += 1;
            }
            bit_index += 1;
        }
        stats_to_mask(&changed, &unchanged)
    }

    #[test]
    fn test_stats_to_mask_majority_vote() {
        assert_eq!(stats_to_mask(&[0, 0, 0, 0], &[0, 0, 0, 0]), 0);
        assert_eq!(stats_to_mask(&[5, 0, 0, 0], &[4, 9, 9, 9]), 0b0001);
        assert_eq!(stats_to_mask(&[1, 2, 3, 4], &[1, 1, 9, 3]), 0b1010);
        // Ties never flag.
        assert_eq!(stats_to_mask(&[7, 7, 7, 7], &[7, 7, 7, 7]), 0);
    }

    #[test]
    fn test_roundtrip_with_chained_reads() {
        let geo = Geometry::new(16, 8);
        let mut pixels = patterned_carrier(&geo);

        let payload = [0x00, 0x00, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF];
        embed(&mut pixels, &geo, &payload, payload.len() * 8, 0).unwrap();

        let mut decoder = LsbiDecoder::begin(&pixels, &geo).unwrap();
        let header = decoder.read_bits(&pixels, &geo, 32).unwrap();
        assert_eq!(header, payload[..4]);
        let body = decoder.read_bits(&pixels, &geo, 32).unwrap();
        assert_eq!(body, payload[4..]);
    }

    #[test]
    fn test_pattern_map_self_consistency() {
        let geo = Geometry::new(12, 6);
        let original = patterned_carrier(&geo);
        let mut pixels = original.clone();

        let payload = [0xA5, 0x3C, 0x71, 0xFF, 0x00];
        let mask = expected_mask(&original, &geo, &payload, payload.len() * 8);

        embed(&mut pixels, &geo, &payload, payload.len() * 8, 0).unwrap();

        let decoder = LsbiDecoder::begin(&pixels, &geo).unwrap();
        assert_eq!(decoder.pattern_map(), mask);
    }

    #[test]
    fn test_red_components_untouched() {
        let geo = Geometry::new(8, 4);
        let original = patterned_carrier(&geo);
        let mut pixels = original.clone();

        let payload = [0xFF; 6];
        embed(&mut pixels, &geo, &payload, payload.len() * 8, 0).unwrap();

        for index in 0..geo.total_components() {
            let component = geo.locate(index).unwrap();
            if component.channel == Channel::Red {
                assert_eq!(pixels[component.offset], original[component.offset]);
            }
        }
    }

    #[test]
    fn test_inversion_restores_majority_class() {
        // All-zero carrier: every eligible component is pattern 0 with
        // LSB 0. Embedding all-ones flips every bit in pass A, so class 0
        // is flagged and pass B restores the original LSBs on disk while
        // extraction still recovers the ones.
        let geo = Geometry::new(8, 2);
        let mut pixels = vec![0u8; geo.row_stride() * geo.height()];

        let payload = [0xFF, 0xFF];
        embed(&mut pixels, &geo, &payload, 16, 0).unwrap();

        let mut decoder = LsbiDecoder::begin(&pixels, &geo).unwrap();
        assert_eq!(decoder.pattern_map(), 0b0001);

        // Data components beyond the map carry their original LSB again.
        let data_start = skip_eligible(&geo, 0, PATTERN_MAP_BITS).unwrap();
        let mut checked = 0;
        let mut cursor = data_start;
        while checked < 16 {
            let component = geo.locate(cursor).unwrap();
            cursor += 1;
            if component.channel == Channel::Red {
                continue;
            }
            assert_eq!(pixels[component.offset] & 1, 0);
            checked += 1;
        }

        assert_eq!(decoder.read_bits(&pixels, &geo, 16).unwrap(), payload);
    }

    #[test]
    fn test_map_nibble_layout_msb_first() {
        // Same all-zero setup as above: mask is 0b0001, so the four
        // reserved eligible components hold LSBs 0,0,0,1.
        let geo = Geometry::new(8, 2);
        let mut pixels = vec![0u8; geo.row_stride() * geo.height()];
        embed(&mut pixels, &geo, &[0xFF], 8, 0).unwrap();

        let mut bits = Vec::new();
        let mut cursor = 0;
        while bits.len() < PATTERN_MAP_BITS {
            let component = geo.locate(cursor).unwrap();
            cursor += 1;
            if component.channel == Channel::Red {
                continue;
            }
            bits.push(pixels[component.offset] & 1);
        }
        assert_eq!(bits, [0, 0, 0, 1]);
    }

    #[test]
    fn test_capacity_boundary_counts_only_eligible() {
        // 2x2 pixels -> 8 eligible components, 4 reserved -> 4 data bits.
        let geo = Geometry::new(2, 2);
        let mut pixels = vec![0u8; geo.row_stride() * geo.height()];

        assert!(embed(&mut pixels, &geo, &[0xF0], 4, 0).is_ok());
        let err = embed(&mut pixels, &geo, &[0xF8], 5, 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientCapacity { .. }));
    }

    #[test]
    fn test_decode_past_end_fails() {
        let geo = Geometry::new(2, 2);
        let pixels = vec![0u8; geo.row_stride() * geo.height()];

        let mut decoder = LsbiDecoder::begin(&pixels, &geo).unwrap();
        assert!(matches!(
            decoder.read_bits(&pixels, &geo, 8),
            Err(Error::InsufficientCapacity { .. })
        ));
    }
}
