//! Plain LSB codec: one payload bit per color component.

use crate::error::{Error, Result};
use crate::stego::component::Geometry;

/// Embed `num_bits` of `data` (MSB-first within each byte) into component
/// LSBs, starting at component `offset`.
///
/// Returns the component cursor after the last written bit so callers can
/// chain fields without recomputing addresses.
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
    let available = geo.total_components().saturating_sub(offset) / 8;
    if num_bits > geo.total_components().saturating_sub(offset) {
        return Err(Error::InsufficientCapacity { needed, available });
    }

    let mut cursor = offset;
    for bit_index in 0..num_bits {
        let component = geo
            .locate(cursor)
            .ok_or(Error::InsufficientCapacity { needed, available })?;
        let bit = (data[bit_index / 8] >> (7 - (bit_index % 8))) & 1;
        pixels[component.offset] = (pixels[component.offset] & 0xFE) | bit;
        cursor += 1;
    }

    Ok(cursor)
}

/// Extract `num_bits` from component LSBs starting at component `offset`.
///
/// Bits are packed MSB-first into a zero-initialized buffer. Returns the
/// recovered bytes and the advanced cursor.
pub fn extract(
    pixels: &[u8],
    geo: &Geometry,
    num_bits: usize,
    offset: usize,
) -> Result<(Vec<u8>, usize)> {
    let needed = (num_bits + 7) / 8;
    let available = geo.total_components().saturating_sub(offset) / 8;
    if num_bits > geo.total_components().saturating_sub(offset) {
        return Err(Error::InsufficientCapacity { needed, available });
    }

    let mut out = vec![0u8; needed];
    let mut cursor = offset;
    for bit_index in 0..num_bits {
        let component = geo
            .locate(cursor)
            .ok_or(Error::InsufficientCapacity { needed, available })?;
        let bit = pixels[component.offset] & 1;
        out[bit_index / 8] |= bit << (7 - (bit_index % 8));
        cursor += 1;
    }

    Ok((out, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(geo: &Geometry, fill: u8) -> Vec<u8> {
        vec![fill; geo.row_stride() * geo.height()]
    }

    #[test]
    fn test_bit_order_msb_first() {
        // 0xA5 = 1010_0101, so the first eight LSBs read 1,0,1,0,0,1,0,1.
        let geo = Geometry::new(4, 1);
        let mut pixels = carrier(&geo, 0xFE);

        let cursor = embed(&mut pixels, &geo, &[0xA5], 8, 0).unwrap();
        assert_eq!(cursor, 8);

        let lsbs: Vec<u8> = pixels[..8].iter().map(|b| b & 1).collect();
        assert_eq!(lsbs, [1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_only_lsb_is_touched() {
        let geo = Geometry::new(4, 1);
        let mut pixels = carrier(&geo, 0xAB);

        embed(&mut pixels, &geo, &[0xFF], 8, 0).unwrap();
        for byte in &pixels[..8] {
            assert_eq!(byte & 0xFE, 0xAA);
        }
    }

    #[test]
    fn test_roundtrip_with_offset_threading() {
        let geo = Geometry::new(10, 4);
        let mut pixels: Vec<u8> = (0..geo.row_stride() * geo.height())
            .map(|i| (i * 31 + 7) as u8)
            .collect();

        let header = [0x00, 0x00, 0x00, 0x03];
        let body = [0xDE, 0xAD, 0xBF];

        let cursor = embed(&mut pixels, &geo, &header, 32, 0).unwrap();
        let end = embed(&mut pixels, &geo, &body, 24, cursor).unwrap();
        assert_eq!(end, 56);

        let (got_header, cursor) = extract(&pixels, &geo, 32, 0).unwrap();
        assert_eq!(got_header, header);
        let (got_body, _) = extract(&pixels, &geo, 24, cursor).unwrap();
        assert_eq!(got_body, body);
    }

    #[test]
    fn test_capacity_boundary() {
        // 2x1 pixels -> 6 components -> at most 6 bits.
        let geo = Geometry::new(2, 1);
        let mut pixels = carrier(&geo, 0);

        assert!(embed(&mut pixels, &geo, &[0xFF], 6, 0).is_ok());
        let err = embed(&mut pixels, &geo, &[0xFF], 7, 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientCapacity { .. }));
    }

    #[test]
    fn test_extract_past_end_fails() {
        let geo = Geometry::new(2, 1);
        let pixels = carrier(&geo, 0);
        assert!(matches!(
            extract(&pixels, &geo, 8, 0),
            Err(Error::InsufficientCapacity { .. })
        ));
    }

    #[test]
    fn test_bit_count_beyond_data_rejected() {
        let geo = Geometry::new(4, 4);
        let mut pixels = carrier(&geo, 0);
        assert!(matches!(
            embed(&mut pixels, &geo, &[0xFF], 9, 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
