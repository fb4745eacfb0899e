//! Software volume for the A2DP PCM stream.
//!
//! The sink has no hardware gain stage, so attenuation is applied to the
//! 16-bit samples on their way out. Gain is `volume / 127` on the AVRCP
//! absolute-volume scale, rounded to nearest (halves away from zero) in
//! integer arithmetic.

use platform::Volume;

/// Scale one sample by `volume / 127`, rounded to nearest and clamped to the
/// `i16` range. `Volume::MAX` is the identity.
#[allow(clippy::arithmetic_side_effects)] // Safety: |s * v| <= 32768 * 127, far inside i32
#[allow(clippy::cast_possible_truncation)] // Safety: clamped to the i16 range first
pub fn scale_sample(sample: i16, volume: Volume) -> i16 {
    let num = i32::from(sample) * i32::from(volume.get());
    let den = i32::from(Volume::MAX.get());
    // round(|num| / den) == (2|num| + den) / (2 den); den is odd so no exact halves.
    let magnitude = (2 * num.abs() + den) / (2 * den);
    let scaled = if num < 0 { -magnitude } else { magnitude };
    scaled.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Scale every 16-bit little-endian sample in `pcm` in place.
///
/// Skipped entirely at full volume. A trailing odd byte is left untouched.
pub fn apply_volume(pcm: &mut [u8], volume: Volume) {
    if volume.is_max() {
        return;
    }
    for chunk in pcm.chunks_exact_mut(2) {
        if let [lo, hi] = chunk {
            let scaled = scale_sample(i16::from_le_bytes([*lo, *hi]), volume);
            [*lo, *hi] = scaled.to_le_bytes();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_volume_is_identity() {
        for s in [i16::MIN, -1, 0, 1, 12_345, i16::MAX] {
            assert_eq!(scale_sample(s, Volume::MAX), s);
        }
    }

    #[test]
    fn test_mute_is_silence() {
        assert_eq!(scale_sample(i16::MAX, Volume::MUTE), 0);
        assert_eq!(scale_sample(i16::MIN, Volume::MUTE), 0);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 1000 * 20 / 127 = 157.48 → 157
        assert_eq!(scale_sample(1000, Volume::new(20)), 157);
        // -1000 * 20 / 127 = -157.48 → -157
        assert_eq!(scale_sample(-1000, Volume::new(20)), -157);
        // 3 * 64 / 127 = 1.51 → 2
        assert_eq!(scale_sample(3, Volume::new(64)), 2);
    }

    #[test]
    fn test_apply_volume_little_endian() {
        let mut pcm = [0u8; 4];
        pcm[..2].copy_from_slice(&1000i16.to_le_bytes());
        pcm[2..].copy_from_slice(&(-1000i16).to_le_bytes());
        apply_volume(&mut pcm, Volume::new(20));
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 157);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -157);
    }

    #[test]
    fn test_apply_volume_skips_at_max() {
        let mut pcm = [0x34u8, 0x12, 0xFF];
        apply_volume(&mut pcm, Volume::MAX);
        assert_eq!(pcm, [0x34, 0x12, 0xFF]);
    }

    #[test]
    fn test_apply_volume_leaves_odd_tail() {
        let mut pcm = [0x00u8, 0x40, 0x7F];
        apply_volume(&mut pcm, Volume::MUTE);
        assert_eq!(pcm, [0, 0, 0x7F]);
    }
}
