//! Inquiry-result filter: is this the speaker we are looking for?
//!
//! A candidate must carry a well-formed class-of-device with the Rendering
//! major service class, and its EIR name must equal the configured peer name
//! exactly.

use crate::event::FoundDevice;

/// Format-type field of the class-of-device word (bits 0–1).
pub const COD_FORMAT_TYPE_MASK: u32 = 0x0000_0003;

/// The only defined format type.
pub const COD_FORMAT_TYPE_1: u32 = 0x0000_0000;

/// Rendering (printing, speakers, …) major service class, bit 18.
pub const COD_SERVICE_RENDERING: u32 = 1 << 18;

/// `true` when the class-of-device uses the defined format type.
pub const fn is_valid_cod(cod: u32) -> bool {
    cod & COD_FORMAT_TYPE_MASK == COD_FORMAT_TYPE_1
}

/// `true` when the Rendering service bit is set.
pub const fn has_rendering_service(cod: u32) -> bool {
    cod & COD_SERVICE_RENDERING != 0
}

/// Whether `device` is the peer named `peer_name`.
pub fn is_target(device: &FoundDevice, peer_name: &str) -> bool {
    if !is_valid_cod(device.class_of_device) || !has_rendering_service(device.class_of_device) {
        return false;
    }
    device
        .name
        .as_ref()
        .is_some_and(|name| name.as_str() == peer_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::BdAddr;

    // Audio/Video major class, Rendering + Audio service bits: 0x24_0414.
    const SPEAKER_COD: u32 = 0x0024_0414;

    #[test]
    fn test_speaker_with_matching_name_is_target() {
        let dev = FoundDevice::new(BdAddr([1; 6]), SPEAKER_COD, Some("ESP_SPEAKER"));
        assert!(is_target(&dev, "ESP_SPEAKER"));
    }

    #[test]
    fn test_name_must_match_exactly() {
        let dev = FoundDevice::new(BdAddr([1; 6]), SPEAKER_COD, Some("ESP_SPEAKER_2"));
        assert!(!is_target(&dev, "ESP_SPEAKER"));
        let unnamed = FoundDevice::new(BdAddr([1; 6]), SPEAKER_COD, None);
        assert!(!is_target(&unnamed, "ESP_SPEAKER"));
    }

    #[test]
    fn test_rendering_bit_required() {
        let phone = FoundDevice::new(BdAddr([1; 6]), 0x005A_020C, Some("ESP_SPEAKER"));
        assert!(!has_rendering_service(phone.class_of_device));
        assert!(!is_target(&phone, "ESP_SPEAKER"));
    }

    #[test]
    fn test_malformed_cod_rejected() {
        assert!(!is_valid_cod(SPEAKER_COD | 0x1));
        let dev = FoundDevice::new(BdAddr([1; 6]), SPEAKER_COD | 0x1, Some("ESP_SPEAKER"));
        assert!(!is_target(&dev, "ESP_SPEAKER"));
    }
}
