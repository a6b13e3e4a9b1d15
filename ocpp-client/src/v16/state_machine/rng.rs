use rand::RngCore;

use crate::v16::cp::core::ChargePointCore;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Formats 16 random bytes as a version 4 UUID.
pub(crate) fn uuid_v4(rng: &mut impl RngCore) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    let mut s = String::with_capacity(36);
    for (i, b) in bytes.iter().enumerate() {
        if i == 4 || i == 6 || i == 8 || i == 10 {
            s.push('-');
        }
        s.push(HEX[(b >> 4) as usize] as char);
        s.push(HEX[(b & 0x0f) as usize] as char);
    }
    s
}

pub(crate) fn hex_bytes(rng: &mut impl RngCore, len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .flat_map(|b| [HEX[(b >> 4) as usize] as char, HEX[(b & 0x0f) as usize] as char])
        .collect()
}

impl ChargePointCore {
    pub(crate) fn get_uuid(&mut self) -> String {
        uuid_v4(&mut self.rng)
    }
}
