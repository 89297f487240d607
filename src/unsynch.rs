//! Synchsafe integers and the unsynchronisation scheme of ID3v2. Both exist to keep tag bytes
//! from resembling an MPEG sync word: only the low 7 bits of a synchsafe byte are significant, and
//! unsynchronisation inserts a zero byte after every 0xFF.

/// Returns the synchsafe variant of a `u32` value.
#[cfg(test)]
pub fn encode_u32(n: u32) -> u32 {
    let mut x: u32 = n & 0x7F | (n & 0xFFFF_FF80) << 1;
    x = x & 0x7FFF | (x & 0xFFFF_8000) << 1;
    x = x & 0x7F_FFFF | (x & 0xFF80_0000) << 1;
    x
}

/// Concatenates the low 7 bits of every byte, most significant byte first.
pub fn decode_bytes(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |n, b| (n << 7) | u32::from(b & 0x7F))
}

/// Applies the unsynchronization scheme to a byte buffer.
#[cfg(test)]
pub fn encode_vec(buffer: &mut Vec<u8>) {
    let mut repeat_next_null_byte = false;
    let mut i = 0;
    while i < buffer.len() {
        if buffer[i] == 0x00 && repeat_next_null_byte {
            buffer.insert(i, 0);
            i += 1;
        }
        repeat_next_null_byte = buffer[i] == 0xFF;
        i += 1;
    }
}

/// Undoes the changes done to a byte buffer by the unsynchronization scheme.
pub fn decode_vec(buffer: &mut Vec<u8>) {
    let mut discard_next_null_byte = false;
    buffer.retain(|&b| {
        let keep = !(discard_next_null_byte && b == 0x00);
        discard_next_null_byte = b == 0xFF;
        keep
    });
}
