//! Benchmark fixtures for the osrkit replay codec.
//!
//! Provides deterministic synthetic inputs at arbitrary sizes:
//!
//! - [`synthetic_payload`]: decompressed action text with `n` records
//! - [`synthetic_replay`]: a complete `.osr` byte buffer wrapping `n` records

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use osrkit::{compress_block, encode_uleb128};

/// Render a deterministic action payload with `n` movement records
/// followed by the trailing seed sentinel.
pub fn synthetic_payload(n: usize) -> Vec<u8> {
    let mut payload = String::new();
    for i in 0..n {
        let x = (i * 7) % 512;
        let y = (i * 3) % 384;
        let keys = [0u32, 1, 1, 0][i % 4];
        payload.push_str(&format!("16|{x}|{y}|{keys},"));
    }
    payload.push_str(&format!("{}|0|0|1337,", osrkit::SEED_FRAME_DELTA));
    payload.into_bytes()
}

/// Build a complete replay file wrapping `n` action records, with a
/// populated header and a 60-entry life graph.
pub fn synthetic_replay(n: usize) -> Vec<u8> {
    let block = compress_block(&synthetic_payload(n)).unwrap();
    let graph: String = (0..60)
        .map(|i| format!("{}|{:.2},", i * 2000, 1.0 - f64::from(i) / 120.0))
        .collect();

    let mut bytes = vec![0u8];
    bytes.extend_from_slice(&20250101u32.to_le_bytes());
    push_string(&mut bytes, "8f163e88908e35bddc3ee992dc4ef004");
    push_string(&mut bytes, "bench");
    push_string(&mut bytes, "0cf0eba3bbf9df6ef9d08b7b84fe0f41");
    for count in [482u16, 21, 3, 99, 14, 2] {
        bytes.extend_from_slice(&count.to_le_bytes());
    }
    bytes.extend_from_slice(&7_345_880u32.to_le_bytes());
    bytes.extend_from_slice(&506u16.to_le_bytes());
    bytes.push(0);
    bytes.extend_from_slice(&72u32.to_le_bytes());
    push_string(&mut bytes, &graph);
    bytes.extend_from_slice(&635_873_755_112_931_840u64.to_le_bytes());
    bytes.extend_from_slice(&(block.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&block);
    bytes.extend_from_slice(&2_177_560_145i64.to_le_bytes());
    bytes
}

fn push_string(bytes: &mut Vec<u8>, value: &str) {
    bytes.push(0x0b);
    encode_uleb128(value.len() as u64, bytes);
    bytes.extend_from_slice(value.as_bytes());
}
