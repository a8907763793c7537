// src/imagehash.rs
//
// The hash value type shared by all encoders: a fixed-length bit vector
// packed most significant bit first, with hex round-trip and Hamming
// distance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HashError, Result};

/// A perceptual hash: `len()` bits in row-major order, packed into bytes
/// most significant bit first.
///
/// The unused low bits of the final partial byte are always zero, so
/// byte-wise equality and XOR popcount are exact over the whole vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawImageHash")]
pub struct ImageHash {
    bits: usize,
    bytes: Vec<u8>,
}

impl ImageHash {
    /// Packs `bits` (index 0 first) into a hash.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bytes = vec![0u8; bits.len().div_ceil(8)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (7 - (i % 8));
            }
        }
        Self {
            bits: bits.len(),
            bytes,
        }
    }

    /// Number of bits in the vector.
    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Bit at `index`, where bit 0 is the most significant bit of the
    /// first byte. Panics if `index` is past the end.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.bits, "bit {index} out of {} bits", self.bits);
        self.bytes[index / 8] >> (7 - (index % 8)) & 1 == 1
    }

    /// Count of set bits.
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Packed storage, zero-padded to whole bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hamming distance to `other`: the number of differing bit positions.
    ///
    /// Vectors of different lengths do not compare.
    pub fn distance(&self, other: &ImageHash) -> Result<u32> {
        if self.bits != other.bits {
            return Err(HashError::LengthMismatch {
                left: self.bits,
                right: other.bits,
            });
        }
        Ok(self
            .bytes
            .iter()
            .zip(&other.bytes)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }

    /// Hex digest: `ceil(len / 4)` lowercase nibbles, most significant bit
    /// first within each nibble.
    pub fn to_hex(&self) -> String {
        let mut digest = hex::encode(&self.bytes);
        digest.truncate(self.bits.div_ceil(4));
        digest
    }

    /// Parses a hex digest back into a vector of `4 * digest.len()` bits.
    /// Upper and lower case both parse; anything non-hex is rejected.
    pub fn from_hex(digest: &str) -> Result<Self> {
        let bytes = if digest.len() % 2 == 0 {
            hex::decode(digest)
        } else {
            // odd nibble count: the low half of the last byte is padding
            let mut padded = String::with_capacity(digest.len() + 1);
            padded.push_str(digest);
            padded.push('0');
            hex::decode(&padded)
        }
        .map_err(|e| HashError::InvalidHex {
            reason: e.to_string(),
        })?;
        Ok(Self {
            bits: digest.len() * 4,
            bytes,
        })
    }
}

// Serialized layout of `ImageHash`. Deserialization funnels through
// `TryFrom` so decoded data cannot violate the packing invariant.
#[derive(Deserialize)]
struct RawImageHash {
    bits: usize,
    bytes: Vec<u8>,
}

impl TryFrom<RawImageHash> for ImageHash {
    type Error = String;

    fn try_from(raw: RawImageHash) -> std::result::Result<Self, Self::Error> {
        if raw.bytes.len() != raw.bits.div_ceil(8) {
            return Err(format!(
                "{} bytes cannot hold exactly {} bits",
                raw.bytes.len(),
                raw.bits
            ));
        }
        let padding = raw.bytes.len() * 8 - raw.bits;
        if padding > 0 && raw.bytes[raw.bytes.len() - 1] & ((1 << padding) - 1) != 0 {
            return Err(format!("the low {padding} padding bits must be zero"));
        }
        Ok(Self {
            bits: raw.bits,
            bytes: raw.bytes,
        })
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn bits_of(pattern: &[u8]) -> Vec<bool> {
        pattern.iter().map(|&b| b != 0).collect()
    }

    #[test]
    fn packs_most_significant_bit_first() {
        let mut bits = vec![false; 64];
        bits[0] = true;
        let hash = ImageHash::from_bits(&bits);
        assert_eq!(hash.as_bytes()[0], 0x80);
        assert!(hash.to_hex().starts_with('8'));
        assert!(hash.bit(0));
        assert!(!hash.bit(1));
    }

    #[test]
    fn hex_round_trip_is_lossless() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let bits: Vec<bool> = (0..64).map(|_| rng.random()).collect();
            let hash = ImageHash::from_bits(&bits);
            let digest = hash.to_hex();
            assert_eq!(digest.len(), 16);
            assert_eq!(ImageHash::from_hex(&digest).unwrap(), hash);
        }
    }

    #[test]
    fn odd_bit_counts_pad_the_final_nibble() {
        let hash = ImageHash::from_bits(&vec![true; 25]);
        assert_eq!(hash.len(), 25);
        assert_eq!(hash.to_hex().len(), 7);
        // 25 ones: six full nibbles then a single high bit
        assert_eq!(hash.to_hex(), "ffffff8");
    }

    #[test]
    fn from_hex_accepts_either_case() {
        let lower = ImageHash::from_hex("c0ffee").unwrap();
        let upper = ImageHash::from_hex("C0FFEE").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 24);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            ImageHash::from_hex("zz"),
            Err(HashError::InvalidHex { .. })
        ));
    }

    #[test]
    fn distance_counts_differing_bits() {
        let a = ImageHash::from_bits(&bits_of(&[1, 0, 1, 0, 1, 0, 1, 0]));
        let b = ImageHash::from_bits(&bits_of(&[1, 0, 1, 0, 0, 1, 1, 0]));
        assert_eq!(a.distance(&b).unwrap(), 2);
        assert_eq!(b.distance(&a).unwrap(), 2);
        assert_eq!(a.distance(&a).unwrap(), 0);
    }

    #[test]
    fn distance_requires_equal_lengths() {
        let a = ImageHash::from_bits(&vec![false; 64]);
        let b = ImageHash::from_bits(&vec![false; 16]);
        match a.distance(&b) {
            Err(HashError::LengthMismatch { left, right }) => {
                assert_eq!((left, right), (64, 16));
            }
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn display_prints_the_digest() {
        let hash = ImageHash::from_bits(&bits_of(&[1, 1, 1, 1, 0, 0, 0, 0]));
        assert_eq!(format!("{hash}"), "f0");
        assert_eq!(hash.to_string(), hash.to_hex());
    }

    #[test]
    fn count_ones_matches_the_bit_pattern() {
        let hash = ImageHash::from_bits(&bits_of(&[1, 0, 0, 1, 1, 0, 1, 1]));
        assert_eq!(hash.count_ones(), 5);
        assert!(!hash.is_empty());
    }

    #[test]
    fn serde_round_trip_preserves_the_hash() {
        let hash = ImageHash::from_bits(&bits_of(&[1, 0, 1, 1, 0, 0, 1, 0]));
        let json = serde_json::to_string(&hash).unwrap();
        let back: ImageHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn deserializing_checks_the_packed_length() {
        let ok: ImageHash = serde_json::from_str(r#"{"bits":16,"bytes":[255,1]}"#).unwrap();
        assert_eq!(ok.len(), 16);
        assert_eq!(ok.to_hex(), "ff01");

        // too few bytes for the bit count, then too many
        assert!(serde_json::from_str::<ImageHash>(r#"{"bits":64,"bytes":[]}"#).is_err());
        assert!(serde_json::from_str::<ImageHash>(r#"{"bits":8,"bytes":[1,2]}"#).is_err());
    }

    #[test]
    fn deserializing_rejects_nonzero_padding() {
        // five bits leave the low three of the byte as padding
        assert!(serde_json::from_str::<ImageHash>(r#"{"bits":5,"bytes":[7]}"#).is_err());
        let ok: ImageHash = serde_json::from_str(r#"{"bits":5,"bytes":[8]}"#).unwrap();
        assert_eq!(ok.count_ones(), 1);
        assert!(ok.bit(4));
    }
}
