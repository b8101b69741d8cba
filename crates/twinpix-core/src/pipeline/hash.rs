//! Perceptual hashing (DCT / median phash).
//!
//! The image is converted to grayscale, resized to a `4 * hash_size` square,
//! transformed with a 2-D DCT-II, and the top-left `hash_size x hash_size`
//! low-frequency block is thresholded against the median of its AC terms.

use image::imageops::{self, FilterType};
use image::DynamicImage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::MAX_HASH_SIZE;
use crate::error::ConfigError;

use super::decode::decode;

/// Default side of the coefficient grid (64-bit fingerprints).
pub const DEFAULT_HASH_SIZE: u32 = 8;

/// Oversampling factor between the coefficient grid and the resized image.
const GRID_FACTOR: usize = 4;

/// A perceptual fingerprint: `hash_size²` bits packed MSB-first.
///
/// Two images are duplicates when their fingerprints are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    bits: Vec<u8>,
}

impl Fingerprint {
    /// Build a fingerprint from packed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: bytes.to_vec(),
        }
    }

    /// The packed bytes, MSB-first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Number of bits carried, including padding in the last byte.
    pub fn bit_len(&self) -> usize {
        self.bits.len() * 8
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.bits.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Hamming distance to another fingerprint.
    ///
    /// Bytes present in only one of the two count as differing against zero.
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        let len = self.bits.len().max(other.bits.len());
        (0..len)
            .map(|i| {
                let a = self.bits.get(i).copied().unwrap_or(0);
                let b = other.bits.get(i).copied().unwrap_or(0);
                (a ^ b).count_ones()
            })
            .sum()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when parsing a fingerprint from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fingerprint hex: {0:?}")]
pub struct ParseFingerprintError(String);

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() % 2 != 0 || !s.is_ascii() {
            return Err(ParseFingerprintError(s.to_string()));
        }
        let bits = (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| ParseFingerprintError(s.to_string()))?;
        Ok(Self { bits })
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Computes perceptual fingerprints at a fixed resolution.
///
/// The DCT cosine table is built once and reused for every image.
#[derive(Debug, Clone)]
pub struct Hasher {
    hash_size: usize,
    grid: usize,
    /// `cosines[k * grid + n] = cos(pi * (2n + 1) * k / (2 * grid))`
    cosines: Vec<f64>,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::build(DEFAULT_HASH_SIZE as usize)
    }
}

impl Hasher {
    /// Create a hasher producing `hash_size²`-bit fingerprints.
    pub fn new(hash_size: u32) -> Result<Self, ConfigError> {
        if !(2..=MAX_HASH_SIZE).contains(&hash_size) {
            return Err(ConfigError::ValidationError(format!(
                "hash_size must be between 2 and {MAX_HASH_SIZE}, got {hash_size}"
            )));
        }
        Ok(Self::build(hash_size as usize))
    }

    fn build(hash_size: usize) -> Self {
        let grid = hash_size * GRID_FACTOR;
        let mut cosines = Vec::with_capacity(hash_size * grid);
        for k in 0..hash_size {
            for n in 0..grid {
                let angle = PI * (2 * n + 1) as f64 * k as f64 / (2 * grid) as f64;
                cosines.push(angle.cos());
            }
        }
        Self {
            hash_size,
            grid,
            cosines,
        }
    }

    /// Decode the file at `path` and fingerprint it.
    pub fn compute_fingerprint(&self, path: &Path) -> Result<Fingerprint, crate::ScanError> {
        let image = decode(path)?;
        Ok(self.fingerprint_image(&image))
    }

    /// Fingerprint an already-decoded image.
    pub fn fingerprint_image(&self, image: &DynamicImage) -> Fingerprint {
        let grid = self.grid as u32;
        let gray = image.to_luma8();
        let small = imageops::resize(&gray, grid, grid, FilterType::Lanczos3);
        let pixels: Vec<f64> = small.pixels().map(|p| p.0[0] as f64).collect();

        let coefficients = self.low_frequency_dct(&pixels);
        let threshold = median(&coefficients[1..]);

        let mut bits = vec![0u8; coefficients.len().div_ceil(8)];
        for (i, &c) in coefficients.iter().enumerate() {
            if c > threshold {
                bits[i / 8] |= 0x80 >> (i % 8);
            }
        }
        Fingerprint { bits }
    }

    /// Separable 2-D DCT-II restricted to the top-left `hash_size` block.
    ///
    /// Returns coefficients row-major (vertical frequency major).
    fn low_frequency_dct(&self, pixels: &[f64]) -> Vec<f64> {
        let (n, grid) = (self.hash_size, self.grid);

        // Rows: horizontal frequencies 0..n for every pixel row
        let mut rows = vec![0.0; grid * n];
        for y in 0..grid {
            let row = &pixels[y * grid..(y + 1) * grid];
            for k in 0..n {
                let basis = &self.cosines[k * grid..(k + 1) * grid];
                rows[y * n + k] = row.iter().zip(basis).map(|(p, c)| p * c).sum();
            }
        }

        // Columns: vertical frequencies 0..n
        let mut out = vec![0.0; n * n];
        for v in 0..n {
            let basis = &self.cosines[v * grid..(v + 1) * grid];
            for k in 0..n {
                out[v * n + k] = (0..grid).map(|y| rows[y * n + k] * basis[y]).sum();
            }
        }
        out
    }
}

/// Compute the fingerprint of the image at `path` with the given resolution.
pub fn compute_fingerprint(path: &Path, hash_size: u32) -> crate::Result<Fingerprint> {
    let hasher = Hasher::new(hash_size)?;
    Ok(hasher.compute_fingerprint(path)?)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
