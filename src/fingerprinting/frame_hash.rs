use image::GrayImage;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::definitions::*;
use crate::utils::dct_ops;

/// A 64-bit perceptual hash of a single video frame.
///
/// The hash is the classic DCT fingerprint: the frame is resized to
/// 32x32 grayscale, transformed with a 2-D DCT, and each coefficient of the
/// top-left 8x8 (low spatial frequency) block is thresholded against the
/// block mean. Perceptually similar frames yield hashes with a small
/// [hamming distance](FrameHash::distance).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct FrameHash(u64);

impl FrameHash {
    /// Hash a decoded grayscale frame. The frame may be any size; it is
    /// resized before the transform.
    pub fn from_gray_frame(frame: &GrayImage) -> Self {
        let resized = image::imageops::resize(
            frame,
            RESIZE_IMAGE_X,
            RESIZE_IMAGE_Y,
            image::imageops::FilterType::Triangle,
        );

        let dct = dct_ops::perform_dct(&resized);

        //select the top-leftmost square of low frequency bins
        let rowstride = RESIZE_IMAGE_X as usize;
        let mut block = [0f64; HASH_IMAGE_X * HASH_IMAGE_Y];
        for y in 0..HASH_IMAGE_Y {
            for x in 0..HASH_IMAGE_X {
                block[y * HASH_IMAGE_X + x] = dct[y * rowstride + x];
            }
        }

        //threshold against the block mean, excluding the DC term which would
        //otherwise dominate it
        let mean = block.iter().skip(1).sum::<f64>() / (block.len() - 1) as f64;

        let mut bits = 0u64;
        for (bit_pos, coefficient) in block.iter().enumerate() {
            if *coefficient > mean {
                bits |= 1 << bit_pos;
            }
        }

        Self(bits)
    }

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// The hamming distance (count of differing bits) between two hashes.
    pub fn distance(&self, other: &FrameHash) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl std::fmt::Display for FrameHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

//serialized as a 16-char hex digest so persisted records stay readable
impl Serialize for FrameHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for FrameHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        u64::from_str_radix(&hex, 16)
            .map(FrameHash)
            .map_err(D::Error::custom)
    }
}
