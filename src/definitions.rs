// Frame definitions (pre hashing)
pub const RESIZE_IMAGE_X: u32 = 32;
pub const RESIZE_IMAGE_Y: u32 = 32;

// Hash definitions
pub const HASH_IMAGE_X: usize = 8;
pub const HASH_IMAGE_Y: usize = 8;

// Perceptual sampling defaults
pub const DEFAULT_FRAME_EDGE: u32 = 100;
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u32 = 1;
pub const EXACT_HASH_CHUNK_SIZE: usize = 65536;

// Transform step parameter bounds
pub const BRIGHTNESS_JITTER: f64 = 0.05;
pub const LEVEL_JITTER_MIN: f64 = 0.95;
pub const LEVEL_JITTER_MAX: f64 = 1.05;
pub const CROP_OFFSET_MIN: u32 = 1;
pub const CROP_OFFSET_MAX: u32 = 2;
pub const COMMENT_TAG_MIN: u32 = 1000;
pub const COMMENT_TAG_MAX: u32 = 9999;
pub const DEFAULT_NOISE_INTENSITY: u32 = 5;
pub const MAX_NOISE_INTENSITY: u32 = 100;

// Output naming. The derived filename (and therefore the published object
// key) is a compatibility contract; do not change the prefix.
pub const OUTPUT_NAME_PREFIX: &str = "processed_";
pub const INPUT_STAGING_NAME: &str = "input_video.mp4";
