use image::GrayImage;
use rustdct::DctPlanner;
use transpose::transpose_inplace;

use crate::definitions::*;

/// Perform a 2-D DCT-II over a square grayscale frame, returning the
/// coefficients in row-major order.
pub fn perform_dct(image: &GrayImage) -> Vec<f64> {
    let mut raw_bytes = bytify(image);

    let dimension = (raw_bytes.len() as f64).sqrt() as usize;
    assert!(
        RESIZE_IMAGE_X as usize == dimension,
        "actual x: {}, RESIZE_IMAGE_X: {}",
        dimension,
        RESIZE_IMAGE_X
    );

    assert!(RESIZE_IMAGE_Y as usize == dimension);

    //setup the DCT.....
    let mut planner = DctPlanner::new();
    let dct = planner.plan_dct2(dimension);

    //perform round 1 of the DCT (on rows):
    raw_bytes.chunks_exact_mut(dimension).for_each(|row| {
        dct.process_dct2(row);
    });

    //now transpose...
    let mut scratch = vec![0f64; dimension];
    transpose_inplace(&mut raw_bytes, &mut scratch, dimension, dimension);

    //perform round 2 of the DCT (on cols):
    raw_bytes.chunks_exact_mut(dimension).for_each(|col| {
        dct.process_dct2(col);
    });

    //now transpose...
    transpose_inplace(&mut raw_bytes, &mut scratch, dimension, dimension);

    //and finally, normalize (has no effect on the hash, but keeps the
    //coefficients in a sane range if further processing is ever required.)
    for val in raw_bytes.iter_mut() {
        *val *= 4f64 / (HASH_IMAGE_X as f64 * HASH_IMAGE_Y as f64);
    }

    raw_bytes
}

fn bytify(image: &GrayImage) -> Vec<f64> {
    //extract the raw data, convert and scale into f64, in preparation for DCT.
    image
        .as_raw()
        .iter()
        .map(|x| *x as f64 - 128.0)
        .collect::<Vec<_>>()
}
