use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Load a receipt photo from disk, binarize it, and return PNG bytes ready
/// for OCR.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    encode_as_png(binarize(img))
}

/// Process raw image bytes (JPEG / PNG / WEBP / …) and return binarized PNG
/// bytes.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(binarize(img))
}

/// Grayscale + Otsu binarization.
///
/// Receipt photos have highly variable lighting; Otsu picks the split point
/// per image, so there is nothing to tune. No cropping, deskewing, or noise
/// removal happens here.
fn binarize(img: DynamicImage) -> DynamicImage {
    let gray: GrayImage = img.to_luma8();
    let level = otsu_level(&gray);

    let thresholded: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    DynamicImage::ImageLuma8(thresholded)
}

/// Threshold that maximizes between-class variance over the 256-bin
/// intensity histogram.
fn otsu_level(img: &GrayImage) -> u8 {
    let mut histogram = [0u32; 256];
    for pixel in img.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let total = (img.width() as f64) * (img.height() as f64);
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut background_sum = 0.0f64;
    let mut background_weight = 0.0f64;
    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;

    for level in 0..256usize {
        background_weight += histogram[level] as f64;
        if background_weight == 0.0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0.0 {
            break;
        }

        background_sum += level as f64 * histogram[level] as f64;
        let background_mean = background_sum / background_weight;
        let foreground_mean = (weighted_sum - background_sum) / foreground_weight;

        let variance = background_weight
            * foreground_weight
            * (background_mean - foreground_mean)
            * (background_mean - foreground_mean);
        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

    /// Left half dark, right half bright — a clean bimodal image.
    fn bimodal_gray(width: u32, height: u32, low: u8, high: u8) -> GrayImage {
        ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Luma([low])
            } else {
                Luma([high])
            }
        })
    }

    fn as_png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn otsu_splits_between_the_modes() {
        let img = bimodal_gray(64, 16, 40, 200);
        let level = otsu_level(&img);
        assert!((40..200).contains(&level), "level was {level}");
    }

    #[test]
    fn binarize_produces_two_level_output() {
        let img = bimodal_gray(64, 16, 40, 200);
        let result = binarize(DynamicImage::ImageLuma8(img)).to_luma8();
        assert!(result.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(result.pixels().any(|p| p[0] == 0));
        assert!(result.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn uniform_image_does_not_panic() {
        let img: GrayImage = ImageBuffer::from_fn(8, 8, |_, _| Luma([128u8]));
        let result = binarize(DynamicImage::ImageLuma8(img)).to_luma8();
        assert!(result.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn prepare_from_bytes_produces_png_header() {
        let png = as_png_bytes(DynamicImage::ImageLuma8(bimodal_gray(8, 8, 30, 220)));
        let result = prepare_for_ocr_from_bytes(&png).unwrap();
        assert_eq!(&result[..4], b"\x89PNG");
    }

    #[test]
    fn garbage_bytes_fail_with_load_error() {
        let err = prepare_for_ocr_from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PreprocessError::Load(_)));
    }

    #[test]
    fn color_input_is_accepted() {
        let rgb = image::RgbImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                image::Rgb([10, 10, 10])
            } else {
                image::Rgb([240, 240, 240])
            }
        });
        let png = as_png_bytes(DynamicImage::ImageRgb8(rgb));
        let result = prepare_for_ocr_from_bytes(&png).unwrap();
        let decoded = image::load_from_memory(&result).unwrap().to_luma8();
        assert!(decoded.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
