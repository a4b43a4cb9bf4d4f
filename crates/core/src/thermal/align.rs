//! Baseline/candidate size alignment.
//!
//! The analysis script indexes the baseline with the candidate's pixel
//! coordinates, so a baseline captured at a different resolution is resized
//! to the candidate's dimensions before launch.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use tempfile::TempPath;

use super::AnalysisError;

/// Resize `baseline` to the candidate's dimensions when they differ.
///
/// Returns a scratch PNG inside `scratch_dir`, deleted when the [`TempPath`]
/// is dropped, or `None` when no alignment was needed. Images whose
/// headers cannot be read are passed through untouched; the script reports
/// its own decoding errors.
pub async fn align_baseline(
    baseline: &Path,
    candidate: &Path,
    scratch_dir: &Path,
) -> Result<Option<TempPath>, AnalysisError> {
    let baseline = baseline.to_path_buf();
    let candidate = candidate.to_path_buf();
    let scratch_dir = scratch_dir.to_path_buf();

    tokio::task::spawn_blocking(move || align_blocking(&baseline, &candidate, &scratch_dir))
        .await
        .map_err(|e| AnalysisError::Prepare(format!("alignment task failed: {e}")))?
}

fn align_blocking(
    baseline: &Path,
    candidate: &Path,
    scratch_dir: &Path,
) -> Result<Option<TempPath>, AnalysisError> {
    let (Some(base_dims), Some(cand_dims)) = (dimensions(baseline), dimensions(candidate)) else {
        tracing::debug!(
            baseline = %baseline.display(),
            candidate = %candidate.display(),
            "Image headers unreadable, skipping baseline alignment"
        );
        return Ok(None);
    };

    if base_dims == cand_dims {
        return Ok(None);
    }

    let (width, height) = cand_dims;
    tracing::debug!(
        from_width = base_dims.0,
        from_height = base_dims.1,
        width,
        height,
        "Resizing baseline to candidate dimensions"
    );

    let img = decode(baseline)
        .map_err(|e| AnalysisError::Prepare(format!("cannot decode baseline image: {e}")))?;
    let resized = img.resize_exact(width, height, FilterType::Triangle);

    std::fs::create_dir_all(scratch_dir)
        .map_err(|e| AnalysisError::Prepare(format!("cannot create scratch directory: {e}")))?;
    // Owned before writing so a failed or abandoned save leaves nothing behind.
    let name = format!("aligned_{}.png", uuid::Uuid::new_v4());
    let out = TempPath::from_path(scratch_dir.join(name));
    resized
        .save_with_format(&out, ImageFormat::Png)
        .map_err(|e| AnalysisError::Prepare(format!("cannot write aligned baseline: {e}")))?;

    Ok(Some(out))
}

/// Dimensions from the file header, sniffing the format from content so a
/// mislabeled extension does not matter.
fn dimensions(path: &Path) -> Option<(u32, u32)> {
    ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

fn decode(path: &Path) -> image::ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 40, 10]))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    #[tokio::test]
    async fn different_sizes_produce_resized_copy() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("base.png");
        let candidate = dir.path().join("cand.png");
        write_png(&baseline, 8, 6);
        write_png(&candidate, 4, 3);

        let scratch = dir.path().join("scratch");
        let aligned = align_baseline(&baseline, &candidate, &scratch)
            .await
            .unwrap()
            .expect("alignment expected");

        assert!(aligned.starts_with(&scratch));
        assert_eq!(image::image_dimensions(&aligned).unwrap(), (4, 3));
        // Original baseline untouched.
        assert_eq!(image::image_dimensions(&baseline).unwrap(), (8, 6));

        let aligned_path = aligned.to_path_buf();
        drop(aligned);
        assert!(!aligned_path.exists());
    }

    #[tokio::test]
    async fn equal_sizes_need_no_copy() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("base.png");
        let candidate = dir.path().join("cand.png");
        write_png(&baseline, 5, 5);
        write_png(&candidate, 5, 5);

        let aligned = align_baseline(&baseline, &candidate, dir.path()).await.unwrap();
        assert!(aligned.is_none());
    }

    #[tokio::test]
    async fn unreadable_header_skips_alignment() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("base.png");
        let candidate = dir.path().join("cand.png");
        std::fs::write(&baseline, b"not an image").unwrap();
        write_png(&candidate, 5, 5);

        let aligned = align_baseline(&baseline, &candidate, dir.path()).await.unwrap();
        assert!(aligned.is_none());
    }
}
