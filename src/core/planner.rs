// pixfit/src/core/planner.rs
//! Crop-to-aspect and bounded-scale geometry.
//!
//! Everything here is pure arithmetic on dimensions, so the whole decision
//! can be tested without touching a single pixel. Derived dimensions are
//! always truncated, never rounded: they end up in output file names.

use super::{CropPlan, Rect, TransformPlan};

/// Returns true when the image is small enough on both axes to be left alone.
pub fn should_skip(width: u32, height: u32, min_size: u32) -> bool {
    width <= min_size && height <= min_size
}

/// Computes the crop rectangle and output size for a `width` x `height` source.
///
/// When the source is narrower than `dest_aspect` the crop keeps the full
/// width and trims height around the center. Otherwise the crop is the whole
/// image and the source's own aspect drives the scale step instead of
/// `dest_aspect`.
///
/// Callers are expected to pass `min_size < max_size` and a positive
/// `dest_aspect`; see [`FitConfig::validate`](super::FitConfig::validate).
pub fn plan(width: u32, height: u32, min_size: u32, max_size: u32, dest_aspect: f64) -> TransformPlan {
    if should_skip(width, height, min_size) {
        return TransformPlan::Skip;
    }

    let source_aspect = width as f64 / height as f64;

    let (crop_width, crop_height, effective_aspect) = if source_aspect < dest_aspect {
        let crop_height = clamp_dimension("crop height", truncate(width as f64 / dest_aspect));
        (width, crop_height.min(height), dest_aspect)
    } else {
        (width, height, source_aspect)
    };

    let crop = Rect {
        x: (width - crop_width) / 2,
        y: (height - crop_height) / 2,
        width: crop_width,
        height: crop_height,
    };

    let (output_width, output_height) =
        bounded_scale(crop_width, crop_height, max_size, effective_aspect);

    log::debug!(
        "Plan for {}x{}: crop {}x{} at ({}, {}), output {}x{}, aspect {:.4}",
        width,
        height,
        crop.width,
        crop.height,
        crop.x,
        crop.y,
        output_width,
        output_height,
        effective_aspect
    );

    TransformPlan::Apply(CropPlan {
        crop,
        output_width,
        output_height,
        effective_aspect,
    })
}

/// Clamps the longer side of a crop to `max_size`, keeping `aspect`.
pub fn bounded_scale(crop_width: u32, crop_height: u32, max_size: u32, aspect: f64) -> (u32, u32) {
    let max_size = if max_size == 0 {
        log::warn!("Maximum size 0 is not usable, bounding to 1 pixel");
        1
    } else {
        max_size
    };

    if crop_width <= max_size && crop_height <= max_size {
        return (crop_width, crop_height);
    }

    if aspect < 1.0 {
        let width = clamp_dimension("output width", truncate(max_size as f64 * aspect));
        (width, max_size)
    } else {
        let height = clamp_dimension("output height", truncate(max_size as f64 / aspect));
        (max_size, height)
    }
}

fn truncate(value: f64) -> u32 {
    // `as` saturates and maps NaN to 0, which the clamp below turns into 1.
    value.trunc() as u32
}

fn clamp_dimension(what: &str, value: u32) -> u32 {
    if value == 0 {
        log::warn!("Computed {} truncated to 0, clamping to 1", what);
        1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u32 = 200;
    const MAX: u32 = 1200;
    const ASPECT: f64 = 0.75;

    fn apply(width: u32, height: u32) -> CropPlan {
        *plan(width, height, MIN, MAX, ASPECT)
            .crop_plan()
            .expect("expected a crop plan")
    }

    // =========================================================================
    // skip rule
    // =========================================================================

    #[test]
    fn small_image_is_skipped() {
        assert!(plan(150, 100, MIN, MAX, ASPECT).is_skip());
        assert!(plan(200, 200, MIN, MAX, ASPECT).is_skip());
    }

    #[test]
    fn small_in_one_dimension_only_is_processed() {
        assert!(!plan(150, 201, MIN, MAX, ASPECT).is_skip());
        assert!(!plan(201, 150, MIN, MAX, ASPECT).is_skip());
    }

    #[test]
    fn skip_holds_exactly_when_both_sides_fit() {
        for w in (1..=400).step_by(7) {
            for h in (1..=400).step_by(11) {
                let skipped = plan(w, h, MIN, MAX, ASPECT).is_skip();
                assert_eq!(skipped, w <= MIN && h <= MIN, "{w}x{h}");
            }
        }
    }

    // =========================================================================
    // crop-to-aspect
    // =========================================================================

    #[test]
    fn landscape_source_gets_identity_crop() {
        // Scenario A: 1600x1200 is wider than 3:4
        let p = apply(1600, 1200);
        assert_eq!(
            p.crop,
            Rect {
                x: 0,
                y: 0,
                width: 1600,
                height: 1200
            }
        );
        assert!((p.effective_aspect - 1600.0 / 1200.0).abs() < 1e-12);
        assert_eq!((p.output_width, p.output_height), (1200, 900));
    }

    #[test]
    fn very_wide_source_uses_its_own_aspect() {
        // Scenario C: 2000x500, aspect 4.0
        let p = apply(2000, 500);
        assert_eq!((p.crop.width, p.crop.height), (2000, 500));
        assert_eq!(p.effective_aspect, 4.0);
        assert_eq!((p.output_width, p.output_height), (1200, 300));
    }

    #[test]
    fn tall_source_is_cropped_to_target_aspect() {
        // 1000 / 0.75 = 1333.33 → 1333, centered in 2000: (2000 - 1333) / 2 = 333
        let p = apply(1000, 2000);
        assert_eq!(
            p.crop,
            Rect {
                x: 0,
                y: 333,
                width: 1000,
                height: 1333
            }
        );
        assert_eq!(p.effective_aspect, ASPECT);
        // 0.75 < 1: height clamps to 1200, width = 1200 * 0.75 = 900
        assert_eq!((p.output_width, p.output_height), (900, 1200));
    }

    #[test]
    fn exact_target_aspect_is_identity() {
        let p = apply(900, 1200);
        assert_eq!((p.crop.width, p.crop.height), (900, 1200));
        assert_eq!((p.output_width, p.output_height), (900, 1200));
    }

    #[test]
    fn wider_than_target_portrait_keeps_source_aspect_for_scale() {
        // 600x1400 (0.43) against a 0.3 target: no crop, height bounded
        let p = plan(600, 1400, MIN, MAX, 0.3).crop_plan().copied().unwrap();
        assert_eq!((p.crop.width, p.crop.height), (600, 1400));
        // 1200 * (600 / 1400) = 514.28
        assert_eq!((p.output_width, p.output_height), (514, 1200));
    }

    #[test]
    fn crop_is_centered_and_within_bounds() {
        for w in (201..3000).step_by(137) {
            for h in (201..3000).step_by(151) {
                let p = apply(w, h);
                let c = p.crop;
                assert_eq!(c.x, (w - c.width) / 2, "{w}x{h}");
                assert_eq!(c.y, (h - c.height) / 2, "{w}x{h}");
                assert!(c.x + c.width <= w, "{w}x{h}");
                assert!(c.y + c.height <= h, "{w}x{h}");
                assert_eq!(c.width, w, "width is always preserved");
            }
        }
    }

    // =========================================================================
    // bounded scale
    // =========================================================================

    #[test]
    fn crop_within_max_is_not_scaled() {
        let p = apply(800, 600);
        assert_eq!((p.output_width, p.output_height), (800, 600));
    }

    #[test]
    fn output_never_exceeds_max() {
        for w in (201..5000).step_by(233) {
            for h in (201..5000).step_by(241) {
                let p = apply(w, h);
                assert!(p.output_width <= MAX && p.output_height <= MAX, "{w}x{h}");
                assert!(p.output_width >= 1 && p.output_height >= 1, "{w}x{h}");
            }
        }
    }

    #[test]
    fn bounded_scale_truncates() {
        // 1200 / (1000 / 3) = 3.6 → 3
        assert_eq!(bounded_scale(3000, 9, 1200, 3000.0 / 9.0), (1200, 3));
        // 1200 * 0.625 = 750
        assert_eq!(bounded_scale(1250, 2000, 1200, 0.625), (750, 1200));
    }

    #[test]
    fn zero_max_size_still_yields_a_pixel() {
        assert_eq!(bounded_scale(300, 200, 0, 1.5), (1, 1));
        assert_eq!(bounded_scale(200, 300, 0, 2.0 / 3.0), (1, 1));
    }

    #[test]
    fn square_crop_bounds_width_first() {
        assert_eq!(bounded_scale(1500, 1500, 1200, 1.0), (1200, 1200));
    }

    // =========================================================================
    // degenerate geometry
    // =========================================================================

    #[test]
    fn extreme_wide_source_clamps_output_height_to_one() {
        // aspect 10000 → 1200 / 10000 = 0.12 → clamped to 1
        let p = apply(10_000, 1);
        assert_eq!((p.output_width, p.output_height), (1200, 1));
    }

    #[test]
    fn extreme_target_aspect_clamps_crop_height_to_one() {
        let p = plan(300, 250, MIN, MAX, 1_000_000.0)
            .crop_plan()
            .copied()
            .unwrap();
        assert_eq!((p.crop.width, p.crop.height), (300, 1));
        assert_eq!(p.crop.y, 124);
    }
}
