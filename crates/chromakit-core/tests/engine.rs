use std::ops::ControlFlow;

use chromakit_core::accessibility::{ContrastReport, contrast_matrix};
use chromakit_core::color::adjust::{complementary_hue, rotate_hue};
use chromakit_core::distance::closest_match;
use chromakit_core::extraction::{KMeans, dominant_colors_from_image, sample_rgba_bytes};
use chromakit_core::harmony::rules;
use chromakit_core::harmony::HarmonyAngles;
use chromakit_core::semantic::{SemanticMapper, SemanticTable};
use chromakit_core::*;
use image::{DynamicImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-9;

fn random_rgb(rng: &mut StdRng) -> Rgb {
    Rgb::new(rng.r#gen(), rng.r#gen(), rng.r#gen())
}

fn random_pixels(rng: &mut StdRng, n: usize) -> Vec<Rgb> {
    (0..n).map(|_| random_rgb(rng)).collect()
}

// ── Concrete scenarios ──────────────────────────────────────────

#[test]
fn hex_parses_to_channels() {
    assert_eq!(hex_to_rgb("#1A73E8").unwrap(), Rgb::new(26, 115, 232));
}

#[test]
fn white_on_black_contrast_is_21() {
    assert!((contrast_ratio(Rgb::WHITE, Rgb::BLACK) - 21.0).abs() < EPSILON);
}

#[test]
fn triadic_of_red_seed() {
    assert_eq!(
        rules::triadic(Hsl::new(0.0, 50.0, 50.0)),
        vec![
            Hsl::new(0.0, 50.0, 50.0),
            Hsl::new(120.0, 50.0, 50.0),
            Hsl::new(240.0, 50.0, 50.0),
        ]
    );
}

#[test]
fn complementary_wraps_past_360() {
    assert_eq!(rules::complementary(Hsl::new(200.0, 60.0, 40.0)), Hsl::new(20.0, 60.0, 40.0));
}

#[test]
fn malformed_hex_is_rejected() {
    match hex_to_rgb("#ZZZZZZ") {
        Err(ChromaError::InvalidFormat { input }) => assert_eq!(input, "#ZZZZZZ"),
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}

#[test]
fn extraction_of_nothing_is_empty() {
    assert_eq!(extract_dominant_colors(&[], 5, None, None), Vec::new());
}

// ── Properties ──────────────────────────────────────────────────

#[test]
fn hex_round_trip_is_exact() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..500 {
        let rgb = random_rgb(&mut rng);
        assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)).unwrap(), rgb);
    }
}

#[test]
fn hsl_round_trip_stays_within_one_unit() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let rgb = random_rgb(&mut rng);
        let back = hsl_to_rgb(rgb_to_hsl(rgb));
        assert!(rgb.r.abs_diff(back.r) <= 1, "{rgb} -> {back}");
        assert!(rgb.g.abs_diff(back.g) <= 1, "{rgb} -> {back}");
        assert!(rgb.b.abs_diff(back.b) <= 1, "{rgb} -> {back}");
    }
}

#[test]
fn full_turn_rotation_is_identity() {
    for h in [0.0, 45.5, 180.0, 359.0, 360.0, 725.0, -30.0] {
        assert!((rotate_hue(h, 360.0) - h.rem_euclid(360.0)).abs() < EPSILON, "hue {h}");
    }
}

#[test]
fn double_complement_returns_hue() {
    for h in 0..360 {
        let h = h as f64;
        assert_eq!(complementary_hue(complementary_hue(h)), h);
    }
}

#[test]
fn contrast_is_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let a = random_rgb(&mut rng);
        let b = random_rgb(&mut rng);
        let ratio = contrast_ratio(a, b);
        assert_eq!(ratio, contrast_ratio(b, a));
        assert!((1.0..=21.0 + EPSILON).contains(&ratio));
        assert_eq!(contrast_ratio(a, a), 1.0);
    }
}

#[test]
fn delta_e_of_identical_colors_is_zero() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let lab = rgb_to_lab(random_rgb(&mut rng));
        assert_eq!(delta_e_2000(lab, lab), 0.0);
    }
}

#[test]
fn cluster_counts_cover_every_point() {
    let mut rng = StdRng::seed_from_u64(5);
    let pixels = random_pixels(&mut rng, 1500);
    for k in [1, 2, 5, 9] {
        let clusters = extract_dominant_colors(&pixels, k, None, Some(k as u64));
        assert!(clusters.len() <= k);
        assert_eq!(clusters.iter().map(|c| c.count).sum::<usize>(), pixels.len());
        assert!(clusters.windows(2).all(|w| w[0].count >= w[1].count));
    }
}

#[test]
fn monochromatic_keeps_seed_hue() {
    let seed = Hsl::new(212.0, 80.0, 55.0);
    let colors = rules::monochromatic(seed, 6);
    assert_eq!(colors.len(), 6);
    assert!(colors.iter().all(|c| c.h == seed.h));
    assert!(colors.windows(2).all(|w| w[0].l < w[1].l));
}

#[test]
fn triadic_hues_are_120_apart() {
    for h in [0.0, 17.0, 250.0, 359.0] {
        let hues: Vec<f64> = rules::triadic(Hsl::new(h, 50.0, 50.0)).iter().map(|c| c.h).collect();
        assert_eq!(hues, vec![h, (h + 120.0) % 360.0, (h + 240.0) % 360.0]);
    }
}

// ── Cross-module flows ──────────────────────────────────────────

#[test]
fn generate_harmony_always_returns_requested_count() {
    let seed = Hsl::new(30.0, 70.0, 50.0);
    let angles = HarmonyAngles::default();
    for harmony in HarmonyType::all() {
        for count in [0, 1, 3, 5, 8] {
            let colors = generate_harmony(seed, Some(*harmony), count, &angles);
            assert_eq!(colors.len(), count, "{harmony} x {count}");
            assert!(colors.iter().all(|c| (0.0..360.0).contains(&c.h)));
        }
    }
}

#[test]
fn harmony_names_parse_back() {
    for harmony in HarmonyType::all() {
        assert_eq!(harmony.to_string().parse::<HarmonyType>().unwrap(), *harmony);
    }
    assert!(matches!("pentadic".parse::<HarmonyType>(), Err(ChromaError::UnknownHarmony(_))));
}

#[test]
fn semantic_palette_is_reproducible_and_in_range() {
    let terms = ["calm", "cool"];
    let a = generate_palette_from_semantics(&terms, 5, &mut StdRng::seed_from_u64(6));
    let b = generate_palette_from_semantics(&terms, 5, &mut StdRng::seed_from_u64(6));
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
    for color in &a {
        assert!((0.0..360.0).contains(&color.h));
        assert!((0.0..=100.0).contains(&color.s));
        assert!((0.0..=100.0).contains(&color.l));
    }
}

#[test]
fn configured_mapper_uses_configured_angles() {
    let config = EngineConfig::from_json_str(r#"{ "harmony_angles": { "analogous": 10.0 } }"#).unwrap();
    let mapper = config.semantic_mapper();
    let mut rng = StdRng::seed_from_u64(7);
    // "calm" suggests an analogous harmony
    let palette = mapper.palette(&["calm"], 3, &mut rng);
    let spread = rotate_hue(palette[2].h, -palette[0].h);
    assert!((spread - 20.0).abs() < EPSILON, "spread {spread}");

    let default_mapper = SemanticMapper::new(SemanticTable::builtin());
    assert_eq!(default_mapper.harmony_for(&["calm"]), HarmonyType::Analogous);
}

#[test]
fn convert_walks_every_space() {
    let rgb = Color::Rgb(Rgb::new(26, 115, 232));
    for space in ColorSpace::all() {
        let converted = convert(&rgb, *space).unwrap();
        assert_eq!(converted.space(), *space);
    }
    assert_eq!(
        convert(&Color::Hex("#1a73e8".into()), ColorSpace::Rgb).unwrap(),
        Color::Rgb(Rgb::new(26, 115, 232))
    );
    assert!(convert(&Color::Hex("nope".into()), ColorSpace::Hsl).is_err());
}

#[test]
fn image_pipeline_finds_the_two_regions() {
    let image = RgbaImage::from_fn(40, 40, |x, y| match (x < 30, y < 5) {
        (_, true) => Rgba([0, 0, 0, 0]),
        (true, false) => Rgba([230, 120, 20, 255]),
        (false, false) => Rgba([20, 80, 200, 255]),
    });
    let from_bytes = sample_rgba_bytes(image.as_raw(), 40, 40).unwrap();
    assert_eq!(from_bytes.len(), 40 * 35);

    let colors = dominant_colors_from_image(&DynamicImage::ImageRgba8(image), 2, Some(8));
    assert_eq!(colors, vec![Rgb::new(230, 120, 20), Rgb::new(20, 80, 200)]);
}

#[test]
fn cancelled_extraction_reports_partial_work() {
    let mut rng = StdRng::seed_from_u64(9);
    let pixels = random_pixels(&mut rng, 800);
    let outcome = KMeans::new(6).run_with_checkpoint(&pixels, &mut rng, |progress| {
        if progress.iteration >= 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert!(outcome.cancelled || outcome.converged);
    assert!(outcome.iterations <= 2);
    assert_eq!(outcome.clusters.iter().map(|c| c.count).sum::<usize>(), 800);
}

#[test]
fn accessibility_summary_for_palette() {
    let palette = [Rgb::BLACK, Rgb::new(118, 118, 118), Rgb::WHITE];
    let matrix = contrast_matrix(&palette);
    assert!((matrix[0][2] - 21.0).abs() < EPSILON);

    let report = ContrastReport::new(palette[1], palette[2]);
    assert_eq!(report.normal_text, Some(WcagLevel::Aa));
    assert_eq!(wcag_level(palette[0], palette[2], false), Some(WcagLevel::Aaa));

    for kind in ColorBlindness::all() {
        let simulated = simulate_color_blindness(Rgb::new(26, 115, 232), kind);
        assert_ne!(simulated, Rgb::BLACK);
    }
}

#[test]
fn closest_palette_entry_by_delta_e() {
    let palette: Vec<Lab> = [Rgb::new(255, 0, 0), Rgb::new(0, 128, 0), Rgb::new(0, 0, 255)]
        .into_iter()
        .map(rgb_to_lab)
        .collect();
    let (index, distance) = closest_match(rgb_to_lab(Rgb::new(20, 30, 230)), &palette).unwrap();
    assert_eq!(index, 2);
    assert!(distance > 0.0);
    assert_eq!(closest_match(palette[0], &[]), None);
}
