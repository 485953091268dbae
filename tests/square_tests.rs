//! Integration tests for the square geometry and its renderer.

use nalgebra_glm as glm;
use square_gl::config::Config;
use square_gl::renderer::{aspect_ratio, clear_color, model_view, projection, SquareRenderer};
use square_gl::square::{Square, INDEX_COUNT, VERTEX_COUNT};

fn to_ndc(clip: glm::Mat4, vertex: [f32; 2]) -> glm::Vec2 {
    let position = clip * glm::vec4(vertex[0], vertex[1], 0.0, 1.0);
    glm::vec2(position.x / position.w, position.y / position.w)
}

fn ndc_signed_area(a: glm::Vec2, b: glm::Vec2, c: glm::Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

// ==================== Geometry ====================

#[test]
fn test_indices_reference_existing_vertices() {
    let square = Square::new();
    assert_eq!(square.indices().len(), INDEX_COUNT);
    assert!(square.indices().iter().all(|&index| (index as usize) < VERTEX_COUNT));
}

#[test]
fn test_every_vertex_is_used() {
    let square = Square::new();
    for vertex in 0..VERTEX_COUNT {
        assert!(square.indices().contains(&(vertex as u8)), "vertex {} unused", vertex);
    }
}

#[test]
fn test_colors_are_opaque() {
    let square = Square::new();
    for vertex in 0..VERTEX_COUNT {
        assert_eq!(square.color(vertex)[3], 255);
    }
}

// ==================== Projection ====================

#[test]
fn test_square_is_on_screen_through_whole_period() {
    let renderer = SquareRenderer::new(&Config::default());
    let square = renderer.square();

    for step in 0..64 {
        let trans_y = step as f32 * std::f32::consts::TAU / 64.0;
        let clip = projection(480, 480) * model_view(trans_y);
        for vertex in 0..VERTEX_COUNT {
            let ndc = to_ndc(clip, square.vertex(vertex));
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "vertex {} off screen at {}: {:?}", vertex, trans_y, ndc);
        }
    }
}

#[test]
fn test_triangles_stay_clockwise_on_screen() {
    let square = Square::new();
    let clip = projection(1280, 720) * model_view(0.0);

    for [a, b, c] in square.triangles() {
        let area = ndc_signed_area(to_ndc(clip, square.vertex(a)), to_ndc(clip, square.vertex(b)), to_ndc(clip, square.vertex(c)));
        assert!(area < 0.0, "triangle [{}, {}, {}] would be culled", a, b, c);
    }
}

#[test]
fn test_wide_surface_keeps_square_proportions() {
    let square = Square::new();
    let clip = projection(1600, 800) * model_view(0.0);

    let lower_left = to_ndc(clip, square.vertex(0));
    let upper_right = to_ndc(clip, square.vertex(3));
    let width_px = (upper_right.x - lower_left.x) * 1600.0 / 2.0;
    let height_px = (upper_right.y - lower_left.y) * 800.0 / 2.0;
    assert!((width_px - height_px).abs() < 1e-2);
}

#[test]
fn test_degenerate_surface_has_finite_projection() {
    assert!(aspect_ratio(0, 0).is_finite());
    let matrix = projection(300, 0);
    assert!(matrix.iter().all(|value| value.is_finite()));
}

// ==================== Renderer state ====================

#[test]
fn test_oscillation_follows_sine() {
    let mut renderer = SquareRenderer::new(&Config::default().with_translation_step(0.5));
    let mut expected = 0.0_f32;

    for _ in 0..20 {
        let offset = renderer.model_view()[(1, 3)];
        assert!((offset - expected.sin()).abs() < 1e-4);
        assert!(offset.abs() <= 1.0);
        renderer.advance();
        expected += 0.5;
    }
}

#[test]
fn test_background_follows_config() {
    let opaque = Config::default().with_translucent_background(false);
    assert_eq!(clear_color(opaque.translucent_background), [1.0, 1.0, 1.0, 1.0]);

    let translucent = Config::default();
    assert_eq!(clear_color(translucent.translucent_background)[3], 0.0);
}
