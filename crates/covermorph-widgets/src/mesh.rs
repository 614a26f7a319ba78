//! Tessellation of the clipped cover for the egui painter.

use egui::epaint::Vertex;
use egui::{Color32, Mesh, Pos2, TextureId};
use kurbo::{Affine, Circle, Point, Rect};

/// Segments used to approximate the clip circle.
pub const CIRCLE_SEGMENTS: usize = 96;

/// Convert a peniko color to egui.
pub fn to_color32(color: peniko::Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

pub(crate) fn to_pos2(p: Point) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}

/// Convex polygon of `circle` intersected with `rect`.
pub fn clip_polygon(circle: Circle, rect: Rect, segments: usize) -> Vec<Point> {
    let segments = segments.max(3);
    let mut polygon: Vec<Point> = (0..segments)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / segments as f64;
            circle.center + kurbo::Vec2::from_angle(theta) * circle.radius
        })
        .collect();

    // Sutherland-Hodgman against each rect edge.
    let edges: [(fn(Point, Rect) -> bool, fn(Point, Point, Rect) -> Point); 4] = [
        (|p, r| p.x >= r.x0, |a, b, r| cut_x(a, b, r.x0)),
        (|p, r| p.x <= r.x1, |a, b, r| cut_x(a, b, r.x1)),
        (|p, r| p.y >= r.y0, |a, b, r| cut_y(a, b, r.y0)),
        (|p, r| p.y <= r.y1, |a, b, r| cut_y(a, b, r.y1)),
    ];
    for (inside, cut) in edges {
        if polygon.is_empty() {
            break;
        }
        let input = std::mem::take(&mut polygon);
        for (i, &current) in input.iter().enumerate() {
            let previous = input[(i + input.len() - 1) % input.len()];
            match (inside(previous, rect), inside(current, rect)) {
                (true, true) => polygon.push(current),
                (true, false) => polygon.push(cut(previous, current, rect)),
                (false, true) => {
                    polygon.push(cut(previous, current, rect));
                    polygon.push(current);
                }
                (false, false) => {}
            }
        }
    }
    polygon
}

fn cut_x(a: Point, b: Point, x: f64) -> Point {
    let t = (x - a.x) / (b.x - a.x);
    Point::new(x, a.y + (b.y - a.y) * t)
}

fn cut_y(a: Point, b: Point, y: f64) -> Point {
    let t = (y - a.y) / (b.y - a.y);
    Point::new(a.x + (b.x - a.x) * t, y)
}

/// Textured triangle fan over `polygon`.
///
/// UVs map `image_rect` onto the full texture in view space; `transform`
/// then moves the vertices to screen space.
pub fn textured_fan(polygon: &[Point], image_rect: Rect, transform: Affine, texture: TextureId) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    if polygon.len() < 3 || image_rect.width() <= 0.0 || image_rect.height() <= 0.0 {
        return mesh;
    }
    for &p in polygon {
        let uv = Pos2::new(
            ((p.x - image_rect.x0) / image_rect.width()) as f32,
            ((p.y - image_rect.y0) / image_rect.height()) as f32,
        );
        mesh.vertices.push(Vertex {
            pos: to_pos2(transform * p),
            uv,
            color: Color32::WHITE,
        });
    }
    for i in 1..polygon.len() as u32 - 1 {
        mesh.add_triangle(0, i, i + 1);
    }
    mesh
}
