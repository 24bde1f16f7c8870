//! JSON views of library values for CLI artifacts.

use lightscene::geom::{Color, Shape};
use lightscene::graph::{EdgeStyle, NodeKey, NodeStyle};
use lightscene::{Vec2, Vec3};
use serde_json::{json, Value};

fn v2(p: &Vec2<f64>) -> Value {
    json!([p.x, p.y])
}

fn v3(p: &Vec3<f64>) -> Value {
    json!([p.x, p.y, p.z])
}

fn color(c: &Color) -> Value {
    json!([c.r, c.g, c.b])
}

pub fn shape(s: &Shape) -> Value {
    match s {
        Shape::Annulus(a) => json!({
            "kind": "annulus",
            "center": v2(&a.center),
            "inner_radius": a.inner_radius,
            "outer_radius": a.outer_radius,
            "fill_opacity": a.fill_opacity,
            "color": color(&a.color),
        }),
        Shape::Sector(a) => json!({
            "kind": "sector",
            "center": v2(&a.center),
            "inner_radius": a.inner_radius,
            "outer_radius": a.outer_radius,
            "start_angle": a.start_angle,
            "angle_span": a.angle_span,
            "fill_opacity": a.fill_opacity,
            "color": color(&a.color),
        }),
        Shape::Polygon(p) => json!({
            "kind": "polygon",
            "vertices": p.vertices.iter().map(v2).collect::<Vec<_>>(),
            "fill_opacity": p.fill_opacity,
            "color": color(&p.fill_color),
        }),
        Shape::Arc(a) => json!({
            "kind": "arc",
            "center": v2(&a.center),
            "radius": a.radius,
            "start_angle": a.start_angle,
            "angle_span": a.angle_span,
            "color": color(&a.color),
        }),
        Shape::Disc(d) => json!({
            "kind": "disc",
            "center": v2(&d.center),
            "radius": d.radius,
            "fill_opacity": d.fill_opacity,
            "color": color(&d.fill_color),
            "stroke_color": color(&d.stroke_color),
            "stroke_width": d.stroke_width,
        }),
        Shape::Polyline(p) => json!({
            "kind": "polyline",
            "points": p.points.iter().map(v3).collect::<Vec<_>>(),
            "color": color(&p.color),
        }),
    }
}

pub fn shapes(list: &[Shape]) -> Value {
    Value::Array(list.iter().map(shape).collect())
}

pub fn node_key(k: NodeKey) -> Value {
    v3(&k.point())
}

pub fn node_style(s: &NodeStyle) -> Value {
    json!({
        "center": v3(&s.center),
        "radius": s.radius,
        "enlarged": s.enlarged,
        "color": color(&s.color),
        "stroke_width": s.stroke_width,
    })
}

pub fn edge_style(s: &EdgeStyle) -> Value {
    json!({
        "start": v3(&s.start),
        "end": v3(&s.end),
        "curved": s.curved,
        "bow_angle": s.bow_angle,
        "directed": s.directed,
        "highlighted": s.highlighted,
        "color": color(&s.color),
        "stroke_width": s.stroke_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightscene::light::{LightCfg, RadialLightField};

    #[test]
    fn ambient_shapes_export_as_annuli() {
        let light = RadialLightField::new(LightCfg {
            num_levels: 4,
            ..LightCfg::ambient()
        })
        .unwrap();
        let v = shapes(&light.shapes());
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[0]["kind"], "annulus");
        assert_eq!(arr[0]["inner_radius"], 0.0);
    }

    #[test]
    fn node_key_exports_rounded_point() {
        let k = NodeKey::new([1.25, -2.0, 0.0]).unwrap();
        assert_eq!(node_key(k), json!([1.25, -2.0, 0.0]));
    }
}
