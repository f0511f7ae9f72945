//! Retained-mode SVG output: one group of pooled primitives per mesh.
use std::collections::HashMap;
use std::fmt::Write;

use nalgebra::Point2;

use crate::color::Rgb;
use crate::mesh::{Material, MeshId};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: String,
    pub stroke_width: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point2<f32>>,
    pub fill: String,
    /// `None` draws the polygon without outline.
    pub stroke: Option<String>,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl Polygon {
    /// Signed area (shoelace), positive for counter-clockwise points in a y-up frame.
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f32>()
            / 2.0
    }

    pub fn centroid(&self) -> Point2<f32> {
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / self.points.len().max(1) as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Circle,
    Line,
    Polygon,
}

/// A drawn primitive, borrowed from its pool.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Circle(&'a Circle),
    Line(&'a Line),
    Polygon(&'a Polygon),
}

/// The output group of a single mesh.
///
/// Primitives are pooled per kind and overwritten frame after frame. Entries
/// left over from a larger earlier frame stay allocated but are not drawn.
#[derive(Debug, Clone)]
pub struct MeshView {
    id: MeshId,
    circles: Vec<Circle>,
    lines: Vec<Line>,
    polygons: Vec<Polygon>,
    // Primitives of each kind drawn this frame.
    counters: [usize; 3],
    // Draw order of the current frame: kind and pool index.
    order: Vec<(PrimitiveKind, usize)>,
}

impl MeshView {
    pub fn new(id: MeshId) -> Self {
        Self {
            id,
            circles: Vec::new(),
            lines: Vec::new(),
            polygons: Vec::new(),
            counters: [0; 3],
            order: Vec::new(),
        }
    }

    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Forget the drawn primitives; pools keep their allocations.
    pub fn reset(&mut self) {
        self.counters = [0; 3];
        self.order.clear();
    }

    /// Number of primitives drawn this frame.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Allocated pool entries of a kind, drawn or not.
    pub fn pool_size(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Circle => self.circles.len(),
            PrimitiveKind::Line => self.lines.len(),
            PrimitiveKind::Polygon => self.polygons.len(),
        }
    }

    /// Pool index for the next primitive of `kind`, recorded in draw order.
    fn next_index(&mut self, kind: PrimitiveKind) -> usize {
        let slot = match kind {
            PrimitiveKind::Circle => 0,
            PrimitiveKind::Line => 1,
            PrimitiveKind::Polygon => 2,
        };
        let index = self.counters[slot];
        self.counters[slot] += 1;
        self.order.push((kind, index));
        index
    }

    /// Acquire the nth primitive of a kind, growing the pool if needed.
    fn acquire<T: Default>(pool: &mut Vec<T>, index: usize) -> &mut T {
        if pool.len() <= index {
            pool.resize_with(index + 1, T::default);
        }
        &mut pool[index]
    }

    pub fn add_circle(&mut self, x: f32, y: f32, radius: f32, material: &Material) {
        let index = self.next_index(PrimitiveKind::Circle);
        let circle = Self::acquire(&mut self.circles, index);
        circle.cx = x;
        circle.cy = y;
        circle.r = radius;
        circle.fill.clear();
        circle.fill.push_str(material.edge_color_css());
        circle.opacity = material.opacity();
    }

    pub fn add_line(&mut self, a: Point2<f32>, b: Point2<f32>, thickness: f32, material: &Material) {
        let index = self.next_index(PrimitiveKind::Line);
        let line = Self::acquire(&mut self.lines, index);
        line.x1 = a.x;
        line.y1 = a.y;
        line.x2 = b.x;
        line.y2 = b.y;
        line.stroke.clear();
        line.stroke.push_str(material.edge_color_css());
        line.stroke_width = thickness;
        line.opacity = material.opacity();
    }

    fn next_polygon(&mut self, points: &[Point2<f32>]) -> &mut Polygon {
        let index = self.next_index(PrimitiveKind::Polygon);
        let polygon = Self::acquire(&mut self.polygons, index);
        polygon.points.clear();
        polygon.points.extend_from_slice(points);
        polygon
    }

    /// Polygon filled with the face color and outlined with the edge color.
    pub fn add_face_opaque_plain(&mut self, points: &[Point2<f32>], thickness: f32, material: &Material) {
        let polygon = self.next_polygon(points);
        polygon.fill.clear();
        polygon.fill.push_str(material.face_color_css());
        polygon.stroke = Some(material.edge_color_css().to_string());
        polygon.stroke_width = thickness;
        polygon.opacity = material.opacity();
    }

    /// Polygon filled with an explicit color, no outline.
    pub fn add_face_color_no_stroke(&mut self, points: &[Point2<f32>], color: Rgb, material: &Material) {
        let polygon = self.next_polygon(points);
        polygon.fill = color.to_css();
        polygon.stroke = None;
        polygon.stroke_width = 0.0;
        polygon.opacity = material.opacity();
    }

    /// Primitives of the current frame in draw order.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> + '_ {
        self.order.iter().map(move |&(kind, index)| match kind {
            PrimitiveKind::Circle => Primitive::Circle(&self.circles[index]),
            PrimitiveKind::Line => Primitive::Line(&self.lines[index]),
            PrimitiveKind::Polygon => Primitive::Polygon(&self.polygons[index]),
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        self.primitives().filter_map(|p| match p {
            Primitive::Polygon(polygon) => Some(polygon),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.primitives().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> + '_ {
        self.primitives().filter_map(|p| match p {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    /// Append this group as an SVG `<g>` element.
    pub fn write_svg(&self, out: &mut String) {
        let _ = write!(out, "<g id=\"{}\">", self.id);
        for primitive in self.primitives() {
            match primitive {
                Primitive::Circle(c) => {
                    let _ = write!(
                        out,
                        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" style=\"fill: {}; opacity: {}; stroke-width: 0;\"/>",
                        c.cx, c.cy, c.r, c.fill, c.opacity
                    );
                }
                Primitive::Line(l) => {
                    let _ = write!(
                        out,
                        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" style=\"fill: none; opacity: {}; stroke-width: {}; stroke: {}\"/>",
                        l.x1, l.y1, l.x2, l.y2, l.opacity, l.stroke_width, l.stroke
                    );
                }
                Primitive::Polygon(p) => {
                    out.push_str("<polygon points=\"");
                    for point in &p.points {
                        let _ = write!(out, "{},{} ", point.x, point.y);
                    }
                    match &p.stroke {
                        Some(stroke) => {
                            let _ = write!(
                                out,
                                "\" style=\"fill: {}; opacity: {}; stroke: {}; stroke-width: {}\"/>",
                                p.fill, p.opacity, stroke, p.stroke_width
                            );
                        }
                        None => {
                            let _ = write!(
                                out,
                                "\" style=\"fill: {}; opacity: {}; stroke-width: 0;\"/>",
                                p.fill, p.opacity
                            );
                        }
                    }
                }
            }
        }
        out.push_str("</g>");
    }
}

/// The `<svg>` root: canvas size, background and the mesh groups attached
/// during the current frame, in attachment order.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    background: Option<String>,
    views: HashMap<MeshId, MeshView>,
    children: Vec<MeshId>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            views: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Any CSS color, e.g. `"white"` or `"#222"`.
    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
    }

    /// Detach every group and drop the pools of meshes that are gone.
    pub fn reset(&mut self, live: &[MeshId]) {
        self.children.clear();
        self.views.retain(|id, _| live.contains(id));
    }

    /// The group of a mesh, reset and attached at the end of the canvas.
    pub fn attach(&mut self, id: MeshId) -> &mut MeshView {
        self.children.retain(|child| *child != id);
        self.children.push(id);
        let view = self.views.entry(id).or_insert_with(|| MeshView::new(id));
        view.reset();
        view
    }

    pub fn view(&self, id: MeshId) -> Option<&MeshView> {
        self.children
            .contains(&id)
            .then(|| self.views.get(&id))
            .flatten()
    }

    /// Attached groups in draw order.
    pub fn views(&self) -> impl Iterator<Item = &MeshView> + '_ {
        self.children.iter().filter_map(move |id| self.views.get(id))
    }

    /// The whole canvas serialized as an SVG document.
    pub fn svg_text(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"{SVG_NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\" height=\"{h}\" width=\"{w}\"",
            h = self.height,
            w = self.width,
        );
        if let Some(background) = &self.background {
            let _ = write!(out, " style=\"background-color: {background};\"");
        }
        let _ = write!(out, " viewBox=\"0 0 {} {}\">", self.width, self.height);
        for view in self.views() {
            view.write_svg(&mut out);
        }
        out.push_str("</svg>");
        out
    }
}
