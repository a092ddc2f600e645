//! Freehand drawing: strokes, brush effects and a bounded undo history.
//!
//! The canvas keeps an operation log instead of bitmap snapshots. Rendering
//! replays [`CanvasHistory::visible_strokes`] through [`brush_marks`].

use std::f64::consts::{FRAC_PI_2, PI};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hotspot_viewer::Point;

pub const DEFAULT_HISTORY_DEPTH: usize = 50;
pub const MIN_BRUSH_WIDTH: f64 = 0.5;
const MAX_SAMPLES_PER_SEGMENT: usize = 4096;

// Strokes can arrive deserialized, so the builder's clamp is not enough.
fn effective_width(width: f64) -> f64 {
    if width.is_finite() {
        width.max(MIN_BRUSH_WIDTH)
    } else {
        MIN_BRUSH_WIDTH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Brush {
    Pen,
    Chalk,
    StoneChisel,
    Ochre,
    Charcoal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub brush: Brush,
    pub color: String,
    pub width: f64,
    pub points: Vec<Point>,
}

/// Collects pointer samples for one stroke between pointer-down and pointer-up.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    stroke: Stroke,
}

impl StrokeBuilder {
    pub fn begin(brush: Brush, color: &str, width: f64) -> Self {
        StrokeBuilder {
            stroke: Stroke {
                brush,
                color: color.to_string(),
                width: effective_width(width),
                points: Vec::new(),
            },
        }
    }

    pub fn add_point(&mut self, point: Point) {
        if self.stroke.points.last() != Some(&point) {
            self.stroke.points.push(point);
        }
    }

    pub fn finish(self) -> Option<Stroke> {
        if self.stroke.points.is_empty() {
            None
        } else {
            Some(self.stroke)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum MarkShape {
    Line { x2: f64, y2: f64 },
    Dot,
    Chip,
    Blob,
    Hatch,
}

/// One primitive the renderer draws for a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(flatten)]
    pub shape: MarkShape,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub alpha: f64,
    pub angle: f64,
}

struct PathSample {
    point: Point,
    angle: f64,
}

// Points every `spacing` pixels along the polyline, with the local heading.
fn sample_path(points: &[Point], spacing: f64) -> Vec<PathSample> {
    if points.len() == 1 {
        return vec![PathSample {
            point: points[0],
            angle: 0.0,
        }];
    }
    let mut samples = Vec::new();
    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let length = from.distance_to(to);
        let angle = (to.y - from.y).atan2(to.x - from.x);
        let steps = if length.is_finite() {
            ((length / spacing).ceil().max(1.0) as usize).min(MAX_SAMPLES_PER_SEGMENT)
        } else {
            1
        };
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            samples.push(PathSample {
                point: Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t),
                angle,
            });
        }
    }
    if let (Some(last), Some(prev)) = (points.last(), samples.last()) {
        let angle = prev.angle;
        samples.push(PathSample {
            point: *last,
            angle,
        });
    }
    samples
}

/// Expands a stroke into the marks its brush leaves on the rock surface.
pub fn brush_marks<R: Rng + ?Sized>(stroke: &Stroke, rng: &mut R) -> Vec<Mark> {
    let width = effective_width(stroke.width);
    if stroke.points.is_empty() {
        return Vec::new();
    }

    match stroke.brush {
        Brush::Pen => {
            if stroke.points.len() == 1 {
                let p = stroke.points[0];
                return vec![Mark {
                    shape: MarkShape::Dot,
                    x: p.x,
                    y: p.y,
                    size: width,
                    alpha: 1.0,
                    angle: 0.0,
                }];
            }
            stroke
                .points
                .windows(2)
                .map(|pair| Mark {
                    shape: MarkShape::Line {
                        x2: pair[1].x,
                        y2: pair[1].y,
                    },
                    x: pair[0].x,
                    y: pair[0].y,
                    size: width,
                    alpha: 1.0,
                    angle: 0.0,
                })
                .collect()
        }
        Brush::Chalk => {
            let mut marks = Vec::new();
            for sample in sample_path(&stroke.points, width / 2.0) {
                for _ in 0..3 {
                    let distance = rng.gen_range(0.0..=width / 2.0);
                    let direction = rng.gen_range(0.0..2.0 * PI);
                    marks.push(Mark {
                        shape: MarkShape::Dot,
                        x: sample.point.x + distance * direction.cos(),
                        y: sample.point.y + distance * direction.sin(),
                        size: rng.gen_range(0.5..1.5) * width / 4.0,
                        alpha: rng.gen_range(0.3..0.7),
                        angle: 0.0,
                    });
                }
            }
            marks
        }
        Brush::StoneChisel => sample_path(&stroke.points, width)
            .into_iter()
            .map(|sample| {
                // Chips fly off to either side of the chisel line.
                let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let offset = rng.gen_range(0.0..=width / 2.0) * side;
                let normal = sample.angle + FRAC_PI_2;
                Mark {
                    shape: MarkShape::Chip,
                    x: sample.point.x + offset * normal.cos(),
                    y: sample.point.y + offset * normal.sin(),
                    size: rng.gen_range(0.4..0.9) * width,
                    alpha: rng.gen_range(0.8..=1.0),
                    angle: rng.gen_range(0.0..PI),
                }
            })
            .collect(),
        Brush::Ochre => sample_path(&stroke.points, width * 0.75)
            .into_iter()
            .map(|sample| Mark {
                shape: MarkShape::Blob,
                x: sample.point.x + rng.gen_range(-0.1..=0.1) * width,
                y: sample.point.y + rng.gen_range(-0.1..=0.1) * width,
                size: rng.gen_range(0.8..1.4) * width,
                alpha: rng.gen_range(0.25..0.45),
                angle: 0.0,
            })
            .collect(),
        Brush::Charcoal => sample_path(&stroke.points, width / 2.0)
            .into_iter()
            .map(|sample| Mark {
                shape: MarkShape::Hatch,
                x: sample.point.x,
                y: sample.point.y,
                size: width * 1.5,
                alpha: rng.gen_range(0.4..0.8),
                angle: sample.angle + rng.gen_range(-0.3..=0.3),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CanvasOp {
    Stroke(Stroke),
    Clear,
}

fn apply(strokes: &mut Vec<Stroke>, op: &CanvasOp) {
    match op {
        CanvasOp::Stroke(stroke) => strokes.push(stroke.clone()),
        CanvasOp::Clear => strokes.clear(),
    }
}

/// Undo/redo over an operation log.
///
/// At most `max_depth` operations stay undoable; older ones are folded into
/// the committed base layer.
#[derive(Debug, Clone)]
pub struct CanvasHistory {
    committed: Vec<Stroke>,
    ops: Vec<CanvasOp>,
    redo: Vec<CanvasOp>,
    max_depth: usize,
}

impl Default for CanvasHistory {
    fn default() -> Self {
        CanvasHistory::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl CanvasHistory {
    pub fn new(max_depth: usize) -> Self {
        CanvasHistory {
            committed: Vec::new(),
            ops: Vec::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.record(CanvasOp::Stroke(stroke));
    }

    pub fn clear(&mut self) {
        if !self.visible_strokes().is_empty() {
            self.record(CanvasOp::Clear);
        }
    }

    fn record(&mut self, op: CanvasOp) {
        self.redo.clear();
        self.ops.push(op);
        while self.ops.len() > self.max_depth {
            let oldest = self.ops.remove(0);
            apply(&mut self.committed, &oldest);
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.ops.pop() {
            Some(op) => {
                self.redo.push(op);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(op) => {
                self.ops.push(op);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.ops.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Replays the committed layer and live operations into the strokes
    /// currently on the canvas, oldest first.
    pub fn visible_strokes(&self) -> Vec<Stroke> {
        let mut strokes = self.committed.clone();
        for op in &self.ops {
            apply(&mut strokes, op);
        }
        strokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn stroke(brush: Brush, points: &[(f64, f64)]) -> Stroke {
        let mut builder = StrokeBuilder::begin(brush, "#8b3a1a", 8.0);
        for &(x, y) in points {
            builder.add_point(Point::new(x, y));
        }
        builder.finish().unwrap()
    }

    fn line(tag: f64) -> Stroke {
        stroke(Brush::Pen, &[(tag, 0.0), (tag, 10.0)])
    }

    #[test]
    fn test_builder_drops_repeated_samples() {
        let mut builder = StrokeBuilder::begin(Brush::Pen, "#000", 2.0);
        builder.add_point(Point::new(1.0, 1.0));
        builder.add_point(Point::new(1.0, 1.0));
        builder.add_point(Point::new(2.0, 1.0));

        assert_eq!(builder.finish().unwrap().points.len(), 2);
        assert!(StrokeBuilder::begin(Brush::Pen, "#000", 2.0).finish().is_none());
    }

    #[test]
    fn test_pen_marks_are_segments() {
        let marks = brush_marks(
            &stroke(Brush::Pen, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            &mut StdRng::seed_from_u64(1),
        );

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[1].shape, MarkShape::Line { x2: 10.0, y2: 10.0 });
    }

    #[test]
    fn test_chalk_scatters_near_the_path() {
        let path = stroke(Brush::Chalk, &[(0.0, 0.0), (40.0, 0.0)]);
        let marks = brush_marks(&path, &mut StdRng::seed_from_u64(9));

        assert!(!marks.is_empty());
        assert_eq!(marks.len() % 3, 0);
        for mark in &marks {
            assert_eq!(mark.shape, MarkShape::Dot);
            assert!(mark.y.abs() <= 4.0 + 1e-9);
            assert!(mark.x >= -4.0 - 1e-9 && mark.x <= 44.0 + 1e-9);
        }
    }

    #[test]
    fn test_stone_chisel_chips_sit_beside_the_line() {
        let path = stroke(Brush::StoneChisel, &[(0.0, 0.0), (0.0, 80.0)]);
        let marks = brush_marks(&path, &mut StdRng::seed_from_u64(4));

        assert_eq!(marks.len(), 11);
        for mark in &marks {
            assert_eq!(mark.shape, MarkShape::Chip);
            assert!(mark.x.abs() <= 4.0 + 1e-9);
        }
    }

    #[rstest]
    #[case(Brush::Pen)]
    #[case(Brush::Chalk)]
    #[case(Brush::StoneChisel)]
    #[case(Brush::Ochre)]
    #[case(Brush::Charcoal)]
    fn test_brush_marks_are_deterministic_per_seed(#[case] brush: Brush) {
        let path = stroke(brush, &[(0.0, 0.0), (30.0, 15.0), (60.0, 0.0)]);
        let first = brush_marks(&path, &mut StdRng::seed_from_u64(42));
        let second = brush_marks(&path, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
        assert!(first.iter().all(|m| m.alpha > 0.0 && m.alpha <= 1.0));
    }

    #[test]
    fn test_single_point_stroke_leaves_a_mark() {
        for brush in [Brush::Pen, Brush::Ochre, Brush::Charcoal] {
            let marks = brush_marks(&stroke(brush, &[(5.0, 5.0)]), &mut StdRng::seed_from_u64(1));
            assert!(!marks.is_empty());
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_unusable_width_falls_back_to_minimum(#[case] width: f64) {
        for brush in [Brush::Pen, Brush::Chalk, Brush::StoneChisel, Brush::Ochre, Brush::Charcoal] {
            let path = Stroke {
                brush,
                color: "#000".to_string(),
                width,
                points: vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0)],
            };

            let marks = brush_marks(&path, &mut StdRng::seed_from_u64(3));

            assert!(!marks.is_empty());
            assert!(marks.iter().all(|m| m.size.is_finite() && m.size > 0.0));
        }
    }

    #[test]
    fn test_deserialized_zero_width_stroke_terminates() {
        let path: Stroke = serde_json::from_str(
            r##"{"brush":"chalk","color":"#000","width":0.0,"points":[{"x":0.0,"y":0.0},{"x":40.0,"y":0.0}]}"##,
        )
        .unwrap();

        let marks = brush_marks(&path, &mut StdRng::seed_from_u64(3));

        // 0.25px spacing over 40px, three dots per sample
        assert_eq!(marks.len(), (160 + 1) * 3);
    }

    #[test]
    fn test_huge_segment_sampling_is_capped() {
        let path = Stroke {
            brush: Brush::Ochre,
            color: "#000".to_string(),
            width: 1.0,
            points: vec![Point::new(0.0, 0.0), Point::new(1e12, 0.0)],
        };

        let marks = brush_marks(&path, &mut StdRng::seed_from_u64(3));

        assert_eq!(marks.len(), MAX_SAMPLES_PER_SEGMENT + 1);
    }

    #[test]
    fn test_undo_redo() {
        let mut history = CanvasHistory::default();
        history.push(line(1.0));
        history.push(line(2.0));

        assert!(history.undo());
        assert_eq!(history.visible_strokes(), vec![line(1.0)]);
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.visible_strokes(), vec![line(1.0), line(2.0)]);
        assert!(!history.redo());
    }

    #[test]
    fn test_new_stroke_discards_redo() {
        let mut history = CanvasHistory::default();
        history.push(line(1.0));
        history.undo();
        history.push(line(3.0));

        assert!(!history.can_redo());
        assert_eq!(history.visible_strokes(), vec![line(3.0)]);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut history = CanvasHistory::default();
        history.push(line(1.0));
        history.clear();
        assert!(history.visible_strokes().is_empty());

        history.undo();
        assert_eq!(history.visible_strokes(), vec![line(1.0)]);
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = CanvasHistory::new(3);
        for i in 0..5 {
            history.push(line(i as f64));
        }

        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }

        assert_eq!(undone, 3);
        assert_eq!(history.visible_strokes(), vec![line(0.0), line(1.0)]);
    }
}
