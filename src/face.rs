// ============================================================================
// CLOCK FACE
// ============================================================================

use crate::config::ClockStyle;
use crate::measure::{scale_for_radius, Measurement};
use crate::scene::{DrawCommand, Scene};
use crate::text::TextMetrics;
use crate::time::TimeSample;

/// Hour digits in drawing order; index 0 sits at 3 o'clock (0° on the x axis).
pub const HOUR_LABELS: [u8; 12] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2];

pub const TICK_COUNT: usize = 60;

/// Ring inset in pixels; unlike the other offsets it does not scale.
const OUTER_RING_INSET: f64 = 5.0;

// Offsets in face units; multiplied by the scale at render time.
const LABEL_INSET: f64 = 40.0;
const TICK_INSET: f64 = 20.0;
const HOUR_POINTER_INSET: f64 = 80.0;
const HOUR_POINTER_TAIL: f64 = 20.0;
const MINUTE_POINTER_INSET: f64 = 70.0;
const MINUTE_POINTER_TAIL: f64 = 40.0;
const SECOND_POINTER_INSET: f64 = 40.0;
const SECOND_POINTER_TAIL: f64 = 60.0;
const SECOND_POINTER_HALF_WIDTH: f64 = 5.0;

/// Ticks on the hour positions get the heavier paint.
pub fn is_major_tick(index: usize) -> bool {
    index % 5 == 0
}

/// An analog clock face of a given radius. The scale factor always
/// follows the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    radius: f64,
    scale: f64,
    style: ClockStyle,
}

impl ClockFace {
    pub fn new(radius: f64, style: ClockStyle) -> Self {
        let mut face = Self {
            radius: 0.0,
            scale: 0.0,
            style,
        };
        face.set_radius(radius);
        face
    }

    pub fn from_measurement(measurement: &Measurement, style: ClockStyle) -> Self {
        Self::new(measurement.radius as f64, style)
    }

    /// Assigns a new radius. Negative or non-finite values clamp to zero.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        self.scale = scale_for_radius(self.radius);
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.radius <= 0.0
    }

    /// Builds the frame for `time`. The face occupies the square
    /// `[0, 2r] x [0, 2r]`; an empty face yields an empty scene.
    pub fn render(&self, time: TimeSample, metrics: &dyn TextMetrics) -> Scene {
        let mut scene = Scene::new();
        if self.is_empty() {
            return scene;
        }

        scene.add_command(DrawCommand::Save);
        scene.add_command(DrawCommand::Translate {
            dx: self.radius,
            dy: self.radius,
        });
        self.add_outer_ring(&mut scene);
        self.add_hour_labels(&mut scene, metrics);
        self.add_ticks(&mut scene);
        self.add_hour_pointer(&mut scene, time);
        self.add_minute_pointer(&mut scene, time);
        self.add_second_pointer(&mut scene, time);
        self.add_center_dot(&mut scene);
        scene.add_command(DrawCommand::Restore);

        log::trace!(
            "rendered {:?} at radius {} into {} commands",
            time,
            self.radius,
            scene.len()
        );
        scene
    }

    fn add_outer_ring(&self, scene: &mut Scene) {
        let stroke = self.style.outer_ring.scaled(self.scale);
        scene.add_command(DrawCommand::Circle {
            cx: 0.0,
            cy: 0.0,
            radius: (self.radius - OUTER_RING_INSET).max(0.0),
            stroke,
        });
    }

    fn add_hour_labels(&self, scene: &mut Scene, metrics: &dyn TextMetrics) {
        let label_radius = self.radius - LABEL_INSET * self.scale;
        let size = self.style.label_size * self.scale;
        for (index, hour) in HOUR_LABELS.iter().enumerate() {
            let angle = (30.0 * index as f64).to_radians();
            let text = hour.to_string();
            let height = metrics.text_height(&text, size);
            scene.add_command(DrawCommand::Text {
                x: label_radius * angle.cos(),
                y: label_radius * angle.sin() + height / 2.0,
                text,
                size,
                color: self.style.label_color,
            });
        }
    }

    fn add_ticks(&self, scene: &mut Scene) {
        let tick_radius = self.radius - TICK_INSET * self.scale;
        let major = self.style.major_tick.scaled(self.scale);
        let minor = self.style.minor_tick.scaled(self.scale);
        for index in 0..TICK_COUNT {
            let stroke = if is_major_tick(index) { major } else { minor };
            scene.rotated(6.0 * index as f64, |scene| {
                scene.add_command(DrawCommand::Point {
                    x: 0.0,
                    y: -tick_radius,
                    stroke,
                });
            });
        }
    }

    fn add_hour_pointer(&self, scene: &mut Scene, time: TimeSample) {
        let stroke = self.style.hour_pointer.scaled(self.scale);
        let tip = self.radius - HOUR_POINTER_INSET * self.scale;
        let tail = HOUR_POINTER_TAIL * self.scale;
        scene.rotated(time.hour_angle(), |scene| {
            scene.add_command(DrawCommand::Line {
                x0: 0.0,
                y0: -tip,
                x1: 0.0,
                y1: tail,
                stroke,
            });
        });
    }

    fn add_minute_pointer(&self, scene: &mut Scene, time: TimeSample) {
        let stroke = self.style.minute_pointer.scaled(self.scale);
        let tip = self.radius - MINUTE_POINTER_INSET * self.scale;
        let tail = MINUTE_POINTER_TAIL * self.scale;
        scene.rotated(time.minute_angle(), |scene| {
            scene.add_command(DrawCommand::Line {
                x0: 0.0,
                y0: -tip,
                x1: 0.0,
                y1: tail,
                stroke,
            });
        });
    }

    fn add_second_pointer(&self, scene: &mut Scene, time: TimeSample) {
        let tip = self.radius - SECOND_POINTER_INSET * self.scale;
        let tail = SECOND_POINTER_TAIL * self.scale;
        let half_width = SECOND_POINTER_HALF_WIDTH * self.scale;
        let fill = self.style.second_pointer;
        scene.rotated(time.second_angle(), |scene| {
            scene.add_command(DrawCommand::Polygon {
                points: vec![(0.0, -tip), (half_width, tail), (-half_width, tail)],
                fill,
            });
        });
    }

    fn add_center_dot(&self, scene: &mut Scene) {
        scene.add_command(DrawCommand::Point {
            x: 0.0,
            y: 0.0,
            stroke: self.style.center_dot.scaled(self.scale),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::scene::Affine;
    use crate::text::ApproximateMetrics;

    fn face(radius: f64) -> ClockFace {
        ClockFace::new(radius, ClockStyle::default())
    }

    fn at(h: u32, m: u32, s: u32) -> TimeSample {
        TimeSample::new(h, m, s).unwrap()
    }

    /// Drawables of a scene mapped to screen space.
    fn drawn(scene: &Scene) -> Vec<(Affine, DrawCommand)> {
        let mut out = Vec::new();
        scene.for_each_transformed(Affine::IDENTITY, |m, cmd| out.push((*m, cmd.clone())));
        out
    }

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
    }

    #[test]
    fn scale_follows_radius() {
        let mut f = face(200.0);
        assert_eq!(f.scale(), 1.0);
        f.set_radius(50.0);
        assert_eq!(f.scale(), 0.25);
        f.set_radius(-3.0);
        assert_eq!(f.radius(), 0.0);
        assert_eq!(f.scale(), 0.0);
        f.set_radius(f64::NAN);
        assert!(f.is_empty());
    }

    #[test]
    fn empty_face_draws_nothing() {
        assert!(face(0.0).render(at(1, 2, 3), &ApproximateMetrics).is_empty());
    }

    #[test]
    fn draw_order_ends_with_center_dot() {
        let scene = face(200.0).render(at(0, 0, 0), &ApproximateMetrics);
        let items = drawn(&scene);
        // ring + 12 labels + 60 ticks + 3 pointers + center dot
        assert_eq!(items.len(), 1 + 12 + 60 + 3 + 1);
        assert!(matches!(items[0].1, DrawCommand::Circle { .. }));
        match &items.last().unwrap().1 {
            DrawCommand::Point { x, y, stroke } => {
                assert_eq!((*x, *y), (0.0, 0.0));
                assert_eq!(stroke.color, Color::WHITE);
            }
            other => panic!("expected center dot, got {other:?}"),
        }
        assert_eq!(scene.commands().first(), Some(&DrawCommand::Save));
        assert_eq!(scene.commands().last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn base_offsets_at_unit_scale() {
        let scene = face(200.0).render(at(0, 0, 0), &ApproximateMetrics);
        let items = drawn(&scene);

        match &items[0].1 {
            DrawCommand::Circle { radius, stroke, .. } => {
                assert_eq!(*radius, 195.0);
                assert_eq!(stroke.width, 10.0);
            }
            other => panic!("unexpected {other:?}"),
        }

        let lines: Vec<_> = items
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Line { y0, y1, .. } => Some((*y0, *y1)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![(-120.0, 20.0), (-130.0, 40.0)]);

        let polygon = items
            .iter()
            .find_map(|(_, c)| match c {
                DrawCommand::Polygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(polygon, vec![(0.0, -160.0), (5.0, 60.0), (-5.0, 60.0)]);
    }

    #[test]
    fn outer_ring_inset_is_fixed() {
        let ring = |radius: f64| {
            face(radius)
                .render(at(0, 0, 0), &ApproximateMetrics)
                .commands()
                .iter()
                .find_map(|c| match c {
                    DrawCommand::Circle { radius, stroke, .. } => Some((*radius, stroke.width)),
                    _ => None,
                })
        };
        assert_eq!(ring(100.0), Some((95.0, 5.0)));
        assert_eq!(ring(400.0), Some((395.0, 20.0)));
        assert_eq!(ring(3.0).map(|(radius, _)| radius), Some(0.0));
    }

    #[test]
    fn offsets_shrink_with_scale() {
        let scene = face(100.0).render(at(0, 0, 0), &ApproximateMetrics);
        let line = scene.commands().iter().find_map(|c| match c {
            DrawCommand::Line { y0, y1, stroke, .. } => Some((*y0, *y1, stroke.width)),
            _ => None,
        });
        assert_eq!(line, Some((-60.0, 10.0, 5.0)));
    }

    #[test]
    fn every_fifth_tick_is_major() {
        let style = ClockStyle::builder()
            .major_tick(crate::config::Stroke::new(Color::BLACK, 8.0))
            .minor_tick(crate::config::Stroke::new(Color::GRAY, 8.0))
            .build();
        let scene = ClockFace::new(200.0, style).render(at(0, 0, 0), &ApproximateMetrics);
        let ticks: Vec<_> = drawn(&scene)
            .into_iter()
            .filter_map(|(m, c)| match c {
                DrawCommand::Point { x, y, stroke } if y != 0.0 => Some((m.apply(x, y), stroke)),
                _ => None,
            })
            .collect();
        assert_eq!(ticks.len(), TICK_COUNT);
        for (index, (_, stroke)) in ticks.iter().enumerate() {
            let expected = if index % 5 == 0 { Color::BLACK } else { Color::GRAY };
            assert_eq!(stroke.color, expected, "tick {index}");
        }
        assert_eq!(ticks.iter().filter(|(_, s)| s.color == Color::BLACK).count(), 12);
        // radius 180 around the center at (200, 200); tick 15 is 3 o'clock
        assert!(close(ticks[0].0, (200.0, 20.0)));
        assert!(close(ticks[15].0, (380.0, 200.0)));
        assert!(close(ticks[30].0, (200.0, 380.0)));
    }

    #[test]
    fn labels_start_at_three_oclock() {
        let scene = face(200.0).render(at(0, 0, 0), &ApproximateMetrics);
        let labels: Vec<_> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, text, size, .. } => Some((*x, *y, text.clone(), *size)),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 12);
        let lift = ApproximateMetrics.text_height("3", 36.0) / 2.0;
        let (x, y, text, size) = &labels[0];
        assert_eq!(text, "3");
        assert_eq!(*size, 36.0);
        assert!(close((*x, *y), (160.0, lift)));
        let (x, y, text, _) = &labels[3];
        assert_eq!(text, "6");
        assert!(close((*x, *y), (0.0, 160.0 + lift)));
        assert_eq!(labels[9].2, "12");
        assert!(close((labels[9].0, labels[9].1), (0.0, -160.0 + lift)));
    }

    #[test]
    fn pointers_rotate_with_time() {
        let scene = face(200.0).render(at(3, 0, 30), &ApproximateMetrics);
        let rotations: Vec<f64> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rotate { degrees } => Some(*degrees),
                _ => None,
            })
            .collect();
        // 60 ticks, then hour, minute, second
        assert_eq!(rotations.len(), TICK_COUNT + 3);
        assert_eq!(&rotations[TICK_COUNT..], &[90.0, 3.0, 180.0]);

        let items = drawn(&scene);
        let tip = items
            .iter()
            .find_map(|(m, c)| match c {
                DrawCommand::Polygon { points, .. } => Some(m.apply(points[0].0, points[0].1)),
                _ => None,
            })
            .unwrap();
        // second 30 -> straight down from the center at (200, 200)
        assert!(close(tip, (200.0, 360.0)));

        let hour_tip = items
            .iter()
            .find_map(|(m, c)| match c {
                DrawCommand::Line { x0, y0, .. } => Some(m.apply(*x0, *y0)),
                _ => None,
            })
            .unwrap();
        assert!(close(hour_tip, (320.0, 200.0)));
    }
}
