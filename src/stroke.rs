use egui::{Pos2, Rect};

use crate::config::StrokeSettings;

/// Drag state of the canvas.
///
/// ```text
///  ┌──────┐  trigger active + point  ┌──────────┐
///  │ Idle ├─────────────────────────►│ Dragging │◄─┐ next sample
///  │      │◄─────────────────────────┤          ├──┘
///  └──────┘  released / no hit       └──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Dragging {
        last_point: Pos2,
    },
}

impl StrokeState {
    pub fn last_point(&self) -> Option<Pos2> {
        match self {
            Self::Dragging { last_point } => Some(*last_point),
            Self::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

pub fn is_finite(point: Pos2) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Points to rasterize for one pointer sample.
///
/// Without a previous sample, or when the pointer barely moved, this is just
/// `current`. Otherwise the segment is clipped to `bounds`, split into
/// `ceil(length / spacing)` steps, and the points at `i / steps` for `i` in
/// `1..=steps` are produced. The previous sample itself is not repeated since
/// it was painted on the last tick. When clipping moved the start, the entry
/// point is produced as well. Non-finite points are dropped.
pub fn interpolate(last: Option<Pos2>, current: Pos2, settings: &StrokeSettings, bounds: Rect) -> StrokeSegment {
    let Some(from) = last else {
        return StrokeSegment::single(current);
    };

    let distance = from.distance(current);
    if !distance.is_finite() || distance <= settings.min_distance {
        return StrokeSegment::single(current);
    }

    let Some((t0, t1)) = clip(from, current, bounds) else {
        return StrokeSegment::empty();
    };
    let delta = current - from;
    let start = if t0 > 0.0 { from + delta * t0 } else { from };
    let end = if t1 < 1.0 { from + delta * t1 } else { current };

    let spacing = if settings.spacing > 0.0 { settings.spacing } else { 1.0 };
    let steps = (start.distance(end) / spacing).ceil().max(1.0) as usize;
    StrokeSegment {
        from: start,
        to: end,
        next_step: if t0 > 0.0 { 0 } else { 1 },
        steps,
    }
}

/// Parameter range of `from -> to` that lies inside `bounds` (Liang-Barsky).
fn clip(from: Pos2, to: Pos2, bounds: Rect) -> Option<(f32, f32)> {
    let delta = to - from;
    let edges = [
        (-delta.x, from.x - bounds.min.x),
        (delta.x, bounds.max.x - from.x),
        (-delta.y, from.y - bounds.min.y),
        (delta.y, bounds.max.y - from.y),
    ];

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

/// Lazy sequence of interpolated stroke points.
#[derive(Debug, Clone)]
pub struct StrokeSegment {
    from: Pos2,
    to: Pos2,
    next_step: usize,
    steps: usize,
}

impl StrokeSegment {
    fn single(point: Pos2) -> Self {
        Self {
            from: point,
            to: point,
            next_step: 1,
            steps: 1,
        }
    }

    fn empty() -> Self {
        Self {
            steps: 0,
            ..Self::single(Pos2::ZERO)
        }
    }
}

impl Iterator for StrokeSegment {
    type Item = Pos2;

    fn next(&mut self) -> Option<Pos2> {
        while self.next_step <= self.steps {
            let t = self.next_step as f32 / self.steps as f32;
            self.next_step += 1;

            let point = if t >= 1.0 { self.to } else { self.from.lerp(self.to, t) };
            if is_finite(point) {
                return Some(point);
            }
            log::warn!("Discarding non-finite stroke point {:?}", point);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next_step);
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn settings() -> StrokeSettings {
        StrokeSettings::default()
    }

    fn bounds() -> Rect {
        Rect::from_min_max(pos2(-1000.0, -1000.0), pos2(1000.0, 1000.0))
    }

    #[test]
    fn test_no_previous_point_yields_current() {
        let points: Vec<_> = interpolate(None, pos2(3.5, 7.0), &settings(), bounds()).collect();
        assert_eq!(points, vec![pos2(3.5, 7.0)]);
    }

    #[test]
    fn test_small_motion_skips_interpolation() {
        let points: Vec<_> = interpolate(Some(pos2(10.0, 10.0)), pos2(10.5, 10.5), &settings(), bounds()).collect();
        assert_eq!(points, vec![pos2(10.5, 10.5)]);

        // Exactly at the threshold is still stationary
        let points: Vec<_> = interpolate(Some(pos2(0.0, 0.0)), pos2(1.0, 0.0), &settings(), bounds()).collect();
        assert_eq!(points, vec![pos2(1.0, 0.0)]);
    }

    #[test]
    fn test_long_drag_is_filled() {
        let points: Vec<_> = interpolate(Some(pos2(0.0, 0.0)), pos2(100.0, 0.0), &settings(), bounds()).collect();

        assert_eq!(points.len(), 10);
        assert_ne!(points[0], pos2(0.0, 0.0));
        assert!(points[0].distance(pos2(10.0, 0.0)) < 1e-4);
        assert_eq!(*points.last().unwrap(), pos2(100.0, 0.0));
        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_points_lie_on_segment() {
        let (a, b) = (pos2(3.0, 4.0), pos2(57.0, -29.0));
        let direction = (b - a).normalized();
        let points: Vec<_> = interpolate(Some(a), b, &settings(), bounds()).collect();

        assert_eq!(points.len(), (a.distance(b) / 10.0).ceil() as usize);
        for p in points {
            let offset = p - a;
            let cross = offset.x * direction.y - offset.y * direction.x;
            assert!(cross.abs() < 1e-3, "{p:?} is off the line");
        }
    }

    #[test]
    fn test_non_finite_points_are_dropped() {
        let nan = pos2(f32::NAN, 4.0);
        assert_eq!(interpolate(None, nan, &settings(), bounds()).count(), 0);
        assert_eq!(interpolate(Some(pos2(0.0, 0.0)), nan, &settings(), bounds()).count(), 0);
        assert_eq!(
            interpolate(Some(pos2(0.0, 0.0)), pos2(f32::INFINITY, 0.0), &settings(), bounds()).count(),
            0
        );
    }

    #[test]
    fn test_custom_spacing() {
        let custom = StrokeSettings {
            spacing: 2.0,
            min_distance: 1.0,
        };
        let points: Vec<_> = interpolate(Some(pos2(0.0, 0.0)), pos2(0.0, 9.0), &custom, bounds()).collect();
        assert_eq!(points.len(), 5);
        assert_eq!(*points.last().unwrap(), pos2(0.0, 9.0));
    }

    #[test]
    fn test_far_point_is_clipped_to_bounds() {
        let canvas = Rect::from_min_max(pos2(-5.0, -5.0), pos2(69.0, 69.0));
        let points: Vec<_> = interpolate(Some(pos2(10.0, 10.0)), pos2(1e10, 10.0), &settings(), canvas).collect();

        assert!(!points.is_empty());
        assert!(points.len() <= 8, "{} points", points.len());
        assert!(points.iter().all(|p| canvas.expand(1e-3).contains(*p)));
        assert!((points.last().unwrap().x - 69.0).abs() < 1e-2);

        let huge = interpolate(Some(pos2(10.0, 10.0)), pos2(1e30, 10.0), &settings(), canvas);
        assert!(huge.count() <= 8);
    }

    #[test]
    fn test_segment_entering_bounds_includes_entry_point() {
        let canvas = Rect::from_min_max(pos2(0.0, 0.0), pos2(64.0, 64.0));
        let points: Vec<_> = interpolate(Some(pos2(-500.0, 32.0)), pos2(20.0, 32.0), &settings(), canvas).collect();

        assert!(points[0].distance(pos2(0.0, 32.0)) < 1e-3);
        assert_eq!(*points.last().unwrap(), pos2(20.0, 32.0));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_segment_outside_bounds_is_empty() {
        let canvas = Rect::from_min_max(pos2(0.0, 0.0), pos2(64.0, 64.0));
        let points = interpolate(Some(pos2(-500.0, -10.0)), pos2(500.0, -10.0), &settings(), canvas);
        assert_eq!(points.count(), 0);
    }

    #[test]
    fn test_state_last_point() {
        assert_eq!(StrokeState::Idle.last_point(), None);
        let dragging = StrokeState::Dragging {
            last_point: pos2(1.0, 2.0),
        };
        assert!(dragging.is_dragging());
        assert_eq!(dragging.last_point(), Some(pos2(1.0, 2.0)));
    }
}
