//! Touch-style swipe recognition
//!
//! A gesture is the pair of points where contact started and ended. The
//! dominant axis decides between a horizontal and a vertical turn, and the
//! drag has to cover more than the threshold along that axis to count.

use crate::game::Direction;

/// A contact point in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Turn a completed gesture into a direction, if it is long enough
///
/// Displacement is measured as `start - end`, so dragging towards the left
/// edge gives a positive `dx` and maps to [`Direction::Left`]; dragging upwards
/// gives a positive `dy` and maps to [`Direction::Up`]. When both axes moved
/// equally far the gesture is treated as vertical.
pub fn classify_swipe(start: TouchPoint, end: TouchPoint, threshold: f32) -> Option<Direction> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;

    if dx.abs() > dy.abs() {
        if dx.abs() <= threshold {
            return None;
        }
        Some(if dx > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        })
    } else {
        if dy.abs() <= threshold {
            return None;
        }
        Some(if dy > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

/// Remembers where the current gesture began
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<TouchPoint>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Contact began at `point`
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
    }

    /// Contact ended at `point`; yields a direction for a valid swipe
    pub fn finish(&mut self, point: TouchPoint) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, point, self.threshold)
    }

    /// Forget a gesture in progress
    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(from: (f32, f32), to: (f32, f32)) -> Option<Direction> {
        classify_swipe(
            TouchPoint::new(from.0, from.1),
            TouchPoint::new(to.0, to.1),
            30.0,
        )
    }

    #[test]
    fn test_horizontal_swipes() {
        assert_eq!(swipe((100.0, 100.0), (40.0, 110.0)), Some(Direction::Left));
        assert_eq!(swipe((100.0, 100.0), (160.0, 90.0)), Some(Direction::Right));
    }

    #[test]
    fn test_vertical_swipes() {
        assert_eq!(swipe((100.0, 100.0), (105.0, 40.0)), Some(Direction::Up));
        assert_eq!(swipe((100.0, 100.0), (95.0, 160.0)), Some(Direction::Down));
    }

    #[test]
    fn test_short_drags_are_ignored() {
        assert_eq!(swipe((100.0, 100.0), (75.0, 100.0)), None);
        assert_eq!(swipe((100.0, 100.0), (100.0, 130.0)), None);
        assert_eq!(swipe((100.0, 100.0), (100.0, 100.0)), None);
        assert_eq!(swipe((100.0, 100.0), (131.0, 100.0)), Some(Direction::Right));
    }

    #[test]
    fn test_dominant_axis_decides() {
        // long diagonal leaning horizontal
        assert_eq!(swipe((0.0, 0.0), (-80.0, 79.0)), Some(Direction::Left));
        // exact diagonal counts as vertical
        assert_eq!(swipe((0.0, 0.0), (50.0, 50.0)), Some(Direction::Down));
    }

    #[test]
    fn test_threshold_applies_to_dominant_axis_only() {
        // both axes under threshold even though the total distance is larger
        assert_eq!(swipe((0.0, 0.0), (25.0, 20.0)), None);
    }

    #[test]
    fn test_tracker_needs_a_start() {
        let mut tracker = SwipeTracker::new(30.0);
        assert_eq!(tracker.finish(TouchPoint::new(0.0, 0.0)), None);

        tracker.begin(TouchPoint::new(200.0, 50.0));
        assert!(tracker.in_progress());
        assert_eq!(
            tracker.finish(TouchPoint::new(100.0, 50.0)),
            Some(Direction::Left)
        );
        assert!(!tracker.in_progress());

        tracker.begin(TouchPoint::new(0.0, 0.0));
        tracker.cancel();
        assert_eq!(tracker.finish(TouchPoint::new(0.0, 100.0)), None);
    }
}
