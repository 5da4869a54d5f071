// Pointer input as a stream of events.
// minifb only reports "where is the mouse" and "is the button down" each frame;
// PointerTracker diffs consecutive polls into press/move/release/leave events.

use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    /// Pointer left the surface; carries the last position seen inside it.
    Leave(Point),
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last: Option<Point>, // None while the pointer is outside the surface
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn one poll of the window into zero or more events, in the order they happened.
    /// `pos` is None when the pointer is outside the surface.
    pub fn poll(&mut self, pos: Option<(f32, f32)>, down: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        let Some((fx, fy)) = pos else {
            if let Some(last) = self.last.take() {
                events.push(PointerEvent::Leave(last));
            }
            self.was_down = down;
            return events;
        };

        let p = Point::new(fx.floor() as i32, fy.floor() as i32);
        let moved = self.last != Some(p);

        match (self.was_down, down) {
            (false, true) => events.push(PointerEvent::Press(p)),
            (true, false) => {
                if moved {
                    events.push(PointerEvent::Move(p));
                }
                events.push(PointerEvent::Release(p));
            }
            _ if moved => events.push(PointerEvent::Move(p)),
            _ => {}
        }

        self.was_down = down;
        self.last = Some(p);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointerEvent::*;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn press_drag_release() {
        let mut t = PointerTracker::new();
        assert_eq!(t.poll(Some((10.0, 10.0)), false), vec![Move(pt(10, 10))]);
        assert_eq!(t.poll(Some((10.0, 10.0)), true), vec![Press(pt(10, 10))]);
        assert_eq!(t.poll(Some((12.7, 10.2)), true), vec![Move(pt(12, 10))]);
        assert!(t.poll(Some((12.1, 10.9)), true).is_empty(), "same pixel, no event");
        assert_eq!(t.poll(Some((15.0, 11.0)), false), vec![Move(pt(15, 11)), Release(pt(15, 11))]);
        assert!(t.poll(Some((15.0, 11.0)), false).is_empty());
    }

    #[test]
    fn leaving_reports_last_position_once() {
        let mut t = PointerTracker::new();
        t.poll(Some((5.0, 5.0)), true);
        assert_eq!(t.poll(None, true), vec![Leave(pt(5, 5))]);
        assert!(t.poll(None, true).is_empty());
        // Coming back with the button still held is a plain move.
        assert_eq!(t.poll(Some((6.0, 5.0)), true), vec![Move(pt(6, 5))]);
    }

    #[test]
    fn outside_from_the_start_is_silent() {
        let mut t = PointerTracker::new();
        assert!(t.poll(None, false).is_empty());
        assert!(t.poll(None, true).is_empty());
    }
}
