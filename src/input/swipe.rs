use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

/// Translate a drag displacement into a direction.
///
/// Displacements shorter than `threshold` on both axes are ignored. The
/// horizontal axis wins only when its magnitude is strictly larger.
pub fn swipe_direction(dx: i32, dy: i32, threshold: u16) -> Option<Direction> {
    let threshold = i32::from(threshold);
    if dx.abs() < threshold && dy.abs() < threshold {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

/// Turns left-button mouse drags into swipes
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold: u16,
    origin: Option<(u16, u16)>,
}

impl SwipeDetector {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    pub fn begin(&mut self, column: u16, row: u16) {
        self.origin = Some((column, row));
    }

    /// Finish a drag started by `begin`
    pub fn finish(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_column, start_row) = self.origin.take()?;
        let dx = i32::from(column) - i32::from(start_column);
        let dy = i32::from(row) - i32::from(start_row);
        swipe_direction(dx, dy, self.threshold)
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.begin(event.column, event.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.finish(event.column, event.row),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_short_swipe_ignored() {
        assert_eq!(swipe_direction(1, -1, 2), None);
        assert_eq!(swipe_direction(0, 0, 2), None);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(swipe_direction(5, 1, 2), Some(Direction::Right));
        assert_eq!(swipe_direction(-5, 3, 2), Some(Direction::Left));
        assert_eq!(swipe_direction(1, 4, 2), Some(Direction::Down));
        assert_eq!(swipe_direction(0, -2, 2), Some(Direction::Up));
    }

    #[test]
    fn test_tie_goes_vertical() {
        assert_eq!(swipe_direction(3, 3, 2), Some(Direction::Down));
        assert_eq!(swipe_direction(-3, -3, 2), Some(Direction::Up));
    }

    #[test]
    fn test_mouse_drag() {
        let mut detector = SwipeDetector::new(2);

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 10, 10);
        assert_eq!(detector.handle_mouse_event(down), None);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 11);
        assert_eq!(detector.handle_mouse_event(up), Some(Direction::Left));

        // Release without a press is ignored
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 20, 10);
        assert_eq!(detector.handle_mouse_event(up), None);
    }
}
