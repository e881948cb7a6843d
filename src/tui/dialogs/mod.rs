//! TUI dialog components

mod confirm;
mod new_task;

pub use confirm::ConfirmDialog;
pub use new_task::NewTaskDialog;

use ratatui::layout::Rect;

pub enum DialogResult<T> {
    Continue,
    Cancel,
    Submit(T),
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 50, 10), Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(2, 1, 30, 8);
        assert_eq!(centered_rect(area, 50, 10), Rect::new(2, 1, 30, 8));
    }
}
