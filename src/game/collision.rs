/// Axis-aligned hitboxes for wizard, enemies, projectiles and effect volumes.
use crate::protocol::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect of the given size centred on `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Rect of the given size standing with its bottom edge centred on `foot`.
    pub fn standing(foot: Vec2, width: f32, height: f32) -> Self {
        Self::new(foot.x - width / 2.0, foot.y - height, width, height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap: rects that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// True when the rect lies entirely outside the screen grown by `margin`.
    pub fn is_offscreen(&self, screen_w: f32, screen_h: f32, margin: f32) -> bool {
        self.right() < -margin
            || self.left > screen_w + margin
            || self.bottom() < -margin
            || self.top > screen_h + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn standing_rect_sits_on_foot() {
        let r = Rect::standing(Vec2::new(100.0, 670.0), 60.0, 60.0);
        assert_eq!(r.left, 70.0);
        assert_eq!(r.bottom(), 670.0);
        assert_eq!(r.center(), Vec2::new(100.0, 640.0));
    }

    #[test]
    fn offscreen_respects_margin() {
        let r = Rect::centered(Vec2::new(-40.0, 300.0), 20.0, 20.0);
        assert!(!r.is_offscreen(1280.0, 720.0, 50.0));
        assert!(r.is_offscreen(1280.0, 720.0, 20.0));
    }
}
