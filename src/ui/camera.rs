/// Camera / viewport: which part of the board is on screen.
///
/// `(x, y)` is the grid cell shown at the top-left of the viewport,
/// `(view_w, view_h)` how many grid cells fit. The renderer sizes the view
/// from the terminal every frame; when the whole board fits, the camera
/// stays at the origin.

#[derive(Clone, Debug, Default)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub view_w: usize,
    pub view_h: usize,
}

impl Camera {
    pub fn new() -> Self {
        Camera::default()
    }

    /// Size the viewport, capped to the board so no space is wasted.
    pub fn fit(&mut self, avail_w: usize, avail_h: usize, cols: usize, rows: usize) {
        self.view_w = avail_w.min(cols);
        self.view_h = avail_h.min(rows);
    }

    /// Dead-zone follow: scroll only when the target gets within 20% of an
    /// edge of the viewport.
    pub fn follow(&mut self, tx: usize, ty: usize, cols: usize, rows: usize) {
        if self.view_w == 0 || self.view_h == 0 { return; }
        self.x = follow_axis(self.x, tx as i32, self.view_w, cols);
        self.y = follow_axis(self.y, ty as i32, self.view_h, rows);
    }

    /// Snap so the target sits in the middle. Used on new games.
    pub fn center_on(&mut self, tx: usize, ty: usize, cols: usize, rows: usize) {
        if self.view_w == 0 || self.view_h == 0 { return; }
        self.x = clamp_axis(tx as i32 - self.view_w as i32 / 2, self.view_w, cols);
        self.y = clamp_axis(ty as i32 - self.view_h as i32 / 2, self.view_h, rows);
    }

    /// Grid cell → viewport cell, if visible.
    pub fn to_view(&self, gx: usize, gy: usize) -> Option<(usize, usize)> {
        let vx = gx as i32 - self.x;
        let vy = gy as i32 - self.y;
        if vx < 0 || vy < 0 || vx as usize >= self.view_w || vy as usize >= self.view_h {
            return None;
        }
        Some((vx as usize, vy as usize))
    }

    /// Which board walls are on screen: (left, right, top, bottom).
    pub fn walls_visible(&self, cols: usize, rows: usize) -> (bool, bool, bool, bool) {
        (
            self.x <= 0,
            self.x + self.view_w as i32 >= cols as i32,
            self.y <= 0,
            self.y + self.view_h as i32 >= rows as i32,
        )
    }
}

fn follow_axis(pos: i32, target: i32, view: usize, world: usize) -> i32 {
    let view = view as i32;
    let margin = view / 5;
    let mut pos = pos;
    if target < pos + margin {
        pos = target - margin;
    } else if target > pos + view - margin - 1 {
        pos = target - view + margin + 1;
    }
    clamp_axis(pos, view as usize, world)
}

fn clamp_axis(pos: i32, view: usize, world: usize) -> i32 {
    pos.max(0).min((world as i32 - view as i32).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam(view_w: usize, view_h: usize) -> Camera {
        Camera { x: 0, y: 0, view_w, view_h }
    }

    #[test]
    fn fit_caps_to_board() {
        let mut c = Camera::new();
        c.fit(100, 100, 50, 40);
        assert_eq!((c.view_w, c.view_h), (50, 40));
        c.fit(39, 19, 50, 40);
        assert_eq!((c.view_w, c.view_h), (39, 19));
    }

    #[test]
    fn whole_board_fits_stays_at_origin() {
        let mut c = cam(50, 40);
        c.follow(49, 39, 50, 40);
        assert_eq!((c.x, c.y), (0, 0));
        c.center_on(25, 20, 50, 40);
        assert_eq!((c.x, c.y), (0, 0));
    }

    #[test]
    fn no_scroll_inside_dead_zone() {
        let mut c = cam(20, 10);
        c.follow(10, 5, 50, 40);
        assert_eq!((c.x, c.y), (0, 0));
    }

    #[test]
    fn scrolls_when_target_nears_edge() {
        let mut c = cam(20, 10);
        // margin 4 on x: right bound at 15
        c.follow(16, 5, 50, 40);
        assert_eq!(c.x, 1);
        c.follow(8, 5, 50, 40);
        assert_eq!(c.x, 1);
        c.follow(3, 5, 50, 40);
        assert_eq!(c.x, 0);
    }

    #[test]
    fn clamped_to_board_edge() {
        let mut c = cam(20, 10);
        c.follow(49, 39, 50, 40);
        assert_eq!((c.x, c.y), (30, 30));
        assert_eq!(c.to_view(49, 39), Some((19, 9)));
        assert_eq!(c.walls_visible(50, 40), (false, true, false, true));
    }

    #[test]
    fn center_on_snaps() {
        let mut c = cam(20, 10);
        c.center_on(30, 20, 50, 40);
        assert_eq!((c.x, c.y), (20, 15));
        assert_eq!(c.to_view(30, 20), Some((10, 5)));
        assert_eq!(c.to_view(5, 5), None);
    }
}
