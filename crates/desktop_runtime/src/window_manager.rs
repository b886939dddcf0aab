//! Window geometry rules shared by the registry, the reducer, and the shell components.

use crate::model::{
    PointerPosition, ResizeEdge, WindowId, WindowRect, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 400;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 300;

const DEFAULT_ORIGIN: i32 = 60;
const JITTER_X: u64 = 200;
const JITTER_Y: u64 = 140;

/// Position of a dragged window: the pointer minus the grab offset, never above or left of the
/// desktop origin.
pub fn drag_rect(current: WindowRect, pointer: PointerPosition, grab: PointerPosition) -> WindowRect {
    WindowRect {
        x: (pointer.x - grab.x).max(0),
        y: (pointer.y - grab.y).max(0),
        ..current
    }
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Width and height never drop below [`MIN_WINDOW_WIDTH`] x [`MIN_WINDOW_HEIGHT`]. Dragging the
/// north or west edge keeps the opposite edge fixed.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let grow_east = |rect: WindowRect| WindowRect {
        w: (start.w + dx).max(MIN_WINDOW_WIDTH),
        ..rect
    };
    let grow_south = |rect: WindowRect| WindowRect {
        h: (start.h + dy).max(MIN_WINDOW_HEIGHT),
        ..rect
    };

    match edge {
        ResizeEdge::East => grow_east(start),
        ResizeEdge::South => grow_south(start),
        ResizeEdge::SouthEast => grow_south(grow_east(start)),
        ResizeEdge::West => {
            let right = start.right();
            let x = (start.x + dx).max(0).min(right - MIN_WINDOW_WIDTH);
            WindowRect {
                x,
                w: right - x,
                ..start
            }
        }
        ResizeEdge::North => {
            let bottom = start.bottom();
            let y = (start.y + dy).max(0).min(bottom - MIN_WINDOW_HEIGHT);
            WindowRect {
                y,
                h: bottom - y,
                ..start
            }
        }
    }
}

/// Geometry for a freshly opened window.
///
/// The offset is derived from the window id so consecutive windows do not stack exactly.
pub fn default_window_rect(window_id: WindowId, viewport: WindowRect) -> WindowRect {
    let w = DEFAULT_WINDOW_WIDTH
        .min(viewport.w)
        .max(MIN_WINDOW_WIDTH);
    let h = DEFAULT_WINDOW_HEIGHT
        .min(viewport.h)
        .max(MIN_WINDOW_HEIGHT);

    let mixed = mix_id(window_id.0);
    let jitter_x = (mixed % JITTER_X) as i32;
    let jitter_y = ((mixed >> 32) % JITTER_Y) as i32;

    let max_x = (viewport.x + viewport.w - w).max(viewport.x);
    let max_y = (viewport.y + viewport.h - h).max(viewport.y);
    WindowRect {
        x: (viewport.x + DEFAULT_ORIGIN + jitter_x).min(max_x).max(0),
        y: (viewport.y + DEFAULT_ORIGIN + jitter_y).min(max_y).max(0),
        w,
        h,
    }
}

// splitmix64 finalizer
fn mix_id(raw: u64) -> u64 {
    let mut z = raw.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Target rectangles for `count` visible windows arranged inside `viewport`.
///
/// One window is centered at its default size, two split the viewport left/right, and three or
/// more fill a grid of `ceil(sqrt(count))` columns.
pub fn organize_layout(count: usize, viewport: WindowRect) -> Vec<WindowRect> {
    match count {
        0 => Vec::new(),
        1 => {
            let w = DEFAULT_WINDOW_WIDTH.min(viewport.w).max(MIN_WINDOW_WIDTH);
            let h = DEFAULT_WINDOW_HEIGHT.min(viewport.h).max(MIN_WINDOW_HEIGHT);
            vec![WindowRect {
                x: viewport.x + ((viewport.w - w) / 2).max(0),
                y: viewport.y + ((viewport.h - h) / 2).max(0),
                w,
                h,
            }]
        }
        2 => {
            let w = (viewport.w / 2).max(MIN_WINDOW_WIDTH);
            let h = viewport.h.max(MIN_WINDOW_HEIGHT);
            vec![
                WindowRect {
                    x: viewport.x,
                    y: viewport.y,
                    w,
                    h,
                },
                WindowRect {
                    x: (viewport.x + viewport.w - w).max(viewport.x),
                    y: viewport.y,
                    w,
                    h,
                },
            ]
        }
        n => {
            let cols = ceil_sqrt(n);
            let rows = n.div_ceil(cols);
            let pitch_x = viewport.w / cols as i32;
            let pitch_y = viewport.h / rows as i32;
            (0..n)
                .map(|index| {
                    let col = (index % cols) as i32;
                    let row = (index / cols) as i32;
                    WindowRect {
                        x: viewport.x + col * pitch_x,
                        y: viewport.y + row * pitch_y,
                        w: pitch_x.max(MIN_WINDOW_WIDTH),
                        h: pitch_y.max(MIN_WINDOW_HEIGHT),
                    }
                })
                .collect()
        }
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = 1;
    while root * root < n {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1600,
        h: 900,
    };

    #[test]
    fn resize_never_goes_below_minimum_for_any_delta() {
        let start = WindowRect {
            x: 500,
            y: 400,
            w: 520,
            h: 380,
        };
        let deltas = [-5000, -900, -121, -1, 0, 1, 119, 900, 5000];
        for edge in ResizeEdge::ALL {
            for dx in deltas {
                for dy in deltas {
                    let rect = resize_rect(start, edge, dx, dy);
                    assert!(rect.w >= MIN_WINDOW_WIDTH, "{edge:?} {dx} {dy} -> {rect:?}");
                    assert!(rect.h >= MIN_WINDOW_HEIGHT, "{edge:?} {dx} {dy} -> {rect:?}");
                }
            }
        }
    }

    #[test]
    fn north_and_west_resize_keep_the_opposite_edge_fixed() {
        let start = WindowRect {
            x: 300,
            y: 200,
            w: 600,
            h: 500,
        };

        let west = resize_rect(start, ResizeEdge::West, 150, 0);
        assert_eq!(west.right(), start.right());
        assert_eq!(west.w, 450);

        let west_clamped = resize_rect(start, ResizeEdge::West, 400, 0);
        assert_eq!(west_clamped.right(), start.right());
        assert_eq!(west_clamped.w, MIN_WINDOW_WIDTH);

        let north = resize_rect(start, ResizeEdge::North, 0, -100);
        assert_eq!(north.bottom(), start.bottom());
        assert_eq!(north.h, 600);
        assert_eq!(north.y, 100);
    }

    #[test]
    fn south_east_resize_follows_both_axes() {
        let start = WindowRect {
            x: 10,
            y: 10,
            w: 500,
            h: 400,
        };
        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, 40, 60),
            WindowRect {
                x: 10,
                y: 10,
                w: 540,
                h: 460
            }
        );
        assert_eq!(resize_rect(start, ResizeEdge::East, 40, 60).h, 400);
        assert_eq!(resize_rect(start, ResizeEdge::South, 40, 60).w, 500);
    }

    #[test]
    fn drag_never_produces_negative_origin() {
        let rect = WindowRect::default();
        let grab = PointerPosition { x: 40, y: 12 };
        for (px, py) in [(-500, -500), (0, 0), (39, 11), (41, 13), (800, -20)] {
            let moved = drag_rect(rect, PointerPosition { x: px, y: py }, grab);
            assert!(moved.x >= 0 && moved.y >= 0, "{moved:?}");
            assert_eq!((moved.w, moved.h), (rect.w, rect.h));
        }
        let moved = drag_rect(rect, PointerPosition { x: 340, y: 212 }, grab);
        assert_eq!((moved.x, moved.y), (300, 200));
    }

    #[test]
    fn default_rect_varies_by_id_and_stays_inside_viewport() {
        let first = default_window_rect(WindowId(1), VIEWPORT);
        let second = default_window_rect(WindowId(2), VIEWPORT);
        assert_ne!((first.x, first.y), (second.x, second.y));

        for raw in 1..64 {
            let rect = default_window_rect(WindowId(raw), VIEWPORT);
            assert!(rect.x >= 0 && rect.y >= 0);
            assert!(rect.right() <= VIEWPORT.right());
            assert!(rect.bottom() <= VIEWPORT.bottom());
        }
    }

    #[test]
    fn default_rect_respects_minimum_on_tiny_viewports() {
        let tiny = WindowRect {
            x: 0,
            y: 0,
            w: 320,
            h: 240,
        };
        let rect = default_window_rect(WindowId(7), tiny);
        assert_eq!((rect.w, rect.h), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        assert_eq!((rect.x, rect.y), (0, 0));
    }

    #[test]
    fn organize_centers_one_and_splits_two() {
        let single = organize_layout(1, VIEWPORT);
        assert_eq!(
            single,
            vec![WindowRect {
                x: 480,
                y: 220,
                w: DEFAULT_WINDOW_WIDTH,
                h: DEFAULT_WINDOW_HEIGHT
            }]
        );

        let pair = organize_layout(2, VIEWPORT);
        assert_eq!(pair[0].x, 0);
        assert_eq!(pair[1].x, 800);
        assert!(pair.iter().all(|rect| rect.w == 800 && rect.h == 900));
    }

    #[test]
    fn organize_uses_square_grid_for_three_or_more() {
        let five = organize_layout(5, VIEWPORT);
        assert_eq!(five.len(), 5);
        // 3 columns x 2 rows
        assert_eq!(five[2].x, 1066);
        assert_eq!(five[3], WindowRect { x: 0, y: 450, w: 533, h: 450 });

        let nine = organize_layout(9, VIEWPORT);
        assert!(nine
            .iter()
            .all(|rect| rect.w >= MIN_WINDOW_WIDTH && rect.h >= MIN_WINDOW_HEIGHT));
        assert!(organize_layout(0, VIEWPORT).is_empty());
    }
}
