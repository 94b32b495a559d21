//! Integer line and circle plotting.
//!
//! Both primitives are parameterized by a pixel-acceptance predicate and a
//! draw callback instead of writing into a buffer directly. The predicate
//! receives `(x, y, step)` where `step` counts visited pixels from 0, so
//! callers can implement dashing or banding without re-deriving arc length.
//! Label avoidance, dash patterns, and the supersampled hash fans in the
//! bond renderer are all expressed through this one seam.

/// Plot an integer Bresenham line from `(x0, y0)` to `(x1, y1)` inclusive.
///
/// `should_draw(x, y, step)` gates every candidate pixel; `draw(x, y)` is
/// invoked only for accepted ones. The step counter increments once per
/// visited pixel whether or not it was accepted.
pub fn plot_line<P, D>(x0: i32, y0: i32, x1: i32, y1: i32, should_draw: &mut P, draw: &mut D)
where
    P: FnMut(i32, i32, i32) -> bool,
    D: FnMut(i32, i32),
{
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut error = dx + dy;
    let mut step = 0;
    loop {
        if should_draw(x, y, step) {
            draw(x, y);
        }
        step += 1;
        let e2 = 2 * error;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            error += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            error += dx;
            y += sy;
        }
    }
}

/// Plot a filled midpoint circle of radius `r` centered on `(xm, ym)`.
///
/// Each scan row is emitted through [`plot_line`], and the predicate/draw
/// pair is shared with it, so a dash or band predicate produces a patterned
/// disk rather than a solid one.
pub fn plot_circle<P, D>(xm: i32, ym: i32, r: i32, should_draw: &mut P, draw: &mut D)
where
    P: FnMut(i32, i32, i32) -> bool,
    D: FnMut(i32, i32),
{
    let mut x0 = 0;
    let mut y0 = r;
    let mut d = 3 - 2 * r;
    while y0 >= x0 {
        plot_line(xm - y0, ym - x0, xm + y0, ym - x0, should_draw, draw);
        if x0 > 0 {
            plot_line(xm - y0, ym + x0, xm + y0, ym + x0, should_draw, draw);
        }
        if d < 0 {
            d += 4 * x0 + 6;
            x0 += 1;
        } else {
            if x0 != y0 {
                plot_line(xm - x0, ym - y0, xm + x0, ym - y0, should_draw, draw);
                plot_line(xm - x0, ym + y0, xm + x0, ym + y0, should_draw, draw);
            }
            d += 4 * (x0 - y0) + 10;
            x0 += 1;
            y0 -= 1;
        }
    }
}

/// Predicate accepting every pixel.
pub fn always(_x: i32, _y: i32, _step: i32) -> bool {
    true
}
