use plotters::style::RGBColor;

// 取樣自常見色階的幾個控制點，中間線性插值
pub const VIRIDIS: &[(u8, u8, u8)] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

pub const MAGMA: &[(u8, u8, u8)] = &[
    (0, 0, 4),
    (81, 18, 124),
    (183, 55, 121),
    (252, 137, 97),
    (252, 253, 191),
];

pub const COOLWARM: &[(u8, u8, u8)] = &[
    (59, 76, 192),
    (141, 176, 254),
    (221, 221, 221),
    (244, 154, 123),
    (180, 4, 38),
];

/// Color at `index` when `count` bars share the gradient.
pub fn pick(stops: &[(u8, u8, u8)], index: usize, count: usize) -> RGBColor {
    let t = if count <= 1 {
        0.5
    } else {
        index as f64 / (count - 1) as f64
    };
    gradient(stops, t)
}

pub fn gradient(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    match stops.len() {
        0 => RGBColor(0, 0, 0),
        1 => RGBColor(stops[0].0, stops[0].1, stops[0].2),
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = (scaled.floor() as usize).min(n - 2);
            let frac = scaled - lower as f64;
            let (a, b) = (stops[lower], stops[lower + 1]);
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
            RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
    }
}
