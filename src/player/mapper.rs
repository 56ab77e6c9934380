//! Pointer-to-value mapping for the seek and volume sliders, plus the
//! small numeric helpers the controls render from.

/// Screen-space bounds of a slider track, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&web_sys::DomRect> for TrackRect {
    fn from(rect: &web_sys::DomRect) -> Self {
        Self {
            left: rect.x(),
            top: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl TrackRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Maps a horizontal pointer coordinate inside `rect` to a time in
/// `[0, duration]`. Degenerate tracks and unknown durations map to 0.
pub fn position_to_time(client_x: f64, rect: &TrackRect, duration: f64) -> f64 {
    if rect.width <= 0.0 || !(duration > 0.0) {
        return 0.0;
    }
    let time = (client_x - rect.left) / rect.width * duration;
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, duration)
}

/// Maps a vertical pointer coordinate to a level in `[0, 1]`, top of the
/// track being the maximum.
pub fn position_to_level(client_y: f64, rect: &TrackRect) -> f64 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let level = 1.0 - (client_y - rect.top) / rect.height;
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0)
}

/// `value / total` clamped to `[0, 1]`; 0 whenever `total` is not positive.
pub fn fraction(value: f64, total: f64) -> f64 {
    if !(total > 0.0) {
        return 0.0;
    }
    let f = value / total;
    if f.is_nan() {
        return 0.0;
    }
    f.clamp(0.0, 1.0)
}

/// Same as [`fraction`] but as a CSS percentage.
pub fn percent(value: f64, total: f64) -> f64 {
    fraction(value, total) * 100.0
}

/// Formats seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// ```text
/// 30.0   -> "0:30"
/// 187.9  -> "3:07"
/// 3875.0 -> "1:04:35"
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(left: f64, width: f64) -> TrackRect {
        TrackRect { left, top: 0.0, width, height: 10.0 }
    }

    #[test]
    fn left_edge_maps_to_zero_and_right_edge_to_duration() {
        let rect = track(40.0, 400.0);
        assert_eq!(position_to_time(40.0, &rect, 120.0), 0.0);
        assert_eq!(position_to_time(440.0, &rect, 120.0), 120.0);
    }

    #[test]
    fn interior_point_is_linear() {
        let rect = track(0.0, 200.0);
        assert_eq!(position_to_time(50.0, &rect, 200.0), 50.0);
        assert_eq!(position_to_time(100.0, &rect, 60.0), 30.0);
    }

    #[test]
    fn outside_track_clamps() {
        let rect = track(100.0, 100.0);
        assert_eq!(position_to_time(-500.0, &rect, 90.0), 0.0);
        assert_eq!(position_to_time(5000.0, &rect, 90.0), 90.0);
    }

    #[test]
    fn degenerate_inputs_map_to_zero() {
        assert_eq!(position_to_time(50.0, &track(0.0, 0.0), 100.0), 0.0);
        assert_eq!(position_to_time(50.0, &track(0.0, -4.0), 100.0), 0.0);
        assert_eq!(position_to_time(50.0, &track(0.0, 100.0), 0.0), 0.0);
        assert_eq!(position_to_time(50.0, &track(0.0, 100.0), f64::NAN), 0.0);
    }

    #[test]
    fn vertical_level_is_inverted() {
        let rect = TrackRect { left: 0.0, top: 100.0, width: 16.0, height: 96.0 };
        assert_eq!(position_to_level(100.0, &rect), 1.0);
        assert_eq!(position_to_level(196.0, &rect), 0.0);
        assert_eq!(position_to_level(148.0, &rect), 0.5);
        assert_eq!(position_to_level(20.0, &rect), 1.0);
        assert_eq!(position_to_level(400.0, &rect), 0.0);
    }

    #[test]
    fn fraction_is_always_in_unit_range() {
        assert_eq!(fraction(30.0, 120.0), 0.25);
        assert_eq!(fraction(130.0, 120.0), 1.0);
        assert_eq!(fraction(-1.0, 120.0), 0.0);
        assert_eq!(fraction(30.0, 0.0), 0.0);
        assert_eq!(percent(30.0, 120.0), 25.0);
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(30.0), "0:30");
        assert_eq!(format_time(187.9), "3:07");
        assert_eq!(format_time(3875.0), "1:04:35");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
