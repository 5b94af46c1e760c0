// Clock helpers - turns raw playback seconds into what the progress bar shows

/// Format seconds as `m:ss`. Anything that isn't a finite positive number shows as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Fraction of the track played, in `0.0..=1.0`.
///
/// A zero, negative, NaN or unknown duration yields 0 so the gauge never sees a division by zero.
pub fn progress_ratio(current: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(total) if total.is_finite() && total > 0.0 && current.is_finite() => {
            (current / total).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Position to seek to for a click at `fraction` of the bar, if the duration is known.
pub fn seek_target(fraction: f64, duration: Option<f64>) -> Option<f64> {
    let total = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    if !fraction.is_finite() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * total)
}

/// Snapshot of the playback position as shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub current: f64,
    pub duration: Option<f64>,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        progress_ratio(self.current, self.duration)
    }

    pub fn current_label(&self) -> String {
        format_clock(self.current)
    }

    /// Duration label, `--:--` while the length isn't known yet.
    pub fn duration_label(&self) -> String {
        match self.duration {
            Some(total) if total.is_finite() && total > 0.0 => format_clock(total),
            _ => "--:--".to_string(),
        }
    }
}
