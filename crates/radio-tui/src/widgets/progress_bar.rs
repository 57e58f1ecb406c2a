//! Smooth Unicode level bar and elapsed-time formatting.

/// Eighth-block fill of `fraction` (0.0..=1.0) over `width` cells.
pub fn smooth_bar(fraction: f32, width: usize) -> String {
    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let eighths = (fraction.clamp(0.0, 1.0) * width as f32 * 8.0).round() as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

pub fn fmt_elapsed(secs: i64) -> String {
    if secs < 0 {
        return "0:00".to_string();
    }
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
