use glam::{Vec3, Vec4};

/// Hue/saturation/value (all in 0..1) to linear RGB
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Vec3 {
    let chroma = value * saturation;
    let sector = hue.rem_euclid(1.0) * 6.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// Parse `"r,g,b"` or `"r,g,b,a"` with components in 0..1.
/// Alpha defaults to 1.
pub fn parse_rgba(text: &str) -> Result<Vec4, String> {
    let parts: Vec<f32> = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid color component '{}': {e}", part.trim()))
        })
        .collect::<Result<_, _>>()?;

    let color = match parts.as_slice() {
        [r, g, b] => Vec4::new(*r, *g, *b, 1.0),
        [r, g, b, a] => Vec4::new(*r, *g, *b, *a),
        _ => {
            return Err(format!(
                "expected 3 or 4 comma-separated components, got {}",
                parts.len()
            ))
        }
    };

    if color.to_array().iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(format!("color components must be within 0..1: {text}"));
    }
    Ok(color)
}
