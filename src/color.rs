use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Cluster palette
// ---------------------------------------------------------------------------

/// Fixed colors for cluster ids 0–8, matching the palette the upstream
/// report used, so charts stay comparable with it.
const CLUSTER_PALETTE: [Color32; 9] = [
    Color32::from_rgb(0x1F, 0x77, 0xB4),
    Color32::from_rgb(0xFF, 0x7F, 0x0E),
    Color32::from_rgb(0x2C, 0xA0, 0x2C),
    Color32::from_rgb(0xD6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xBD),
    Color32::from_rgb(0x8C, 0x56, 0x4B),
    Color32::from_rgb(0xE3, 0x77, 0xC2),
    Color32::from_rgb(0x7F, 0x7F, 0x7F),
    Color32::from_rgb(0xBC, 0xBD, 0x22),
];

/// Color for a cluster id. Ids beyond the fixed palette get evenly spaced
/// hues so an unexpected tenth cluster still renders distinctly.
pub fn cluster_color(cluster: u32) -> Color32 {
    if let Some(&c) = CLUSTER_PALETTE.get(cluster as usize) {
        return c;
    }
    let hue = (cluster as f32 * 47.0) % 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Viridis ramp for the heatmap
// ---------------------------------------------------------------------------

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 74, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (109, 205, 89),
    (253, 231, 37),
];

/// Map `t` in [0, 1] onto the viridis color scale (clamped outside).
pub fn viridis(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = VIRIDIS[lo];
    let (r1, g1, b1) = VIRIDIS[hi];
    Color32::from_rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_palette_covers_known_clusters() {
        assert_eq!(cluster_color(0), Color32::from_rgb(0x1F, 0x77, 0xB4));
        assert_eq!(cluster_color(8), Color32::from_rgb(0xBC, 0xBD, 0x22));
    }

    #[test]
    fn out_of_palette_clusters_get_distinct_colors() {
        assert_ne!(cluster_color(9), cluster_color(10));
    }

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(viridis(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(viridis(-1.0), viridis(0.0));
        assert_eq!(viridis(2.0), viridis(1.0));
    }
}
