//! Community colour assignment: one hex colour per cluster, hues evenly
//! spaced around the wheel.

/// Produce `communities` distinct `#rrggbb` colours.
pub fn cluster_palette(communities: usize) -> Vec<String> {
    (0..communities)
        .map(|i| {
            let hue = 360.0 * i as f64 / communities as f64;
            hsv_to_hex(hue, 0.62, 0.85)
        })
        .collect()
}

fn hsv_to_hex(hue: f64, saturation: f64, value: f64) -> String {
    let c = value * saturation;
    let sector = hue / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    format!(
        "#{:02x}{:02x}{:02x}",
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_colour_per_community() {
        let palette = cluster_palette(5);
        assert_eq!(palette.len(), 5);
        let distinct: HashSet<&String> = palette.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_colours_are_hex() {
        for colour in cluster_palette(12) {
            assert_eq!(colour.len(), 7);
            assert!(colour.starts_with('#'));
            assert!(colour[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_zero_communities() {
        assert!(cluster_palette(0).is_empty());
    }
}
