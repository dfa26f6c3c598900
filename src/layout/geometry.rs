use crate::core::config::LayoutConfig;
use crate::layout::tiles::Slot;

/// Resting orientation of a tile on the sphere, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileAngles {
    /// Latitude, applied as `rotateX`
    pub rotate_x: f64,
    /// Longitude, applied as `rotateY`
    pub rotate_y: f64,
}

/// Angles of a slot's centre for a sphere cut into `segments` columns
pub fn base_rotation(slot: &Slot, segments: u32) -> TileAngles {
    let unit = 360.0 / segments.max(1) as f64 / 2.0;
    TileAngles {
        rotate_x: unit * (slot.y as f64 - (slot.size_y as f64 - 1.0) / 2.0),
        rotate_y: unit * (slot.x as f64 + (slot.size_x as f64 - 1.0) / 2.0),
    }
}

/// Sphere radius for a container of `width` × `height` pixels.
///
/// Wide containers size the sphere from their width, everything else from
/// the shorter side. `min_radius` only ever enlarges the result.
pub fn fit_radius(width: f64, height: f64, fit: f64, min_radius: Option<f64>, wide_aspect: f64) -> f64 {
    let w = if width.is_finite() { width.max(1.0) } else { 1.0 };
    let h = if height.is_finite() { height.max(1.0) } else { 1.0 };
    let basis = if w / h >= wide_aspect { w } else { w.min(h) };
    let radius = basis * fit;

    match min_radius {
        Some(min) if radius < min => min,
        _ => radius,
    }
}

impl LayoutConfig {
    pub fn radius_for(&self, width: f64, height: f64) -> f64 {
        fit_radius(width, height, self.fit, self.min_radius, self.wide_aspect_basis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::WIDE_ASPECT_BASIS;

    #[test]
    fn test_base_rotation() {
        let slot = Slot {
            x: 0,
            y: 0,
            size_x: 2,
            size_y: 2,
        };
        let angles = base_rotation(&slot, 36);
        assert_eq!(angles.rotate_y, 2.5);
        assert_eq!(angles.rotate_x, -2.5);

        let slot = Slot {
            x: -37,
            y: 4,
            size_x: 2,
            size_y: 2,
        };
        let angles = base_rotation(&slot, 36);
        assert_eq!(angles.rotate_y, 5.0 * -36.5);
        assert_eq!(angles.rotate_x, 5.0 * 3.5);
    }

    #[test]
    fn test_fit_radius_uses_width_for_wide_containers() {
        assert_eq!(fit_radius(1600.0, 900.0, 0.5, None, WIDE_ASPECT_BASIS), 800.0);
        assert_eq!(fit_radius(900.0, 900.0, 0.5, None, WIDE_ASPECT_BASIS), 450.0);
        assert_eq!(fit_radius(400.0, 900.0, 0.5, None, WIDE_ASPECT_BASIS), 200.0);
    }

    #[test]
    fn test_fit_radius_min_radius_only_enlarges() {
        assert_eq!(fit_radius(400.0, 900.0, 0.5, Some(300.0), WIDE_ASPECT_BASIS), 300.0);
        assert_eq!(fit_radius(1600.0, 900.0, 0.5, Some(300.0), WIDE_ASPECT_BASIS), 800.0);
    }

    #[test]
    fn test_fit_radius_degenerate_container() {
        assert_eq!(fit_radius(0.0, 0.0, 0.5, None, WIDE_ASPECT_BASIS), 0.5);
        assert_eq!(fit_radius(f64::NAN, 10.0, 1.0, None, WIDE_ASPECT_BASIS), 1.0);
    }
}
