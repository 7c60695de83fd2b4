//! Map point selection.
//!
//! At most one point is selected; a new click replaces the previous
//! selection and its marker/halo layers. The map widget itself sits behind
//! [`MapSurface`].

use aetheris_common::GeoPoint;

/// Halo circle radius around the selected point, meters.
pub const HALO_RADIUS_M: f64 = 20_000.0;

/// Transient click-pulse radius, meters. The pulse layer is removed by the
/// event loop shortly after the click.
pub const PULSE_RADIUS_M: f64 = 5_000.0;

/// Opaque handle to a layer placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerHandle(pub u64);

/// The subset of the map widget the selection controller needs.
pub trait MapSurface {
    fn add_marker(&mut self, point: GeoPoint) -> LayerHandle;
    fn add_circle(&mut self, point: GeoPoint, radius_m: f64) -> LayerHandle;
    fn remove_layer(&mut self, handle: LayerHandle);
}

#[derive(Debug, Default)]
pub struct SelectionController {
    current: Option<Selection>,
}

#[derive(Debug)]
struct Selection {
    point: GeoPoint,
    marker: LayerHandle,
    halo: LayerHandle,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a new point. Returns the transient
    /// pulse layer the caller removes once its timer fires.
    pub fn select(&mut self, surface: &mut dyn MapSurface, point: GeoPoint) -> LayerHandle {
        if let Some(previous) = self.current.take() {
            surface.remove_layer(previous.marker);
            surface.remove_layer(previous.halo);
        }

        let marker = surface.add_marker(point);
        let halo = surface.add_circle(point, HALO_RADIUS_M);
        self.current = Some(Selection { point, marker, halo });

        surface.add_circle(point, PULSE_RADIUS_M)
    }

    pub fn selected_point(&self) -> Option<GeoPoint> {
        self.current.as_ref().map(|s| s.point)
    }

    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        if let Some(previous) = self.current.take() {
            surface.remove_layer(previous.marker);
            surface.remove_layer(previous.halo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records layer operations instead of drawing.
    #[derive(Default)]
    struct FakeSurface {
        next_id: u64,
        alive: Vec<LayerHandle>,
        removed: Vec<LayerHandle>,
    }

    impl MapSurface for FakeSurface {
        fn add_marker(&mut self, _point: GeoPoint) -> LayerHandle {
            self.next_id += 1;
            let handle = LayerHandle(self.next_id);
            self.alive.push(handle);
            handle
        }

        fn add_circle(&mut self, point: GeoPoint, _radius_m: f64) -> LayerHandle {
            self.add_marker(point)
        }

        fn remove_layer(&mut self, handle: LayerHandle) {
            self.alive.retain(|h| *h != handle);
            self.removed.push(handle);
        }
    }

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_first_selection_places_layers() {
        let mut surface = FakeSurface::default();
        let mut controller = SelectionController::new();

        let pulse = controller.select(&mut surface, point(-14.2, -51.9));
        assert_eq!(controller.selected_point(), Some(point(-14.2, -51.9)));
        // marker + halo + pulse
        assert_eq!(surface.alive.len(), 3);
        surface.remove_layer(pulse);
        assert_eq!(surface.alive.len(), 2);
    }

    #[test]
    fn test_new_click_replaces_previous_selection() {
        let mut surface = FakeSurface::default();
        let mut controller = SelectionController::new();

        controller.select(&mut surface, point(-14.2, -51.9));
        controller.select(&mut surface, point(-7.1, -36.7));

        assert_eq!(controller.selected_point(), Some(point(-7.1, -36.7)));
        // the first marker and halo were removed
        assert_eq!(surface.removed.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut surface = FakeSurface::default();
        let mut controller = SelectionController::new();

        controller.select(&mut surface, point(-14.2, -51.9));
        controller.clear(&mut surface);
        assert_eq!(controller.selected_point(), None);
    }
}
