//! Global-to-local coordinate mapping for measured surfaces.

use kurbo::Point;
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a measurable visual surface (a drawing layer, the
/// page, an overlay).
pub type SurfaceId = Uuid;

/// Registry of last-measured screen origins, one per mounted surface.
///
/// Layout measurement is asynchronous: the render tree reports a surface's
/// on-screen offset some time after the pointer event that needed it, so the
/// registry only ever holds the most recent measurement. Mapping against a
/// surface that was never measured, or that has unmounted, drops the sample
/// rather than producing garbage coordinates.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLayouts {
    origins: HashMap<SurfaceId, Point>,
}

impl SurfaceLayouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a newly mounted surface. The surface is unmapped
    /// until its first measurement arrives.
    pub fn mount(&mut self) -> SurfaceId {
        Uuid::new_v4()
    }

    /// Record a measurement: the surface's top-left corner in global screen
    /// coordinates.
    pub fn record(&mut self, surface: SurfaceId, origin: Point) {
        self.origins.insert(surface, origin);
    }

    /// Forget a surface. In-flight pointer samples for it will be dropped.
    pub fn unmount(&mut self, surface: SurfaceId) {
        self.origins.remove(&surface);
    }

    pub fn is_measured(&self, surface: SurfaceId) -> bool {
        self.origins.contains_key(&surface)
    }

    /// Map a global screen coordinate into the surface's own box (origin at
    /// its top-left). `None` means the sample must be dropped.
    pub fn to_local(&self, surface: SurfaceId, global: Point) -> Option<Point> {
        match self.origins.get(&surface) {
            Some(origin) => Some(Point::new(global.x - origin.x, global.y - origin.y)),
            None => {
                log::debug!("dropping pointer sample for unmeasured surface {surface}");
                None
            }
        }
    }

    /// Callback form of [`to_local`](Self::to_local): the closure fires only
    /// when the surface is measured.
    pub fn with_local<F: FnOnce(Point)>(&self, surface: SurfaceId, global: Point, f: F) {
        if let Some(local) = self.to_local(surface, global) {
            f(local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_subtracts_origin() {
        let mut layouts = SurfaceLayouts::new();
        let surface = layouts.mount();
        layouts.record(surface, Point::new(40.0, 100.0));

        let local = layouts.to_local(surface, Point::new(50.0, 110.0)).unwrap();
        assert_eq!(local, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_unmeasured_surface_drops_sample() {
        let mut layouts = SurfaceLayouts::new();
        let surface = layouts.mount();

        assert!(layouts.to_local(surface, Point::new(5.0, 5.0)).is_none());

        let mut fired = false;
        layouts.with_local(surface, Point::new(5.0, 5.0), |_| fired = true);
        assert!(!fired);
    }

    #[test]
    fn test_remeasure_updates_origin() {
        let mut layouts = SurfaceLayouts::new();
        let surface = layouts.mount();
        layouts.record(surface, Point::new(0.0, 0.0));
        layouts.record(surface, Point::new(0.0, 250.0));

        let local = layouts.to_local(surface, Point::new(10.0, 260.0)).unwrap();
        assert_eq!(local, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_unmount_drops_future_samples() {
        let mut layouts = SurfaceLayouts::new();
        let surface = layouts.mount();
        layouts.record(surface, Point::new(0.0, 0.0));
        layouts.unmount(surface);

        assert!(!layouts.is_measured(surface));
        assert!(layouts.to_local(surface, Point::new(1.0, 1.0)).is_none());
    }
}
