//! Star records and the store that owns them.

use rand::Rng;

use crate::viewport::Viewport;

/// A single drifting star.
///
/// `x`/`y` are in physical pixels. `z` is the depth factor: it scales drift
/// speed and trail width, and grows every frame until the star is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Star {
    /// Move the star to a uniformly random point on the surface.
    pub fn place<R: Rng + ?Sized>(&mut self, viewport: &Viewport, rng: &mut R) {
        self.x = rng.gen::<f32>() * viewport.width;
        self.y = rng.gen::<f32>() * viewport.height;
    }
}

/// Uniform depth in `[min_scale, 1)`.
pub(crate) fn random_depth<R: Rng + ?Sized>(min_scale: f32, rng: &mut R) -> f32 {
    min_scale + rng.gen::<f32>() * (1.0 - min_scale)
}

/// Fixed-size, ordered collection of stars.
///
/// The length is decided once by [`StarStore::generate`]; resizing the
/// viewport only repositions existing stars.
#[derive(Debug, Clone, Default)]
pub struct StarStore {
    stars: Vec<Star>,
}

impl StarStore {
    /// Create `count` stars at the origin with random depths in `[min_scale, 1)`.
    ///
    /// Positions are placeholders until the first [`place_all`](Self::place_all).
    pub fn generate<R: Rng + ?Sized>(count: usize, min_scale: f32, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: 0.0,
                y: 0.0,
                z: random_depth(min_scale, rng),
            })
            .collect();
        Self { stars }
    }

    /// Scatter every star uniformly over the viewport. Depths are untouched.
    pub fn place_all<R: Rng + ?Sized>(&mut self, viewport: &Viewport, rng: &mut R) {
        for star in &mut self.stars {
            star.place(viewport, rng);
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Star> {
        self.stars.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Star> {
        self.stars.iter_mut()
    }

    pub fn as_slice(&self) -> &[Star] {
        &self.stars
    }
}

impl<'a> IntoIterator for &'a StarStore {
    type Item = &'a Star;
    type IntoIter = std::slice::Iter<'a, Star>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_depths_and_placeholders() {
        let mut rng = SmallRng::seed_from_u64(7);
        let store = StarStore::generate(200, 0.9, &mut rng);

        assert_eq!(store.len(), 200);
        for star in &store {
            assert_eq!((star.x, star.y), (0.0, 0.0));
            assert!(star.z >= 0.9 && star.z < 1.0, "depth {} out of range", star.z);
        }
    }

    #[test]
    fn test_place_all_stays_on_surface() {
        let mut rng = SmallRng::seed_from_u64(11);
        let viewport = Viewport::from_logical(640.0, 480.0, 2.0);
        let mut store = StarStore::generate(100, 0.9, &mut rng);
        let depths: Vec<f32> = store.iter().map(|s| s.z).collect();

        store.place_all(&viewport, &mut rng);

        for (star, z) in store.iter().zip(depths) {
            assert!(star.x >= 0.0 && star.x <= viewport.width);
            assert!(star.y >= 0.0 && star.y <= viewport.height);
            assert_eq!(star.z, z);
        }
    }

    #[test]
    fn test_empty_store() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut store = StarStore::generate(0, 0.9, &mut rng);
        store.place_all(&Viewport::from_logical(10.0, 10.0, 1.0), &mut rng);
        assert!(store.is_empty());
    }
}
