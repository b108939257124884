//! Building and sensor geometry.

use glam::Vec3;
use std::ops::Range;

/// A parallelogram surface sampled on a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Corner the two edge vectors start from.
    pub anchor: Vec3,
    /// First edge vector (the sample grid's width direction).
    pub v1: Vec3,
    /// Second edge vector (the sample grid's height direction).
    pub v2: Vec3,
    /// Number of samples along `v1`.
    pub width: usize,
    /// Number of samples along `v2`.
    pub height: usize,
    /// Offset of this face's first sample in a patch data array.
    pub patch_index: usize,
}

impl Face {
    /// Create a new face.
    pub fn new(
        anchor: Vec3,
        v1: Vec3,
        v2: Vec3,
        width: usize,
        height: usize,
        patch_index: usize,
    ) -> Self {
        Self {
            anchor,
            v1,
            v2,
            width,
            height,
            patch_index,
        }
    }

    /// Unit normal, `normalize(v1 × v2)`.
    ///
    /// Degenerate faces (parallel edges) yield a zero vector.
    pub fn normal(&self) -> Vec3 {
        self.v1.cross(self.v2).normalize_or_zero()
    }

    /// Number of samples on this face, saturating at `usize::MAX`.
    pub fn sample_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Indices of this face's samples in a patch data array.
    pub fn sample_range(&self) -> Range<usize> {
        self.patch_index..self.patch_index.saturating_add(self.sample_count())
    }

    /// Index in a patch data array of the sample at local `(u, v)`.
    pub fn sample_index(&self, u: usize, v: usize) -> usize {
        self.patch_index + v * self.width + u
    }

    /// The four corners, counter-clockwise from the anchor.
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.anchor,
            self.anchor + self.v1,
            self.anchor + self.v1 + self.v2,
            self.anchor + self.v2,
        ]
    }
}

/// A building made of one or more faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    faces: Vec<Face>,
}

impl Building {
    /// Create a building from its faces, in manifest order.
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Faces in manifest order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
}

/// A single-patch instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    face: [Face; 1],
    normal: Vec3,
}

impl Sensor {
    /// Create a sensor centred at `center`. Its face is always 1x1.
    pub fn new(center: Vec3, normal: Vec3, v1: Vec3, v2: Vec3, patch_index: usize) -> Self {
        Self {
            face: [Face::new(center, v1, v2, 1, 1, patch_index)],
            normal,
        }
    }

    /// The sensor's only face.
    pub fn face(&self) -> &Face {
        &self.face[0]
    }

    /// Faces of the sensor; always exactly one.
    pub fn faces(&self) -> &[Face] {
        &self.face
    }

    /// Location of the sensor.
    pub fn center(&self) -> Vec3 {
        self.face[0].anchor
    }

    /// Normal as declared in the manifest.
    pub fn declared_normal(&self) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_follows_edge_order() {
        let face = Face::new(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 3.0, 2, 3, 10);
        assert_eq!(face.normal(), Vec3::Z);
        assert_eq!(face.sample_count(), 6);
        assert_eq!(face.sample_range(), 10..16);
        assert_eq!(face.sample_index(1, 2), 15);
    }

    #[test]
    fn sensor_has_one_unit_face() {
        let sensor = Sensor::new(Vec3::ONE, Vec3::Z, Vec3::X, Vec3::Y, 7);
        assert_eq!(sensor.faces().len(), 1);
        assert_eq!(sensor.face().width, 1);
        assert_eq!(sensor.face().height, 1);
        assert_eq!(sensor.center(), Vec3::ONE);
        assert_eq!(sensor.face().corners()[2], Vec3::new(2.0, 2.0, 1.0));
    }
}
