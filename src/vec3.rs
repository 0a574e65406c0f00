//! Vec3: one reading per axis of a sensor
use cast::f32;

/// XYZ triple
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vec3<T> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
    /// Z component
    pub z: T,
}

impl<T> Vec3<T> {
    /// Builds a triple from its components
    pub fn new(x: T, y: T, z: T) -> Self {
        Vec3 { x, y, z }
    }

    /// Applies `f` to each component
    pub fn map<U, F>(self, mut f: F) -> Vec3<U>
        where F: FnMut(T) -> U
    {
        Vec3 { x: f(self.x),
               y: f(self.y),
               z: f(self.z), }
    }
}

impl Vec3<i16> {
    /// Converts Vec<i16> to Vec<f32>
    pub fn f32(self) -> Vec3<f32> {
        self.map(|v| f32(v))
    }
}
