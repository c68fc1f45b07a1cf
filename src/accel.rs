//! Accelerometer reads converted to physical units.
//!
//! The bus protocol belongs to a [`RawAxisSource`] (see
//! [`Lis3dsh`](crate::lis3dsh::Lis3dsh) for the Discovery's on-board part).
//! [`Accelerometer`] only picks the axis, asks the source for one raw sample
//! and scales it. Nothing is cached: every call is a fresh bus read.

use crate::error::BspError;

/// One of the three sensor axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in `X, Y, Z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl TryFrom<char> for Axis {
    type Error = BspError;

    /// Parses `x`, `y` or `z` in either case. Anything else is
    /// `InvalidChannel`.
    fn try_from(id: char) -> Result<Self, Self::Error> {
        match id.to_ascii_lowercase() {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            _ => Err(BspError::InvalidChannel),
        }
    }
}

/// Measurement range, which fixes the sensitivity of a raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±2 g.
    #[default]
    G2,
    /// ±4 g.
    G4,
    /// ±6 g.
    G6,
    /// ±8 g.
    G8,
    /// ±16 g.
    G16,
}

impl FullScale {
    /// Sensitivity in milli-g per least significant bit.
    pub fn mg_per_digit(self) -> f32 {
        match self {
            FullScale::G2 => 0.06,
            FullScale::G4 => 0.12,
            FullScale::G6 => 0.18,
            FullScale::G8 => 0.24,
            FullScale::G16 => 0.73,
        }
    }

    /// Converts a raw sample to acceleration in g.
    #[inline]
    pub fn to_g(self, raw: i16) -> f32 {
        f32::from(raw) * self.mg_per_digit() / 1000.0
    }
}

/// Bus collaborator that fetches one raw axis sample.
pub trait RawAxisSource {
    /// Bus error type.
    type Error;

    /// Performs a synchronous read of the latest raw sample for `axis`.
    fn read_raw_axis(&mut self, axis: Axis) -> Result<i16, Self::Error>;
}

/// Reads accelerations from a raw-axis source at a fixed sensitivity.
pub struct Accelerometer<S> {
    source: S,
    scale: FullScale,
}

impl<S: RawAxisSource> Accelerometer<S> {
    /// Creates a reader. `scale` must match the range the sensor is set to.
    pub fn new(source: S, scale: FullScale) -> Self {
        Self { source, scale }
    }

    /// Reads the axis named by `id` (`'x'`, `'Y'`, ...) in g.
    ///
    /// # Errors
    /// * `InvalidChannel` - `id` is not an axis name; no bus traffic occurs
    /// * `SensorReadFailure` - the bus read failed
    pub fn read_axis(&mut self, id: char) -> Result<f32, BspError> {
        let axis = Axis::try_from(id).inspect_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("invalid accelerometer axis {}", id);
        })?;
        self.read(axis)
    }

    /// Reads one axis in g.
    pub fn read(&mut self, axis: Axis) -> Result<f32, BspError> {
        self.read_raw(axis).map(|raw| self.scale.to_g(raw))
    }

    /// Reads one axis without scaling.
    pub fn read_raw(&mut self, axis: Axis) -> Result<i16, BspError> {
        self.source.read_raw_axis(axis).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("accelerometer read failed on axis {}", axis);
            BspError::SensorReadFailure
        })
    }

    /// Reads all three axes in g, `[x, y, z]`. Fails on the first bad read.
    pub fn read_all(&mut self) -> Result<[f32; 3], BspError> {
        Ok([
            self.read(Axis::X)?,
            self.read(Axis::Y)?,
            self.read(Axis::Z)?,
        ])
    }

    /// The sensitivity in use.
    pub fn scale(&self) -> FullScale {
        self.scale
    }

    /// Mutable access to the underlying source, e.g. to reconfigure it.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the reader and returns its source.
    pub fn release(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_names_are_case_insensitive() {
        assert_eq!(Axis::try_from('x'), Ok(Axis::X));
        assert_eq!(Axis::try_from('X'), Ok(Axis::X));
        assert_eq!(Axis::try_from('z'), Ok(Axis::Z));
        assert_eq!(Axis::try_from('w'), Err(BspError::InvalidChannel));
        assert_eq!(Axis::try_from('1'), Err(BspError::InvalidChannel));
    }

    #[test]
    fn scaling_uses_range_sensitivity() {
        assert!((FullScale::G2.to_g(16_667) - 1.0).abs() < 0.001);
        assert!((FullScale::G16.to_g(-1_000) + 0.73).abs() < 0.0001);
        assert_eq!(FullScale::G4.to_g(0), 0.0);
    }
}
