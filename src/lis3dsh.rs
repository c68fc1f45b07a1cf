//! LIS3DSH 3-axis accelerometer over SPI (the STM32F4-Discovery's part).
//!
//! Only what the board needs: identity check, power-up with all axes at
//! 100 Hz, full-scale selection, and raw axis reads.

use crate::accel::{Axis, FullScale, RawAxisSource};
use crate::error::BspError;
use embedded_hal::spi::{Operation, SpiDevice};

/// Expected `WHO_AM_I` answer.
pub const DEVICE_ID: u8 = 0x3F;

const READ: u8 = 0x80;

/// Register addresses.
mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL_REG4: u8 = 0x20;
    pub const CTRL_REG5: u8 = 0x24;
    pub const CTRL_REG6: u8 = 0x25;
    pub const OUT_X_L: u8 = 0x28;
    pub const OUT_Y_L: u8 = 0x2A;
    pub const OUT_Z_L: u8 = 0x2C;
}

/// 100 Hz output data rate, X/Y/Z enabled.
const CTRL_REG4_100HZ_XYZ: u8 = 0x67;
/// Register address auto-increment on multi-byte reads.
const CTRL_REG6_ADD_INC: u8 = 0x10;
const FSCALE_SHIFT: u8 = 3;

/// LIS3DSH driver.
pub struct Lis3dsh<SPI> {
    spi: SPI,
    scale: FullScale,
}

impl<SPI: SpiDevice> Lis3dsh<SPI> {
    /// Checks the device identity and powers it up at `scale`.
    ///
    /// # Errors
    /// * `UnexpectedDevice` - `WHO_AM_I` did not answer [`DEVICE_ID`]
    /// * `SensorReadFailure` - a bus transaction failed
    pub fn new(spi: SPI, scale: FullScale) -> Result<Self, BspError> {
        let mut sensor = Self { spi, scale };

        let id = sensor.read_register(reg::WHO_AM_I).map_err(bus_failure)?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::error!("LIS3DSH: unexpected WHO_AM_I {:#x}", id);
            return Err(BspError::UnexpectedDevice(id));
        }

        sensor
            .write_register(reg::CTRL_REG4, CTRL_REG4_100HZ_XYZ)
            .map_err(bus_failure)?;
        sensor
            .write_register(reg::CTRL_REG6, CTRL_REG6_ADD_INC)
            .map_err(bus_failure)?;
        sensor.set_full_scale(scale)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LIS3DSH ready, range {}", scale);
        Ok(sensor)
    }

    /// Selects the measurement range.
    pub fn set_full_scale(&mut self, scale: FullScale) -> Result<(), BspError> {
        let bits = match scale {
            FullScale::G2 => 0b000,
            FullScale::G4 => 0b001,
            FullScale::G6 => 0b010,
            FullScale::G8 => 0b011,
            FullScale::G16 => 0b100,
        };
        self.write_register(reg::CTRL_REG5, bits << FSCALE_SHIFT)
            .map_err(bus_failure)?;
        self.scale = scale;
        Ok(())
    }

    /// The range the sensor is currently set to.
    pub fn full_scale(&self) -> FullScale {
        self.scale
    }

    /// Consumes the driver and returns the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }

    fn read_register(&mut self, register: u8) -> Result<u8, SPI::Error> {
        let mut value = [0u8; 1];
        self.spi.transaction(&mut [
            Operation::Write(&[register | READ]),
            Operation::Read(&mut value),
        ])?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SPI::Error> {
        self.spi.write(&[register, value])
    }
}

impl<SPI: SpiDevice> RawAxisSource for Lis3dsh<SPI> {
    type Error = SPI::Error;

    /// Reads `OUT_<axis>_L` and `OUT_<axis>_H` in one transaction.
    fn read_raw_axis(&mut self, axis: Axis) -> Result<i16, Self::Error> {
        let low = match axis {
            Axis::X => reg::OUT_X_L,
            Axis::Y => reg::OUT_Y_L,
            Axis::Z => reg::OUT_Z_L,
        };

        let mut sample = [0u8; 2];
        self.spi.transaction(&mut [
            Operation::Write(&[low | READ]),
            Operation::Read(&mut sample),
        ])?;
        Ok(i16::from_le_bytes(sample))
    }
}

fn bus_failure<E>(_: E) -> BspError {
    BspError::SensorReadFailure
}
