//! Shared test infrastructure for disco-bsp integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use disco_bsp::{Axis, LedChannel, PendingFlag, RawAxisSource};
use embedded_hal::digital::{
    self, ErrorType as DigitalErrorType, InputPin, OutputPin, StatefulOutputPin,
};
use embedded_hal::pwm::{self, ErrorType as PwmErrorType, SetDutyCycle};
use embedded_hal::spi::{self, ErrorType as SpiErrorType, Operation, SpiDevice};

// ============================================================================
// Mock Error
// ============================================================================

/// Error returned by every mock when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for MockError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl spi::Error for MockError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

// ============================================================================
// Mock Output Pin
// ============================================================================

/// Mock output pin that records every level it is driven to
pub struct MockPin {
    high: bool,
    history: heapless::Vec<bool, 32>,
    pub fail: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self {
            high: false,
            history: heapless::Vec::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }

    fn drive(&mut self, high: bool) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.high = high;
        let _ = self.history.push(high);
        Ok(())
    }
}

impl DigitalErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }
}

// ============================================================================
// Mock PWM Channel
// ============================================================================

/// Mock PWM channel with a fixed period that records duty writes
pub struct MockPwm {
    period: u16,
    duty: u16,
    writes: heapless::Vec<u16, 32>,
    pub fail: bool,
}

impl MockPwm {
    pub fn new(period: u16) -> Self {
        Self {
            period,
            duty: 0,
            writes: heapless::Vec::new(),
            fail: false,
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    pub fn writes(&self) -> &[u16] {
        &self.writes
    }
}

impl PwmErrorType for MockPwm {
    type Error = MockError;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.period
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.duty = duty;
        let _ = self.writes.push(duty);
        Ok(())
    }
}

/// Default PWM period for mock LED channels (TIM4 on the Discovery runs 0..=999)
pub const PERIOD: u16 = 999;

/// Four healthy LED channels
pub fn led_channels() -> [LedChannel<MockPin, MockPwm>; 4] {
    core::array::from_fn(|_| LedChannel::new(MockPin::new(), MockPwm::new(PERIOD)))
}

// ============================================================================
// Mock Input Pin
// ============================================================================

/// Mock input line with a settable level
pub struct MockInput {
    pub level: bool,
    pub fail: bool,
}

impl MockInput {
    pub fn new(level: bool) -> Self {
        Self { level, fail: false }
    }
}

impl DigitalErrorType for MockInput {
    type Error = MockError;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        Ok(self.level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ============================================================================
// Mock Interrupt Line
// ============================================================================

/// Mock EXTI/timer line: a pending flag plus a count of acknowledgements
pub struct MockLine {
    pending: bool,
    clears: u32,
}

impl MockLine {
    pub fn new() -> Self {
        Self {
            pending: false,
            clears: 0,
        }
    }

    /// Simulates the hardware latching an event
    pub fn raise(&mut self) {
        self.pending = true;
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }
}

impl PendingFlag for MockLine {
    fn is_pending(&mut self) -> bool {
        self.pending
    }

    fn clear_pending(&mut self) {
        self.pending = false;
        self.clears += 1;
    }
}

// ============================================================================
// Mock Raw Axis Source
// ============================================================================

/// Mock accelerometer bus that returns fixed samples
pub struct MockAxisSource {
    pub samples: [i16; 3],
    pub fail: bool,
    reads: u32,
}

impl MockAxisSource {
    pub fn new(samples: [i16; 3]) -> Self {
        Self {
            samples,
            fail: false,
            reads: 0,
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl RawAxisSource for MockAxisSource {
    type Error = MockError;

    fn read_raw_axis(&mut self, axis: Axis) -> Result<i16, Self::Error> {
        self.reads += 1;
        if self.fail {
            return Err(MockError);
        }
        Ok(match axis {
            Axis::X => self.samples[0],
            Axis::Y => self.samples[1],
            Axis::Z => self.samples[2],
        })
    }
}

// ============================================================================
// Mock SPI Register Device
// ============================================================================

/// Mock SPI device modelled as an auto-incrementing register file.
///
/// The first byte written in a transaction is the address; bit 7 set means
/// read. Further written bytes are stored at consecutive addresses; read
/// buffers are filled from consecutive addresses.
pub struct MockSpi {
    pub registers: [u8; 0x40],
    pub fail: bool,
    writes: heapless::Vec<(u8, u8), 32>,
}

impl MockSpi {
    pub fn new() -> Self {
        Self {
            registers: [0; 0x40],
            fail: false,
            writes: heapless::Vec::new(),
        }
    }

    /// Register file of a freshly reset LIS3DSH
    pub fn lis3dsh() -> Self {
        let mut spi = Self::new();
        spi.registers[0x0F] = 0x3F;
        spi
    }

    /// Stores a little-endian sample at `low` and `low + 1`
    pub fn set_sample(&mut self, low: u8, value: i16) {
        let [l, h] = value.to_le_bytes();
        self.registers[usize::from(low)] = l;
        self.registers[usize::from(low) + 1] = h;
    }

    /// Register writes in order, as (address, value)
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl SpiErrorType for MockSpi {
    type Error = MockError;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }

        let mut address: Option<usize> = None;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        match address {
                            None => address = Some(usize::from(byte & 0x7F)),
                            Some(addr) => {
                                self.registers[addr] = byte;
                                let _ = self.writes.push((addr as u8, byte));
                                address = Some(addr + 1);
                            }
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let mut addr = address.ok_or(MockError)?;
                    for slot in buffer.iter_mut() {
                        *slot = self.registers[addr];
                        addr += 1;
                    }
                    address = Some(addr);
                }
                _ => return Err(MockError),
            }
        }
        Ok(())
    }
}
