//! In-memory I2C bus for driver tests.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Records writes and serves register reads from a flat register file.
pub struct FakeBus {
    /// Plain `write` calls: address and bytes.
    pub writes: Vec<(u8, Vec<u8>)>,
    /// `transaction` calls with their write operations concatenated.
    pub transactions: Vec<Vec<u8>>,
    /// Register file read by `write_read`, updated by two-byte `write`s.
    pub registers: Vec<u8>,
    fail: bool,
}

impl FakeBus {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ErrorKind> {
        if self.fail { Err(ErrorKind::Other) } else { Ok(()) }
    }
}

impl Default for FakeBus {
    fn default() -> Self {
        Self {
            writes: Vec::new(),
            transactions: Vec::new(),
            registers: vec![0; 256],
            fail: false,
        }
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.check()?;
        let mut written = Vec::new();
        for operation in operations {
            match operation {
                Operation::Write(bytes) => written.extend_from_slice(bytes),
                Operation::Read(buffer) => buffer.fill(0),
            }
        }
        self.transactions.push(written);
        Ok(())
    }

    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        self.check()?;
        if let [register, value] = *bytes {
            self.registers[usize::from(register)] = value;
        }
        self.writes.push((address, bytes.to_vec()));
        Ok(())
    }

    fn write_read(
        &mut self,
        _address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.check()?;
        let start = usize::from(bytes[0]);
        buffer.copy_from_slice(&self.registers[start..start + buffer.len()]);
        Ok(())
    }
}
