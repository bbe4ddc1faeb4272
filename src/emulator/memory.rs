use super::EmulatorError;

/// Byte addressable memory seen by the CPU.
///
/// Addresses wrap around modulo the size of the memory.
pub trait Bus {
    fn size(&self) -> usize;
    fn read_byte(&self, address: u16) -> u8;
    fn read_word(&self, address: u16) -> u16;
    fn write_byte(&mut self, address: u16, data: u8);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub const DEFAULT_SIZE: usize = 64 * 1024;
    /// Room for at least one instruction
    pub const MIN_SIZE: usize = 2;
    /// Everything a 16-bit address can reach
    pub const MAX_SIZE: usize = 64 * 1024;

    pub fn new() -> Self {
        Self {
            data: vec![0; Memory::DEFAULT_SIZE],
        }
    }

    #[tracing::instrument]
    pub fn with_size(size: usize) -> Result<Self, EmulatorError> {
        if !(Memory::MIN_SIZE..=Memory::MAX_SIZE).contains(&size) {
            return Err(EmulatorError::InvalidMemorySize(size));
        }
        Ok(Self {
            data: vec![0; size],
        })
    }

    /// Copy a program into memory.
    #[tracing::instrument(skip(self, data))]
    pub fn load(&mut self, start_address: u16, data: &[u8]) -> Result<(), EmulatorError> {
        if data.len() > self.size() {
            return Err(EmulatorError::ProgramTooLarge {
                program: data.len(),
                memory: self.size(),
            });
        }

        let mut address = start_address;
        for byte in data {
            self.write_byte(address, *byte);
            address = address.wrapping_add(1);
        }
        Ok(())
    }

    fn index(&self, address: u16) -> usize {
        address as usize % self.data.len()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Memory {
    fn size(&self) -> usize {
        self.data.len()
    }

    /// Reads a byte from memory.
    fn read_byte(&self, address: u16) -> u8 {
        self.data[self.index(address)]
    }

    /// Reads a 16-bit word from memory.
    /// The 16-bit word is stored in big-endian format.
    fn read_word(&self, address: u16) -> u16 {
        u16::from_be_bytes([
            self.read_byte(address),
            self.read_byte(address.wrapping_add(1)),
        ])
    }

    /// Writes a byte to memory.
    fn write_byte(&mut self, address: u16, data: u8) {
        let index = self.index(address);
        self.data[index] = data;
    }
}
