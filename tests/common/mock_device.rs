//! Register simulator implementing the driver's transport boundary

use mpu6050::{Axis, Device, Register, Releasable, TransportStatus};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Records operations performed on the mock device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Register read and the value returned
    Read { address: u8, value: u8 },
    /// Register write and the value written
    Write { address: u8, value: u8 },
}

#[derive(Debug, Clone, Copy)]
struct ReadFailure {
    address: u8,
    /// Successful reads of `address` allowed before failing
    after: usize,
    status: TransportStatus,
}

#[derive(Debug)]
struct MockState {
    registers: [u8; 128],
    operations: Vec<Operation>,
    reads: HashMap<u8, usize>,
    read_failures: Vec<ReadFailure>,
    write_failures: HashMap<u8, TransportStatus>,
}

impl MockState {
    fn new() -> Self {
        let mut registers = [0u8; 128];
        // power-on defaults
        registers[Register::PWR_MGMT_1.addr() as usize] = 0x40;
        registers[Register::WHO_AM_I.addr() as usize] = 0x68;

        Self { registers,
               operations: Vec::new(),
               reads: HashMap::new(),
               read_failures: Vec::new(),
               write_failures: HashMap::new() }
    }
}

/// Mock device sharing its state between clones, so a test can keep one
/// handle while the driver owns the other.
#[derive(Debug, Clone)]
pub struct MockDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(MockState::new())) }
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.state.borrow().registers[reg.addr() as usize]
    }

    pub fn set_register(&self, reg: Register, value: u8) {
        self.state.borrow_mut().registers[reg.addr() as usize] = value;
    }

    /// Places `value` in the output registers of `axis`
    pub fn set_sample(&self, axis: Axis, value: i16) {
        let (low, high) = axis.registers();
        let [l, h] = value.to_le_bytes();
        self.set_register(low, l);
        self.set_register(high, h);
    }

    pub fn set_temp(&self, value: i16) {
        let [l, h] = value.to_le_bytes();
        self.set_register(Register::TEMP_OUT_L, l);
        self.set_register(Register::TEMP_OUT_H, h);
    }

    /// Reads of `reg` fail with `status` once `after` of them succeeded
    pub fn fail_reads(&self, reg: Register, after: usize, status: TransportStatus) {
        self.state.borrow_mut().read_failures.push(ReadFailure { address: reg.addr(),
                                                                 after,
                                                                 status });
    }

    /// Every write to `reg` fails with `status`
    pub fn fail_writes(&self, reg: Register, status: TransportStatus) {
        self.state.borrow_mut().write_failures.insert(reg.addr(), status);
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Successful reads of `reg` so far
    pub fn read_count(&self, reg: Register) -> usize {
        self.state.borrow().reads.get(&reg.addr()).copied().unwrap_or(0)
    }

    pub fn writes_to(&self, reg: Register) -> Vec<u8> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Write { address, value } if address == reg.addr() => Some(value),
                _ => None,
            })
            .collect()
    }
}

impl Releasable for MockDevice {
    type Released = MockDevice;

    fn release(self) -> MockDevice {
        self
    }
}

impl Device for MockDevice {
    fn read(&mut self, reg: Register) -> Result<u8, TransportStatus> {
        let mut state = self.state.borrow_mut();
        let address = reg.addr();
        let count = state.reads.get(&address).copied().unwrap_or(0);

        if let Some(failure) = state.read_failures
                                    .iter()
                                    .find(|f| f.address == address && count >= f.after)
        {
            return Err(failure.status);
        }

        let value = state.registers[address as usize];
        if reg == Register::INT_STATUS {
            // cleared on read
            state.registers[address as usize] = 0;
        }
        state.reads.insert(address, count + 1);
        state.operations.push(Operation::Read { address, value });
        Ok(value)
    }

    fn write(&mut self, reg: Register, val: u8) -> Result<(), TransportStatus> {
        let mut state = self.state.borrow_mut();
        let address = reg.addr();

        if let Some(status) = state.write_failures.get(&address) {
            return Err(*status);
        }

        state.registers[address as usize] = val;
        state.operations.push(Operation::Write { address, value: val });
        Ok(())
    }
}
