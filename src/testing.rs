//! Scripted bus and delay shared by the unit tests.
//!
//! Both halves record into one log so the relative order of register
//! transactions and pauses can be asserted. Simulated time only advances
//! through the delay, and an optional budget turns it into a panic so that
//! the never-ending loops can be driven for a bounded number of rounds.
extern crate std;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};

use crate::app::Listener;
use crate::Gesture;

pub(crate) const BUDGET_EXHAUSTED: &str = "simulated time budget exhausted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
  Write { address: u8, bytes: Vec<u8> },
  Read { address: u8, register: u8, len: usize },
  Delay(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FakeError;

impl embedded_hal::i2c::Error for FakeError {
  fn kind(&self) -> ErrorKind {
    ErrorKind::Other
  }
}

#[derive(Default)]
struct State {
  // Each register replays its queue and then sticks to the last value.
  registers: BTreeMap<u8, VecDeque<[u8; 2]>>,
  fail_reads: bool,
  failing_registers: BTreeSet<u8>,
  fail_writes: bool,
  ops: Vec<Op>,
  elapsed_ms: u64,
  budget_ms: Option<u64>,
}

#[derive(Clone, Default)]
pub(crate) struct Harness {
  state: Rc<RefCell<State>>,
}

impl Harness {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn bus(&self) -> FakeBus {
    FakeBus { state: self.state.clone() }
  }

  pub(crate) fn delay(&self) -> FakeDelay {
    FakeDelay { state: self.state.clone() }
  }

  pub(crate) fn respond(&self, register: u8, value: [u8; 2]) -> &Self {
    self.state.borrow_mut().registers.entry(register).or_default().push_back(value);
    self
  }

  pub(crate) fn fail_reads(&self, fail: bool) -> &Self {
    self.state.borrow_mut().fail_reads = fail;
    self
  }

  pub(crate) fn fail_register(&self, register: u8) -> &Self {
    self.state.borrow_mut().failing_registers.insert(register);
    self
  }

  pub(crate) fn fail_writes(&self, fail: bool) -> &Self {
    self.state.borrow_mut().fail_writes = fail;
    self
  }

  pub(crate) fn budget_ms(&self, budget: u64) -> &Self {
    self.state.borrow_mut().budget_ms = Some(budget);
    self
  }

  pub(crate) fn ops(&self) -> Vec<Op> {
    self.state.borrow().ops.clone()
  }

  pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
    self
      .ops()
      .into_iter()
      .filter_map(|op| match op {
        Op::Write { bytes, .. } => Some(bytes),
        _ => None,
      })
      .collect()
  }

  pub(crate) fn reads_of(&self, register: u8) -> usize {
    self.ops().iter().filter(|op| matches!(op, Op::Read { register: r, .. } if *r == register)).count()
  }

  pub(crate) fn delays(&self) -> Vec<u32> {
    self
      .ops()
      .into_iter()
      .filter_map(|op| match op {
        Op::Delay(ms) => Some(ms),
        _ => None,
      })
      .collect()
  }

  pub(crate) fn elapsed_ms(&self) -> u64 {
    self.state.borrow().elapsed_ms
  }
}

pub(crate) struct FakeBus {
  state: Rc<RefCell<State>>,
}

impl FakeBus {
  fn handle(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), FakeError> {
    let mut state = self.state.borrow_mut();
    match operations {
      [Operation::Write(bytes)] => {
        state.ops.push(Op::Write { address, bytes: bytes.to_vec() });
        if state.fail_writes {
          return Err(FakeError);
        }
        Ok(())
      }
      [Operation::Write(reg), Operation::Read(buf)] => {
        let register = reg[0];
        let len = buf.len();
        state.ops.push(Op::Read { address, register, len });
        if state.fail_reads || state.failing_registers.contains(&register) {
          return Err(FakeError);
        }
        let value = match state.registers.get_mut(&register) {
          Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
          Some(queue) => queue.front().copied().unwrap_or_default(),
          None => [0, 0],
        };
        buf.copy_from_slice(&value[..len]);
        Ok(())
      }
      _ => panic!("unsupported transaction shape"),
    }
  }
}

impl ErrorType for FakeBus {
  type Error = FakeError;
}

impl embedded_hal::i2c::I2c<SevenBitAddress> for FakeBus {
  fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), FakeError> {
    self.handle(address, operations)
  }
}

impl embedded_hal_async::i2c::I2c<SevenBitAddress> for FakeBus {
  async fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), FakeError> {
    self.handle(address, operations)
  }
}

pub(crate) struct FakeDelay {
  state: Rc<RefCell<State>>,
}

impl FakeDelay {
  fn advance(&mut self, ms: u32) {
    let mut state = self.state.borrow_mut();
    state.ops.push(Op::Delay(ms));
    state.elapsed_ms += u64::from(ms);
    let elapsed = state.elapsed_ms;
    let exhausted = state.budget_ms.is_some_and(|budget| elapsed > budget);
    drop(state);
    if exhausted {
      panic!("{}", BUDGET_EXHAUSTED);
    }
  }
}

impl embedded_hal::delay::DelayNs for FakeDelay {
  fn delay_ns(&mut self, ns: u32) {
    self.advance(ns / 1_000_000);
  }

  fn delay_ms(&mut self, ms: u32) {
    self.advance(ms);
  }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
  async fn delay_ns(&mut self, ns: u32) {
    self.advance(ns / 1_000_000);
  }

  async fn delay_ms(&mut self, ms: u32) {
    self.advance(ms);
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
  Retrying(u32),
  Initialized,
  Gesture(Gesture, u16),
}

#[derive(Default)]
pub(crate) struct Recorder {
  pub(crate) notices: Vec<Notice>,
}

impl Recorder {
  pub(crate) fn retries(&self) -> usize {
    self.notices.iter().filter(|n| matches!(n, Notice::Retrying(_))).count()
  }

  pub(crate) fn gestures(&self) -> Vec<Gesture> {
    self
      .notices
      .iter()
      .filter_map(|n| match n {
        Notice::Gesture(g, _) => Some(*g),
        _ => None,
      })
      .collect()
  }
}

impl Listener for Recorder {
  fn retrying(&mut self, attempt: u32) {
    self.notices.push(Notice::Retrying(attempt));
  }

  fn initialized(&mut self) {
    self.notices.push(Notice::Initialized);
  }

  fn gesture(&mut self, gesture: Gesture, code: u16) {
    self.notices.push(Notice::Gesture(gesture, code));
  }
}

/// Runs `f` until the simulated time budget panics, and checks that this is
/// why it stopped.
pub(crate) fn until_budget<F: FnOnce()>(f: F) {
  let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
  let payload = outcome.expect_err("loop returned before the time budget ran out");
  let message = payload
    .downcast_ref::<std::string::String>()
    .map(|s| s.as_str())
    .or_else(|| payload.downcast_ref::<&str>().copied())
    .unwrap_or_default();
  assert_eq!(message, BUDGET_EXHAUSTED);
}
