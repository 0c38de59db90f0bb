//! Recording fakes shared by the host tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use pwm_sweep::duty_cycle::ChannelRegisters;
use pwm_sweep::output_channel::OutputChannel;

/// Something that happened to a [`RecordingChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    Apply(ChannelRegisters),
    ClearWrap,
    /// A blocking hold, logged by delays that share a [`SharedLog`].
    Delay(u32),
}

/// An [`OutputChannel`] that remembers its registers and every call made on it.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub registers: Option<ChannelRegisters>,
    pub enabled: bool,
    pub wrap_pending: bool,
    pub events: Vec<ChannelEvent>,
}

impl RecordingChannel {
    pub fn applied(&self) -> Vec<ChannelRegisters> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ChannelEvent::Apply(registers) => Some(*registers),
                ChannelEvent::ClearWrap | ChannelEvent::Delay(_) => None,
            })
            .collect()
    }
}

impl OutputChannel for RecordingChannel {
    fn apply(&mut self, registers: ChannelRegisters) {
        self.registers = Some(registers);
        self.enabled = true;
        self.events.push(ChannelEvent::Apply(registers));
    }

    fn clear_wrap(&mut self) {
        self.wrap_pending = false;
        self.events.push(ChannelEvent::ClearWrap);
    }
}

/// Events from several channels, in the order they happened.
pub type SharedLog = std::rc::Rc<std::cell::RefCell<Vec<(&'static str, ChannelEvent)>>>;

/// An [`OutputChannel`] that appends to a log shared with other channels.
#[derive(Debug)]
pub struct LoggedChannel {
    pub name: &'static str,
    pub log: SharedLog,
}

impl OutputChannel for LoggedChannel {
    fn apply(&mut self, registers: ChannelRegisters) {
        self.log
            .borrow_mut()
            .push((self.name, ChannelEvent::Apply(registers)));
    }

    fn clear_wrap(&mut self) {
        self.log.borrow_mut().push((self.name, ChannelEvent::ClearWrap));
    }
}
