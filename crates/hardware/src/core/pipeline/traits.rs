//! Pipeline Latch Interface.
//!
//! This module defines the common trait the hazard unit and the engine use to drive any
//! pipeline register without knowing its entry type.

use crate::core::pipeline::latches::{Control, PipeReg};

/// Represents a pipeline latch (inter-stage register).
///
/// Stages fill the pending input during evaluation; the hazard unit then picks the control
/// and the engine commits every latch at the end of the cycle.
pub trait PipelineLatch {
    /// Entry type carried by this latch.
    type Entry: Copy;

    /// Entry committed at the end of the previous cycle.
    fn output(&self) -> &Self::Entry;

    /// Sets the entry pending for the next commit.
    fn set_input(&mut self, entry: Self::Entry);

    /// Control selected for the next commit.
    fn control(&self) -> Control;

    /// Selects the control for the next commit.
    fn set_control(&mut self, control: Control);

    /// Commits the pending input according to the selected control.
    fn commit(&mut self);

    /// Holds the current output through the next commit.
    fn stall(&mut self) {
        self.set_control(Control::Stall);
    }

    /// Replaces the output with a bubble at the next commit.
    fn bubble(&mut self) {
        self.set_control(Control::Bubble);
    }

    /// Restores ordinary latching.
    fn normal(&mut self) {
        self.set_control(Control::Normal);
    }
}

impl<E: Copy + Default> PipelineLatch for PipeReg<E> {
    type Entry = E;

    #[inline]
    fn output(&self) -> &E {
        self.field().output()
    }

    #[inline]
    fn set_input(&mut self, entry: E) {
        self.field_mut().set_input(entry);
    }

    #[inline]
    fn control(&self) -> Control {
        self.field().control()
    }

    #[inline]
    fn set_control(&mut self, control: Control) {
        self.field_mut().set_control(control);
    }

    #[inline]
    fn commit(&mut self) {
        self.field_mut().commit();
    }
}
