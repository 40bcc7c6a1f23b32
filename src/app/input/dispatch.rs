//! Current-frame dispatch
//!
//! The dispatcher owns the one current input frame and drains each frame's
//! canonical queue into it, oldest event first.

use tracing::{info, trace};

use super::context::InputContext;
use super::frame::{FrameCx, InputFrame, route_event};
use super::platform::Platform;

#[derive(Default)]
pub struct Dispatcher {
    current: Option<Box<dyn InputFrame>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `frame` current and returns the frame it replaced
    pub fn set_current_input_frame(
        &mut self,
        frame: Option<Box<dyn InputFrame>>,
    ) -> Option<Box<dyn InputFrame>> {
        info!(
            from = self.current.as_ref().map(|f| f.name()),
            to = frame.as_ref().map(|f| f.name()),
            "Switching input frame"
        );
        std::mem::replace(&mut self.current, frame)
    }

    pub fn current_input_frame(&self) -> Option<&dyn InputFrame> {
        self.current.as_deref()
    }

    pub fn current_input_frame_mut(&mut self) -> Option<&mut (dyn InputFrame + 'static)> {
        self.current.as_deref_mut()
    }

    /// The current frame if it is a `T`
    pub fn current_as<T: InputFrame + 'static>(&mut self) -> Option<&mut T> {
        self.current
            .as_deref_mut()
            .and_then(|frame| frame.as_any_mut().downcast_mut::<T>())
    }

    /// Drains the context's queue into the current frame
    ///
    /// Returns the number of events delivered. With no current frame the
    /// queue is still drained and every event dropped.
    pub fn dispatch(&mut self, input: &mut InputContext, platform: &mut dyn Platform) -> usize {
        let events = input.take_events();
        let mut delivered = 0;

        for event in events {
            let Some(frame) = self.current.as_deref_mut() else {
                trace!(?event, "No current input frame, dropping");
                continue;
            };

            let mut cx = FrameCx::new(&mut *input, &mut *platform);
            let consumed = route_event(frame, &event, &mut cx);
            trace!(?event, consumed, "Dispatched");
            delivered += 1;

            if let Some(next) = cx.take_frame_switch() {
                self.set_current_input_frame(next);
            }
        }

        delivered
    }
}

/// One full input pass: poll the platform, then dispatch the frame's events
pub fn pump_frame(
    input: &mut InputContext,
    platform: &mut dyn Platform,
    dispatcher: &mut Dispatcher,
) -> usize {
    input.poll(platform);
    dispatcher.dispatch(input, platform)
}
