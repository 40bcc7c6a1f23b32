//! Platform event translation
//!
//! Turns one raw platform event into at most one canonical [`Event`],
//! updating the flat input state, the key-hold set and the warp queue on the
//! way. Translation never fails: anything without a canonical meaning is
//! dropped.

use tracing::{debug, trace};
use winit::keyboard::PhysicalKey;

use super::events::{Event, KeyEvent, Modifiers, MouseKeyEvent, MouseMoveEvent, MouseScrollEvent};
use super::hold::KeyHoldSet;
use super::keys::{KeyCode, MouseButton};
use super::platform::RawEvent;
use super::state::FlatInputRep;
use super::warp::{WarpMatch, WarpQueue};

/// Mutable input state touched by translation
pub(crate) struct Translator<'a> {
    pub state: &'a mut FlatInputRep,
    pub holds: &'a mut KeyHoldSet,
    pub warps: &'a mut WarpQueue,
}

fn canonical_key(key: PhysicalKey) -> Option<KeyCode> {
    match key {
        PhysicalKey::Code(code) => KeyCode::from_winit(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

impl Translator<'_> {
    /// Translates one raw event; `modifiers` is the platform's live state
    pub fn translate(&mut self, raw: RawEvent, modifiers: Modifiers) -> Option<Event> {
        let event = match raw {
            RawEvent::KeyDown(physical) => {
                let Some(key) = canonical_key(physical) else {
                    debug!(?physical, "Dropping unmapped key press");
                    return None;
                };
                let payload = KeyEvent { key, modifiers };
                if self.state.keys[key] {
                    Event::KeyRepeat(payload)
                } else {
                    self.state.keys[key] = true;
                    self.holds.insert(key);
                    Event::KeyPress(payload)
                }
            }

            RawEvent::KeyUp(physical) => {
                let Some(key) = canonical_key(physical) else {
                    debug!(?physical, "Dropping unmapped key release");
                    return None;
                };
                self.state.keys[key] = false;
                self.holds.remove(key);
                Event::KeyRelease(KeyEvent { key, modifiers })
            }

            RawEvent::MouseButtonDown { button, x, y } => {
                let button = self.mouse_button(button)?;
                self.state.mouse.buttons.set(button, true);
                self.state.mouse.x = x;
                self.state.mouse.y = y;
                Event::MouseKeyPress(MouseKeyEvent { button, x, y })
            }

            RawEvent::MouseButtonUp { button, x, y } => {
                let button = self.mouse_button(button)?;
                self.state.mouse.buttons.set(button, false);
                self.state.mouse.x = x;
                self.state.mouse.y = y;
                Event::MouseKeyRelease(MouseKeyEvent { button, x, y })
            }

            RawEvent::MouseMotion { x, y, rel_x, rel_y } => {
                self.state.mouse.x = x;
                self.state.mouse.y = y;
                match self.warps.filter(x, y) {
                    WarpMatch::Echo(warp) => {
                        trace!(x = warp.x, y = warp.y, "Swallowed warp echo");
                        return None;
                    }
                    WarpMatch::Coalesced(warp) => Event::MouseMove(MouseMoveEvent {
                        x,
                        y,
                        rel_x: rel_x.saturating_sub(warp.rel_x),
                        rel_y: rel_y.saturating_sub(warp.rel_y),
                    }),
                    WarpMatch::Genuine => Event::MouseMove(MouseMoveEvent { x, y, rel_x, rel_y }),
                }
            }

            RawEvent::MouseWheel { amount } => {
                if amount == 0 {
                    return None;
                }
                self.state.mouse.scroll = self.state.mouse.scroll.saturating_add(amount);
                Event::MouseScroll(MouseScrollEvent {
                    amount,
                    x: self.state.mouse.x,
                    y: self.state.mouse.y,
                })
            }

            RawEvent::Quit => Event::WindowExit,
            RawEvent::Resized { width, height } => Event::WindowResize { width, height },
            RawEvent::FocusLost => Event::WindowLoseFocus,
            RawEvent::FocusGained => Event::WindowRegainFocus,
            RawEvent::CursorLeft => Event::WindowMouseLeave,
            RawEvent::CursorEntered => Event::WindowMouseEnter,
        };

        trace!(?event, "Translated");
        Some(event)
    }

    fn mouse_button(&self, button: winit::event::MouseButton) -> Option<MouseButton> {
        let mapped = MouseButton::from_winit(button);
        if mapped.is_none() {
            debug!(?button, "Dropping unmapped mouse button");
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton as PlatformButton;
    use winit::keyboard::{KeyCode as WinitKey, NativeKeyCode};

    struct Fixture {
        state: FlatInputRep,
        holds: KeyHoldSet,
        warps: WarpQueue,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                state: FlatInputRep::default(),
                holds: KeyHoldSet::new(),
                warps: WarpQueue::new(),
            }
        }

        fn feed(&mut self, raw: RawEvent) -> Option<Event> {
            self.feed_with(raw, Modifiers::default())
        }

        fn feed_with(&mut self, raw: RawEvent, modifiers: Modifiers) -> Option<Event> {
            Translator {
                state: &mut self.state,
                holds: &mut self.holds,
                warps: &mut self.warps,
            }
            .translate(raw, modifiers)
        }
    }

    fn key_down(key: WinitKey) -> RawEvent {
        RawEvent::KeyDown(PhysicalKey::Code(key))
    }

    fn key_up(key: WinitKey) -> RawEvent {
        RawEvent::KeyUp(PhysicalKey::Code(key))
    }

    #[test]
    fn test_first_down_is_press_then_repeat() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.feed(key_down(WinitKey::KeyW)),
            Some(Event::KeyPress(KeyEvent::new(KeyCode::W)))
        );
        assert_eq!(
            fx.feed(key_down(WinitKey::KeyW)),
            Some(Event::KeyRepeat(KeyEvent::new(KeyCode::W)))
        );
        assert!(fx.state.keys[KeyCode::W]);
        assert_eq!(fx.holds.len(), 1);
    }

    #[test]
    fn test_release_clears_state_and_hold() {
        let mut fx = Fixture::new();
        fx.feed(key_down(WinitKey::KeyA));
        assert_eq!(
            fx.feed(key_up(WinitKey::KeyA)),
            Some(Event::KeyRelease(KeyEvent::new(KeyCode::A)))
        );
        assert!(!fx.state.keys[KeyCode::A]);
        assert!(fx.holds.is_empty());
    }

    #[test]
    fn test_unknown_codes_produce_nothing() {
        let mut fx = Fixture::new();
        assert_eq!(fx.feed(key_down(WinitKey::F24)), None);
        assert_eq!(
            fx.feed(RawEvent::KeyDown(PhysicalKey::Unidentified(
                NativeKeyCode::Unidentified
            ))),
            None
        );
        assert_eq!(
            fx.feed(RawEvent::MouseButtonDown {
                button: PlatformButton::Other(9),
                x: 0,
                y: 0
            }),
            None
        );
        assert!(fx.holds.is_empty());
        assert_eq!(fx.state, FlatInputRep::default());
    }

    #[test]
    fn test_modifiers_come_from_live_state() {
        let mut fx = Fixture::new();
        let live = Modifiers {
            left_shift: true,
            right_alt: true,
            ..Default::default()
        };
        let event = fx.feed_with(key_down(WinitKey::KeyQ), live);
        assert_eq!(event.and_then(|e| e.key_event().map(|k| k.modifiers)), Some(live));
    }

    #[test]
    fn test_mouse_buttons_update_state() {
        let mut fx = Fixture::new();
        let pressed = fx.feed(RawEvent::MouseButtonDown {
            button: PlatformButton::Right,
            x: 5,
            y: 6,
        });
        assert_eq!(
            pressed,
            Some(Event::MouseKeyPress(MouseKeyEvent {
                button: MouseButton::Right,
                x: 5,
                y: 6
            }))
        );
        assert!(fx.state.mouse.buttons.right);

        fx.feed(RawEvent::MouseButtonUp {
            button: PlatformButton::Right,
            x: 7,
            y: 6,
        });
        assert!(!fx.state.mouse.buttons.right);
        assert_eq!(fx.state.cursor(), (7, 6));
    }

    #[test]
    fn test_warp_echo_is_swallowed_but_state_moves() {
        let mut fx = Fixture::new();
        fx.warps.push((0, 0), 320, 240);
        let event = fx.feed(RawEvent::MouseMotion {
            x: 320,
            y: 240,
            rel_x: 320,
            rel_y: 240,
        });
        assert_eq!(event, None);
        assert_eq!(fx.state.cursor(), (320, 240));
        assert!(fx.warps.is_empty());
    }

    #[test]
    fn test_coalesced_motion_subtracts_warp_delta() {
        let mut fx = Fixture::new();
        fx.warps.push((300, 200), 320, 240);
        let event = fx.feed(RawEvent::MouseMotion {
            x: 325,
            y: 238,
            rel_x: 25,
            rel_y: 38,
        });
        assert_eq!(
            event,
            Some(Event::MouseMove(MouseMoveEvent {
                x: 325,
                y: 238,
                rel_x: 5,
                rel_y: -2
            }))
        );
    }

    #[test]
    fn test_scroll_accumulates_at_cursor() {
        let mut fx = Fixture::new();
        fx.feed(RawEvent::MouseMotion {
            x: 40,
            y: 50,
            rel_x: 40,
            rel_y: 50,
        });
        fx.feed(RawEvent::MouseWheel { amount: 2 });
        let event = fx.feed(RawEvent::MouseWheel { amount: -1 });
        assert_eq!(
            event,
            Some(Event::MouseScroll(MouseScrollEvent {
                amount: -1,
                x: 40,
                y: 50
            }))
        );
        assert_eq!(fx.state.mouse.scroll, 1);
        assert_eq!(fx.feed(RawEvent::MouseWheel { amount: 0 }), None);
    }

    #[test]
    fn test_window_events_map_one_to_one() {
        let mut fx = Fixture::new();
        assert_eq!(fx.feed(RawEvent::Quit), Some(Event::WindowExit));
        assert_eq!(
            fx.feed(RawEvent::Resized {
                width: 800,
                height: 600
            }),
            Some(Event::WindowResize {
                width: 800,
                height: 600
            })
        );
        assert_eq!(fx.feed(RawEvent::FocusLost), Some(Event::WindowLoseFocus));
        assert_eq!(fx.feed(RawEvent::FocusGained), Some(Event::WindowRegainFocus));
        assert_eq!(fx.feed(RawEvent::CursorLeft), Some(Event::WindowMouseLeave));
        assert_eq!(fx.feed(RawEvent::CursorEntered), Some(Event::WindowMouseEnter));
    }
}
