//! Integration tests for GUI hover, focus and capture driven by raw input

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use hearth::app::gui::{
    Button, Element, EventListener, GuiManager, ManualClock, Panel, Rect, Slider, timer,
};
use hearth::app::input::{Dispatcher, InputContext, RawEvent, ScriptedPlatform, pump_frame};
use winit::event::MouseButton as WinitButton;
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

/// Input pipeline with a GUI manager as the current frame
struct Harness {
    input: InputContext,
    platform: ScriptedPlatform,
    dispatcher: Dispatcher,
}

impl Harness {
    fn new(gui: GuiManager) -> Self {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_current_input_frame(Some(Box::new(gui)));
        Self {
            input: InputContext::default(),
            platform: ScriptedPlatform::new(),
            dispatcher,
        }
    }

    fn pump(&mut self) {
        pump_frame(&mut self.input, &mut self.platform, &mut self.dispatcher);
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.platform.move_to(x, y);
        self.pump();
    }

    fn click(&mut self, x: i32, y: i32) {
        self.platform.push(RawEvent::MouseButtonDown {
            button: WinitButton::Left,
            x,
            y,
        });
        self.platform.push(RawEvent::MouseButtonUp {
            button: WinitButton::Left,
            x,
            y,
        });
        self.pump();
    }

    fn tap(&mut self, key: WinitKey) {
        self.platform.push(RawEvent::KeyDown(PhysicalKey::Code(key)));
        self.platform.push(RawEvent::KeyUp(PhysicalKey::Code(key)));
        self.pump();
    }

    fn gui(&mut self) -> &mut GuiManager {
        self.dispatcher
            .current_as::<GuiManager>()
            .expect("gui manager is current")
    }
}

#[test]
fn test_overlapping_elements_from_raw_motion() {
    let mut gui = GuiManager::new();
    let a = gui.add_element(Element::panel(Rect::new(0, 0, 100, 100)));
    let b = gui.add_element(Element::panel(Rect::new(50, 50, 100, 100)));
    let mut harness = Harness::new(gui);

    harness.move_to(75, 75);
    assert_eq!(harness.gui().moused_over(), Some(b));

    harness.move_to(10, 10);
    assert_eq!(harness.gui().moused_over(), Some(a));

    harness.move_to(500, 500);
    assert_eq!(harness.gui().moused_over(), None);
}

#[test]
fn test_button_click_and_keyboard_activation() {
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let mut gui = GuiManager::new();
    let button = gui.add_element(Element::new(
        Rect::new(10, 10, 80, 20),
        Button::new().on_click(move || counter.set(counter.get() + 1)),
    ));
    let mut harness = Harness::new(gui);

    harness.move_to(20, 15);
    harness.click(20, 15);
    assert_eq!(clicks.get(), 1);
    assert_eq!(harness.gui().keyboard_focus(), Some(button));
    assert!(
        harness
            .gui()
            .widget::<Button>(button)
            .is_some_and(Button::is_focused)
    );

    harness.tap(WinitKey::Enter);
    assert_eq!(clicks.get(), 2);

    // Clicking empty space drops focus, so Enter no longer reaches the button
    harness.move_to(300, 300);
    harness.click(300, 300);
    harness.tap(WinitKey::Enter);
    assert_eq!(clicks.get(), 2);
    assert_eq!(harness.gui().keyboard_focus(), None);
}

#[test]
fn test_slider_keeps_capture_outside_its_rect() {
    let mut gui = GuiManager::new();
    let slider = gui.add_element(Element::new(Rect::new(0, 0, 100, 10), Slider::new(0.0)));
    let other = gui.add_element(Element::panel(Rect::new(0, 50, 100, 100)));
    let mut harness = Harness::new(gui);

    harness.move_to(10, 5);
    harness.platform.push(RawEvent::MouseButtonDown {
        button: WinitButton::Left,
        x: 10,
        y: 5,
    });
    harness.pump();
    assert_eq!(harness.gui().clicked_on(), Some(slider));

    // Over another element, but the slider holds the pointer
    harness.move_to(60, 80);
    assert_eq!(harness.gui().moused_over(), Some(slider));
    let value = harness.gui().widget::<Slider>(slider).map(Slider::value);
    assert_eq!(value, Some(0.6));

    harness.platform.push(RawEvent::MouseButtonUp {
        button: WinitButton::Left,
        x: 60,
        y: 80,
    });
    harness.pump();
    assert_eq!(harness.gui().clicked_on(), None);

    harness.move_to(61, 80);
    assert_eq!(harness.gui().moused_over(), Some(other));
}

#[test]
fn test_focused_slider_steps_with_arrow_keys() {
    let mut gui = GuiManager::new();
    let slider = gui.add_element(Element::new(Rect::new(0, 0, 100, 10), Slider::new(0.5)));
    let mut harness = Harness::new(gui);

    harness.move_to(50, 5);
    harness.click(50, 5);
    harness.tap(WinitKey::ArrowRight);
    harness.tap(WinitKey::ArrowRight);

    let value = harness
        .gui()
        .widget::<Slider>(slider)
        .map(Slider::value)
        .unwrap_or_default();
    assert!((value - 0.7).abs() < 1e-5);
}

#[test]
fn test_element_timers_fire_on_update() {
    let clock = ManualClock::new();
    let fired = Rc::new(Cell::new(0));
    let ticks = Rc::new(Cell::new(0));

    let once = fired.clone();
    let repeat = ticks.clone();
    let mut gui = GuiManager::new();
    gui.add_element(
        Element::new(Rect::new(0, 0, 10, 10), Panel)
            .with_listener(timer::after(Rc::new(clock.clone()), Duration::from_secs(1), move || {
                once.set(once.get() + 1)
            }))
            .with_listener(timer::every(
                Rc::new(clock.clone()),
                Duration::from_millis(250),
                move || repeat.set(repeat.get() + 1),
            )),
    );

    for _ in 0..8 {
        clock.advance(Duration::from_millis(250));
        gui.update();
    }

    assert_eq!(fired.get(), 1);
    assert_eq!(ticks.get(), 8);
    // The spent one-shot timer has been pruned
    assert_eq!(gui.elements()[0].listeners().len(), 1);
}

#[test]
fn test_listener_added_from_widget_callback() {
    let armed = Rc::new(Cell::new(false));
    let ran = Rc::new(Cell::new(0));

    let mut gui = GuiManager::new();
    let id = gui.add_element(Element::panel(Rect::new(0, 0, 10, 10)));
    let gate = armed.clone();
    let counter = ran.clone();
    if let Some(element) = gui.element_mut(id) {
        element.add_listener(EventListener::new(
            move || gate.get(),
            move || counter.set(counter.get() + 1),
        ));
    }

    gui.update();
    armed.set(true);
    gui.update();
    gui.update();
    assert_eq!(ran.get(), 2);
}
