//! Desktop simulator for the panel-tk widget toolkit.
//!
//! Builds a demo instrument menu and drives it from an SDL2 window via
//! `embedded-graphics-simulator`.
//!
//! # Key bindings
//!
//! | Key                 | Action                               |
//! |---------------------|--------------------------------------|
//! | Escape              | Open / close the menu                |
//! | Arrows              | Navigate                             |
//! | Enter / Space       | Activate the highlighted entry       |
//! | Backspace, A-Z, 0-9 | Edit a text input                    |
//!
//! Right-clicking while the menu is closed opens it at the pointer.

mod demo;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::{Keycode, MouseButton as SdlButton},
};
use log::{error, info};

use panel_tk::ToolkitConfig;
use panel_tk::ui::{
    Colour, FocusState, InputEvent, Key, MouseAction, MouseButton, WidgetId, WidgetTree,
};

use demo::{Command, CommandQueue, DemoMenu};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 640;
const DISPLAY_HEIGHT_PX: u32 = 480;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 1;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

fn screen_bounds() -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX))
}

// ---------------------------------------------------------------------------
// Event mapping
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a toolkit key.
fn map_key(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Space => Key::Space,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Backspace => Key::Backspace,
        _ => {
            // Printable keys are named by their character, keypad keys
            // by "Keypad " followed by it.
            let name = keycode.name();
            let name = name.strip_prefix("Keypad ").unwrap_or(&name);
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_graphic() => {
                    Some(Key::Char(ch.to_ascii_lowercase()))
                }
                _ => None,
            };
        }
    };
    Some(key)
}

fn map_button(button: SdlButton) -> Option<MouseButton> {
    match button {
        SdlButton::Left => Some(MouseButton::Left),
        SdlButton::Middle => Some(MouseButton::Middle),
        SdlButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn map_event(event: &SimulatorEvent) -> Option<InputEvent> {
    match *event {
        SimulatorEvent::KeyDown { keycode, .. } => map_key(keycode).map(InputEvent::key),
        SimulatorEvent::MouseMove { point } => Some(InputEvent::mouse(MouseAction::Motion, point)),
        SimulatorEvent::MouseButtonDown { mouse_btn, point } => {
            map_button(mouse_btn).map(|button| InputEvent::mouse(MouseAction::Down(button), point))
        }
        SimulatorEvent::MouseButtonUp { mouse_btn, point } => {
            map_button(mouse_btn).map(|button| InputEvent::mouse(MouseAction::Up(button), point))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Acquisition and Stop are only available when they make sense.
fn set_acquiring(tree: &mut WidgetTree, menu: &DemoMenu, acquiring: bool) {
    if let Some(start) = menu.action(Command::StartAcquisition) {
        tree.set_enabled(start, !acquiring);
    }
    if let Some(stop) = menu.action(Command::Stop) {
        tree.set_enabled(stop, acquiring);
    }
}

/// Run queued commands. Returns `false` once the simulator should exit.
fn run_commands(tree: &mut WidgetTree, menu: &DemoMenu, commands: &CommandQueue) -> bool {
    let pending: Vec<Command> = commands.borrow_mut().drain(..).collect();
    for command in pending {
        info!("Command {:?}", command);
        match command {
            Command::Calibrate => {}
            Command::StartAcquisition => {
                set_acquiring(tree, menu, true);
                tree.set_focus(menu.root, false);
            }
            Command::Stop => set_acquiring(tree, menu, false),
            Command::Quit => return false,
        }
    }
    true
}

fn toggle_menu(tree: &mut WidgetTree, root: WidgetId) {
    let open = tree.focus_state(root) == FocusState::None;
    tree.set_focus(root, open);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting panel-tk simulator");
    info!("Keys: Esc=Menu  Arrows=Navigate  Enter=Select  Right-click=Open at pointer");

    let start = Instant::now();
    let config = ToolkitConfig::default();
    let mut tree = WidgetTree::new(&config, move || start.elapsed());

    let commands: CommandQueue = Rc::new(RefCell::new(Vec::new()));
    let menu = match demo::build(&mut tree, &demo::MAIN_MENU, &commands) {
        Ok(menu) => menu,
        Err(e) => {
            error!("Failed to build menu: {}", e);
            return;
        }
    };
    info!("Built {} widgets", tree.len());
    set_acquiring(&mut tree, &menu, false);
    tree.set_focus(menu.root, true);

    let mut display = SimulatorDisplay::<Rgb565>::new(screen_bounds().size);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Panel Simulator", &output_settings);

    let viewport = screen_bounds();
    let mut at = viewport.center();
    let background = tree.palette().get(Colour::Background);

    // The SDL window is created by the first `update()`; `events()` panics
    // before that.
    let _ = display.clear(background);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => toggle_menu(&mut tree, menu.root),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: SdlButton::Right,
                    point,
                } if tree.focus_state(menu.root) == FocusState::None => {
                    at = point;
                    tree.set_focus(menu.root, true);
                }
                other => {
                    if let Some(input) = map_event(&other) {
                        tree.input(menu.root, &input, viewport, at);
                    }
                }
            }
        }

        if !run_commands(&mut tree, &menu, &commands) {
            break 'running;
        }

        // --- Render -------------------------------------------------------
        let _ = display.clear(background);
        if let Err(e) = tree.render(menu.root, &mut display, viewport, at) {
            error!("Draw error: {:?}", e);
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    tree.destroy(menu.root);
    info!("Simulator exiting");
}
