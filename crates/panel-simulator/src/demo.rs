//! Demo instrument menu described as data.
//!
//! The whole menu is one static [`WidgetDesc`] tree. [`build`] walks it and
//! creates the matching widgets with [`Menu::create_with`], so each menu's
//! entries are all built up front.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use panel_tk::ui::{Action, Input, Menu, Select, Toggle, WidgetId, WidgetTree};

/// Requests raised by action entries, handled by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Calibrate,
    StartAcquisition,
    Stop,
    Quit,
}

/// Commands queued by action callbacks since the last frame.
pub type CommandQueue = Rc<RefCell<Vec<Command>>>;

pub enum WidgetDesc {
    Menu {
        title: &'static str,
        entries: &'static [WidgetDesc],
    },
    Action {
        title: &'static str,
        command: Command,
    },
    Toggle {
        title: &'static str,
        initial: bool,
    },
    Select {
        title: &'static str,
        options: &'static [&'static str],
        initial: usize,
    },
    Input {
        title: &'static str,
        initial: &'static str,
        accept: fn(&str) -> bool,
    },
}

// ---------------------------------------------------------------------------
// Menu tables
// ---------------------------------------------------------------------------

static SOURCE_ENTRIES: [WidgetDesc; 5] = [
    WidgetDesc::Toggle { title: "Photodiode 1", initial: true },
    WidgetDesc::Toggle { title: "Photodiode 2", initial: false },
    WidgetDesc::Toggle { title: "3.3 Volts", initial: false },
    WidgetDesc::Toggle { title: "5.0 Volts", initial: false },
    WidgetDesc::Toggle { title: "Temperature", initial: false },
];

static ACQUISITION_ENTRIES: [WidgetDesc; 3] = [
    WidgetDesc::Input { title: "Frequency (Hz)", initial: "1000", accept: accept_unsigned },
    WidgetDesc::Input { title: "Oversample", initial: "0", accept: accept_unsigned },
    WidgetDesc::Menu { title: "Sources", entries: &SOURCE_ENTRIES },
];

static CHANNEL_ENTRIES: [WidgetDesc; 5] = [
    WidgetDesc::Select {
        title: "Gain",
        options: &["1x", "2x", "4x", "8x", "16x"],
        initial: 0,
    },
    WidgetDesc::Input { title: "Offset", initial: "0", accept: accept_unsigned },
    WidgetDesc::Input { title: "Shift", initial: "0", accept: accept_unsigned },
    WidgetDesc::Select {
        title: "Sample width",
        options: &["16 bit", "32 bit"],
        initial: 0,
    },
    WidgetDesc::Toggle { title: "Inverted", initial: false },
];

static CHANNELS_ENTRIES: [WidgetDesc; 2] = [
    WidgetDesc::Menu { title: "Photodiode 1", entries: &CHANNEL_ENTRIES },
    WidgetDesc::Menu { title: "Photodiode 2", entries: &CHANNEL_ENTRIES },
];

static LED_ENTRIES: [WidgetDesc; 6] = [
    WidgetDesc::Toggle { title: "Blue (470nm)", initial: false },
    WidgetDesc::Toggle { title: "Green (528nm)", initial: true },
    WidgetDesc::Toggle { title: "Yellow (570nm)", initial: false },
    WidgetDesc::Toggle { title: "Red (660nm)", initial: false },
    WidgetDesc::Toggle { title: "Infrared (850nm)", initial: false },
    WidgetDesc::Toggle { title: "Infrared (940nm)", initial: false },
];

static FILTER_ENTRIES: [WidgetDesc; 4] = [
    WidgetDesc::Input { title: "Normalisation (Hz)", initial: "0.5", accept: accept_decimal },
    WidgetDesc::Input { title: "AC denoise (Hz)", initial: "50", accept: accept_decimal },
    WidgetDesc::Toggle { title: "Normalisation", initial: true },
    WidgetDesc::Toggle { title: "AC denoise", initial: true },
];

static CONFIG_ENTRIES: [WidgetDesc; 4] = [
    WidgetDesc::Menu { title: "Acquisition", entries: &ACQUISITION_ENTRIES },
    WidgetDesc::Menu { title: "Channels", entries: &CHANNELS_ENTRIES },
    WidgetDesc::Menu { title: "LEDs", entries: &LED_ENTRIES },
    WidgetDesc::Menu { title: "Filtering", entries: &FILTER_ENTRIES },
];

static MAIN_ENTRIES: [WidgetDesc; 5] = [
    WidgetDesc::Action { title: "Calibrate", command: Command::Calibrate },
    WidgetDesc::Action { title: "Acquisition", command: Command::StartAcquisition },
    WidgetDesc::Action { title: "Stop", command: Command::Stop },
    WidgetDesc::Menu { title: "Config", entries: &CONFIG_ENTRIES },
    WidgetDesc::Action { title: "Quit", command: Command::Quit },
];

pub static MAIN_MENU: WidgetDesc = WidgetDesc::Menu {
    title: "Instrument",
    entries: &MAIN_ENTRIES,
};

// ---------------------------------------------------------------------------
// Acceptance callbacks
// ---------------------------------------------------------------------------

/// Digits only, and small enough for a `u32`. Empty is allowed while typing.
fn accept_unsigned(value: &str) -> bool {
    value.is_empty() || value.parse::<u32>().is_ok()
}

/// A decimal number with `.` or `,` as separator.
fn accept_decimal(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && value.chars().filter(|c| matches!(c, '.' | ',')).count() <= 1
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Handles the main loop needs after building.
pub struct DemoMenu {
    pub root: WidgetId,
    /// Every action entry with the command it raises.
    pub actions: Vec<(Command, WidgetId)>,
}

impl DemoMenu {
    pub fn action(&self, command: Command) -> Option<WidgetId> {
        self.actions
            .iter()
            .find(|(candidate, _)| *candidate == command)
            .map(|(_, id)| *id)
    }
}

/// Create the widgets for `desc` as a new root.
pub fn build(
    tree: &mut WidgetTree,
    desc: &'static WidgetDesc,
    commands: &CommandQueue,
) -> panel_tk::Result<DemoMenu> {
    let mut actions = Vec::new();
    let root = create(tree, None, desc, commands, &mut actions)?;
    Ok(DemoMenu { root, actions })
}

fn create(
    tree: &mut WidgetTree,
    parent: Option<WidgetId>,
    desc: &'static WidgetDesc,
    commands: &CommandQueue,
    actions: &mut Vec<(Command, WidgetId)>,
) -> panel_tk::Result<WidgetId> {
    match desc {
        WidgetDesc::Menu { title, entries } => {
            Menu::create_with(tree, parent, title, entries.len(), |tree, menu, index| {
                create(tree, Some(menu), &entries[index], commands, actions)
            })
        }
        WidgetDesc::Action { title, command } => {
            let command = *command;
            let queue = commands.clone();
            let id = Action::create(
                tree,
                parent,
                title,
                Some(Box::new(move || queue.borrow_mut().push(command))),
            )?;
            actions.push((command, id));
            Ok(id)
        }
        WidgetDesc::Toggle { title, initial } => Toggle::create(
            tree,
            parent,
            title,
            *initial,
            Some(Box::new(move |value: bool| {
                info!("{}: {}", title, if value { "on" } else { "off" })
            })),
        ),
        WidgetDesc::Select {
            title,
            options,
            initial,
        } => Select::create(
            tree,
            parent,
            title,
            options,
            *initial,
            Some(Box::new(move |index: usize| info!("{}: {}", title, options[index]))),
        ),
        WidgetDesc::Input {
            title,
            initial,
            accept,
        } => {
            let accept = *accept;
            Input::create(
                tree,
                parent,
                title,
                initial,
                Some(Box::new(move |value: &str| {
                    let accepted = accept(value);
                    if accepted {
                        info!("{}: {:?}", title, value);
                    }
                    accepted
                })),
            )
        }
    }
}
