//! Main controller tying schedule, navigation and hardware together
//!
//! The controller is the only owner of mutable state:
//! - Keeps the profile set, output state and navigation context
//! - Evaluates the schedule on ticks while the status screen is shown
//! - Dispatches encoder input and runs the resulting effects
//! - Pushes outputs to the actuator and redraws when something changed
//!
//! It never fails. Problems are reported as `Event`s for the caller to log.

use heapless::Vec;

use crate::config::ControllerConfig;
use crate::profile::{self, PersistError, ProfileSet};
use crate::scheduler::{Clock, OutputState, ScheduleEngine};
use crate::screen::{self, Notice};
use crate::state::{Effect, InputEvent, NavigationContext, UiMode};
use crate::traits::{Actuator, Bootloader, Display, DisplayError, NonVolatileStore};

/// Hardware collaborators
pub struct Devices<A, D, S, B> {
    pub actuator: A,
    pub display: D,
    pub store: S,
    pub bootloader: B,
}

/// Something worth logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Schedule evaluation produced a new output state
    OutputChanged(OutputState),
    /// No input for too long, back on the status screen
    IdleTimeout,
    /// A different profile became active
    ProfileActivated(u8),
    Saved,
    SaveFailed(PersistError),
    Reloaded,
    NoSavedData,
    /// Light clock shifted by this many hours
    TimeShifted(i8),
    EnteringBootloader,
    /// Drawing failed; the frame is retried on the next tick
    DisplayFailed(DisplayError),
}

/// Most events a single `tick` or `handle_input` can produce
pub const MAX_EVENTS: usize = 4;

/// Events from one call, oldest first
pub type Events = Vec<Event, MAX_EVENTS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveNotice {
    notice: Notice,
    until_ms: u64,
}

/// Grow light controller
pub struct Controller<A, D, S, B> {
    devices: Devices<A, D, S, B>,
    config: ControllerConfig,
    engine: ScheduleEngine,
    clock: Clock,
    profiles: ProfileSet,
    output: OutputState,
    nav: NavigationContext,
    notice: Option<ActiveNotice>,
    restored: bool,
    dirty: bool,
    /// Boot-time failure, reported with the first call
    pending: Option<Event>,
}

impl<A, D, S, B> Controller<A, D, S, B>
where
    A: Actuator,
    D: Display,
    S: NonVolatileStore,
    B: Bootloader,
{
    /// Bring the controller up
    ///
    /// Starts from the factory profiles, replaces them with the stored set
    /// if one loads, then evaluates the schedule, drives the outputs and
    /// draws the status screen.
    pub fn new(config: ControllerConfig, mut devices: Devices<A, D, S, B>, now_ms: u64) -> Self {
        let stored = profile::load(&mut devices.store);
        let restored = stored.is_some();

        let mut controller = Self {
            devices,
            config,
            engine: ScheduleEngine::new(config.pump),
            clock: Clock::new(now_ms),
            profiles: stored.unwrap_or_default(),
            output: OutputState::OFF,
            nav: NavigationContext::new(config.ui, now_ms),
            notice: None,
            restored,
            dirty: true,
            pending: None,
        };

        controller.refresh_output(now_ms);
        controller.apply_output();
        controller.pending = controller.redraw();
        controller
    }

    /// Periodic update
    pub fn tick(&mut self, now_ms: u64) -> Events {
        let mut events = self.start_events();

        if self.nav.check_idle(now_ms) {
            self.dirty = true;
            push(&mut events, Event::IdleTimeout);
        }

        if let Some(active) = self.notice {
            if now_ms >= active.until_ms {
                self.notice = None;
                self.dirty = true;
            }
        }

        // menus hold the live preview until the user is back on the status screen
        if self.nav.mode() == UiMode::ShowState && self.refresh_output(now_ms) {
            self.apply_output();
            self.dirty = true;
            push(&mut events, Event::OutputChanged(self.output));
        }

        if let Some(event) = self.redraw() {
            push(&mut events, event);
        }
        events
    }

    /// Handle one encoder event
    pub fn handle_input(&mut self, input: InputEvent, now_ms: u64) -> Events {
        let mut events = self.start_events();
        if input == InputEvent::Rotate(0) {
            return events;
        }

        if self.notice.take().is_some() {
            self.dirty = true;
        }

        let transition = self.nav.handle(input, &mut self.profiles, now_ms);
        if transition.redraw {
            self.dirty = true;
        }

        if let Some(effect) = transition.effect {
            self.run_effect(effect, now_ms, &mut events);
        }

        if let Some(event) = self.redraw() {
            push(&mut events, event);
        }
        events
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn output(&self) -> &OutputState {
        &self.output
    }

    pub fn mode(&self) -> UiMode {
        self.nav.mode()
    }

    pub fn navigation(&self) -> &NavigationContext {
        &self.nav
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Notice currently on screen
    pub fn notice(&self) -> Option<Notice> {
        self.notice.map(|n| n.notice)
    }

    /// Whether the profiles came from storage at start-up
    pub fn restored_from_storage(&self) -> bool {
        self.restored
    }

    pub fn devices(&self) -> &Devices<A, D, S, B> {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut Devices<A, D, S, B> {
        &mut self.devices
    }

    /// Events still owed from start-up
    fn start_events(&mut self) -> Events {
        let mut events = Events::new();
        if let Some(event) = self.pending.take() {
            push(&mut events, event);
        }
        events
    }

    fn run_effect(&mut self, effect: Effect, now_ms: u64, events: &mut Events) {
        let event = match effect {
            Effect::Preview { white_red, blue } => {
                self.output.white_red = white_red;
                self.output.blue = blue;
                self.apply_output();
                return;
            }

            Effect::ActivateProfile => {
                self.refresh_output(now_ms);
                self.apply_output();
                Event::ProfileActivated(self.profiles.active_index() as u8)
            }

            Effect::Save => match profile::save(&mut self.devices.store, &self.profiles) {
                Ok(()) => {
                    self.show_notice(Notice::Saved, now_ms);
                    Event::Saved
                }
                Err(e) => {
                    self.show_notice(Notice::SaveFailed, now_ms);
                    Event::SaveFailed(e)
                }
            },

            Effect::Reload => match profile::load(&mut self.devices.store) {
                Some(set) => {
                    self.profiles = set;
                    self.nav.return_to_status();
                    self.refresh_output(now_ms);
                    self.apply_output();
                    self.show_notice(Notice::DataLoaded, now_ms);
                    Event::Reloaded
                }
                None => {
                    self.show_notice(Notice::NoData, now_ms);
                    Event::NoSavedData
                }
            },

            Effect::EnterBootloader => {
                self.show_notice(Notice::ToFlash, now_ms);
                if let Some(event) = self.redraw() {
                    push(events, event);
                }
                push(events, Event::EnteringBootloader);
                self.devices.bootloader.enter_flash_mode();
                return;
            }

            Effect::ShiftLight(hours) => {
                self.clock.shift_light_hours(i32::from(hours));
                if self.refresh_output(now_ms) {
                    self.apply_output();
                }
                Event::TimeShifted(hours)
            }
        };
        push(events, event);
    }

    /// Re-run the schedule engine; returns true if the output changed
    fn refresh_output(&mut self, now_ms: u64) -> bool {
        let elapsed = self.clock.elapsed(now_ms);
        let evaluation = self
            .engine
            .evaluate(elapsed, self.profiles.active(), &self.output);
        self.output = evaluation.state;
        evaluation.changed
    }

    fn apply_output(&mut self) {
        let actuator = &mut self.devices.actuator;
        actuator.set_pump(self.output.pump_on);
        actuator.set_white_red(self.output.white_red);
        actuator.set_blue(self.output.blue);
    }

    fn show_notice(&mut self, notice: Notice, now_ms: u64) {
        self.notice = Some(ActiveNotice {
            notice,
            until_ms: now_ms.saturating_add(self.config.ui.notice_ms),
        });
        self.dirty = true;
    }

    /// Draw the current screen if anything changed
    fn redraw(&mut self) -> Option<Event> {
        if !self.dirty {
            return None;
        }

        let display = &mut self.devices.display;
        let result = match self.notice {
            Some(active) => screen::render_notice(display, active.notice),
            None => screen::render(display, &self.nav, &self.profiles, &self.output),
        };

        match result {
            Ok(()) => {
                self.dirty = false;
                None
            }
            Err(e) => Some(Event::DisplayFailed(e)),
        }
    }
}

/// Append an event; `MAX_EVENTS` covers the longest sequence a call produces
fn push(events: &mut Events, event: Event) {
    let _ = events.push(event);
}
