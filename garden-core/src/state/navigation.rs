//! Navigation state machine
//!
//! A single encoder (rotate + click) drives every screen. Handlers mutate
//! the profile set in place and return a `Transition` describing whether
//! the screen needs redrawing and which side effect the controller must run.

use super::events::{Effect, InputEvent, Transition};
use super::machine::{step_profile, step_row, MenuAction, PeriodField, UiMode, ValueField};
use crate::config::UiConfig;
use crate::profile::ProfileSet;

/// Largest time shift selectable in one go (hours)
pub const MAX_TIME_SHIFT_HOURS: i8 = 23;

/// Navigation context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationContext {
    mode: UiMode,
    last_input_ms: u64,
    ui: UiConfig,
}

impl NavigationContext {
    /// Start on the status screen
    pub fn new(ui: UiConfig, now_ms: u64) -> Self {
        Self {
            mode: UiMode::ShowState,
            last_input_ms: now_ms,
            ui,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    /// Timestamp of the last non-empty input
    pub fn last_input_ms(&self) -> u64 {
        self.last_input_ms
    }

    /// Profile shown by the browse screens
    pub fn menu_profile_index(&self, active: usize) -> usize {
        match self.mode {
            UiMode::ShowProfile { browsed } => browsed,
            _ => active,
        }
    }

    /// Selected period, -1 for BACK
    pub fn edit_period_index(&self) -> i8 {
        match self.mode {
            UiMode::EditProfile { row: Some(period) }
            | UiMode::EditPeriod { period, .. }
            | UiMode::EditValue { period, .. } => period as i8,
            _ => -1,
        }
    }

    /// Selected (or edited) period field
    pub fn edit_field(&self) -> PeriodField {
        match self.mode {
            UiMode::EditPeriod { field, .. } => field,
            UiMode::EditValue { field, .. } => field.into(),
            _ => PeriodField::Back,
        }
    }

    pub fn top_menu_action(&self) -> MenuAction {
        match self.mode {
            UiMode::TopMenu { action } => action,
            _ => MenuAction::Shift,
        }
    }

    pub fn time_shift_hours(&self) -> i8 {
        match self.mode {
            UiMode::TimeShift { hours } => hours,
            _ => 0,
        }
    }

    /// Go back to the status screen
    ///
    /// Returns true if the mode changed.
    pub fn return_to_status(&mut self) -> bool {
        self.set_mode(UiMode::ShowState)
    }

    /// Fall back to the status screen after the idle timeout
    ///
    /// Edits already applied to the profile set are kept. Returns true if
    /// the mode changed.
    pub fn check_idle(&mut self, now_ms: u64) -> bool {
        let idle = now_ms.saturating_sub(self.last_input_ms);
        if idle > self.ui.idle_timeout_ms && self.mode != UiMode::ShowState {
            self.mode = UiMode::ShowState;
            true
        } else {
            false
        }
    }

    /// Handle one input event
    pub fn handle(&mut self, event: InputEvent, set: &mut ProfileSet, now_ms: u64) -> Transition {
        match event {
            InputEvent::Rotate(0) => Transition::NONE,
            InputEvent::Rotate(delta) => {
                self.last_input_ms = now_ms;
                self.rotate(delta, set)
            }
            InputEvent::Click => {
                self.last_input_ms = now_ms;
                self.click(set)
            }
        }
    }

    fn rotate(&mut self, delta: i32, set: &mut ProfileSet) -> Transition {
        let active = set.active_index();

        match self.mode {
            UiMode::ShowState | UiMode::ShowProfile { .. } => {
                let next = match step_profile(self.menu_profile_index(active), delta) {
                    Some(index) => UiMode::browse(index, active),
                    None => UiMode::TopMenu {
                        action: MenuAction::Shift,
                    },
                };
                Transition::redraw_if(self.set_mode(next))
            }

            UiMode::EditProfile { row } => Transition::redraw_if(self.set_mode(UiMode::EditProfile {
                row: step_row(row, delta),
            })),

            UiMode::EditPeriod { period, field } => {
                Transition::redraw_if(self.set_mode(UiMode::EditPeriod {
                    period,
                    field: field.step(delta),
                }))
            }

            UiMode::EditValue { period, field } => {
                let Some(slot) = set.active_mut().periods.get_mut(period) else {
                    return Transition::NONE;
                };
                match field {
                    ValueField::Duration => {
                        let step = i32::from(self.ui.duration_step_minutes);
                        Transition::redraw_if(slot.adjust_duration(delta.saturating_mul(step)))
                    }
                    ValueField::WhiteRed => {
                        let step = i32::from(self.ui.power_step_percent);
                        let changed = slot.adjust_white_red(delta.saturating_mul(step));
                        Transition::redraw_if(changed).with_effect(Effect::Preview {
                            white_red: slot.white_red,
                            blue: slot.blue,
                        })
                    }
                    ValueField::Blue => {
                        let step = i32::from(self.ui.power_step_percent);
                        let changed = slot.adjust_blue(delta.saturating_mul(step));
                        Transition::redraw_if(changed).with_effect(Effect::Preview {
                            white_red: slot.white_red,
                            blue: slot.blue,
                        })
                    }
                }
            }

            UiMode::TopMenu { action } => {
                let next = match action.step(delta) {
                    Some(action) => UiMode::TopMenu { action },
                    None => UiMode::browse(0, active),
                };
                Transition::redraw_if(self.set_mode(next))
            }

            UiMode::TimeShift { hours } => {
                let max = i32::from(MAX_TIME_SHIFT_HOURS);
                let next = i32::from(hours).saturating_add(delta).clamp(-max, max) as i8;
                Transition::redraw_if(self.set_mode(UiMode::TimeShift { hours: next }))
            }
        }
    }

    fn click(&mut self, set: &mut ProfileSet) -> Transition {
        let active = set.active_index();

        match self.mode {
            UiMode::ShowProfile { browsed } => {
                self.mode = UiMode::ShowState;
                if browsed != active && set.set_active(browsed) {
                    Transition::REDRAW.with_effect(Effect::ActivateProfile)
                } else {
                    Transition::REDRAW
                }
            }

            UiMode::ShowState => {
                self.mode = UiMode::EditProfile { row: None };
                Transition::REDRAW
            }

            UiMode::EditProfile { row: None } => {
                self.mode = UiMode::ShowState;
                Transition::REDRAW
            }

            UiMode::EditProfile { row: Some(period) } => {
                self.mode = UiMode::EditPeriod {
                    period,
                    field: PeriodField::Back,
                };
                match set.active().periods.get(period) {
                    Some(slot) => Transition::REDRAW.with_effect(Effect::Preview {
                        white_red: slot.white_red,
                        blue: slot.blue,
                    }),
                    None => Transition::REDRAW,
                }
            }

            UiMode::EditPeriod { period, field } => {
                self.mode = match field.value() {
                    Some(field) => UiMode::EditValue { period, field },
                    None => UiMode::EditProfile { row: Some(period) },
                };
                Transition::REDRAW
            }

            UiMode::EditValue { period, field } => {
                self.mode = UiMode::EditPeriod {
                    period,
                    field: field.into(),
                };
                Transition::REDRAW
            }

            UiMode::TopMenu { action } => match action {
                MenuAction::Shift => {
                    self.mode = UiMode::TimeShift { hours: 0 };
                    Transition::REDRAW
                }
                MenuAction::Save => {
                    self.mode = UiMode::ShowState;
                    Transition::REDRAW.with_effect(Effect::Save)
                }
                // Mode changes only once the controller knows the load worked
                MenuAction::Reload => Transition::REDRAW.with_effect(Effect::Reload),
                MenuAction::Flash => Transition::REDRAW.with_effect(Effect::EnterBootloader),
            },

            UiMode::TimeShift { hours } => {
                self.mode = UiMode::TopMenu {
                    action: MenuAction::Shift,
                };
                if hours != 0 {
                    Transition::REDRAW.with_effect(Effect::ShiftLight(hours))
                } else {
                    Transition::REDRAW
                }
            }
        }
    }

    fn set_mode(&mut self, mode: UiMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Period;

    fn nav() -> NavigationContext {
        NavigationContext::new(UiConfig::default(), 0)
    }

    fn rotate(nav: &mut NavigationContext, set: &mut ProfileSet, delta: i32) -> Transition {
        nav.handle(InputEvent::Rotate(delta), set, 1)
    }

    fn click(nav: &mut NavigationContext, set: &mut ProfileSet) -> Transition {
        nav.handle(InputEvent::Click, set, 1)
    }

    #[test]
    fn test_browse_and_activate() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();

        assert!(rotate(&mut nav, &mut set, 2).redraw);
        assert_eq!(nav.mode(), UiMode::ShowProfile { browsed: 2 });
        assert_eq!(nav.menu_profile_index(set.active_index()), 2);

        let t = click(&mut nav, &mut set);
        assert_eq!(t.effect, Some(Effect::ActivateProfile));
        assert_eq!(set.active_index(), 2);
        assert_eq!(nav.mode(), UiMode::ShowState);
    }

    #[test]
    fn test_browse_back_to_active_is_status() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        rotate(&mut nav, &mut set, 1);
        rotate(&mut nav, &mut set, -1);
        assert_eq!(nav.mode(), UiMode::ShowState);
    }

    #[test]
    fn test_browse_wraps_past_last() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        rotate(&mut nav, &mut set, 4);
        rotate(&mut nav, &mut set, 1);
        assert_eq!(nav.mode(), UiMode::ShowState);
        assert_eq!(nav.menu_profile_index(set.active_index()), 0);
    }

    #[test]
    fn test_browse_below_first_opens_menu() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        rotate(&mut nav, &mut set, -1);
        assert_eq!(
            nav.mode(),
            UiMode::TopMenu {
                action: MenuAction::Shift
            }
        );

        // and back out again lands on profile 0
        set.set_active(3);
        rotate(&mut nav, &mut set, -1);
        assert_eq!(nav.mode(), UiMode::ShowProfile { browsed: 0 });
    }

    #[test]
    fn test_zero_rotation_ignored() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        let t = nav.handle(InputEvent::Rotate(0), &mut set, 5_000);
        assert_eq!(t, Transition::NONE);
        assert_eq!(nav.last_input_ms(), 0);
    }

    #[test]
    fn test_row_wraps_from_back() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        click(&mut nav, &mut set);
        assert_eq!(nav.edit_period_index(), -1);

        assert!(rotate(&mut nav, &mut set, -1).redraw);
        assert_eq!(nav.edit_period_index(), 5);
        rotate(&mut nav, &mut set, 1);
        assert_eq!(nav.edit_period_index(), -1);
    }

    #[test]
    fn test_period_entry_seeds_preview() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        click(&mut nav, &mut set);
        rotate(&mut nav, &mut set, 1);

        let t = click(&mut nav, &mut set);
        assert_eq!(
            nav.mode(),
            UiMode::EditPeriod {
                period: 0,
                field: PeriodField::Back
            }
        );
        assert_eq!(
            t.effect,
            Some(Effect::Preview {
                white_red: 100,
                blue: 100
            })
        );
    }

    #[test]
    fn test_edit_duration_round_trip() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        click(&mut nav, &mut set); // EditProfile
        rotate(&mut nav, &mut set, 2); // period 1
        click(&mut nav, &mut set); // EditPeriod
        rotate(&mut nav, &mut set, 1); // Duration
        assert_eq!(nav.edit_field(), PeriodField::Duration);
        click(&mut nav, &mut set); // EditValue
        assert_eq!(
            nav.mode(),
            UiMode::EditValue {
                period: 1,
                field: ValueField::Duration
            }
        );

        let t = rotate(&mut nav, &mut set, -2);
        assert!(t.redraw);
        assert_eq!(t.effect, None);
        assert_eq!(set.active().periods[1].duration_minutes, 480);

        click(&mut nav, &mut set);
        assert_eq!(nav.edit_field(), PeriodField::Duration);
        rotate(&mut nav, &mut set, -1); // Back
        click(&mut nav, &mut set);
        assert_eq!(nav.mode(), UiMode::EditProfile { row: Some(1) });
    }

    #[test]
    fn test_duration_clamp_no_redraw() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::EditValue {
            period: 2,
            field: ValueField::Duration,
        };
        let t = rotate(&mut nav, &mut set, -1);
        assert!(!t.redraw);
        assert_eq!(set.active().periods[2], Period::DISABLED);
    }

    #[test]
    fn test_power_edit_previews_every_rotation() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::EditValue {
            period: 0,
            field: ValueField::WhiteRed,
        };

        // already at 100: nothing to redraw, preview still pushed
        let t = rotate(&mut nav, &mut set, 1);
        assert!(!t.redraw);
        assert_eq!(
            t.effect,
            Some(Effect::Preview {
                white_red: 100,
                blue: 100
            })
        );

        let t = rotate(&mut nav, &mut set, -3);
        assert!(t.redraw);
        assert_eq!(set.active().periods[0].white_red, 85);
        assert_eq!(
            t.effect,
            Some(Effect::Preview {
                white_red: 85,
                blue: 100
            })
        );
    }

    #[test]
    fn test_blue_edit() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::EditValue {
            period: 1,
            field: ValueField::Blue,
        };
        rotate(&mut nav, &mut set, 30);
        assert_eq!(set.active().periods[1].blue, 100);
        assert_eq!(set.active().periods[1].white_red, 0);
    }

    #[test]
    fn test_menu_actions() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::TopMenu {
            action: MenuAction::Shift,
        };

        rotate(&mut nav, &mut set, 1);
        assert_eq!(nav.top_menu_action(), MenuAction::Save);
        let t = click(&mut nav, &mut set);
        assert_eq!(t.effect, Some(Effect::Save));
        assert_eq!(nav.mode(), UiMode::ShowState);

        nav.mode = UiMode::TopMenu {
            action: MenuAction::Reload,
        };
        let t = click(&mut nav, &mut set);
        assert_eq!(t.effect, Some(Effect::Reload));
        assert_eq!(nav.top_menu_action(), MenuAction::Reload);

        nav.mode = UiMode::TopMenu {
            action: MenuAction::Flash,
        };
        assert_eq!(click(&mut nav, &mut set).effect, Some(Effect::EnterBootloader));
    }

    #[test]
    fn test_time_shift() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::TopMenu {
            action: MenuAction::Shift,
        };
        click(&mut nav, &mut set);
        assert_eq!(nav.mode(), UiMode::TimeShift { hours: 0 });

        rotate(&mut nav, &mut set, -40);
        assert_eq!(nav.time_shift_hours(), -23);
        assert!(!rotate(&mut nav, &mut set, -1).redraw);
        rotate(&mut nav, &mut set, 25);
        assert_eq!(nav.time_shift_hours(), 2);

        let t = click(&mut nav, &mut set);
        assert_eq!(t.effect, Some(Effect::ShiftLight(2)));
        assert_eq!(nav.top_menu_action(), MenuAction::Shift);
    }

    #[test]
    fn test_zero_time_shift_no_effect() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.mode = UiMode::TimeShift { hours: 0 };
        assert_eq!(click(&mut nav, &mut set), Transition::REDRAW);
    }

    #[test]
    fn test_idle_timeout() {
        let mut nav = nav();
        let mut set = ProfileSet::factory();
        nav.handle(InputEvent::Rotate(1), &mut set, 1_000);
        assert_eq!(nav.mode(), UiMode::ShowProfile { browsed: 1 });

        assert!(!nav.check_idle(11_000));
        assert!(nav.check_idle(11_001));
        assert_eq!(nav.mode(), UiMode::ShowState);
        assert_eq!(nav.menu_profile_index(set.active_index()), 0);
        assert!(!nav.check_idle(50_000));
    }

    #[test]
    fn test_extreme_rotation_in_every_mode() {
        let modes = [
            UiMode::ShowState,
            UiMode::ShowProfile { browsed: 2 },
            UiMode::EditProfile { row: None },
            UiMode::EditProfile { row: Some(2) },
            UiMode::EditPeriod { period: 1, field: PeriodField::Blue },
            UiMode::EditValue { period: 0, field: ValueField::Duration },
            UiMode::EditValue { period: 0, field: ValueField::WhiteRed },
            UiMode::EditValue { period: 0, field: ValueField::Blue },
            UiMode::TopMenu { action: MenuAction::Flash },
            UiMode::TimeShift { hours: 5 },
        ];

        for mode in modes {
            for delta in [i32::MAX, i32::MIN] {
                let mut nav = nav();
                let mut set = ProfileSet::factory();
                nav.mode = mode;
                rotate(&mut nav, &mut set, delta);
                assert!(set.is_valid());
                assert!(nav.time_shift_hours().abs() <= MAX_TIME_SHIFT_HOURS);
            }
        }

        let mut nav = nav();
        let mut set = ProfileSet::factory();
        rotate(&mut nav, &mut set, 2);
        rotate(&mut nav, &mut set, i32::MAX);
        assert_eq!(nav.mode(), UiMode::ShowState);

        nav.mode = UiMode::EditValue { period: 0, field: ValueField::Duration };
        rotate(&mut nav, &mut set, i32::MIN);
        assert_eq!(set.active().periods[0].duration_minutes, 0);
        rotate(&mut nav, &mut set, i32::MAX);
        assert_eq!(set.active().periods[0].duration_minutes, 1440);
    }
}
