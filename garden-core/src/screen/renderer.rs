//! Per-mode screen layouts

use core::fmt::Write;

use heapless::String;

use super::Notice;
use crate::profile::{Period, ProfileSet};
use crate::scheduler::OutputState;
use crate::state::{MenuAction, NavigationContext, PeriodField, UiMode};
use crate::traits::display::{Display, DisplayError, TextScale};

pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;

/// Column where menu labels start, right of the selection marker
const LABEL_X: i32 = 11;

type Line = String<32>;

/// Draw the screen for the current mode and present it
pub fn render<D: Display>(
    display: &mut D,
    nav: &NavigationContext,
    set: &ProfileSet,
    output: &OutputState,
) -> Result<(), DisplayError> {
    display.clear()?;

    match nav.mode() {
        UiMode::ShowState => draw_status(display, set, output)?,
        UiMode::ShowProfile { browsed } => draw_profile(display, set, browsed)?,
        UiMode::EditProfile { row } => draw_period_list(display, set, row)?,
        UiMode::EditPeriod { period, field } => draw_period(display, set, period, field, false)?,
        UiMode::EditValue { period, field } => {
            draw_period(display, set, period, field.into(), true)?
        }
        UiMode::TopMenu { action } => draw_menu(display, action)?,
        UiMode::TimeShift { hours } => draw_time_shift(display, hours)?,
    }

    display.present()
}

/// Draw a notice in place of the current screen
pub fn render_notice<D: Display>(display: &mut D, notice: Notice) -> Result<(), DisplayError> {
    display.clear()?;
    display.draw_text(0, 24, TextScale::Medium, notice.text())?;
    display.present()
}

fn draw_status<D: Display>(
    display: &mut D,
    set: &ProfileSet,
    output: &OutputState,
) -> Result<(), DisplayError> {
    display.draw_text(0, 0, TextScale::Medium, &set.active().name)?;
    display.draw_line(0, 16, SCREEN_WIDTH - 1, 16)?;
    display.draw_line(0, 17, SCREEN_WIDTH - 1, 17)?;

    let mut line = Line::new();
    let hours = output.period_minutes_left / 60;
    let minutes = output.period_minutes_left % 60;
    let _ = match output.period_index {
        Some(index) => write!(line, "#{} {}:{:02}", index + 1, hours, minutes),
        None => write!(line, "#- {}:{:02}", hours, minutes),
    };
    display.draw_text(0, 20, TextScale::Medium, &line)?;

    line.clear();
    let _ = write!(line, "W/R:{}% B:{}%", output.white_red, output.blue);
    display.draw_text(0, 38, TextScale::Small, &line)?;

    line.clear();
    let pump = if output.pump_on { "ON" } else { "OFF" };
    let _ = write!(line, "P:{} {}m", pump, output.pump_minutes_left);
    display.draw_text(0, 48, TextScale::Medium, &line)
}

fn draw_profile<D: Display>(
    display: &mut D,
    set: &ProfileSet,
    index: usize,
) -> Result<(), DisplayError> {
    let Some(profile) = set.profile(index) else {
        return Ok(());
    };

    display.draw_text(0, 0, TextScale::Medium, &profile.name)?;

    let mut y = 16;
    let mut line = Line::new();
    for (i, period) in profile.periods.iter().enumerate() {
        line.clear();
        let _ = write!(
            line,
            "{}-T:{:2}|W:{:3}|B:{:3}",
            i + 1,
            period.duration_minutes / 60,
            period.white_red,
            period.blue
        );
        display.draw_text(0, y, TextScale::Small, &line)?;
        y += TextScale::Small.row_height();
    }
    Ok(())
}

fn draw_period_list<D: Display>(
    display: &mut D,
    set: &ProfileSet,
    row: Option<usize>,
) -> Result<(), DisplayError> {
    if row.is_none() {
        display.draw_text(0, 0, TextScale::Medium, ">")?;
    }
    display.draw_text(LABEL_X, 0, TextScale::Medium, "BACK")?;

    // keep the selection on screen with up to two rows above it
    let top = row.map_or(0, |r| r.saturating_sub(2));
    let mut y = TextScale::Medium.row_height();
    let mut line = Line::new();

    for (i, period) in set.active().periods.iter().enumerate().skip(top) {
        if y >= SCREEN_HEIGHT {
            break;
        }
        if row == Some(i) {
            display.draw_text(0, y, TextScale::Medium, ">")?;
        }

        line.clear();
        let _ = write!(line, "{}-T:{:2}", i + 1, period.duration_minutes / 60);
        display.draw_text(LABEL_X - 1, y, TextScale::Medium, &line)?;

        line.clear();
        let _ = write!(line, "W:{:3}%", period.white_red);
        display.draw_text(85, y, TextScale::Small, &line)?;

        line.clear();
        let _ = write!(line, "B:{:3}%", period.blue);
        display.draw_text(85, y + 8, TextScale::Small, &line)?;

        y += TextScale::Medium.row_height();
    }
    Ok(())
}

fn draw_period<D: Display>(
    display: &mut D,
    set: &ProfileSet,
    index: usize,
    selected: PeriodField,
    editing: bool,
) -> Result<(), DisplayError> {
    let period = set
        .active()
        .periods
        .get(index)
        .copied()
        .unwrap_or(Period::DISABLED);

    let rows = [
        PeriodField::Back,
        PeriodField::Duration,
        PeriodField::WhiteRed,
        PeriodField::Blue,
    ];

    let mut y = 0;
    let mut line = Line::new();
    for field in rows {
        if field == selected {
            let marker = if editing { "=" } else { ">" };
            display.draw_text(0, y, TextScale::Medium, marker)?;
        }

        line.clear();
        let _ = match field {
            PeriodField::Back => write!(line, "BACK"),
            PeriodField::Duration => write!(line, "TIME:{}", period.duration_minutes / 60),
            PeriodField::WhiteRed => write!(line, "WRED:{:3}%", period.white_red),
            PeriodField::Blue => write!(line, "BLUE:{:3}%", period.blue),
        };
        display.draw_text(LABEL_X, y, TextScale::Medium, &line)?;
        y += TextScale::Medium.row_height();
    }
    Ok(())
}

fn draw_menu<D: Display>(display: &mut D, action: MenuAction) -> Result<(), DisplayError> {
    let items = [
        (MenuAction::Shift, "TIME SHIFT"),
        (MenuAction::Save, "SAVE"),
        (MenuAction::Reload, "RELOAD"),
        (MenuAction::Flash, "FLASH"),
    ];

    let mut y = 0;
    for (item, label) in items {
        if item == action {
            display.draw_text(0, y, TextScale::Medium, ">")?;
        }
        display.draw_text(LABEL_X, y, TextScale::Medium, label)?;
        y += TextScale::Medium.row_height();
    }
    Ok(())
}

fn draw_time_shift<D: Display>(display: &mut D, hours: i8) -> Result<(), DisplayError> {
    display.draw_text(0, 0, TextScale::Medium, "SHIFT HOURS:")?;

    let mut line = Line::new();
    let _ = write!(line, "{:+}", hours);
    display.draw_text(40, 16, TextScale::Large, &line)
}
