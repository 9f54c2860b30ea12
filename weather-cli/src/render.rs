use std::io::{self, Write};

use chrono::{DateTime, Local};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use weather_core::{DisplayState, Renderer, WeatherView};

/// Draws display states on the terminal.
///
/// One-shot mode appends: loading lines and content go to stdout, errors to
/// stderr. Redraw mode clears the screen before each state so only the
/// current one is visible.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    redraw: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { redraw: false }
    }

    pub fn redrawing() -> Self {
        Self { redraw: true }
    }

    fn draw(&self, out: &mut impl Write, state: &DisplayState, now: DateTime<Local>) -> io::Result<()> {
        if self.redraw {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        match state {
            DisplayState::Loading { status } => writeln!(out, "{status}")?,
            DisplayState::Content(view) => out.write_all(format_view(view, now).as_bytes())?,
            DisplayState::Error { message, .. } => writeln!(out, "{message}")?,
        }

        out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, state: &DisplayState) {
        let now = Local::now();
        let result = if state.is_error() && !self.redraw {
            self.draw(&mut io::stderr().lock(), state, now)
        } else {
            self.draw(&mut io::stdout().lock(), state, now)
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// The content view: one named field per line.
pub fn format_view(view: &WeatherView, shown_at: DateTime<Local>) -> String {
    let unit = view.unit.symbol();
    let updated = shown_at.format("%H:%M");

    format!(
        "\n{icon}  {description}\n\
         Location:    {location}\n\
         Temperature: {temp}{unit}\n\
         Feels like:  {feels}{unit}\n\
         Humidity:    {humidity}%\n\
         Wind:        {wind} km/h\n\
         Updated:     {updated}\n",
        icon = view.icon,
        description = view.description,
        location = view.location,
        temp = view.temperature,
        feels = view.feels_like,
        humidity = view.humidity,
        wind = view.wind_speed,
    )
}
