//! The refresh run: locate, fetch, label, render.
//!
//! Each step waits for the previous one. A run ends in exactly one of the
//! content or error states, and never renders a partial view.

use std::{future::Future, time::Duration};

use tokio::{sync::Mutex, time::MissedTickBehavior};

use crate::{
    config::Config,
    error::WeatherError,
    geocode::{PlaceResolver, ReverseGeocoder},
    http::build_client,
    location::{LocationProvider, location_provider_from_config},
    model::{
        DisplayState, RefreshOutcome, STATUS_LOADING_WEATHER, STATUS_LOCATING, TemperatureUnit,
        WeatherView,
    },
    provider::{WeatherProvider, provider_from_config},
    render::Renderer,
};

#[derive(Debug)]
pub struct WeatherApp {
    location: Box<dyn LocationProvider>,
    weather: Box<dyn WeatherProvider>,
    places: Box<dyn PlaceResolver>,
    unit: TemperatureUnit,
    // Held for the whole run; a second run that can't take it is skipped.
    running: Mutex<()>,
}

impl WeatherApp {
    pub fn new(
        location: Box<dyn LocationProvider>,
        weather: Box<dyn WeatherProvider>,
        places: Box<dyn PlaceResolver>,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            location,
            weather,
            places,
            unit,
            running: Mutex::new(()),
        }
    }

    /// Wire up the real providers from the config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = build_client(config.request_timeout())?;

        Ok(Self::new(
            location_provider_from_config(config, http.clone())?,
            provider_from_config(config, http.clone()),
            Box::new(ReverseGeocoder::new(config.geocode_url.clone(), http)),
            config.temperature_unit,
        ))
    }

    /// Run one refresh and render its progress and result.
    pub async fn refresh(&self, renderer: &dyn Renderer) -> RefreshOutcome {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("previous weather refresh still running; skipping");
            return RefreshOutcome::Skipped;
        };

        match self.load(renderer).await {
            Ok(view) => {
                tracing::info!(
                    location = %view.location,
                    temperature = view.temperature,
                    "weather refreshed"
                );
                renderer.render(&DisplayState::Content(view));
                RefreshOutcome::Content
            }
            Err(e) => {
                tracing::error!(error = %e, "weather refresh failed");
                let kind = e.kind();
                renderer.render(&DisplayState::Error {
                    kind,
                    message: e.user_message().to_string(),
                });
                RefreshOutcome::Error(kind)
            }
        }
    }

    async fn load(&self, renderer: &dyn Renderer) -> Result<WeatherView, WeatherError> {
        renderer.render(&DisplayState::Loading { status: STATUS_LOCATING });
        let coords = self.location.current_position().await?;

        renderer.render(&DisplayState::Loading { status: STATUS_LOADING_WEATHER });
        let current = self.weather.current_weather(coords).await?;

        let label = self.places.resolve(coords).await;

        Ok(WeatherView::new(&current, label, self.unit))
    }

    /// Refresh now, then every `period`, until `shutdown` completes.
    ///
    /// A run in progress is always finished before shutdown is observed.
    pub async fn run_periodic<F>(&self, renderer: &dyn Renderer, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("stopping periodic weather refresh");
                    break;
                }
                _ = ticker.tick() => {
                    self.refresh(renderer).await;
                }
            }
        }
    }
}
