//! Weather adapters.
//!
//! - `OpenWeatherProvider` - OpenWeather 2.5 API over reqwest
//! - `StaticWeatherProvider` - Fixed readings when no key is configured

mod openweather;
mod static_weather;

pub use openweather::OpenWeatherProvider;
pub use static_weather::StaticWeatherProvider;
