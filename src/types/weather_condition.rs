//! Defines the `WeatherCondition` enum, mapping meteo.lt textual condition codes
//! to descriptive variants.

use std::fmt;

/// Represents the `conditionCode` reported by meteo.lt observations and forecasts.
///
/// See the [meteo.lt API documentation](https://api.meteo.lt/) for the list of
/// codes. Convert a raw code with [`WeatherCondition::from_code`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum WeatherCondition {
    /// `clear`: sky is clear.
    Clear,
    /// `partly-cloudy`: few clouds.
    PartlyCloudy,
    /// `cloudy-with-sunny-intervals`
    CloudyWithSunnyIntervals,
    /// `cloudy`: overcast.
    Cloudy,
    /// `light-rain`
    LightRain,
    /// `rain`
    Rain,
    /// `heavy-rain`
    HeavyRain,
    /// `thunder`: thunder heard, no storm cell overhead.
    Thunder,
    /// `isolated-thunderstorms`
    IsolatedThunderstorms,
    /// `thunderstorms`
    Thunderstorms,
    /// `heavy-rain-with-thunderstorms`
    HeavyRainWithThunderstorms,
    /// `light-sleet`: light mix of rain and snow.
    LightSleet,
    /// `sleet`
    Sleet,
    /// `freezing-rain`: rain freezing on contact (glaze).
    FreezingRain,
    /// `hail`
    Hail,
    /// `light-snow`
    LightSnow,
    /// `snow`
    Snow,
    /// `heavy-snow`
    HeavySnow,
    /// `fog`
    Fog,
}

impl WeatherCondition {
    /// Maps a meteo.lt condition code to a variant.
    ///
    /// Returns `None` for unknown codes and for the literal `"null"` some stations
    /// report instead of omitting the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteo_lt::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::from_code("light-rain"), Some(WeatherCondition::LightRain));
    /// assert_eq!(WeatherCondition::from_code("null"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "clear" => Some(Self::Clear),
            "partly-cloudy" => Some(Self::PartlyCloudy),
            "cloudy-with-sunny-intervals" => Some(Self::CloudyWithSunnyIntervals),
            "cloudy" => Some(Self::Cloudy),
            "light-rain" => Some(Self::LightRain),
            "rain" => Some(Self::Rain),
            "heavy-rain" => Some(Self::HeavyRain),
            "thunder" => Some(Self::Thunder),
            "isolated-thunderstorms" => Some(Self::IsolatedThunderstorms),
            "thunderstorms" => Some(Self::Thunderstorms),
            "heavy-rain-with-thunderstorms" => Some(Self::HeavyRainWithThunderstorms),
            "light-sleet" => Some(Self::LightSleet),
            "sleet" => Some(Self::Sleet),
            "freezing-rain" => Some(Self::FreezingRain),
            "hail" => Some(Self::Hail),
            "light-snow" => Some(Self::LightSnow),
            "snow" => Some(Self::Snow),
            "heavy-snow" => Some(Self::HeavySnow),
            "fog" => Some(Self::Fog),
            _ => None,
        }
    }

    /// The code as it appears on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::CloudyWithSunnyIntervals => "cloudy-with-sunny-intervals",
            Self::Cloudy => "cloudy",
            Self::LightRain => "light-rain",
            Self::Rain => "rain",
            Self::HeavyRain => "heavy-rain",
            Self::Thunder => "thunder",
            Self::IsolatedThunderstorms => "isolated-thunderstorms",
            Self::Thunderstorms => "thunderstorms",
            Self::HeavyRainWithThunderstorms => "heavy-rain-with-thunderstorms",
            Self::LightSleet => "light-sleet",
            Self::Sleet => "sleet",
            Self::FreezingRain => "freezing-rain",
            Self::Hail => "hail",
            Self::LightSnow => "light-snow",
            Self::Snow => "snow",
            Self::HeavySnow => "heavy-snow",
            Self::Fog => "fog",
        }
    }

    /// Whether the code names liquid rain.
    ///
    /// This matches the rainy-weekend metric's rule that the code contains `rain`,
    /// so freezing rain counts while sleet and thunderstorms without rain do not.
    pub fn is_rain(&self) -> bool {
        self.code().contains("rain")
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
