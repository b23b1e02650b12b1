use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::units::{RelativeHumidity, Temperature};

const MIN_TEMPERATURE_C: f64 = 5.0;
const MAX_TEMPERATURE_C: f64 = 34.0;
const MAX_HUMIDITY_PERCENT: f64 = 100.0;

/// Best-effort sensor access. A failed read returns `None`, never an error.
pub trait SensorReader: Send {
    /// Reads the current temperature.
    fn try_read_temperature(&mut self) -> Option<Temperature>;
    /// Reads the current relative humidity.
    fn try_read_humidity(&mut self) -> Option<RelativeHumidity>;
}

impl<R: SensorReader + ?Sized> SensorReader for Box<R> {
    fn try_read_temperature(&mut self) -> Option<Temperature> {
        (**self).try_read_temperature()
    }

    fn try_read_humidity(&mut self) -> Option<RelativeHumidity> {
        (**self).try_read_humidity()
    }
}

/// Simulated sensor producing uniformly distributed readings.
#[derive(Debug, Clone)]
pub struct RandomReader {
    rng: StdRng,
}

impl RandomReader {
    /// Reader seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reader with a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SensorReader for RandomReader {
    fn try_read_temperature(&mut self) -> Option<Temperature> {
        let celsius = self.rng.gen_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
        Some(Temperature::from_degrees_celsius(celsius))
    }

    fn try_read_humidity(&mut self) -> Option<RelativeHumidity> {
        let percent = self.rng.gen_range(0.0..MAX_HUMIDITY_PERCENT);
        Some(RelativeHumidity::from_percent(percent))
    }
}
