/*!
 * Simulation Configuration
 *
 * Runtime configuration shared by all engines
 */

use super::limits::{DEFAULT_TIME_UNIT, MIN_TIME_UNIT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Console tables
    #[default]
    Text,
    /// One JSON document per report
    Json,
}

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Real duration of one simulated second
    pub time_unit: Duration,
    /// Fixed RNG seed for reproducible workloads
    pub seed: Option<u64>,
    /// Print progress lines and display tables while running
    pub live_output: bool,
    /// Final report format
    pub output: OutputFormat,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_unit: DEFAULT_TIME_UNIT,
            seed: None,
            live_output: true,
            output: OutputFormat::Text,
        }
    }
}

impl SimConfig {
    /// Configuration for tests and benchmarks: microsecond clock, fixed seed, no live output
    pub fn fast(seed: u64) -> Self {
        Self {
            time_unit: MIN_TIME_UNIT,
            seed: Some(seed),
            live_output: false,
            output: OutputFormat::Text,
        }
    }

    /// Read configuration from the environment
    ///
    /// Environment variables:
    /// - OSSIM_TIME_UNIT_MS: real milliseconds per simulated second (default: 1000)
    /// - OSSIM_SEED: fixed RNG seed
    /// - OSSIM_OUTPUT: `json` for JSON reports (default: text)
    /// - OSSIM_QUIET: `1`/`true` to suppress live output
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(unit) = env_parse::<f64>("OSSIM_TIME_UNIT_MS").and_then(time_unit_from_ms) {
            config = config.with_time_unit(unit);
        }
        config.seed = env_parse::<u64>("OSSIM_SEED");
        if let Ok(format) = std::env::var("OSSIM_OUTPUT") {
            if format.eq_ignore_ascii_case("json") {
                config.output = OutputFormat::Json;
            }
        }
        if let Ok(quiet) = std::env::var("OSSIM_QUIET") {
            config.live_output = !(quiet == "1" || quiet.eq_ignore_ascii_case("true"));
        }

        config
    }

    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.time_unit = unit.max(MIN_TIME_UNIT);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_live_output(mut self, live: bool) -> Self {
        self.live_output = live;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// RNG for a single-threaded engine
    pub fn rng(&self) -> StdRng {
        self.rng_for(0)
    }

    /// Independent RNG stream, e.g. one per philosopher thread
    pub fn rng_for(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Real time unit from milliseconds; negative, NaN and unrepresentable values are ignored
fn time_unit_from_ms(ms: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_time_unit_floor() {
        let config = SimConfig::default().with_time_unit(Duration::ZERO);
        assert_eq!(config.time_unit, MIN_TIME_UNIT);
    }

    #[test]
    fn test_time_unit_from_ms() {
        assert_eq!(time_unit_from_ms(250.0), Some(Duration::from_millis(250)));
        assert_eq!(time_unit_from_ms(0.0), Some(Duration::ZERO));
        assert_eq!(time_unit_from_ms(1e300), None);
        assert_eq!(time_unit_from_ms(f64::INFINITY), None);
        assert_eq!(time_unit_from_ms(f64::NAN), None);
        assert_eq!(time_unit_from_ms(-5.0), None);
    }

    #[test]
    fn test_seeded_streams_reproducible() {
        let config = SimConfig::fast(7);
        let a: u64 = config.rng_for(3).gen();
        let b: u64 = config.rng_for(3).gen();
        let c: u64 = config.rng_for(4).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
