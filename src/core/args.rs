/*!
 * Argument Reader
 * Positional string arguments to typed simulation parameters
 *
 * Two leniency levels: `strict_int` rejects unparseable input with an
 * argument error, `lenient_int` falls back to the default. Range fixes are
 * always lenient. Every fallback or clamp is recorded as an `Adjustment`.
 */

use super::errors::{SimError, SimResult};
use super::types::Adjustment;

pub struct ArgReader<'a> {
    args: &'a [String],
    adjustments: Vec<Adjustment>,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            args,
            adjustments: Vec::new(),
        }
    }

    /// Raw argument at a position, if given
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(String::as_str)
    }

    /// Integer argument that aborts the run when malformed
    pub fn strict_int(&self, index: usize, name: &str, default: i64) -> SimResult<i64> {
        match self.raw(index) {
            None => Ok(default),
            Some(raw) => parse_int(raw).ok_or_else(|| SimError::invalid_argument(name, raw)),
        }
    }

    /// Integer argument that falls back to its default when malformed
    pub fn lenient_int(&mut self, index: usize, name: &str, default: i64) -> i64 {
        match self.raw(index) {
            None => default,
            Some(raw) => match parse_int(raw) {
                Some(value) => value,
                None => {
                    self.adjustments.push(Adjustment::new(name, raw, default));
                    default
                }
            },
        }
    }

    /// Raise `value` to `min`
    pub fn at_least(&mut self, name: &str, value: i64, min: i64) -> i64 {
        self.within(name, value, min, i64::MAX)
    }

    /// Clamp `value` into `[min, max]`
    pub fn within(&mut self, name: &str, value: i64, min: i64, max: i64) -> i64 {
        let clamped = value.clamp(min, max);
        if clamped != value {
            self.adjustments.push(Adjustment::new(name, value, clamped));
        }
        clamped
    }

    /// Record an adjustment decided by the caller
    pub fn note(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    pub fn finish(self) -> Vec<Adjustment> {
        self.adjustments
    }
}

/// Parse a whole number, tolerating surrounding whitespace and a leading sign
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let argv = args(&["x5"]);
        let reader = ArgReader::new(&argv);
        let err = reader.strict_int(0, "number of processes", 10).unwrap_err();
        assert_eq!(err, SimError::invalid_argument("number of processes", "x5"));
    }

    #[test]
    fn test_defaults_when_missing() {
        let argv = args(&[]);
        let mut reader = ArgReader::new(&argv);
        assert_eq!(reader.strict_int(0, "count", 10).unwrap(), 10);
        assert_eq!(reader.lenient_int(1, "frames", 4), 4);
        assert!(reader.finish().is_empty());
    }

    #[test]
    fn test_lenient_records_fallback() {
        let argv = args(&["abc", " +7 "]);
        let mut reader = ArgReader::new(&argv);
        assert_eq!(reader.lenient_int(0, "philosophers", 5), 5);
        assert_eq!(reader.lenient_int(1, "duration", 20), 7);
        let adjustments = reader.finish();
        assert_eq!(adjustments, vec![Adjustment::new("philosophers", "abc", 5)]);
    }

    #[test]
    fn test_clamps_recorded() {
        let argv = args(&[]);
        let mut reader = ArgReader::new(&argv);
        assert_eq!(reader.at_least("quantum", -3, 1), 1);
        assert_eq!(reader.within("philosophers", 50, 2, 20), 20);
        assert_eq!(reader.within("philosophers", 7, 2, 20), 7);
        assert_eq!(reader.finish().len(), 2);
    }
}
