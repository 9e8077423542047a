//! Scales
//! Map data values to pixel positions: continuous linear scales and
//! categorical band scales.

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value to the range. A single-point domain maps to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if lo == hi {
            return vec![lo];
        }

        let step = nice_step(hi - lo, count.max(1));
        let first = (lo / step - EPSILON).ceil();
        let last = (hi / step + EPSILON).floor();

        (0..=(last - first) as i64)
            .map(|i| (first + i as f64) * step)
            .collect()
    }
}

// Tolerance for float noise when comparing step ratios
const EPSILON: f64 = 1e-9;

/// Step of 1, 2 or 5 times a power of ten giving about `target_steps` steps.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 + EPSILON {
        1.0
    } else if normalized <= 2.0 + EPSILON {
        2.0
    } else if normalized <= 5.0 + EPSILON {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Evenly spaced bands, one per category, with the same padding between
/// bands and at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = domain.len() as f64;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        // Centre the bands inside the range
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);

        Self {
            domain,
            start,
            step,
            bandwidth,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Left edge of the band for `key`, if it is part of the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Minimum and maximum of the values, skipping NaN. `None` when nothing is left.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Domain `[0, max]` for quantities that start at zero; `[0, 1]` for no data.
pub fn zero_based<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    match extent(values) {
        Some((_, hi)) => (0.0, hi),
        None => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_maps_domain_ends_to_range_ends() {
        let scale = LinearScale::new((1990.0, 2000.0), (0.0, 610.0));
        assert_relative_eq!(scale.map(1990.0), 0.0);
        assert_relative_eq!(scale.map(2000.0), 610.0);
        assert_relative_eq!(scale.map(1995.0), 305.0);
    }

    #[test]
    fn linear_supports_inverted_range() {
        let scale = LinearScale::new((0.0, 80.0), (360.0, 40.0));
        assert_relative_eq!(scale.map(0.0), 360.0);
        assert_relative_eq!(scale.map(80.0), 40.0);
        assert_relative_eq!(scale.map(40.0), 200.0);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_relative_eq!(scale.map(5.0), 50.0);
        assert_eq!(scale.ticks(10), vec![5.0]);
    }

    #[test]
    fn ticks_use_round_steps() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[10], 100.0);

        let years = LinearScale::new((1920.0, 1997.0), (0.0, 1.0)).ticks(10);
        assert_eq!(
            years,
            vec![1920.0, 1930.0, 1940.0, 1950.0, 1960.0, 1970.0, 1980.0, 1990.0]
        );
    }

    #[test]
    fn fractional_ticks() {
        let ticks = LinearScale::new((0.0, 1.0), (0.0, 1.0)).ticks(5);
        let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        assert_eq!(ticks.len(), expected.len());
        for (tick, want) in ticks.iter().zip(expected) {
            assert_relative_eq!(*tick, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn band_positions_honour_padding() {
        let band = BandScale::new(
            vec!["Drama".into(), "Comedy".into(), "War".into()],
            (0.0, 100.0),
            0.2,
        );
        assert_relative_eq!(band.step(), 31.25);
        assert_relative_eq!(band.bandwidth(), 25.0);
        assert_relative_eq!(band.position("Drama").unwrap(), 6.25);
        assert_relative_eq!(band.position("Comedy").unwrap(), 37.5);
        assert_relative_eq!(band.position("War").unwrap(), 68.75);
        assert_eq!(band.position("Horror"), None);
    }

    #[test]
    fn band_without_padding_fills_range() {
        let band = BandScale::new(vec!["a".into(), "b".into()], (10.0, 30.0), 0.0);
        assert_relative_eq!(band.position("a").unwrap(), 10.0);
        assert_relative_eq!(band.position("b").unwrap(), 20.0);
        assert_relative_eq!(band.bandwidth(), 10.0);
    }

    #[test]
    fn extent_skips_nan() {
        assert_eq!(extent(vec![3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(vec![f64::NAN]), None);
        assert_eq!(extent(Vec::new()), None);
    }

    #[test]
    fn zero_based_defaults_for_empty_data() {
        assert_eq!(zero_based(vec![4.0, 9.0]), (0.0, 9.0));
        assert_eq!(zero_based(Vec::new()), (0.0, 1.0));
    }
}
