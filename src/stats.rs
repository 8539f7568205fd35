use std::cmp::Ordering;

/// Running statistics over a distance series
#[derive(Debug, Clone)]
pub struct Averager {
    pub mean: f64,
    pub min: f64,
    pub count: u64,
}

impl Default for Averager {
    fn default() -> Self {
        Self::new()
    }
}

impl Averager {
    /// Builds new Averager
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
        }
    }

    /// Push new value into [Averager]
    pub fn add(&mut self, x: f64) {
        self.count += 1;
        let k = self.count as f64;
        self.mean = x / k + self.mean * (k - 1.0) / k;
        self.min = self.min.min(x);
    }

    /// Returns (min, mean), or None if nothing was accumulated
    pub fn min_mean(&self) -> Option<(f64, f64)> {
        if self.count == 0 {
            None
        } else {
            Some((self.min, self.mean))
        }
    }
}

impl FromIterator<f64> for Averager {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut avg = Self::new();
        for x in iter {
            avg.add(x);
        }
        avg
    }
}

/// Standard median: mean of the two middle values for even length series.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod test {
    use super::{median, Averager};

    #[test]
    fn test_averager() {
        let mut avg = Averager::new();
        assert!(avg.min_mean().is_none());

        for (x_i, mean, min) in [(1.0, 1.0, 1.0), (0.5, 0.75, 0.5), (3.0, 1.5, 0.5)] {
            avg.add(x_i);
            assert_eq!(avg.mean, mean);
            assert_eq!(avg.min, min);
        }

        let avg = [2.0, 4.0].into_iter().collect::<Averager>();
        assert_eq!(avg.min_mean(), Some((2.0, 3.0)));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[20.0, 20.0, 20.0, 100.0]), Some(20.0));
    }
}
