use crate::prelude::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Intervals the baseline spacing statistics are derived from.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BaselineWindow {
    /// Every interval of the events log. Converges better on
    /// flights with a slow warm-up phase.
    #[default]
    Full,

    /// First n intervals only. Early flight segments are usually
    /// the cleanest, but a slow take-off will bias the statistics.
    Leading(usize),
}

impl BaselineWindow {
    /// Restricts the interval distances to this window
    pub(crate) fn select<'a>(&self, distances: &'a [f64]) -> &'a [f64] {
        match self {
            Self::Full => distances,
            Self::Leading(n) => &distances[..(*n).min(distances.len())],
        }
    }
}

impl std::fmt::Display for BaselineWindow {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Full => write!(fmt, "full"),
            Self::Leading(n) => write!(fmt, "leading:{}", n),
        }
    }
}

impl std::str::FromStr for BaselineWindow {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "full" {
            return Ok(Self::Full);
        }
        match s.strip_prefix("leading:") {
            Some(n) => {
                let n = n
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| Error::UnknownBaselineWindow)?;
                if n == 0 {
                    Err(Error::InvalidBaselineWindow)
                } else {
                    Ok(Self::Leading(n))
                }
            },
            None => Err(Error::UnknownBaselineWindow),
        }
    }
}

#[cfg(test)]
mod test {
    use super::BaselineWindow;
    use crate::prelude::Error;
    use std::str::FromStr;

    #[test]
    fn parsing() {
        assert_eq!(BaselineWindow::from_str("full"), Ok(BaselineWindow::Full));
        assert_eq!(
            BaselineWindow::from_str(" Leading:10 "),
            Ok(BaselineWindow::Leading(10))
        );
        assert_eq!(
            BaselineWindow::from_str("leading:0"),
            Err(Error::InvalidBaselineWindow)
        );
        assert_eq!(
            BaselineWindow::from_str("sliding"),
            Err(Error::UnknownBaselineWindow)
        );
        for window in [BaselineWindow::Full, BaselineWindow::Leading(3)] {
            assert_eq!(BaselineWindow::from_str(&window.to_string()), Ok(window));
        }
    }

    #[test]
    fn selection() {
        let distances = [1.0, 2.0, 3.0];
        assert_eq!(BaselineWindow::Full.select(&distances), &distances);
        assert_eq!(BaselineWindow::Leading(2).select(&distances), &[1.0, 2.0]);
        assert_eq!(BaselineWindow::Leading(10).select(&distances), &distances);
    }
}
