/// Observed range of a column over a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Fit over the present, finite values. `None` when there are none.
    pub fn fit<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<MinMax>, v| match acc {
                None => Some(MinMax { min: v, max: v }),
                Some(m) => Some(MinMax {
                    min: m.min.min(v),
                    max: m.max.max(v),
                }),
            })
    }

    /// All values equal: the column cannot discriminate between candidates.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Rescale to [0, 1]. A degenerate range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_skips_missing() {
        let range = MinMax::fit(vec![Some(3.0), None, Some(-1.0), Some(7.0)]).unwrap();
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 7.0);
    }

    #[test]
    fn test_fit_empty() {
        assert!(MinMax::fit(Vec::<Option<f64>>::new()).is_none());
        assert!(MinMax::fit(vec![None, None]).is_none());
    }

    #[test]
    fn test_normalize_endpoints() {
        let range = MinMax::fit(vec![Some(10.0), Some(20.0), Some(15.0)]).unwrap();
        assert_eq!(range.normalize(10.0), 0.0);
        assert_eq!(range.normalize(20.0), 1.0);
        assert_eq!(range.normalize(15.0), 0.5);
    }

    #[test]
    fn test_normalize_degenerate_is_zero() {
        let range = MinMax::fit(vec![Some(4.0), Some(4.0)]).unwrap();
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(4.0), 0.0);
    }
}
