//! Summary statistics over sample arrays.

/// Statistics over the finite values of a sample array.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleStats {
    /// Number of samples, finite or not.
    pub count: usize,
    /// Number of finite samples.
    pub valid_count: usize,
    /// Minimum and maximum finite value.
    pub min_max: Option<(f32, f32)>,
    /// Mean of finite values.
    pub mean: Option<f64>,
    /// Sample standard deviation of finite values.
    pub std: Option<f64>,
}

impl SampleStats {
    /// Compute statistics for `values`, ignoring NaN and infinities.
    pub fn compute(values: &[f32]) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut valid = 0usize;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += f64::from(v);
            valid += 1;
        }

        let mean = (valid > 0).then(|| sum / valid as f64);
        let std = match mean {
            Some(mean) if valid > 1 => {
                let ssd: f64 = values
                    .iter()
                    .filter(|v| v.is_finite())
                    .map(|&v| {
                        let d = f64::from(v) - mean;
                        d * d
                    })
                    .sum();
                Some((ssd / (valid - 1) as f64).sqrt())
            },
            _ => None,
        };

        Self {
            count: values.len(),
            valid_count: valid,
            min_max: (valid > 0).then_some((min, max)),
            mean,
            std,
        }
    }
}
