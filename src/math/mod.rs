//! Scalar math kernel shared by the closed-form pricing models.

pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

pub fn normal_cdf(x: f64) -> f64 {
    // Abramowitz & Stegun 7.1.26
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cdf_symmetry_and_known_points() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_7, epsilon = 1e-6);
        assert_abs_diff_eq!(normal_cdf(-1.0) + normal_cdf(1.0), 1.0, epsilon = 1e-7);
    }

    #[test]
    fn pdf_peak() {
        assert_abs_diff_eq!(normal_pdf(0.0), 0.398_942_3, epsilon = 1e-6);
    }
}
