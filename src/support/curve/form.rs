use super::CurveError;

/// Polynomial families supported by [`Curve`](super::Curve).
///
/// Coefficient order follows the conventional ordering for each family so
/// coefficient sets published for these forms can be used unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveForm {
    /// `a0 + a1·x + a2·x² + a3·y + a4·y² + a5·x·y`
    Biquadratic,

    /// `a0 + a1·x + a2·x² + a3·y + a4·y² + a5·x·y + a6·x³ + a7·y³ + a8·x²·y + a9·x·y²`
    Bicubic,

    /// Bicubic in `(x, y)` plus `c10·x²·y² + c11·z·y³`.
    ///
    /// Used for part-load curves over normalized lift, part-load ratio, and
    /// normalized leaving chilled water temperature deviation.
    ChillerPartLoadWithLift,

    /// Full 27-term quadratic product in `(x, y, z)`.
    Triquadratic,
}

impl CurveForm {
    /// Number of independent variables.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Biquadratic | Self::Bicubic => 2,
            Self::ChillerPartLoadWithLift | Self::Triquadratic => 3,
        }
    }

    /// Number of coefficients the form requires.
    #[must_use]
    pub fn coefficient_count(self) -> usize {
        match self {
            Self::Biquadratic => 6,
            Self::Bicubic => 10,
            Self::ChillerPartLoadWithLift => 12,
            Self::Triquadratic => 27,
        }
    }

    pub(super) fn check_coefficients(self, coefficients: &[f64]) -> Result<(), CurveError> {
        if coefficients.len() != self.coefficient_count() {
            return Err(CurveError::CoefficientCount {
                form: self,
                expected: self.coefficient_count(),
                actual: coefficients.len(),
            });
        }
        match coefficients.iter().position(|c| !c.is_finite()) {
            Some(index) => Err(CurveError::NonFiniteCoefficient { index }),
            None => Ok(()),
        }
    }

    /// Evaluates the raw polynomial.
    ///
    /// Unused trailing variables are ignored. The coefficient slice must have
    /// been checked with `check_coefficients`.
    pub(super) fn polynomial(self, c: &[f64], [x, y, z]: [f64; 3]) -> f64 {
        match self {
            Self::Biquadratic => c[0] + c[1] * x + c[2] * x * x + c[3] * y + c[4] * y * y + c[5] * x * y,
            Self::Bicubic => bicubic(c, x, y),
            Self::ChillerPartLoadWithLift => {
                bicubic(c, x, y) + c[10] * x * x * y * y + c[11] * z * y * y * y
            }
            Self::Triquadratic => triquadratic(c, x, y, z),
        }
    }
}

fn bicubic(c: &[f64], x: f64, y: f64) -> f64 {
    let (x2, y2) = (x * x, y * y);
    c[0] + c[1] * x
        + c[2] * x2
        + c[3] * y
        + c[4] * y2
        + c[5] * x * y
        + c[6] * x2 * x
        + c[7] * y2 * y
        + c[8] * x2 * y
        + c[9] * x * y2
}

fn triquadratic(c: &[f64], x: f64, y: f64, z: f64) -> f64 {
    let (x2, y2, z2) = (x * x, y * y, z * z);
    c[0] + c[1] * x2
        + c[2] * x
        + c[3] * y2
        + c[4] * y
        + c[5] * z2
        + c[6] * z
        + c[7] * x2 * y2
        + c[8] * x * y
        + c[9] * x * y2
        + c[10] * x2 * y
        + c[11] * x2 * z2
        + c[12] * x * z
        + c[13] * x * z2
        + c[14] * x2 * z
        + c[15] * y2 * z2
        + c[16] * y * z
        + c[17] * y * z2
        + c[18] * y2 * z
        + c[19] * x2 * y2 * z2
        + c[20] * x2 * y2 * z
        + c[21] * x2 * y * z2
        + c[22] * x * y2 * z2
        + c[23] * x2 * y * z
        + c[24] * x * y2 * z
        + c[25] * x * y * z2
        + c[26] * x * y * z
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn unit(index: usize, len: usize) -> Vec<f64> {
        let mut c = vec![0.0; len];
        c[index] = 1.0;
        c
    }

    #[test]
    fn biquadratic_terms() {
        let c = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // 1 + 2·2 + 3·4 + 4·3 + 5·9 + 6·6
        assert_relative_eq!(CurveForm::Biquadratic.polynomial(&c, [2.0, 3.0, 0.0]), 110.0);
    }

    #[test]
    fn bicubic_cubic_terms() {
        let form = CurveForm::Bicubic;
        let xy = [2.0, 3.0, 0.0];
        assert_relative_eq!(form.polynomial(&unit(6, 10), xy), 8.0);
        assert_relative_eq!(form.polynomial(&unit(7, 10), xy), 27.0);
        assert_relative_eq!(form.polynomial(&unit(8, 10), xy), 12.0);
        assert_relative_eq!(form.polynomial(&unit(9, 10), xy), 18.0);
    }

    #[test]
    fn lift_form_extra_terms() {
        let form = CurveForm::ChillerPartLoadWithLift;
        let vars = [0.9, 0.5, 0.2];
        assert_relative_eq!(form.polynomial(&unit(10, 12), vars), 0.81 * 0.25);
        assert_relative_eq!(form.polynomial(&unit(11, 12), vars), 0.2 * 0.125);
    }

    #[test]
    fn triquadratic_ordering() {
        let form = CurveForm::Triquadratic;
        let vars = [2.0, 3.0, 5.0];
        assert_relative_eq!(form.polynomial(&unit(1, 27), vars), 4.0);
        assert_relative_eq!(form.polynomial(&unit(2, 27), vars), 2.0);
        assert_relative_eq!(form.polynomial(&unit(6, 27), vars), 5.0);
        assert_relative_eq!(form.polynomial(&unit(19, 27), vars), 900.0);
        assert_relative_eq!(form.polynomial(&unit(26, 27), vars), 30.0);
    }

    #[test]
    fn coefficient_checks() {
        assert!(matches!(
            CurveForm::Bicubic.check_coefficients(&[0.0; 6]),
            Err(CurveError::CoefficientCount {
                expected: 10,
                actual: 6,
                ..
            })
        ));
        let mut c = vec![0.0; 6];
        c[4] = f64::NAN;
        assert_eq!(
            CurveForm::Biquadratic.check_coefficients(&c),
            Err(CurveError::NonFiniteCoefficient { index: 4 })
        );
    }
}
