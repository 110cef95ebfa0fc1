/// Easing curve used to space intermediate pulse levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Evenly spaced levels.
    #[default]
    Linear,
    /// Large first step, small last step.
    OutQuad,
    /// Small steps at both ends.
    InOutQuad,
    /// Stronger variant of [`Ease::OutQuad`].
    OutCubic,
}

impl Ease {
    /// Map normalized progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Value `i` of `n` evenly timed steps from `from` to `to`.
    ///
    /// `level(0, n, ..) == from` and `level(n, n, ..) == to` exactly.
    pub fn level(self, i: u32, n: u32, from: f64, to: f64) -> f64 {
        if n == 0 || i >= n {
            return to;
        }
        if i == 0 {
            return from;
        }
        from + (to - from) * self.apply(f64::from(i) / f64::from(n))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/ease.rs"]
mod tests;
