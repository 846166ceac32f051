// ============================================================================
// SIZE NEGOTIATION
// ============================================================================

/// Radius at which the face's base constants apply unscaled.
pub const BASE_RADIUS: f64 = 200.0;

/// Constraint a host layout places on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The dimension must be exactly this many pixels.
    Exact(u32),
    /// The dimension may be anything up to this many pixels.
    AtMost(u32),
    /// The host imposes nothing.
    Unspecified,
}

/// Negotiated square size of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub size: u32,
    pub radius: u32,
}

impl Measurement {
    pub fn scale(&self) -> f64 {
        scale_for_radius(self.radius as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.radius == 0
    }
}

/// Scale factor for a face of the given radius.
pub fn scale_for_radius(radius: f64) -> f64 {
    radius / BASE_RADIUS
}

/// Resolves one dimension against its constraint. An at-most bound is
/// never exceeded.
pub fn resolve_dimension(spec: MeasureSpec, default: u32) -> u32 {
    match spec {
        MeasureSpec::Exact(value) => value,
        MeasureSpec::AtMost(bound) => default.min(bound),
        MeasureSpec::Unspecified => default,
    }
}

/// Negotiates the square size of the face.
///
/// A non-zero `fixed_radius` wins over the constraints and yields a
/// `2r x 2r` face. Otherwise the smaller negotiated dimension becomes the
/// side and the radius is half of it.
pub fn measure(
    width: MeasureSpec,
    height: MeasureSpec,
    fixed_radius: Option<u32>,
    default_size: u32,
) -> Measurement {
    let measurement = match fixed_radius.filter(|r| *r > 0) {
        Some(radius) => Measurement {
            size: radius.saturating_mul(2),
            radius,
        },
        None => {
            let size = resolve_dimension(width, default_size)
                .min(resolve_dimension(height, default_size));
            Measurement {
                size,
                radius: size / 2,
            }
        }
    };
    log::debug!(
        "measured {:?} x {:?} (fixed radius {:?}) -> {:?}",
        width,
        height,
        fixed_radius,
        measurement
    );
    measurement
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_ignores_default() {
        assert_eq!(resolve_dimension(MeasureSpec::Exact(150), 400), 150);
        assert_eq!(resolve_dimension(MeasureSpec::Exact(150), 10), 150);
    }

    #[test]
    fn at_most_never_exceeds_bound() {
        assert_eq!(resolve_dimension(MeasureSpec::AtMost(80), 400), 80);
        assert_eq!(resolve_dimension(MeasureSpec::AtMost(800), 400), 400);
    }

    #[test]
    fn unspecified_uses_default() {
        assert_eq!(resolve_dimension(MeasureSpec::Unspecified, 400), 400);
    }

    #[test]
    fn square_takes_smaller_side() {
        let m = measure(MeasureSpec::Exact(300), MeasureSpec::Exact(500), None, 400);
        assert_eq!(m, Measurement { size: 300, radius: 150 });
    }

    #[test]
    fn fixed_radius_overrides_constraints() {
        let m = measure(MeasureSpec::Exact(50), MeasureSpec::AtMost(10), Some(120), 400);
        assert_eq!(m, Measurement { size: 240, radius: 120 });
    }

    #[test]
    fn zero_fixed_radius_falls_back_to_negotiation() {
        let m = measure(MeasureSpec::Exact(100), MeasureSpec::Exact(100), Some(0), 400);
        assert_eq!(m.radius, 50);
    }

    #[test]
    fn zero_constraints_give_empty_face() {
        let m = measure(MeasureSpec::Exact(0), MeasureSpec::Unspecified, None, 400);
        assert!(m.is_empty());
        assert_eq!(m.scale(), 0.0);
    }

    #[test]
    fn radius_200_has_unit_scale() {
        let m = measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified, None, 400);
        assert_eq!(m.radius, 200);
        assert_eq!(m.scale(), 1.0);
    }

    proptest! {
        #[test]
        fn at_most_result_within_bound(bound in 0u32..10_000, default in 0u32..10_000) {
            prop_assert!(resolve_dimension(MeasureSpec::AtMost(bound), default) <= bound);
        }

        #[test]
        fn negotiated_radius_fits_both_sides(
            w in 0u32..5_000,
            h in 0u32..5_000,
            default in 0u32..5_000,
        ) {
            let m = measure(MeasureSpec::AtMost(w), MeasureSpec::Exact(h), None, default);
            prop_assert!(m.radius * 2 <= m.size);
            prop_assert!(m.size <= w);
            prop_assert!(m.size <= h);
        }
    }
}
