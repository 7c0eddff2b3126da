//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Clamp a value into the range [min, max].
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float + std::ops::Mul + std::ops::Add + std::ops::AddAssign
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Returns true if the 2D segments `a0 -> a1` and `b0 -> b1` intersect.
///
/// Touching endpoints and collinear overlap both count as an intersection.
pub fn segments_intersect<T>(a0: &[T; 2], a1: &[T; 2], b0: &[T; 2], b1: &[T; 2]) -> bool
where
    T: Float
{
    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);

    let zero = T::zero();

    // Proper crossing: the ends of each segment lie on opposite sides of the
    // other segment's supporting line
    if ((d1 > zero && d2 < zero) || (d1 < zero && d2 > zero))
        && ((d3 > zero && d4 < zero) || (d3 < zero && d4 > zero))
    {
        return true;
    }

    // Collinear cases: a point of one segment lies on the other
    (d1 == zero && on_segment(b0, b1, a0))
        || (d2 == zero && on_segment(b0, b1, a1))
        || (d3 == zero && on_segment(a0, a1, b0))
        || (d4 == zero && on_segment(a0, a1, b1))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Cross product of the vectors p->q and p->r.
///
/// Positive when r is to the left of p->q, negative when to the right, zero
/// when the three points are collinear.
fn orientation<T>(p: &[T; 2], q: &[T; 2], r: &[T; 2]) -> T
where
    T: Float
{
    (q[0] - p[0]) * (r[1] - p[1]) - (q[1] - p[1]) * (r[0] - p[0])
}

/// For a point r collinear with p->q, returns true if r lies within the
/// segment's bounding box.
fn on_segment<T>(p: &[T; 2], q: &[T; 2], r: &[T; 2]) -> bool
where
    T: Float
{
    r[0] >= p[0].min(q[0])
        && r[0] <= p[0].max(q[0])
        && r[1] >= p[1].min(q[1])
        && r[1] <= p[1].max(q[1])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&1.5f64, &0f64, &1f64), 1f64);
        assert_eq!(clamp(&-0.5f64, &0f64, &1f64), 0f64);
        assert_eq!(clamp(&0.5f64, &0f64, &1f64), 0.5f64);
    }

    #[test]
    fn test_segments_intersect() {
        // Plain crossing
        assert!(segments_intersect(
            &[0f64, 0f64], &[2f64, 2f64],
            &[0f64, 2f64], &[2f64, 0f64]
        ));

        // Parallel, no intersection
        assert!(!segments_intersect(
            &[0f64, 0f64], &[2f64, 0f64],
            &[0f64, 1f64], &[2f64, 1f64]
        ));

        // Would cross if extended, but segments stop short
        assert!(!segments_intersect(
            &[0f64, 0f64], &[1f64, 1f64],
            &[3f64, 0f64], &[2f64, 1f64]
        ));

        // Shared endpoint counts as intersecting
        assert!(segments_intersect(
            &[0f64, 0f64], &[1f64, 1f64],
            &[1f64, 1f64], &[2f64, 0f64]
        ));

        // Collinear overlap
        assert!(segments_intersect(
            &[0f64, 0f64], &[2f64, 0f64],
            &[1f64, 0f64], &[3f64, 0f64]
        ));
    }
}
