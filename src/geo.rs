use glam::DVec3;

/// Wrap an angle in degrees into [-180, 180)
#[inline(always)]
pub fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Wrap an angle in radians into [-PI, PI]
#[inline(always)]
pub fn wrap_radians(rad: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if (-PI..=PI).contains(&rad) {
        rad
    } else {
        (rad + PI).rem_euclid(TAU) - PI
    }
}

/// Convert lambda/phi (radians) to a unit sphere vector.
#[inline(always)]
pub fn spherical_to_vec3(lambda: f64, phi: f64) -> DVec3 {
    let cos_phi = phi.cos();
    DVec3::new(lambda.cos() * cos_phi, lambda.sin() * cos_phi, phi.sin())
}

/// Convert a unit sphere vector back to lambda/phi (radians).
#[inline(always)]
pub fn vec3_to_spherical(p: DVec3) -> (f64, f64) {
    (p.y.atan2(p.x), p.z.clamp(-1.0, 1.0).asin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(540.0), -180.0);
    }

    #[test]
    fn test_wrap_radians_many_turns() {
        use std::f64::consts::{FRAC_PI_2, PI, TAU};
        assert_eq!(wrap_radians(PI), PI);
        assert_eq!(wrap_radians(-PI), -PI);
        assert!((wrap_radians(FRAC_PI_2 + 2.0 * TAU) - FRAC_PI_2).abs() < 1e-12);
        assert!((wrap_radians(-FRAC_PI_2 - 3.0 * TAU) + FRAC_PI_2).abs() < 1e-12);
        let wrapped = wrap_radians(890.0_f64.to_radians());
        assert!((wrapped - 170.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_roundtrip() {
        let (lambda, phi) = (0.5_f64, -0.3_f64);
        let (l2, p2) = vec3_to_spherical(spherical_to_vec3(lambda, phi));
        assert!((lambda - l2).abs() < 1e-12);
        assert!((phi - p2).abs() < 1e-12);
    }
}
