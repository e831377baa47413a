//! Precision selection and the shared cutting tolerance.
//!
//! Exactly one of the `f64` and `f32` features picks [`Real`] together with
//! the matching parry and rapier builds.

#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;
#[cfg(feature = "f64")]
pub use rapier3d_f64 as rapier3d;

#[cfg(feature = "f32")]
pub use parry3d;
#[cfg(feature = "f32")]
pub use rapier3d;

#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Width of the band around a cutting plane that counts as "on the plane".
/// Fixed on first read.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Distance below which a corner is treated as lying on a cutting plane.
///
/// The same value bounds parallel-edge detection and the grid used to merge
/// boundary points. Resolved once, in order: [`set_tolerance`], the
/// `MESHCUT_TOLERANCE` variable seen at build time, then `1e-6` (`f64`) or
/// `1e-4` (`f32`). Never smaller than `Real::EPSILON`.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("MESHCUT_TOLERANCE")
            .and_then(|raw| Real::from_str(raw).ok())
            .filter(|value| value.is_finite())
            .map_or_else(default_tolerance, |value| value.max(Real::EPSILON))
    })
}

/// Pin the cutting tolerance before the first cut reads it.
///
/// Returns `false` when the tolerance was already fixed, either by an earlier
/// call or by a cut that already ran; the value in force is left as is.
pub fn set_tolerance(value: Real) -> bool {
    TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok()
}

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
