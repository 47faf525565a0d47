//! Utility functions
//!
//! Number formatting and UTF-8/UTF-16 helpers shared by the runtime.

pub mod dtoa;
pub mod unicode;

/// ToUint32 on an already converted number
#[inline]
pub fn f64_to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4294967296.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_uint32() {
        assert_eq!(f64_to_uint32(0.0), 0);
        assert_eq!(f64_to_uint32(3.7), 3);
        assert_eq!(f64_to_uint32(-1.0), u32::MAX);
        assert_eq!(f64_to_uint32(4294967296.0), 0);
        assert_eq!(f64_to_uint32(4294967297.0), 1);
        assert_eq!(f64_to_uint32(f64::NAN), 0);
        assert_eq!(f64_to_uint32(f64::INFINITY), 0);
    }
}
