//! Double to ASCII conversion
//!
//! Integral values go through the digit loops below; everything else is
//! formatted with `ryu_js`, which produces the shortest round-tripping
//! representation in the Number::toString format.

/// Convert a 32-bit signed integer to decimal string
///
/// Returns the number of characters written.
pub fn i32_to_str(buf: &mut [u8], val: i32) -> usize {
    if buf.is_empty() {
        return 0;
    }

    let mut i = 0;
    if val < 0 {
        buf[i] = b'-';
        i += 1;
    }
    // unsigned_abs keeps i32::MIN representable
    i + u32_to_str(&mut buf[i..], val.unsigned_abs())
}

/// Convert a 32-bit unsigned integer to decimal string
pub fn u32_to_str(buf: &mut [u8], mut val: u32) -> usize {
    if buf.is_empty() {
        return 0;
    }

    let mut i = 0;
    loop {
        if i >= buf.len() {
            break;
        }
        buf[i] = b'0' + (val % 10) as u8;
        i += 1;
        val /= 10;
        if val == 0 {
            break;
        }
    }

    // Reverse the digits
    let end = i;
    let mut left = 0;
    let mut right = end - 1;
    while left < right {
        buf.swap(left, right);
        left += 1;
        right -= 1;
    }

    end
}

/// Decimal form of an array index, used as a property key
pub fn u32_to_string(val: u32) -> String {
    let mut buf = [0u8; 10];
    let n = u32_to_str(&mut buf, val);
    // digits are ASCII
    buf[..n].iter().map(|&b| b as char).collect()
}

/// Number::toString(10) for any double
pub fn f64_to_string(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d == 0.0 {
        // covers -0
        return "0".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if d.fract() == 0.0 && d >= i32::MIN as f64 && d <= i32::MAX as f64 {
        let mut buf = [0u8; 11];
        let n = i32_to_str(&mut buf, d as i32);
        return buf[..n].iter().map(|&b| b as char).collect();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format(d).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_to_str() {
        let mut buf = [0u8; 32];

        let n = i32_to_str(&mut buf, 0);
        assert_eq!(&buf[..n], b"0");

        let n = i32_to_str(&mut buf, 42);
        assert_eq!(&buf[..n], b"42");

        let n = i32_to_str(&mut buf, -123);
        assert_eq!(&buf[..n], b"-123");

        let n = i32_to_str(&mut buf, i32::MAX);
        assert_eq!(&buf[..n], b"2147483647");

        let n = i32_to_str(&mut buf, i32::MIN);
        assert_eq!(&buf[..n], b"-2147483648");
    }

    #[test]
    fn test_u32_to_string() {
        assert_eq!(u32_to_string(0), "0");
        assert_eq!(u32_to_string(4294967295), "4294967295");
    }

    #[test]
    fn test_f64_to_string() {
        assert_eq!(f64_to_string(1.0), "1");
        assert_eq!(f64_to_string(-0.0), "0");
        assert_eq!(f64_to_string(0.1), "0.1");
        assert_eq!(f64_to_string(1.5e300), "1.5e+300");
        assert_eq!(f64_to_string(4294967295.0), "4294967295");
        assert_eq!(f64_to_string(f64::NAN), "NaN");
        assert_eq!(f64_to_string(f64::NEG_INFINITY), "-Infinity");
    }
}
