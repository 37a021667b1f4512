//! Quantity coercion.
//!
//! Quantities arrive as whatever the shopper typed. Coercion is total: any
//! input maps to a positive quantity, and anything unusable becomes 1.

/// Values that can be coerced into a cart quantity.
pub trait QuantityInput {
    /// Coerce to a quantity `>= 1`.
    fn to_quantity(&self) -> u32;
}

/// Coerce `input` to a positive quantity.
///
/// Integers `>= 1` pass through (saturating at `u32::MAX`). Strings are
/// trimmed and parsed as numbers, with any fractional part truncated toward
/// zero. Zero, negatives, and non-numeric input all become 1.
pub fn parse_quantity<Q: QuantityInput + ?Sized>(input: &Q) -> u32 {
    input.to_quantity()
}

fn from_i128(n: i128) -> u32 {
    if n < 1 {
        1
    } else {
        u32::try_from(n).unwrap_or(u32::MAX)
    }
}

impl QuantityInput for str {
    fn to_quantity(&self) -> u32 {
        let s = self.trim();
        if let Ok(n) = s.parse::<i128>() {
            return from_i128(n);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 1.0 => {
                if v >= u32::MAX as f64 {
                    u32::MAX
                } else {
                    v.trunc() as u32
                }
            }
            _ => 1,
        }
    }
}

impl QuantityInput for String {
    fn to_quantity(&self) -> u32 {
        self.as_str().to_quantity()
    }
}

impl<T: QuantityInput + ?Sized> QuantityInput for &T {
    fn to_quantity(&self) -> u32 {
        (**self).to_quantity()
    }
}

macro_rules! impl_integer_quantity {
    ($($ty:ty),*) => {
        $(
            impl QuantityInput for $ty {
                fn to_quantity(&self) -> u32 {
                    from_i128(*self as i128)
                }
            }
        )*
    };
}

impl_integer_quantity!(i32, i64, u32, u64, usize);
