//! Structural equality and hashing over an explicit list of field values.
//!
//! Models that want value semantics assemble their significant fields in a
//! fixed order and hand them to [`fields_hash`] / [`fields_equal`]. Nothing is
//! discovered by inspection; the caller decides which fields participate.
//!
//! Hashing folds each present value into an accumulator starting at 1 with
//! `acc * 31 + hash`; absent values contribute nothing, so two sequences that
//! differ only in *which* positions are absent can collide.
//!
//! Equality compares same-index pairs. Values with an ordering capability
//! must compare as exactly [`Ordering::Equal`]; others fall back to value
//! equality. Floating-point fields therefore compare bit-exactly (by total
//! order): `10000.123f32` and `10000.120f32` are different values. Callers
//! that need approximate float equality must not route those fields through
//! this helper.

use std::any::Any;
use std::cmp::Ordering;
use std::sync::Arc;

use uuid::Uuid;

/// One field position: `None` when the field has no value.
pub type Field<'a> = Option<&'a dyn FieldValue>;

/// A value that can take part in field-wise equality and hashing.
pub trait FieldValue: Any {
    /// The value's own hash.
    fn field_hash(&self) -> i32;

    /// Value equality against another field value, `false` across types.
    fn field_eq(&self, other: &dyn FieldValue) -> bool;

    /// Three-way comparison, for values with an ordering capability.
    ///
    /// Returns `None` for values without one, or across types.
    fn field_cmp(&self, _other: &dyn FieldValue) -> Option<Ordering> {
        None
    }

    /// Whether [`FieldValue::field_cmp`] is meaningful for this value.
    fn is_comparable(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

/// Borrow an optional field as a [`Field`].
pub fn field<T: FieldValue>(value: &Option<T>) -> Field<'_> {
    value.as_ref().map(|v| v as &dyn FieldValue)
}

/// Borrow an always-present field as a [`Field`].
pub fn present<T: FieldValue>(value: &T) -> Field<'_> {
    Some(value as &dyn FieldValue)
}

/// Combined hash of an ordered field sequence.
pub fn fields_hash(fields: &[Field<'_>]) -> i32 {
    const PRIME: i32 = 31;
    fields.iter().flatten().fold(1i32, |acc, value| {
        acc.wrapping_mul(PRIME).wrapping_add(value.field_hash())
    })
}

/// Field-wise equality of two instances of the same type.
///
/// `this_fields` and `other_fields` must list the same fields in the same
/// order. Identical references are equal without looking at the fields.
pub fn fields_equal<T: ?Sized>(
    this: &T,
    other: &T,
    this_fields: &[Field<'_>],
    other_fields: &[Field<'_>],
) -> bool {
    if std::ptr::eq(this, other) {
        return true;
    }
    if this_fields.len() != other_fields.len() {
        return false;
    }
    this_fields
        .iter()
        .zip(other_fields)
        .all(|(a, b)| match (a, b) {
            (None, None) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (Some(a), Some(b)) => {
                if a.is_comparable() {
                    a.field_cmp(*b) == Some(Ordering::Equal)
                } else {
                    a.field_eq(*b)
                }
            }
        })
}

fn fold_u64(bits: u64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (bits ^ (bits >> 32)) as i32
    }
}

macro_rules! comparable_field {
    ($($ty:ty => |$v:ident| $hash:expr, |$a:ident, $b:ident| $cmp:expr;)*) => {
        $(
            impl FieldValue for $ty {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn field_hash(&self) -> i32 {
                    let $v = *self;
                    $hash
                }

                fn field_eq(&self, other: &dyn FieldValue) -> bool {
                    self.field_cmp(other) == Some(Ordering::Equal)
                }

                fn field_cmp(&self, other: &dyn FieldValue) -> Option<Ordering> {
                    let $b = other.as_any().downcast_ref::<$ty>()?;
                    let $a = self;
                    Some($cmp)
                }

                fn is_comparable(&self) -> bool {
                    true
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

comparable_field! {
    i8 => |v| v as i32, |a, b| a.cmp(b);
    i16 => |v| v as i32, |a, b| a.cmp(b);
    i32 => |v| v, |a, b| a.cmp(b);
    i64 => |v| fold_u64(v as u64), |a, b| a.cmp(b);
    u8 => |v| v as i32, |a, b| a.cmp(b);
    u16 => |v| v as i32, |a, b| a.cmp(b);
    u32 => |v| v as i32, |a, b| a.cmp(b);
    u64 => |v| fold_u64(v), |a, b| a.cmp(b);
    f32 => |v| v.to_bits() as i32, |a, b| a.total_cmp(b);
    f64 => |v| fold_u64(v.to_bits()), |a, b| a.total_cmp(b);
    bool => |v| if v { 1231 } else { 1237 }, |a, b| a.cmp(b);
    char => |v| v as i32, |a, b| a.cmp(b);
}

impl FieldValue for String {
    fn field_hash(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }

    fn field_eq(&self, other: &dyn FieldValue) -> bool {
        self.field_cmp(other) == Some(Ordering::Equal)
    }

    fn field_cmp(&self, other: &dyn FieldValue) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<String>()
            .map(|other| self.as_str().cmp(other.as_str()))
    }

    fn is_comparable(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FieldValue for Uuid {
    fn field_hash(&self) -> i32 {
        let (hi, lo) = self.as_u64_pair();
        fold_u64(hi ^ lo)
    }

    fn field_eq(&self, other: &dyn FieldValue) -> bool {
        self.field_cmp(other) == Some(Ordering::Equal)
    }

    fn field_cmp(&self, other: &dyn FieldValue) -> Option<Ordering> {
        other.as_any().downcast_ref::<Uuid>().map(|other| self.cmp(other))
    }

    fn is_comparable(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared values compare by identity: two `Arc`s are equal only when they
/// point at the same allocation, whatever the pointee's contents.
impl<T: ?Sized + 'static> FieldValue for Arc<T> {
    fn field_hash(&self) -> i32 {
        fold_u64(Arc::as_ptr(self).cast::<()>() as usize as u64)
    }

    fn field_eq(&self, other: &dyn FieldValue) -> bool {
        other
            .as_any()
            .downcast_ref::<Arc<T>>()
            .is_some_and(|other| Arc::ptr_eq(self, other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
