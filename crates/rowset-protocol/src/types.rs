//! SQL Server wire type identifiers.
//!
//! The native driver reports column metadata using the type bytes of the
//! TDS COLMETADATA token. [`TypeId`] names those bytes so the producer can
//! classify a column into a [`ColumnType`](crate::column::ColumnType) tag.

/// TDS data type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    // Fixed-length types
    /// NULLTYPE.
    Null = 0x1F,
    /// INT1TYPE (TINYINT).
    Int1 = 0x30,
    /// BITTYPE.
    Bit = 0x32,
    /// INT2TYPE (SMALLINT).
    Int2 = 0x34,
    /// INT4TYPE (INT).
    Int4 = 0x38,
    /// INT8TYPE (BIGINT).
    Int8 = 0x7F,
    /// FLT4TYPE (REAL).
    Float4 = 0x3B,
    /// FLT8TYPE (FLOAT).
    Float8 = 0x3E,
    /// MONEYTYPE.
    Money = 0x3C,
    /// MONEY4TYPE (SMALLMONEY).
    Money4 = 0x7A,
    /// DATETIMETYPE.
    DateTime = 0x3D,
    /// DATETIM4TYPE (SMALLDATETIME).
    DateTime4 = 0x3A,

    // Nullable, length-prefixed variants
    /// GUIDTYPE.
    Guid = 0x24,
    /// INTNTYPE.
    IntN = 0x26,
    /// DECIMALTYPE (legacy).
    Decimal = 0x37,
    /// NUMERICTYPE (legacy).
    Numeric = 0x3F,
    /// BITNTYPE.
    BitN = 0x68,
    /// DECIMALNTYPE.
    DecimalN = 0x6A,
    /// NUMERICNTYPE.
    NumericN = 0x6C,
    /// FLTNTYPE.
    FloatN = 0x6D,
    /// MONEYNTYPE.
    MoneyN = 0x6E,
    /// DATETIMNTYPE.
    DateTimeN = 0x6F,

    // Character and binary
    /// CHARTYPE (legacy).
    Char = 0x2F,
    /// VARCHARTYPE (legacy).
    VarChar = 0x27,
    /// BINARYTYPE (legacy).
    Binary = 0x2D,
    /// VARBINARYTYPE (legacy).
    VarBinary = 0x25,
    /// BIGVARCHRTYPE.
    BigVarChar = 0xA7,
    /// BIGVARBINTYPE.
    BigVarBinary = 0xA5,
    /// BIGCHARTYPE.
    BigChar = 0xAF,
    /// BIGBINARYTYPE.
    BigBinary = 0xAD,
    /// NCHARTYPE.
    NChar = 0xEF,
    /// NVARCHARTYPE.
    NVarChar = 0xE7,
    /// TEXTTYPE.
    Text = 0x23,
    /// IMAGETYPE.
    Image = 0x22,
    /// NTEXTTYPE.
    NText = 0x63,

    // SQL Server 2008+ temporal types
    /// DATENTYPE.
    Date = 0x28,
    /// TIMENTYPE.
    Time = 0x29,
    /// DATETIME2NTYPE.
    DateTime2 = 0x2A,
    /// DATETIMEOFFSETNTYPE.
    DateTimeOffset = 0x2B,

    // Special
    /// SSVARIANTTYPE.
    Variant = 0x62,
    /// UDTTYPE.
    Udt = 0xF0,
    /// XMLTYPE.
    Xml = 0xF1,
    /// TVPTYPE.
    Tvp = 0xF3,
}

impl TypeId {
    /// Create a type ID from a raw byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        let id = match value {
            0x1F => Self::Null,
            0x30 => Self::Int1,
            0x32 => Self::Bit,
            0x34 => Self::Int2,
            0x38 => Self::Int4,
            0x7F => Self::Int8,
            0x3B => Self::Float4,
            0x3E => Self::Float8,
            0x3C => Self::Money,
            0x7A => Self::Money4,
            0x3D => Self::DateTime,
            0x3A => Self::DateTime4,
            0x24 => Self::Guid,
            0x26 => Self::IntN,
            0x37 => Self::Decimal,
            0x3F => Self::Numeric,
            0x68 => Self::BitN,
            0x6A => Self::DecimalN,
            0x6C => Self::NumericN,
            0x6D => Self::FloatN,
            0x6E => Self::MoneyN,
            0x6F => Self::DateTimeN,
            0x2F => Self::Char,
            0x27 => Self::VarChar,
            0x2D => Self::Binary,
            0x25 => Self::VarBinary,
            0xA7 => Self::BigVarChar,
            0xA5 => Self::BigVarBinary,
            0xAF => Self::BigChar,
            0xAD => Self::BigBinary,
            0xEF => Self::NChar,
            0xE7 => Self::NVarChar,
            0x23 => Self::Text,
            0x22 => Self::Image,
            0x63 => Self::NText,
            0x28 => Self::Date,
            0x29 => Self::Time,
            0x2A => Self::DateTime2,
            0x2B => Self::DateTimeOffset,
            0x62 => Self::Variant,
            0xF0 => Self::Udt,
            0xF1 => Self::Xml,
            0xF3 => Self::Tvp,
            _ => return None,
        };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_from_u8() {
        assert_eq!(TypeId::from_u8(0x38), Some(TypeId::Int4));
        assert_eq!(TypeId::from_u8(0xE7), Some(TypeId::NVarChar));
        assert_eq!(TypeId::from_u8(0x6F), Some(TypeId::DateTimeN));
        assert_eq!(TypeId::from_u8(0x99), None);
    }

    #[test]
    fn test_from_u8_matches_discriminant() {
        for raw in 0u8..=255 {
            if let Some(id) = TypeId::from_u8(raw) {
                assert_eq!(id as u8, raw);
            }
        }
    }
}
