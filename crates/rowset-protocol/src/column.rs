//! Column descriptors.
//!
//! Each descriptor is a one-byte type tag followed by a `u16`-length-prefixed
//! UTF-8 name. The type tag indexes a fixed name table; tags past the end of
//! the table are tolerated and reported as `"unknown"`.

use bytes::BufMut;

use crate::codec::checked_u16;
use crate::error::ProtocolError;
use crate::types::TypeId;

/// Type names indexed by column type tag.
pub const COLUMN_TYPE_NAMES: [&str; 23] = [
    "null",
    "bit",
    "tinyint",
    "smallint",
    "int",
    "bigint",
    "int",
    "real",
    "float",
    "float",
    "datetime",
    "datetimeoffset",
    "date",
    "time",
    "decimal",
    "uniqueidentifier",
    "nvarchar",
    "varchar",
    "varbinary",
    "xml",
    "money",
    "udt",
    "sql_variant",
];

/// Name reported for tags outside [`COLUMN_TYPE_NAMES`].
pub const UNKNOWN_TYPE_NAME: &str = "unknown";

/// SQL column type as carried in a column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// NULL type.
    Null,
    /// BIT.
    Bit,
    /// TINYINT.
    TinyInt,
    /// SMALLINT.
    SmallInt,
    /// INT.
    Int,
    /// BIGINT.
    BigInt,
    /// Nullable integer of server-chosen width.
    IntN,
    /// REAL.
    Real,
    /// FLOAT.
    Float,
    /// Nullable float of server-chosen width.
    FloatN,
    /// DATETIME, DATETIME2, SMALLDATETIME.
    DateTime,
    /// DATETIMEOFFSET.
    DateTimeOffset,
    /// DATE.
    Date,
    /// TIME.
    Time,
    /// DECIMAL, NUMERIC.
    Decimal,
    /// UNIQUEIDENTIFIER.
    UniqueIdentifier,
    /// NVARCHAR, NCHAR, NTEXT.
    NVarChar,
    /// VARCHAR, CHAR, TEXT.
    VarChar,
    /// VARBINARY, BINARY, IMAGE.
    VarBinary,
    /// XML.
    Xml,
    /// MONEY, SMALLMONEY.
    Money,
    /// CLR user-defined type.
    Udt,
    /// SQL_VARIANT.
    SqlVariant,
    /// A tag this version of the format does not know.
    Unknown(u8),
}

impl ColumnType {
    /// Resolve a wire type tag. Never fails.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => Self::Null,
            1 => Self::Bit,
            2 => Self::TinyInt,
            3 => Self::SmallInt,
            4 => Self::Int,
            5 => Self::BigInt,
            6 => Self::IntN,
            7 => Self::Real,
            8 => Self::Float,
            9 => Self::FloatN,
            10 => Self::DateTime,
            11 => Self::DateTimeOffset,
            12 => Self::Date,
            13 => Self::Time,
            14 => Self::Decimal,
            15 => Self::UniqueIdentifier,
            16 => Self::NVarChar,
            17 => Self::VarChar,
            18 => Self::VarBinary,
            19 => Self::Xml,
            20 => Self::Money,
            21 => Self::Udt,
            22 => Self::SqlVariant,
            other => Self::Unknown(other),
        }
    }

    /// The wire type tag.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bit => 1,
            Self::TinyInt => 2,
            Self::SmallInt => 3,
            Self::Int => 4,
            Self::BigInt => 5,
            Self::IntN => 6,
            Self::Real => 7,
            Self::Float => 8,
            Self::FloatN => 9,
            Self::DateTime => 10,
            Self::DateTimeOffset => 11,
            Self::Date => 12,
            Self::Time => 13,
            Self::Decimal => 14,
            Self::UniqueIdentifier => 15,
            Self::NVarChar => 16,
            Self::VarChar => 17,
            Self::VarBinary => 18,
            Self::Xml => 19,
            Self::Money => 20,
            Self::Udt => 21,
            Self::SqlVariant => 22,
            Self::Unknown(tag) => *tag,
        }
    }

    /// The lowercase SQL type name, or `"unknown"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        COLUMN_TYPE_NAMES
            .get(self.tag() as usize)
            .copied()
            .unwrap_or(UNKNOWN_TYPE_NAME)
    }

    /// Check if this type is not in the known name table.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// The variant a decoder reports for this type's tag.
    ///
    /// `Unknown` holding a tag from the name table maps to the known variant,
    /// so a canonical type survives an encode/decode round trip unchanged.
    #[must_use]
    pub const fn canonical(self) -> Self {
        Self::from_tag(self.tag())
    }

    /// Classify a TDS wire type.
    ///
    /// Table-valued parameters never appear in a result set and have no
    /// column type.
    #[must_use]
    pub const fn from_type_id(type_id: TypeId) -> Option<Self> {
        let column_type = match type_id {
            TypeId::Null => Self::Null,
            TypeId::Bit | TypeId::BitN => Self::Bit,
            TypeId::Int1 => Self::TinyInt,
            TypeId::Int2 => Self::SmallInt,
            TypeId::Int4 => Self::Int,
            TypeId::Int8 => Self::BigInt,
            TypeId::IntN => Self::IntN,
            TypeId::Float4 => Self::Real,
            TypeId::Float8 => Self::Float,
            TypeId::FloatN => Self::FloatN,
            TypeId::DateTime | TypeId::DateTime4 | TypeId::DateTimeN | TypeId::DateTime2 => {
                Self::DateTime
            }
            TypeId::DateTimeOffset => Self::DateTimeOffset,
            TypeId::Date => Self::Date,
            TypeId::Time => Self::Time,
            TypeId::Decimal | TypeId::Numeric | TypeId::DecimalN | TypeId::NumericN => {
                Self::Decimal
            }
            TypeId::Guid => Self::UniqueIdentifier,
            TypeId::NVarChar | TypeId::NChar | TypeId::NText => Self::NVarChar,
            TypeId::BigVarChar | TypeId::BigChar | TypeId::Text | TypeId::VarChar | TypeId::Char => {
                Self::VarChar
            }
            TypeId::BigVarBinary
            | TypeId::BigBinary
            | TypeId::Image
            | TypeId::VarBinary
            | TypeId::Binary => Self::VarBinary,
            TypeId::Xml => Self::Xml,
            TypeId::Money | TypeId::Money4 | TypeId::MoneyN => Self::Money,
            TypeId::Udt => Self::Udt,
            TypeId::Variant => Self::SqlVariant,
            TypeId::Tvp => return None,
        };
        Some(column_type)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Write one column descriptor.
pub fn put_column(
    dst: &mut impl BufMut,
    column_type: ColumnType,
    name: &str,
) -> Result<(), ProtocolError> {
    let len = checked_u16("column name", name.len())?;
    dst.put_u8(column_type.tag());
    dst.put_u16_le(len);
    dst.put_slice(name.as_bytes());
    Ok(())
}
