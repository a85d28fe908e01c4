//! Base types: the wire representations a field may declare.

/// A FIT base type, identified on the wire by a single byte.
///
/// The high bit of the identifier marks multi-byte types whose endianness
/// follows the definition's architecture; the low five bits number the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Enum,
    SInt8,
    UInt8,
    SInt16,
    UInt16,
    SInt32,
    UInt32,
    String,
    Float32,
    Float64,
    UInt8z,
    UInt16z,
    UInt32z,
    Byte,
    SInt64,
    UInt64,
    UInt64z,
}

impl BaseType {
    /// Every base type, in identifier order.
    pub const ALL: [BaseType; 17] = [
        Self::Enum,
        Self::SInt8,
        Self::UInt8,
        Self::SInt16,
        Self::UInt16,
        Self::SInt32,
        Self::UInt32,
        Self::String,
        Self::Float32,
        Self::Float64,
        Self::UInt8z,
        Self::UInt16z,
        Self::UInt32z,
        Self::Byte,
        Self::SInt64,
        Self::UInt64,
        Self::UInt64z,
    ];

    /// Look up a base type by its wire identifier.
    ///
    /// Identifiers are matched on their low five bits, so a declaration that
    /// omits or misstates the endian flag still resolves.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get((id & 0x1F) as usize).copied()
    }

    /// The canonical wire identifier.
    pub fn id(self) -> u8 {
        match self {
            Self::Enum => 0x00,
            Self::SInt8 => 0x01,
            Self::UInt8 => 0x02,
            Self::SInt16 => 0x83,
            Self::UInt16 => 0x84,
            Self::SInt32 => 0x85,
            Self::UInt32 => 0x86,
            Self::String => 0x07,
            Self::Float32 => 0x88,
            Self::Float64 => 0x89,
            Self::UInt8z => 0x0A,
            Self::UInt16z => 0x8B,
            Self::UInt32z => 0x8C,
            Self::Byte => 0x0D,
            Self::SInt64 => 0x8E,
            Self::UInt64 => 0x8F,
            Self::UInt64z => 0x90,
        }
    }

    /// Size in bytes of a single element.
    pub fn size(self) -> u8 {
        match self {
            Self::Enum | Self::SInt8 | Self::UInt8 | Self::UInt8z => 1,
            Self::String | Self::Byte => 1,
            Self::SInt16 | Self::UInt16 | Self::UInt16z => 2,
            Self::SInt32 | Self::UInt32 | Self::UInt32z | Self::Float32 => 4,
            Self::SInt64 | Self::UInt64 | Self::UInt64z | Self::Float64 => 8,
        }
    }

    /// Profile name of the type, such as `uint16z`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::SInt8 => "sint8",
            Self::UInt8 => "uint8",
            Self::SInt16 => "sint16",
            Self::UInt16 => "uint16",
            Self::SInt32 => "sint32",
            Self::UInt32 => "uint32",
            Self::String => "string",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::UInt8z => "uint8z",
            Self::UInt16z => "uint16z",
            Self::UInt32z => "uint32z",
            Self::Byte => "byte",
            Self::SInt64 => "sint64",
            Self::UInt64 => "uint64",
            Self::UInt64z => "uint64z",
        }
    }

    /// Whether values of this type are integers (and so may carry components
    /// or be referenced by subfields).
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::String | Self::Float32 | Self::Float64)
    }
}
