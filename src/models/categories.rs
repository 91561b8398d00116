use std::fmt;
use std::str::FromStr;

/// A closed set of keys an [`AmountSheet`](super::apartment::AmountSheet) is indexed by.
///
/// `ALL` fixes both membership and iteration order; nothing outside it is ever stored.
pub trait SheetKey: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Key used in the serialized record and in field update events.
    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CostCategory {
    Rent,
    Parking,
    Electricity,
    Gas,
    Water,
    Internet,
    Trash,
    Insurance,
    Laundry,
    Storage,
    Other,
}

impl SheetKey for CostCategory {
    const ALL: &'static [Self] = &[
        Self::Rent,
        Self::Parking,
        Self::Electricity,
        Self::Gas,
        Self::Water,
        Self::Internet,
        Self::Trash,
        Self::Insurance,
        Self::Laundry,
        Self::Storage,
        Self::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Parking => "parking",
            Self::Electricity => "electricity",
            Self::Gas => "gas",
            Self::Water => "water",
            Self::Internet => "internet",
            Self::Trash => "trash",
            Self::Insurance => "insurance",
            Self::Laundry => "laundry",
            Self::Storage => "storage",
            Self::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::Parking => "Parking",
            Self::Electricity => "Electricity",
            Self::Gas => "Gas",
            Self::Water => "Water",
            Self::Internet => "Internet",
            Self::Trash => "Trash / Waste",
            Self::Insurance => "Renter's Insurance",
            Self::Laundry => "Laundry",
            Self::Storage => "Storage Unit",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveInFee {
    FirstMonth,
    LastMonth,
    Deposit,
    ApplicationFee,
    BrokerFee,
    Other,
}

impl SheetKey for MoveInFee {
    const ALL: &'static [Self] = &[
        Self::FirstMonth,
        Self::LastMonth,
        Self::Deposit,
        Self::ApplicationFee,
        Self::BrokerFee,
        Self::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::FirstMonth => "first",
            Self::LastMonth => "last",
            Self::Deposit => "deposit",
            Self::ApplicationFee => "appfee",
            Self::BrokerFee => "broker",
            Self::Other => "moveother",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FirstMonth => "First Month's Rent",
            Self::LastMonth => "Last Month's Rent",
            Self::Deposit => "Security Deposit",
            Self::ApplicationFee => "Application Fee",
            Self::BrokerFee => "Broker Fee",
            Self::Other => "Other Move-In",
        }
    }
}

/// Free-text metadata stored directly on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaField {
    Name,
    Neighborhood,
    Address,
    Unit,
    Sqft,
    Bedrooms,
    DateAvailable,
    Notes,
}

impl MetaField {
    pub const ALL: &'static [Self] = &[
        Self::Name,
        Self::Neighborhood,
        Self::Address,
        Self::Unit,
        Self::Sqft,
        Self::Bedrooms,
        Self::DateAvailable,
        Self::Notes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Neighborhood => "neighborhood",
            Self::Address => "address",
            Self::Unit => "unit",
            Self::Sqft => "sqft",
            Self::Bedrooms => "bedrooms",
            Self::DateAvailable => "dateAvailable",
            Self::Notes => "notes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

/// Where a field update event lands on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Cost(CostCategory),
    MoveIn(MoveInFee),
    Meta(MetaField),
}

impl FieldKey {
    pub fn key(self) -> &'static str {
        match self {
            FieldKey::Cost(c) => c.key(),
            FieldKey::MoveIn(f) => f.key(),
            FieldKey::Meta(m) => m.key(),
        }
    }
}

impl From<CostCategory> for FieldKey {
    fn from(value: CostCategory) -> Self {
        FieldKey::Cost(value)
    }
}

impl From<MoveInFee> for FieldKey {
    fn from(value: MoveInFee) -> Self {
        FieldKey::MoveIn(value)
    }
}

impl From<MetaField> for FieldKey {
    fn from(value: MetaField) -> Self {
        FieldKey::Meta(value)
    }
}

impl FromStr for FieldKey {
    type Err = UnknownField;

    // Cost categories win over move-in fees, which win over metadata.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if let Some(category) = CostCategory::from_key(key) {
            return Ok(FieldKey::Cost(category));
        }
        if let Some(fee) = MoveInFee::from_key(key) {
            return Ok(FieldKey::MoveIn(fee));
        }
        MetaField::from_key(key)
            .map(FieldKey::Meta)
            .ok_or_else(|| UnknownField(key.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field key '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}
