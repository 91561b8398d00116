use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use log::warn;
use rand::Rng;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use super::categories::{CostCategory, FieldKey, MetaField, MoveInFee, SheetKey};

// Ids stay within the range a JSON number represents exactly.
const MAX_RECORD_ID: u64 = (1 << 53) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn generate() -> RecordId {
        RecordId(rand::thread_rng().gen_range(1..=MAX_RECORD_ID))
    }

    /// Maps a stored numeric id onto a `RecordId`.
    ///
    /// Whole numbers in range are kept as they are. Older lists carry fractional
    /// timestamp ids, which are folded onto the valid range by their bit pattern, so the
    /// same stored id always yields the same `RecordId`.
    pub fn from_number(num: &Number) -> Option<RecordId> {
        if let Some(id) = num.as_u64().filter(|id| (1..=MAX_RECORD_ID).contains(id)) {
            return Some(RecordId(id));
        }
        num.as_f64()
            .filter(|value| value.is_finite())
            .map(|value| RecordId(value.to_bits() % MAX_RECORD_ID + 1))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let num = Number::deserialize(deserializer)?;
        RecordId::from_number(&num)
            .ok_or_else(|| de::Error::custom(format!("invalid record id: {}", num)))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw text amounts keyed by a closed key set. Every key in `K::ALL` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountSheet<K: SheetKey> {
    values: BTreeMap<K, String>,
}

impl<K: SheetKey> AmountSheet<K> {
    pub fn empty() -> AmountSheet<K> {
        AmountSheet {
            values: K::ALL.iter().map(|k| (*k, String::new())).collect(),
        }
    }

    pub fn get(&self, key: K) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, key: K, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Entries in `K::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<K: SheetKey> Default for AmountSheet<K> {
    fn default() -> Self {
        AmountSheet::empty()
    }
}

impl<K: SheetKey> Serialize for AmountSheet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.key(), value)?;
        }
        map.end()
    }
}

impl<'de, K: SheetKey> Deserialize<'de> for AmountSheet<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SheetVisitor(PhantomData))
    }
}

struct SheetVisitor<K>(PhantomData<K>);

impl<'de, K: SheetKey> Visitor<'de> for SheetVisitor<K> {
    type Value = AmountSheet<K>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut sheet = AmountSheet::empty();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            match K::from_key(&key) {
                Some(k) => sheet.set(k, amount_text(value).map_err(de::Error::custom)?),
                None => warn!("Ignoring unknown amount key '{}'", key),
            }
        }
        Ok(sheet)
    }
}

fn amount_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(num) => Ok(num.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("invalid amount: {}", other)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentRecord {
    id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub sqft: String,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub date_available: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub costs: AmountSheet<CostCategory>,
    #[serde(default)]
    pub movein: AmountSheet<MoveInFee>,
}

impl ApartmentRecord {
    pub fn blank(id: RecordId) -> ApartmentRecord {
        ApartmentRecord {
            id,
            name: String::new(),
            neighborhood: String::new(),
            address: String::new(),
            unit: String::new(),
            sqft: String::new(),
            bedrooms: String::new(),
            date_available: String::new(),
            notes: String::new(),
            costs: AmountSheet::empty(),
            movein: AmountSheet::empty(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn meta(&self, field: MetaField) -> &str {
        match field {
            MetaField::Name => &self.name,
            MetaField::Neighborhood => &self.neighborhood,
            MetaField::Address => &self.address,
            MetaField::Unit => &self.unit,
            MetaField::Sqft => &self.sqft,
            MetaField::Bedrooms => &self.bedrooms,
            MetaField::DateAvailable => &self.date_available,
            MetaField::Notes => &self.notes,
        }
    }

    fn meta_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::Name => &mut self.name,
            MetaField::Neighborhood => &mut self.neighborhood,
            MetaField::Address => &mut self.address,
            MetaField::Unit => &mut self.unit,
            MetaField::Sqft => &mut self.sqft,
            MetaField::Bedrooms => &mut self.bedrooms,
            MetaField::DateAvailable => &mut self.date_available,
            MetaField::Notes => &mut self.notes,
        }
    }

    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        match key {
            FieldKey::Cost(category) => self.costs.set(category, value),
            FieldKey::MoveIn(fee) => self.movein.set(fee, value),
            FieldKey::Meta(field) => *self.meta_mut(field) = value.into(),
        }
    }

    pub fn with(mut self, key: impl Into<FieldKey>, value: impl Into<String>) -> ApartmentRecord {
        self.set_field(key.into(), value);
        self
    }

    /// Trimmed neighborhood label, `None` when blank.
    pub fn neighborhood_label(&self) -> Option<&str> {
        let label = self.neighborhood.trim();
        (!label.is_empty()).then_some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_has_every_key() {
        let record = ApartmentRecord::blank(RecordId(7));
        assert_eq!(record.costs.iter().count(), CostCategory::ALL.len());
        assert_eq!(record.movein.iter().count(), MoveInFee::ALL.len());
        assert!(record.costs.iter().all(|(_, v)| v.is_empty()));
        assert_eq!(record.id(), RecordId(7));
    }

    #[test]
    fn set_field_routes_to_sub_mapping() {
        let record = ApartmentRecord::blank(RecordId(1))
            .with(CostCategory::Rent, "2000")
            .with(MoveInFee::Deposit, "500")
            .with(MetaField::Neighborhood, "Echo Park");

        assert_eq!(record.costs.get(CostCategory::Rent), "2000");
        assert_eq!(record.movein.get(MoveInFee::Deposit), "500");
        assert_eq!(record.neighborhood, "Echo Park");
        assert_eq!(record.meta(MetaField::Name), "");
    }

    #[test]
    fn serializes_with_wire_keys() {
        let record = ApartmentRecord::blank(RecordId(42))
            .with(CostCategory::Rent, "1800")
            .with(MetaField::DateAvailable, "2024-03-05");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 42);
        assert_eq!(json["dateAvailable"], "2024-03-05");
        assert_eq!(json["costs"]["rent"], "1800");
        assert_eq!(json["movein"]["appfee"], "");
    }

    #[test]
    fn deserialize_drops_unknown_keys_and_accepts_numbers() {
        let json = r#"{
            "id": 3,
            "name": "Loft",
            "costs": { "rent": 2100, "hoa": "50", "water": null },
            "movein": { "deposit": "900" }
        }"#;
        let record: ApartmentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.costs.get(CostCategory::Rent), "2100");
        assert_eq!(record.costs.get(CostCategory::Water), "");
        assert_eq!(record.costs.iter().count(), CostCategory::ALL.len());
        assert_eq!(record.movein.get(MoveInFee::Deposit), "900");
        assert_eq!(record.movein.get(MoveInFee::BrokerFee), "");
        assert_eq!(record.neighborhood, "");
    }

    #[test]
    fn fractional_ids_load_as_stable_record_ids() {
        let json = r#"{"id": 1712345678901.4321, "name": "Loft", "costs": {"rent": "2200"}}"#;
        let first: ApartmentRecord = serde_json::from_str(json).unwrap();
        let again: ApartmentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(first.name, "Loft");
        assert_eq!(first.costs.get(CostCategory::Rent), "2200");
        assert_eq!(first.id(), again.id());
        assert!((1..=MAX_RECORD_ID).contains(&first.id().0));

        let whole: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(whole, RecordId(42));
        assert!(serde_json::from_str::<RecordId>("\"42\"").is_err());
    }

    #[test]
    fn neighborhood_label_is_trimmed() {
        let record =
            ApartmentRecord::blank(RecordId(1)).with(MetaField::Neighborhood, "  Downtown ");
        assert_eq!(record.neighborhood_label(), Some("Downtown"));

        let blank = ApartmentRecord::blank(RecordId(2)).with(MetaField::Neighborhood, "   ");
        assert_eq!(blank.neighborhood_label(), None);
    }
}
