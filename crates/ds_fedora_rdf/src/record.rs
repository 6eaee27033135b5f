//! Read-only view over one DesignSafe metadata record.

use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::Error;

/// One JSON-encoded data model entity as exported by the DesignSafe
/// metadata service.
///
/// The envelope carries `uuid`, `name` (the dotted type discriminator) and
/// `lastUpdated`; type specific fields live under `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a>(Cow<'a, Value>);

impl Record<'_> {
    pub fn uuid(&self) -> Result<&str, Error> {
        self.get_str("uuid")
            .filter(|uuid| !uuid.is_empty())
            .ok_or(Error::MalformedRecord { field: "uuid" })
    }
    pub fn name(&self) -> Result<&str, Error> {
        self.get_str("name")
            .filter(|name| !name.is_empty())
            .ok_or(Error::MalformedRecord { field: "name" })
    }
    pub fn record_type(&self) -> Result<RecordType, Error> {
        self.name()?.parse()
    }
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.0.get(prop)
    }
    pub fn get_str(&self, prop: &str) -> Option<&str> {
        self.0.get(prop).and_then(Value::as_str)
    }
    /// Property of the nested `value` object.
    pub fn get_field(&self, prop: &str) -> Option<&Value> {
        self.0.get("value").and_then(|value| value.get(prop))
    }
    /// First identifier of an ancestor reference list such as
    /// `value.project`. A bare string is accepted as a one element list.
    pub fn first_ancestor(&self, prop: &str) -> Option<&str> {
        let id = match self.get_field(prop)? {
            Value::String(id) => id.as_str(),
            Value::Array(ids) => ids.first()?.as_str()?,
            _ => return None,
        };
        if id.is_empty() { None } else { Some(id) }
    }
    /// Lookup by RFC 6901 JSON pointer, relative to the record root.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }
}

impl From<Value> for Record<'static> {
    fn from(value: Value) -> Self {
        if !value.is_object() {
            // Anything but a JSON object is treated as an empty record, which
            // fails later on the missing `uuid`.
            Record(Cow::Owned(Value::Object(Map::new())))
        } else {
            Record(Cow::Owned(value))
        }
    }
}

impl<'a> From<&'a Value> for Record<'a> {
    fn from(value: &'a Value) -> Self {
        if !value.is_object() {
            Record(Cow::Owned(Value::Object(Map::new())))
        } else {
            Record(Cow::Borrowed(value))
        }
    }
}

/// The seven record types of the DesignSafe experimental project model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Project,
    Experiment,
    Analysis,
    Report,
    ModelConfig,
    SensorList,
    Event,
}

impl RecordType {
    pub const ALL: [RecordType; 7] = [
        RecordType::Project,
        RecordType::Experiment,
        RecordType::Analysis,
        RecordType::Report,
        RecordType::ModelConfig,
        RecordType::SensorList,
        RecordType::Event,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Project => "designsafe.project",
            RecordType::Experiment => "designsafe.project.experiment",
            RecordType::Analysis => "designsafe.project.analysis",
            RecordType::Report => "designsafe.project.report",
            RecordType::ModelConfig => "designsafe.project.model_config",
            RecordType::SensorList => "designsafe.project.sensor_list",
            RecordType::Event => "designsafe.project.event",
        }
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == name)
            .ok_or_else(|| Error::UnsupportedRecordType(name.to_owned()))
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::Error;

    use super::{Record, RecordType};

    #[test]
    fn record_type_names() {
        for ty in RecordType::ALL {
            assert_eq!(ty.as_str().parse::<RecordType>().ok(), Some(ty));
        }
        assert!(matches!(
            "designsafe.project.simulation".parse::<RecordType>(),
            Err(Error::UnsupportedRecordType(name)) if name == "designsafe.project.simulation"
        ));
    }

    #[test]
    fn non_object_is_empty_record() {
        let record = Record::from(json!(["not", "a", "record"]));
        assert!(matches!(
            record.uuid(),
            Err(Error::MalformedRecord { field: "uuid" })
        ));
        assert!(matches!(
            record.name(),
            Err(Error::MalformedRecord { field: "name" })
        ));
    }

    #[test]
    fn first_ancestor_lookup() {
        let value = json!({
            "uuid": "e-1",
            "name": "designsafe.project.experiment",
            "value": {
                "project": ["p-1", "p-2"],
                "experiments": "x-1",
                "modelConfigs": [],
                "sensorLists": [""]
            }
        });
        let record = Record::from(&value);
        assert_eq!(record.first_ancestor("project"), Some("p-1"));
        assert_eq!(record.first_ancestor("experiments"), Some("x-1"));
        assert_eq!(record.first_ancestor("modelConfigs"), None);
        assert_eq!(record.first_ancestor("sensorLists"), None);
        assert_eq!(record.first_ancestor("missing"), None);
    }
}
