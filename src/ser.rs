use serde::{
    ser::{Serialize, SerializeMap, SerializeSeq},
    Serializer,
};

use crate::value::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(bool) => serializer.serialize_bool(*bool),
            Self::Number(num) => serializer.serialize_f64(*num),
            Self::String(str) => serializer.serialize_str(str),
            Self::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;

                for v in array {
                    seq.serialize_element(v)?;
                }

                seq.end()
            }
            Self::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;

                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }

                map.end()
            }
        }
    }
}
