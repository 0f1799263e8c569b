//! JSON and TOML file layers.
//!
//! A file layer is an object keyed by field identifier. Scalar fields take
//! JSON strings, numbers or booleans; fields of other kinds receive the
//! JSON text of their value and decode it through their codec.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as Json};
use tracing::{debug, warn};

use structconf_core::convert::ScalarConverter;
use structconf_core::sink::FieldSetter;
use structconf_core::{
    Error, Extract, Extracted, Kind, ParsePair, Record, Result, StructField, Value,
};

use super::StructConfig;

/// Extracts a field's entry from a JSON object.
struct JsonEntry<'j> {
    object: &'j Map<String, Json>,
}

impl Extract for JsonEntry<'_> {
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        let entry = match self.object.get(field.name()) {
            None | Some(Json::Null) => return Ok(Extracted::Skip),
            Some(entry) => entry,
        };
        if field.kind() == Kind::Other {
            return Ok(Extracted::Found(entry.to_string()));
        }
        match entry {
            Json::String(s) => Ok(Extracted::Found(s.clone())),
            Json::Bool(_) | Json::Number(_) => Ok(Extracted::Found(entry.to_string())),
            _ => Err(Error::Conversion {
                field: field.name().to_string(),
                kind: field.kind(),
                raw: entry.to_string(),
                reason: "expected a string, number or boolean".to_string(),
            }),
        }
    }
}

impl<T: Record> StructConfig<T> {
    /// Overlay the entries of a JSON object onto `target`.
    ///
    /// Keys that name no field are ignored, as are `null` entries.
    pub fn from_json(&self, target: &mut T, json: &Json) -> Result<()> {
        let Json::Object(object) = json else {
            return Err(Error::File(format!(
                "expected a JSON object, found {}",
                json_type(json)
            )));
        };
        let ty = self.ty()?;
        debug!(record = ty.name(), keys = object.len(), "from json");
        ty.accept(&mut ParsePair::new(
            JsonEntry { object },
            ScalarConverter,
            FieldSetter::new(target, self.options.codecs())?,
        ))
    }

    /// Overlay a TOML document onto `target`.
    pub fn from_toml_str(&self, target: &mut T, text: &str) -> Result<()> {
        let value: toml::Value =
            toml::from_str(text).map_err(|e| Error::File(format!("TOML parse error: {}", e)))?;
        self.from_json(target, &toml_to_json(value))
    }

    /// Overlay a TOML or JSON file onto `target`, chosen by extension.
    pub fn from_file(&self, target: &mut T, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::File(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                let json: Json = serde_json::from_str(&text)
                    .map_err(|e| Error::File(format!("JSON parse error: {}", e)))?;
                self.from_json(target, &json)
            }
            _ => self.from_toml_str(target, &text),
        }
    }

    /// Render `source` as a JSON object keyed by field identifier.
    ///
    /// Fields of other kinds are encoded through their codec; those without
    /// one are left out.
    pub fn to_json(&self, source: &T) -> Result<Json> {
        let mut object = Map::new();
        for field in self.fields()? {
            let Some(value) = source.field(field.name()) else {
                continue;
            };
            let json = match value {
                Value::Bool(v) => Json::from(v),
                Value::Int(v) => Json::from(v),
                Value::Int8(v) => Json::from(v),
                Value::Int16(v) => Json::from(v),
                Value::Int32(v) => Json::from(v),
                Value::Int64(v) => Json::from(v),
                Value::Uint(v) => Json::from(v),
                Value::Uint8(v) => Json::from(v),
                Value::Uint16(v) => Json::from(v),
                Value::Uint32(v) => Json::from(v),
                Value::Uint64(v) => Json::from(v),
                Value::Float32(v) => Json::from(v),
                Value::Float64(v) => Json::from(v),
                Value::String(v) => Json::from(v),
                Value::Other(other) => {
                    let Some(codec) = self.options.codecs().get(&field) else {
                        warn!(field = field.name(), "no codec registered, left out of JSON");
                        continue;
                    };
                    let text = codec
                        .encode(&field, &other)
                        .map_err(|source| Error::any(field.name(), source))?;
                    serde_json::from_str(&text).unwrap_or(Json::String(text))
                }
            };
            object.insert(field.name().to_string(), json);
        }
        Ok(Json::Object(object))
    }
}

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

/// Convert a TOML value to its JSON counterpart.
fn toml_to_json(toml: toml::Value) -> Json {
    match toml {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(dt) => Json::String(dt.to_string()),
        toml::Value::Array(arr) => Json::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Json::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;
    use serde_json::json;
    use std::io::Write;
    use structconf_core::{ErrorKind, JsonCodec};
    use tempfile::Builder;

    structconf_core::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Service {
            #[tag(r#"name:"host" default:"localhost""#)]
            host: String,
            #[tag(r#"name:"port" default:"8080""#)]
            port: u16,
            #[tag(r#"name:"ratio""#)]
            ratio: f32,
            #[tag(r#"name:"debug""#)]
            debug: bool,
            #[tag(r#"name:"routes""#)]
            routes: Vec<u32>,
        }
    }

    fn config() -> StructConfig<Service> {
        StructConfig::new(Options::new().with_codec::<Vec<u32>>(JsonCodec::<Vec<u32>>::new()))
    }

    #[test]
    fn test_from_json() {
        let mut s = config().default_value().unwrap();
        config()
            .from_json(
                &mut s,
                &json!({
                    "port": 9000,
                    "ratio": 0.5,
                    "debug": "true",
                    "routes": [1, 2],
                    "unknown": 1,
                }),
            )
            .unwrap();
        assert_eq!(s.host, "localhost");
        assert_eq!(s.port, 9000);
        assert_eq!(s.ratio, 0.5);
        assert!(s.debug);
        assert_eq!(s.routes, vec![1, 2]);
    }

    #[test]
    fn test_from_json_rejects_nested_scalar() {
        let mut s = Service::default();
        let err = config()
            .from_json(&mut s, &json!({"port": {"value": 1}}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);

        let err = config().from_json(&mut s, &json!([1])).unwrap_err();
        assert_eq!(err.to_string(), "file: expected a JSON object, found an array");
    }

    #[test]
    fn test_from_json_null_is_skipped() {
        let mut s = Service {
            port: 1,
            ..Service::default()
        };
        config().from_json(&mut s, &json!({"port": null})).unwrap();
        assert_eq!(s.port, 1);
    }

    #[test]
    fn test_from_toml_str() {
        let mut s = Service::default();
        config()
            .from_toml_str(&mut s, "host = \"example.org\"\nport = 443\nroutes = [7]\n")
            .unwrap();
        assert_eq!(s.host, "example.org");
        assert_eq!(s.port, 443);
        assert_eq!(s.routes, vec![7]);

        let err = config().from_toml_str(&mut s, "port = ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn test_from_file() {
        let mut toml_file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "port = 1234").unwrap();
        let mut json_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json_file, r#"{{"host": "json.example"}}"#).unwrap();

        let mut s = Service::default();
        config().from_file(&mut s, toml_file.path()).unwrap();
        config().from_file(&mut s, json_file.path()).unwrap();
        assert_eq!(s.port, 1234);
        assert_eq!(s.host, "json.example");

        let err = config()
            .from_file(&mut s, Path::new("/nonexistent/structconf.toml"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn test_to_json() {
        let s = Service {
            host: "h".to_string(),
            port: 1,
            ratio: 0.25,
            debug: true,
            routes: vec![3],
        };
        assert_eq!(
            config().to_json(&s).unwrap(),
            json!({"host": "h", "port": 1, "ratio": 0.25, "debug": true, "routes": [3]})
        );

        // without a codec the field is left out
        let plain = StructConfig::<Service>::default().to_json(&s).unwrap();
        assert!(plain.get("routes").is_none());
    }
}
