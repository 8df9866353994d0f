//! JSON canónico: claves ordenadas, sin espacios. Estable entre escritor y
//! lector, por eso el checksum del envelope se calcula sobre esta forma.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> Result<String, serde_json::Error> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s)?,
        Value::Array(arr) => {
            let items = arr.iter().map(to_canonical_json).collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let mut sorted = BTreeMap::new();
            for (k, v) in map {
                sorted.insert(k.as_str(), to_canonical_json(v)?);
            }
            let mut items = Vec::with_capacity(sorted.len());
            for (k, v) in sorted {
                items.push(format!("{}:{}", serde_json::to_string(k)?, v));
            }
            format!("{{{}}}", items.join(","))
        }
    })
}
