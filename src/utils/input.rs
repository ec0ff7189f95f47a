use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use serde::de::DeserializeOwned;

use crate::errors::{ForecastError, Result};

/// Marker accepted in place of a path to read from standard input.
pub const STDIN_MARKER: &str = "-";

/// Reads and deserializes a JSON document from `source`, a file path or `-`.
pub fn read_json<T: DeserializeOwned>(source: &str) -> Result<T> {
    let data = if source == STDIN_MARKER {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        read_file(Path::new(source))?
    };
    parse_json(&data, source)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|err| ForecastError::Storage(format!("{}: {err}", path.display())))
}

pub fn parse_json<T: DeserializeOwned>(data: &str, origin: &str) -> Result<T> {
    serde_json::from_str(data)
        .map_err(|err| ForecastError::InvalidInput(format!("{origin}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VehicleExpenseLine;

    #[test]
    fn reads_json_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"vehicle": "van", "routine_cost": 12.5}"#).unwrap();
        let line: VehicleExpenseLine = read_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(line.vehicle, "van");
        assert_eq!(line.repair_cost, 0.0);
    }

    #[test]
    fn parse_errors_mention_origin() {
        let err = parse_json::<VehicleExpenseLine>("[]", "lines.json").unwrap_err();
        assert!(err.to_string().contains("lines.json"));
    }

    #[test]
    fn missing_file_is_storage_error() {
        let err = read_json::<VehicleExpenseLine>("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ForecastError::Storage(_)));
    }
}
