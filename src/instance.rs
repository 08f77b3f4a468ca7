//! Instance file loader.
//!
//! The format is a small subset of TSPLIB:
//!
//! ```text
//! NAME: Atlanta
//! COMMENT: 20 locations in Atlanta
//! DIMENSION: 20
//! EDGE_WEIGHT_TYPE: EUC_2D
//! NODE_COORD_SECTION
//! 1 33665568.000000 -84411070.000000
//! 2 33764940.000000 -84371819.000000
//! ...
//! EOF
//! ```
//!
//! Header lines run up to `NODE_COORD_SECTION`; unknown keys are ignored.
//! Each following line is `<id> <x> <y>`, until `EOF` or the end of input.
//! Blank lines are skipped. Cities keep their file order, so the `k`-th city
//! in the file is city `k - 1` in every tour.

use crate::error::{Result, TspError};
use crate::matrix::{City, DistanceMatrix};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

const COORD_SECTION: &str = "NODE_COORD_SECTION";

/// A parsed instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// `NAME` from the header, or the file stem when loaded from a path.
    pub name: String,
    pub comment: Option<String>,
    /// `EDGE_WEIGHT_TYPE` from the header.
    pub edge_weight_type: Option<String>,
    pub cities: Vec<City>,
}

impl Instance {
    /// Reads an instance from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut name = None;
        let mut comment = None;
        let mut edge_weight_type = None;
        let mut dimension = None;
        let mut in_coords = false;
        let mut cities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if !in_coords {
                if line == COORD_SECTION {
                    in_coords = true;
                    continue;
                }
                let (key, value) = line.split_once(':').ok_or_else(|| TspError::Parse {
                    line: line_no,
                    message: format!("expected 'KEY: value' or {COORD_SECTION}, found '{line}'"),
                })?;
                let value = value.trim().to_string();
                match key.trim() {
                    "NAME" => name = Some(value),
                    "COMMENT" => comment = Some(value),
                    "EDGE_WEIGHT_TYPE" => edge_weight_type = Some(value),
                    "DIMENSION" => {
                        dimension = Some(value.parse::<usize>().map_err(|_| TspError::Parse {
                            line: line_no,
                            message: format!("invalid DIMENSION '{value}'"),
                        })?);
                    }
                    other => log::debug!("ignoring header key '{other}' on line {line_no}"),
                }
                continue;
            }

            cities.push(parse_city(line, line_no)?);
        }

        if !in_coords {
            return Err(TspError::Parse {
                line: 0,
                message: format!("missing {COORD_SECTION}"),
            });
        }
        if let Some(expected) = dimension {
            if expected != cities.len() {
                return Err(TspError::Parse {
                    line: 0,
                    message: format!(
                        "DIMENSION is {expected} but {} cities were listed",
                        cities.len()
                    ),
                });
            }
        }
        if let Some(kind) = edge_weight_type.as_deref() {
            if kind != "EUC_2D" {
                log::warn!("edge weight type {kind} treated as EUC_2D");
            }
        }

        Ok(Self {
            name: name.unwrap_or_default(),
            comment,
            edge_weight_type,
            cities,
        })
    }

    /// Reads an instance file. The name falls back to the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut instance = Self::from_reader(BufReader::new(file))?;
        if instance.name.is_empty() {
            instance.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        log::debug!(
            "loaded {} ({} cities) from {}",
            instance.name,
            instance.cities.len(),
            path.display()
        );
        Ok(instance)
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Zero-based distance matrix of the cities.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_cities(&self.cities)
    }
}

impl FromStr for Instance {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

fn parse_city(line: &str, line_no: usize) -> Result<City> {
    let error = |message: String| TspError::Parse {
        line: line_no,
        message,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y] = fields[..] else {
        return Err(error(format!(
            "expected '<id> <x> <y>', found {} fields",
            fields.len()
        )));
    };
    let id = id
        .parse::<usize>()
        .map_err(|_| error(format!("invalid city id '{id}'")))?;
    let coordinate = |token: &str| -> Result<f64> {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| error(format!("invalid coordinate '{token}'")))
    };
    Ok(City::new(id, coordinate(x)?, coordinate(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CITIES: &str = "NAME: Square
COMMENT: four corners
DIMENSION: 4
EDGE_WEIGHT_TYPE: EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 3.0 0.0
3 3.0 4.0
4 0.0 4.0
EOF
";

    #[test]
    fn test_parse_header_and_cities() {
        let instance: Instance = CITIES.parse().unwrap();
        assert_eq!(instance.name, "Square");
        assert_eq!(instance.comment.as_deref(), Some("four corners"));
        assert_eq!(instance.edge_weight_type.as_deref(), Some("EUC_2D"));
        assert_eq!(instance.city_count(), 4);
        assert_eq!(instance.cities[2], City::new(3, 3.0, 4.0));

        let m = instance.distance_matrix();
        assert_eq!(m.get(0, 2), 5);
        assert_eq!(m.get(1, 2), 4);
    }

    #[test]
    fn test_missing_eof_and_blank_lines() {
        let text = "NAME: t\nNODE_COORD_SECTION\n\n1 1 1\n2 2 2\n\n";
        let instance: Instance = text.parse().unwrap();
        assert_eq!(instance.city_count(), 2);
    }

    #[test]
    fn test_lines_after_eof_are_ignored() {
        let text = "NODE_COORD_SECTION\n1 0 0\nEOF\ngarbage here\n";
        let instance: Instance = text.parse().unwrap();
        assert_eq!(instance.city_count(), 1);
    }

    #[test]
    fn test_wrong_field_count() {
        let text = "NAME: t\nNODE_COORD_SECTION\n1 0 0\n2 5\n";
        let err = text.parse::<Instance>().unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let text = "NODE_COORD_SECTION\n1 0 abc\n";
        let err = text.parse::<Instance>().unwrap_err();
        assert!(err.to_string().contains("invalid coordinate 'abc'"), "{err}");

        let text = "NODE_COORD_SECTION\n1 0 inf\n";
        assert!(text.parse::<Instance>().is_err());

        let text = "NODE_COORD_SECTION\nx 0 0\n";
        assert!(text.parse::<Instance>().is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let text = "DIMENSION: 3\nNODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF\n";
        let err = text.parse::<Instance>().unwrap_err();
        assert!(err.to_string().contains("DIMENSION is 3"), "{err}");

        let text = "DIMENSION: many\nNODE_COORD_SECTION\n";
        assert!(matches!(
            text.parse::<Instance>(),
            Err(TspError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_coord_section() {
        let text = "NAME: t\nDIMENSION: 1\n";
        assert!(text.parse::<Instance>().is_err());

        let text = "NAME: t\n1 0 0\n";
        assert!(matches!(
            text.parse::<Instance>(),
            Err(TspError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_from_path_uses_stem_when_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cincinnati.tsp");
        let mut file = File::create(&path).unwrap();
        write!(file, "COMMENT: no name\nNODE_COORD_SECTION\n1 0 0\n2 0 7\nEOF\n").unwrap();
        drop(file);

        let instance = Instance::from_path(&path).unwrap();
        assert_eq!(instance.name, "Cincinnati");
        assert_eq!(instance.city_count(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Instance::from_path(dir.path().join("nope.tsp")).unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
