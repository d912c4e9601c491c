//! Cast-by-cast reader for WOD CSV files.

use crate::constants::quality_flags;
use crate::error::{Result, WodError};
use crate::models::{Profile, ProfileVariable};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker row that closes a cast's data section.
const END_OF_VARIABLES: &str = "END OF VARIABLES SECTION";

/// Streaming reader yielding one [`Profile`] per cast.
///
/// The stream is finite and non-restartable: casts are parsed lazily in
/// file order and handed to the caller one at a time.
#[derive(Debug)]
pub struct WodCsvReader {
    lines: Lines<BufReader<File>>,
    path: PathBuf,
    line_no: usize,
}

impl WodCsvReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            path: path.to_path_buf(),
            line_no: 0,
        })
    }

    fn next_line(&mut self) -> Option<std::io::Result<String>> {
        self.line_no += 1;
        self.lines.next()
    }

    fn invalid(&self, reason: impl Into<String>) -> WodError {
        WodError::InvalidCast {
            path: self.path.clone(),
            line: self.line_no,
            reason: reason.into(),
        }
    }

    /// Parse the next cast, or `None` at end of file.
    fn read_cast(&mut self) -> Result<Option<Profile>> {
        let mut cast_id: Option<i64> = None;
        let mut year: Option<i32> = None;
        let mut month: Option<u32> = None;
        let mut day: u32 = 0;
        let mut time = f64::NAN;
        let mut latitude = f64::NAN;
        let mut longitude = f64::NAN;

        // Metadata rows up to the VARIABLES header.
        let variable_fields: Vec<String> = loop {
            let Some(line) = self.next_line() else {
                return if cast_id.is_none() {
                    Ok(None)
                } else {
                    Err(self.invalid("cast truncated before VARIABLES row"))
                };
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            let key = fields[0].trim();
            let value = fields.get(2).map_or("", |f| f.trim());
            match key {
                "CAST" => cast_id = value.parse().ok(),
                "Year" => year = value.parse().ok(),
                "Month" => month = value.parse().ok(),
                "Day" => day = value.parse().unwrap_or(0),
                "Time" => time = value.parse().unwrap_or(f64::NAN),
                "Latitude" => latitude = value.parse().unwrap_or(f64::NAN),
                "Longitude" => longitude = value.parse().unwrap_or(f64::NAN),
                "VARIABLES" => {
                    break fields[1..].iter().map(|f| f.to_string()).collect();
                }
                _ => {}
            }
        };

        let cast_id = cast_id.ok_or_else(|| self.invalid("missing CAST number"))?;
        let year = year.ok_or_else(|| self.invalid("missing Year"))?;
        let month = month.ok_or_else(|| self.invalid("missing Month"))?;

        // Variable labels sit at every third field, each followed by its
        // F (WOD flag) and O (originator flag) columns.
        let names: Vec<String> = variable_fields
            .chunks(3)
            .map(|chunk| chunk[0].trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(self.invalid("VARIABLES row lists no variables"));
        }

        let unit_fields = self.expect_row("UNITS")?;
        let prof_flag_fields = self.expect_row("Prof-Flag")?;

        let mut variables: Vec<ProfileVariable> = names
            .into_iter()
            .enumerate()
            .map(|(j, name)| ProfileVariable {
                name,
                unit: unit_fields.get(1 + 3 * j).map_or("", |f| f.trim()).to_string(),
                profile_flag: parse_flag(prof_flag_fields.get(2 + 3 * j).map(String::as_str)),
                values: Vec::new(),
                level_flags: Vec::new(),
                originator_flags: Vec::new(),
            })
            .collect();

        // Level rows until the section terminator.
        loop {
            let Some(line) = self.next_line() else {
                return Err(self.invalid("cast truncated before end of variables section"));
            };
            let line = line?;
            if line.trim_start().starts_with(END_OF_VARIABLES) {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            for (j, variable) in variables.iter_mut().enumerate() {
                let base = 1 + 3 * j;
                variable.values.push(parse_value(fields.get(base).copied()));
                variable
                    .level_flags
                    .push(parse_flag(fields.get(base + 1).copied()));
                variable
                    .originator_flags
                    .push(parse_flag(fields.get(base + 2).copied()));
            }
        }

        debug!(
            "parsed cast {} ({} variables, {} levels)",
            cast_id,
            variables.len(),
            variables.first().map_or(0, |v| v.values.len())
        );

        Ok(Some(Profile {
            cast_id,
            year,
            month,
            day,
            time,
            latitude,
            longitude,
            variables,
        }))
    }

    /// Read the next non-blank row and require its key field.
    fn expect_row(&mut self, expected: &str) -> Result<Vec<String>> {
        loop {
            let Some(line) = self.next_line() else {
                return Err(self.invalid(format!("missing {expected} row")));
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<String> = line.split(',').map(str::to_string).collect();
            if fields[0].trim() != expected {
                return Err(self.invalid(format!(
                    "expected {expected} row, found {:?}",
                    fields[0].trim()
                )));
            }
            return Ok(fields);
        }
    }
}

impl Iterator for WodCsvReader {
    type Item = Result<Profile>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_cast().transpose()
    }
}

/// A blank or unparsable measurement is a missing value.
fn parse_value(field: Option<&str>) -> f64 {
    match field.map(str::trim) {
        Some(text) if !text.is_empty() => text.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// A blank or unparsable flag never matches an accept-set.
fn parse_flag(field: Option<&str>) -> i8 {
    match field.map(str::trim) {
        Some(text) if !text.is_empty() => text.parse().unwrap_or(quality_flags::ABSENT),
        _ => quality_flags::ABSENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SINGLE_CAST: &str = "\
#--------------------------------------------------------------------------------
CAST                        ,,          10037713,WOD Unique Cast Number,WOD code,
NODC Cruise ID              ,,        GB-19511  ,,,
Originators Station ID      ,,                  ,,,alpha
Latitude                    ,,           29.9000,decimal degrees,,
Longitude                   ,,          -76.2500,decimal degrees,,
Year                        ,,              1951,,,
Month                       ,,                 7,,,
Day                         ,,                10,,,
Time                        ,,             10.37,decimal hours (UT),,
METADATA,,,,,
Country                     ,,     UNITED STATES,,,
VARIABLES ,Pressure  ,F,O ,Temperatur,F,O ,Salinity  ,F,O ,
UNITS     ,dbar      ,  ,  ,degrees C ,  ,  ,PSS       ,  ,  ,
Prof-Flag ,          ,0 ,  ,          ,0 ,  ,          ,0 ,  ,
          ,0.0       ,0 ,0 ,      7.80,0 ,0 ,     35.02,0 ,0 ,
          ,10.0      ,0 ,0 ,      7.70,3 ,0 ,     35.03,0 ,0 ,
          ,20.0      ,0 ,0 ,          ,0 ,0 ,     35.04,0 ,0 ,
END OF VARIABLES SECTION,,,,,,,,,,
";

    fn write_fixture(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ocldb_test.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parses_single_cast() {
        let (_dir, path) = write_fixture(SINGLE_CAST);
        let casts: Vec<Profile> = WodCsvReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(casts.len(), 1);

        let cast = &casts[0];
        assert_eq!(cast.cast_id, 10037713);
        assert_eq!((cast.year, cast.month, cast.day), (1951, 7, 10));
        assert!((cast.time - 10.37).abs() < 1e-12);
        assert!((cast.latitude - 29.9).abs() < 1e-12);
        assert!((cast.longitude - (-76.25)).abs() < 1e-12);
        assert_eq!(cast.levels(), 3);

        let pressure = cast.pressure().unwrap();
        assert_eq!(pressure.values, vec![0.0, 10.0, 20.0]);
        assert_eq!(pressure.unit, "dbar");
        assert_eq!(pressure.profile_flag, 0);

        let temperature = cast.temperature().unwrap();
        assert_eq!(temperature.name, "Temperatur");
        assert_eq!(temperature.values[0], 7.8);
        assert!(temperature.values[2].is_nan());
        assert_eq!(temperature.level_flags, vec![0, 3, 0]);

        let salinity = cast.salinity().unwrap();
        assert_eq!(salinity.values, vec![35.02, 35.03, 35.04]);
    }

    #[test]
    fn test_parses_consecutive_casts() {
        let two = format!("{SINGLE_CAST}{SINGLE_CAST}");
        let (_dir, path) = write_fixture(&two);
        let casts: Vec<Profile> = WodCsvReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(casts.len(), 2);
        assert_eq!(casts[0].cast_id, casts[1].cast_id);
    }

    #[test]
    fn test_empty_file_yields_no_casts() {
        let (_dir, path) = write_fixture("");
        assert_eq!(WodCsvReader::open(&path).unwrap().count(), 0);
    }

    #[test]
    fn test_truncated_cast_is_an_error() {
        let truncated = &SINGLE_CAST[..SINGLE_CAST.find("VARIABLES").unwrap()];
        let (_dir, path) = write_fixture(truncated);
        let result: Result<Vec<Profile>> = WodCsvReader::open(&path).unwrap().collect();
        assert!(matches!(result, Err(WodError::InvalidCast { .. })));
    }

    #[test]
    fn test_cast_without_terminator_is_an_error() {
        let cut = SINGLE_CAST.replace("END OF VARIABLES SECTION,,,,,,,,,,\n", "");
        let (_dir, path) = write_fixture(&cut);
        let result: Result<Vec<Profile>> = WodCsvReader::open(&path).unwrap().collect();
        assert!(matches!(result, Err(WodError::InvalidCast { .. })));
    }

    #[test]
    fn test_missing_flags_become_absent_sentinel() {
        let blank_flag = SINGLE_CAST.replace(
            "          ,10.0      ,0 ,0 ,      7.70,3 ,0 ,     35.03,0 ,0 ,",
            "          ,10.0      ,  ,0 ,      7.70,3 ,0 ,     35.03,0 ,0 ,",
        );
        let (_dir, path) = write_fixture(&blank_flag);
        let casts: Vec<Profile> = WodCsvReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            casts[0].pressure().unwrap().level_flags,
            vec![0, quality_flags::ABSENT, 0]
        );
    }

    #[test]
    fn test_cast_without_salinity_variable() {
        let no_salinity = "\
CAST      ,,123,WOD Unique Cast Number,,
Latitude  ,,10.0,decimal degrees,,
Longitude ,,20.0,decimal degrees,,
Year      ,,2015,,,
Month     ,,3,,,
Day       ,,1,,,
VARIABLES ,Pressure  ,F,O ,Temperatur,F,O ,
UNITS     ,dbar      ,  ,  ,degrees C ,  ,  ,
Prof-Flag ,          ,0 ,  ,          ,0 ,  ,
          ,5.0       ,0 ,0 ,      9.00,0 ,0 ,
END OF VARIABLES SECTION,,,,,,
";
        let (_dir, path) = write_fixture(no_salinity);
        let casts: Vec<Profile> = WodCsvReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(casts.len(), 1);
        assert!(casts[0].salinity().is_none());
        assert!(casts[0].time.is_nan());
    }
}
