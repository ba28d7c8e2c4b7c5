use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::schema::Column;
use super::types::{ProgramRecord, ProgramTable, WorldRankEntry, UNKNOWN_REGION};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' not found in header")]
    MissingColumn(&'static str),
}

/// Load the program table from a CSV file.
pub fn load_programs(path: &Path) -> Result<ProgramTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_programs(file)?;
    debug!(
        path = %path.display(),
        records = table.len(),
        columns = table.columns().len(),
        "loaded program table"
    );
    Ok(table)
}

/// Read the program table from any CSV source.
///
/// Only `field` is mandatory. Rows with a blank field or that cannot be
/// read as a record are skipped; blank states become `"Unknown"`. I/O
/// failures still abort the load.
pub fn read_programs<R: Read>(reader: R) -> Result<ProgramTable, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns: BTreeSet<Column> = csv_reader
        .headers()?
        .iter()
        .filter_map(Column::from_header)
        .collect();
    if !columns.contains(&Column::Field) {
        return Err(LoadError::MissingColumn(Column::Field.headers()[0]));
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut malformed = 0usize;
    for row in csv_reader.deserialize::<ProgramRecord>() {
        let mut record = match row {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "malformed row");
                malformed += 1;
                continue;
            }
        };
        record.field = record.field.trim().to_string();
        if record.field.is_empty() {
            skipped += 1;
            continue;
        }
        let region = record.region.trim();
        record.region = if region.is_empty() {
            UNKNOWN_REGION.to_string()
        } else {
            region.to_string()
        };
        records.push(record);
    }
    if skipped > 0 {
        warn!(skipped, "skipped rows without a field");
    }
    if malformed > 0 {
        warn!(malformed, "skipped malformed rows");
    }

    Ok(ProgramTable::new(records, columns))
}

/// Load the world university ranking table from a CSV file.
pub fn load_world_rankings(path: &Path) -> Result<Vec<WorldRankEntry>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = read_world_rankings(file)?;
    debug!(path = %path.display(), entries = entries.len(), "loaded world rankings");
    Ok(entries)
}

pub fn read_world_rankings<R: Read>(reader: R) -> Result<Vec<WorldRankEntry>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["rank", "name"] {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut entries = Vec::new();
    let mut malformed = 0usize;
    for row in csv_reader.deserialize::<WorldRankEntry>() {
        match row {
            Ok(entry) => entries.push(entry),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => malformed += 1,
        }
    }
    if malformed > 0 {
        warn!(malformed, "skipped malformed world ranking rows");
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const SAMPLE: &str = "\
field,State,USARank,Tuition,Salary_avg,study_name,University,City,Required Income
Chemistry,CA,3,\"$12,000\",\"$34,000\",Catalysis,Stanford,Stanford,40000
Chemistry,,10,9000,30000,Polymers,Somewhere U,Nowhere,N/A
,TX,5,1,1,Orphan,Ghost U,Austin,1
Biology,MA,N/A,15000,38000,Genomics,MIT,Cambridge,45000
";

    #[test]
    fn test_read_programs_parses_rows() {
        let table = read_programs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.field, "Chemistry");
        assert_eq!(first.region, "CA");
        assert_eq!(first.rank, Some(3.0));
        assert_eq!(first.tuition, Some(12000.0));
        assert_eq!(first.stipend, Some(34000.0));
        assert_eq!(first.title, "Catalysis");
        assert_eq!(first.required_income, Some(40000.0));
    }

    #[test]
    fn test_read_programs_blank_region_is_unknown() {
        let table = read_programs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.records()[1].region, UNKNOWN_REGION);
    }

    #[test]
    fn test_read_programs_unparseable_numbers_are_missing() {
        let table = read_programs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.records()[1].required_income, None);
        assert_eq!(table.records()[2].rank, None);
    }

    #[test]
    fn test_read_programs_records_present_columns() {
        let table = read_programs(SAMPLE.as_bytes()).unwrap();
        assert!(table.has_column(Column::Rank));
        assert!(table.has_column(Column::RequiredIncome));
        assert!(!table.has_column(Column::WorldRank));
        assert!(!table.has_column(Column::Latitude));
    }

    #[test]
    fn test_read_programs_accepts_display_headers() {
        let csv = "field,region,USA Rank,tuition,Salary/Stipend\nPhysics,NY,1,100,200\n";
        let table = read_programs(csv.as_bytes()).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.region, "NY");
        assert_eq!(record.rank, Some(1.0));
        assert_eq!(record.tuition, Some(100.0));
        assert_eq!(record.stipend, Some(200.0));
    }

    #[test]
    fn test_read_programs_tolerates_ragged_rows() {
        let csv = "field,State,USARank,Tuition\nChemistry,CA\nChemistry,NY,4,100,extra\nBiology,TX,2,300\n";
        let table = read_programs(csv.as_bytes()).unwrap();

        let short = table.records().iter().find(|r| r.region == "CA").unwrap();
        assert_eq!(short.rank, None);
        assert_eq!(short.tuition, None);
        let biology = table.records().iter().find(|r| r.field == "Biology").unwrap();
        assert_eq!(biology.rank, Some(2.0));
        assert_eq!(biology.tuition, Some(300.0));
    }

    #[test]
    fn test_read_programs_without_field_column() {
        let csv = "State,Tuition\nCA,100\n";
        let err = read_programs(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("field")));
    }

    #[test]
    fn test_read_world_rankings() {
        let csv = "rank,name,Latitude,Longitude\n1,Oxford,51.75,-1.25\n2,Harvard,42.37,-71.12\n";
        let entries = read_world_rankings(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Oxford");
        assert_eq!(entries[1].rank, Some(2.0));
        assert_eq!(entries[1].longitude, Some(-71.12));
    }

    #[test]
    fn test_read_world_rankings_requires_name() {
        let csv = "rank,Latitude\n1,0\n";
        let err = read_world_rankings(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("name")));
    }

    #[test]
    fn test_load_programs_missing_file() {
        let path = env::temp_dir().join("doctorate_discover_test_missing.csv");
        let _ = std::fs::remove_file(&path);
        let err = load_programs(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_programs_from_file() {
        let path = env::temp_dir().join("doctorate_discover_test_programs.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = load_programs(&path).unwrap();
        assert_eq!(table.len(), 3);

        let _ = std::fs::remove_file(&path);
    }
}
