use crate::models::{PropertyRecord, Status};
use crate::query::vocabulary::capitalize;
use crate::sources::traits::PropertySource;
use crate::sources::types::CsvTables;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

const UNKNOWN: &str = "Unknown";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

type Row = HashMap<String, String>;

/// One CSV file, read with its header row
#[derive(Debug)]
struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", name))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (line, row) in reader.deserialize::<Row>().enumerate() {
            let row = row.with_context(|| format!("Malformed row {} in {}", line + 1, name))?;
            rows.push(row);
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    fn require(&self, column: &str) -> Result<()> {
        if !self.headers.iter().any(|h| h == column) {
            bail!("{} has no '{}' column", self.name, column);
        }
        Ok(())
    }

    /// Rows grouped by the normalized value of `column`
    fn index_by(&self, column: &str) -> HashMap<String, Vec<&Row>> {
        let mut index: HashMap<String, Vec<&Row>> = HashMap::new();
        for row in &self.rows {
            if let Some(key) = row.get(column).and_then(|v| join_key(v)) {
                index.entry(key).or_default().push(row);
            }
        }
        index
    }
}

/// Join keys as pandas would compare them: "7" and "7.0" are the same id
fn join_key(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(format!("{}", value as i64)),
        _ => Some(raw.to_string()),
    }
}

/// A variant joined with its configuration and project
struct MergedRow<'a> {
    variant: &'a Row,
    configuration: &'a Row,
    project: &'a Row,
}

impl<'a> MergedRow<'a> {
    fn lookup(rows: &[&'a Row], column: &str) -> Option<&'a str> {
        rows.iter()
            .copied()
            .filter_map(|row| row.get(column))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }

    fn variant_field(&self, column: &str) -> Option<&'a str> {
        Self::lookup(&[self.variant, self.configuration, self.project], column)
    }

    fn configuration_field(&self, column: &str) -> Option<&'a str> {
        Self::lookup(&[self.configuration, self.variant, self.project], column)
    }

    fn project_field(&self, column: &str) -> Option<&'a str> {
        Self::lookup(&[self.project, self.configuration, self.variant], column)
    }

    /// Clean the joined columns into a record; `None` when the price is unusable
    fn into_record(self) -> Option<PropertyRecord> {
        let price = self.variant_field("price").and_then(parse_number)?;
        let slug = self.project_field("slug").unwrap_or_default().to_string();
        let (city, locality) = split_slug(&slug);

        Some(PropertyRecord {
            project_name: self.project_field("projectName").unwrap_or_default().to_string(),
            city: Some(city),
            locality: Some(locality),
            bhk: self.configuration_field("type").and_then(canonical_bhk),
            price: Some(price as i64),
            status: self.project_field("status").map(Status::from),
            carpet_area: self.variant_field("carpetArea").and_then(parse_number),
            bathrooms: self.variant_field("bathrooms").and_then(parse_number),
            furnished_type: self.variant_field("furnishedType").map(str::to_string),
            parking_type: self.variant_field("parkingType").map(str::to_string),
            possession_date: self.project_field("possessionDate").and_then(format_possession),
            slug,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "2BHK" -> "2 BHK"
pub fn canonical_bhk(raw: &str) -> Option<String> {
    let spaced = raw.replace("BHK", " BHK");
    let normalized = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// City and locality are the second- and third-to-last slug segments
pub fn split_slug(slug: &str) -> (String, String) {
    let parts: Vec<&str> = slug.split('-').collect();
    if parts.len() > 2 {
        let city = capitalize(parts[parts.len() - 2]);
        let locality = capitalize(parts[parts.len() - 3]);
        (city, locality)
    } else {
        (UNKNOWN.to_string(), UNKNOWN.to_string())
    }
}

/// Render a possession date as "Dec 2025"
pub fn format_possession(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.format("%b %Y").to_string());
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.format("%b %Y").to_string());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.format("%b %Y").to_string());
        }
    }
    // Already month-granular, e.g. "Dec 2025"
    if let Ok(date) = NaiveDate::parse_from_str(&format!("01 {}", raw), "%d %b %Y") {
        return Some(date.format("%b %Y").to_string());
    }
    None
}

/// Inner-join variants, configurations, projects and addresses into records.
///
/// Variant order is kept; a variant appears once per address row of its
/// project.
fn merge_tables(
    variants: &Table,
    configurations: &Table,
    projects: &Table,
    addresses: &Table,
) -> Result<Vec<PropertyRecord>> {
    variants.require("configurationId")?;
    configurations.require("id")?;
    configurations.require("projectId")?;
    projects.require("id")?;
    addresses.require("projectId")?;

    let configurations_by_id = configurations.index_by("id");
    let projects_by_id = projects.index_by("id");
    let addresses_by_project = addresses.index_by("projectId");

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for variant in &variants.rows {
        let Some(configuration_id) = variant.get("configurationId").and_then(|v| join_key(v)) else {
            continue;
        };
        let Some(matching_configurations) = configurations_by_id.get(&configuration_id) else {
            continue;
        };

        for configuration in matching_configurations {
            let Some(project_id) = configuration.get("projectId").and_then(|v| join_key(v)) else {
                continue;
            };
            let Some(matching_projects) = projects_by_id.get(&project_id) else {
                continue;
            };
            let address_count = addresses_by_project.get(&project_id).map_or(0, Vec::len);

            for project in matching_projects {
                for _ in 0..address_count {
                    let merged = MergedRow {
                        variant,
                        configuration: *configuration,
                        project: *project,
                    };
                    match merged.into_record() {
                        Some(record) => records.push(record),
                        None => dropped += 1,
                    }
                }
            }
        }
    }

    if dropped > 0 {
        debug!("Dropped {} merged rows without a numeric price", dropped);
    }

    Ok(records)
}

/// Catalog loaded from the four relational CSV tables
pub struct CsvSource {
    tables: CsvTables,
}

impl CsvSource {
    /// Create a CSV source reading from the default `data/` directory
    pub fn new() -> Self {
        Self::with_tables(CsvTables::default())
    }

    /// Create a CSV source with custom file locations
    pub fn with_tables(tables: CsvTables) -> Self {
        Self { tables }
    }

    async fn read_table(path: &Path) -> Result<Table> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let table = Table::parse(&name, &bytes)?;
        debug!("Read {} rows from {}", table.rows.len(), table.name);
        Ok(table)
    }
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertySource for CsvSource {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        info!(
            "Loading catalog tables from {}",
            self.tables.data_dir.display()
        );

        let projects = Self::read_table(&self.tables.project_path()).await?;
        let addresses = Self::read_table(&self.tables.address_path()).await?;
        let configurations = Self::read_table(&self.tables.configuration_path()).await?;
        let variants = Self::read_table(&self.tables.variant_path()).await?;

        let records = merge_tables(&variants, &configurations, &projects, &addresses)?;

        if records.is_empty() {
            warn!("Merged catalog is empty - check the join keys of the CSV tables");
        } else {
            info!("Merged {} property records", records.len());
        }

        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "CSV tables"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PROJECTS: &str = "\
id,projectName,status,slug,possessionDate
1,Skyline Towers,READY_TO_MOVE,skyline-towers-baner-pune-101,2024-03-15
2,Harbour View,UNDER_CONSTRUCTION,harbour-view-andheri-mumbai-202,2026-12-01 00:00:00
3,Orphan,READY_TO_MOVE,orphan,
";

    const ADDRESSES: &str = "\
id,projectId,fullAddress
10,1,Baner Road
20,2,Andheri West
21,2,Andheri West Annex
";

    const CONFIGURATIONS: &str = "\
id,projectId,type
100,1,2BHK
101,1,3BHK
200,2.0,2 BHK
300,3,1BHK
";

    const VARIANTS: &str = "\
id,configurationId,price,carpetArea,bathrooms,furnishedType,parkingType
1000,100,7500000,850.5,2,SEMI_FURNISHED,COVERED
1001,101,not-a-price,1200,3,,
1002,200,2.5e7,,2,UNFURNISHED,OPEN
1003,300,4000000,500,1,,
1004,999,5000000,600,1,,
";

    fn write_tables(dir: &Path) {
        fs::write(dir.join("project.csv"), PROJECTS).unwrap();
        fs::write(dir.join("ProjectAddress.csv"), ADDRESSES).unwrap();
        fs::write(dir.join("ProjectConfiguration.csv"), CONFIGURATIONS).unwrap();
        fs::write(dir.join("ProjectConfigurationVariant.csv"), VARIANTS).unwrap();
    }

    #[tokio::test]
    async fn test_load_merges_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let source = CsvSource::with_tables(CsvTables::in_dir(dir.path()));
        let records = source.load().await.unwrap();

        // 1000 once, 1001 dropped (price), 1002 twice (two addresses),
        // 1003 dropped (no address), 1004 dropped (no configuration)
        assert_eq!(records.len(), 3);

        let skyline = &records[0];
        assert_eq!(skyline.project_name, "Skyline Towers");
        assert_eq!(skyline.city.as_deref(), Some("Pune"));
        assert_eq!(skyline.locality.as_deref(), Some("Baner"));
        assert_eq!(skyline.bhk.as_deref(), Some("2 BHK"));
        assert_eq!(skyline.price, Some(7_500_000));
        assert_eq!(skyline.status, Some(Status::ReadyToMove));
        assert_eq!(skyline.carpet_area, Some(850.5));
        assert_eq!(skyline.bathrooms, Some(2.0));
        assert_eq!(skyline.furnished_type.as_deref(), Some("SEMI_FURNISHED"));
        assert_eq!(skyline.possession_date.as_deref(), Some("Mar 2024"));

        let harbour = &records[1];
        assert_eq!(harbour.city.as_deref(), Some("Mumbai"));
        assert_eq!(harbour.locality.as_deref(), Some("Andheri"));
        assert_eq!(harbour.price, Some(25_000_000));
        assert_eq!(harbour.carpet_area, None);
        assert_eq!(harbour.possession_date.as_deref(), Some("Dec 2026"));
        assert_eq!(records[2], records[1]);
    }

    #[tokio::test]
    async fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();

        let source = CsvSource::with_tables(CsvTables::in_dir(dir.path()));
        let err = source.load().await.unwrap_err();
        assert!(format!("{:#}", err).contains("project.csv"));
    }

    #[tokio::test]
    async fn test_missing_join_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        fs::write(
            dir.path().join("ProjectConfigurationVariant.csv"),
            "id,price\n1,100\n",
        )
        .unwrap();

        let source = CsvSource::with_tables(CsvTables::in_dir(dir.path()));
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("configurationId"));
    }

    #[test]
    fn test_split_slug() {
        assert_eq!(
            split_slug("green-acres-wakad-pune-77"),
            ("Pune".to_string(), "Wakad".to_string())
        );
        assert_eq!(
            split_slug("short-slug"),
            ("Unknown".to_string(), "Unknown".to_string())
        );
    }

    #[test]
    fn test_canonical_bhk() {
        assert_eq!(canonical_bhk("2BHK").as_deref(), Some("2 BHK"));
        assert_eq!(canonical_bhk("3 BHK").as_deref(), Some("3 BHK"));
        assert_eq!(canonical_bhk("  "), None);
    }

    #[test]
    fn test_format_possession() {
        assert_eq!(format_possession("2025-12-31").as_deref(), Some("Dec 2025"));
        assert_eq!(
            format_possession("2025-06-01T00:00:00.000Z").as_deref(),
            Some("Jun 2025")
        );
        assert_eq!(format_possession("Jan 2027").as_deref(), Some("Jan 2027"));
        assert_eq!(format_possession("soon"), None);
    }

    #[test]
    fn test_join_key_normalizes_float_ids() {
        assert_eq!(join_key("2.0").as_deref(), Some("2"));
        assert_eq!(join_key(" 7 ").as_deref(), Some("7"));
        assert_eq!(join_key("abc").as_deref(), Some("abc"));
        assert_eq!(join_key(""), None);
    }
}
