//! Header unification and CSV rendering for heterogeneous records.

use crate::domain::model::{CellValue, HeaderOrder, Record, Table};
use crate::utils::error::{Result, SteamEtlError};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Union of field names across `records`, ordered by `order`.
pub fn collect_headers(records: &[Record], order: HeaderOrder) -> Vec<String> {
    match order {
        HeaderOrder::Sorted => records
            .iter()
            .flat_map(Record::fields)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect(),
        HeaderOrder::FirstSeen => {
            let mut seen = HashSet::new();
            records
                .iter()
                .flat_map(Record::fields)
                .filter(|field| seen.insert(*field))
                .map(str::to_string)
                .collect()
        }
    }
}

/// Renders one JSON value as cell text. Pure: same value, same text.
pub fn format_value(value: &Value) -> String {
    CellValue::from(value).to_string()
}

impl Table {
    /// Builds a rectangular table; absent fields become empty cells.
    ///
    /// Records that carry no fields at all have no columns to write, so they
    /// are rejected the same way as an empty library.
    pub fn from_records(records: &[Record], order: HeaderOrder) -> Result<Self> {
        if records.is_empty() {
            return Err(SteamEtlError::EmptyInputError);
        }

        let headers = collect_headers(records, order);
        if headers.is_empty() {
            return Err(SteamEtlError::EmptyInputError);
        }
        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|header| record.get(header).map(format_value).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| SteamEtlError::write("csv buffer", e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn test_two_record_scenario() {
        let games = records(vec![
            json!({"appid": 10, "name": "Game A"}),
            json!({"appid": 20, "playtime_forever": 5}),
        ]);

        let table = Table::from_records(&games, HeaderOrder::Sorted).unwrap();

        assert_eq!(table.headers(), ["appid", "name", "playtime_forever"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0], ["10", "Game A", ""]);
        assert_eq!(table.rows()[1], ["20", "", "5"]);

        let csv = String::from_utf8(table.to_csv().unwrap()).unwrap();
        assert_eq!(csv, "appid,name,playtime_forever\n10,Game A,\n20,,5\n");
    }

    #[test]
    fn test_first_seen_order_follows_scan_order() {
        let games = records(vec![
            json!({"name": "Game A", "appid": 10}),
            json!({"appid": 20, "playtime_forever": 5, "has_community_visible_stats": true}),
        ]);

        let headers = collect_headers(&games, HeaderOrder::FirstSeen);

        assert_eq!(
            headers,
            ["name", "appid", "playtime_forever", "has_community_visible_stats"]
        );
    }

    #[test]
    fn test_every_row_matches_header_count() {
        let games = records(vec![
            json!({"a": 1}),
            json!({"b": 2, "c": 3}),
            json!({}),
            json!({"a": null, "d": [1, 2]}),
        ]);

        let table = Table::from_records(&games, HeaderOrder::Sorted).unwrap();

        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.rows().len(), games.len());
        assert!(table.rows().iter().all(|row| row.len() == 4));
        assert_eq!(table.rows()[3], ["", "", "", "[1,2]"]);
    }

    #[test]
    fn test_fields_land_in_their_header_column() {
        let games = records(vec![
            json!({"z": "last", "a": "first"}),
            json!({"m": "middle", "a": "again"}),
        ]);

        for order in [HeaderOrder::Sorted, HeaderOrder::FirstSeen] {
            let table = Table::from_records(&games, order).unwrap();
            for (record, row) in games.iter().zip(table.rows()) {
                for (field, value) in &record.data {
                    let idx = table.column_index(field).unwrap();
                    assert_eq!(row[idx], format_value(value));
                }
            }
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Table::from_records(&[], HeaderOrder::Sorted).unwrap_err();
        assert!(matches!(err, SteamEtlError::EmptyInputError));
    }

    #[test]
    fn test_records_without_fields_are_rejected() {
        let games = records(vec![json!({}), json!({})]);

        let err = Table::from_records(&games, HeaderOrder::Sorted).unwrap_err();

        assert!(matches!(err, SteamEtlError::EmptyInputError));
    }

    #[test]
    fn test_csv_quotes_embedded_delimiters() {
        let games = records(vec![json!({
            "name": "Half-Life 2: Episode \"One\", Deluxe",
            "notes": "line one\nline two"
        })]);

        let table = Table::from_records(&games, HeaderOrder::Sorted).unwrap();
        let csv = String::from_utf8(table.to_csv().unwrap()).unwrap();

        assert_eq!(
            csv,
            "name,notes\n\"Half-Life 2: Episode \"\"One\"\", Deluxe\",\"line one\nline two\"\n"
        );
    }

    #[test]
    fn test_csv_round_trip_reproduces_fields() {
        let games = records(vec![
            json!({"appid": 10, "name": "Game, A", "price": 9.99}),
            json!({"appid": 20, "playtime_forever": 5, "free": false}),
            json!({"name": "Quote \"me\"", "img_icon_url": null}),
        ]);

        let table = Table::from_records(&games, HeaderOrder::Sorted).unwrap();
        let bytes = table.to_csv().unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, table.headers());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), games.len());

        for (record, row) in games.iter().zip(&rows) {
            for (idx, header) in headers.iter().enumerate() {
                let expected = record.get(header).map(format_value).unwrap_or_default();
                assert_eq!(&row[idx], expected.as_str());
            }
        }
    }

    #[test]
    fn test_format_value_is_idempotent() {
        for value in [
            json!(null),
            json!("text"),
            json!(3),
            json!(0.30000000000000004),
            json!(true),
            json!({"k": [1, "two"]}),
        ] {
            assert_eq!(format_value(&value), format_value(&value));
        }
    }
}
