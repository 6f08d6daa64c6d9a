//! Input collaborators: region-name TSV, quake records, landmass GeoJSON.
//!
//! These hand the chart already-validated values; the chart never sees a
//! malformed row.

use std::fs;
use std::path::Path;

use chrono::DateTime;
use geojson::{GeoJson, Geometry, Value};
use tracing::{debug, warn};

use crate::chart::{RegionRecord, SymbolRecord};
use crate::error::DataError;
use crate::map::{Landmass, LineString};

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one region row: integer id, trimmed name, trimmed upper-case code
pub fn parse_region_row(line: usize, id: &str, name: &str, code: &str) -> Result<RegionRecord, DataError> {
    let id = id.trim().parse::<u32>().map_err(|e| DataError::Row {
        line,
        reason: format!("bad id `{}`: {e}", id.trim()),
    })?;
    Ok(RegionRecord {
        id,
        name: name.trim().to_string(),
        code: code.trim().to_uppercase(),
    })
}

/// Parse tab-separated region names with an `id`, `name`, `code` header
pub fn parse_region_names(content: &str) -> Result<Vec<RegionRecord>, DataError> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let column = |name: &'static str| {
        columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or(DataError::MissingColumn(name))
    };
    let (id_col, name_col, code_col) = (column("id")?, column("name")?, column("code")?);

    lines
        .map(|(idx, l)| {
            let fields: Vec<&str> = l.split('\t').collect();
            let field = |col: usize| {
                fields.get(col).copied().ok_or_else(|| DataError::Row {
                    line: idx + 1,
                    reason: format!("expected {} columns, found {}", columns.len(), fields.len()),
                })
            };
            parse_region_row(idx + 1, field(id_col)?, field(name_col)?, field(code_col)?)
        })
        .collect()
}

pub fn load_region_names(path: &Path) -> Result<Vec<RegionRecord>, DataError> {
    let records = parse_region_names(&read(path)?)?;
    debug!(path = %path.display(), regions = records.len(), "loaded region names");
    Ok(records)
}

/// Parse quake records from either a JSON array of flat objects or a
/// GeoJSON FeatureCollection of points (the USGS feed layout).
pub fn parse_quakes(content: &str) -> Result<Vec<SymbolRecord>, DataError> {
    if content.trim_start().starts_with('[') {
        let mut bytes = content.as_bytes().to_vec();
        let records: Vec<SymbolRecord> = simd_json::serde::from_slice(&mut bytes)?;
        return Ok(records);
    }

    let geojson: GeoJson = content.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => Vec::new(),
    };

    let mut records = Vec::with_capacity(features.len());
    for feature in features {
        let Some(Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value) else {
            continue;
        };
        if coords.len() < 2 {
            continue;
        }
        let props = feature.properties.as_ref();
        let number = |key: &str| props.and_then(|p| p.get(key)).and_then(|v| v.as_f64());

        let time = props.and_then(|p| p.get("time")).and_then(|v| {
            v.as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .or_else(|| v.as_str().map(str::to_string))
        });

        records.push(SymbolRecord {
            longitude: coords[0],
            latitude: coords[1],
            value: number("value"),
            mag: number("mag"),
            depth: coords.get(2).copied().or_else(|| number("depth")).unwrap_or(0.0),
            place: props
                .and_then(|p| p.get("place"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            time: time.unwrap_or_default(),
        });
    }
    Ok(records)
}

pub fn load_quakes(path: &Path) -> Result<Vec<SymbolRecord>, DataError> {
    let records = parse_quakes(&read(path)?)?;
    debug!(path = %path.display(), records = records.len(), "loaded quake records");
    Ok(records)
}

/// Merge every line and ring of a GeoJSON document into one landmass
pub fn parse_landmass(content: &str) -> Result<Landmass, DataError> {
    let geojson: GeoJson = content.parse()?;
    let mut landmass = Landmass::default();
    process_geojson_lines(&geojson, |line| landmass.push(line));
    if landmass.is_empty() {
        warn!("GeoJSON contained no line or polygon geometry");
    }
    Ok(landmass)
}

pub fn load_landmass(path: &Path) -> Result<Landmass, DataError> {
    let landmass = parse_landmass(&read(path)?)?;
    debug!(
        path = %path.display(),
        lines = landmass.lines().len(),
        vertices = landmass.vertex_count(),
        "loaded landmass"
    );
    Ok(landmass)
}

/// Process GeoJSON and extract line features
fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => {
            process_geometry_lines(geometry, &mut add_line);
        }
    }
}

fn process_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    let to_line = |coords: &[Vec<f64>]| -> LineString {
        coords.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect()
    };
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(to_line(coords));
            }
        }
        // Holes are outlines too (lakes, inland seas)
        Value::Polygon(rings) => {
            for ring in rings {
                add_line(to_line(ring));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    add_line(to_line(ring));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

/// Simplified continent outlines for when no landmass file is available
pub fn simple_world() -> Landmass {
    Landmass::new(vec![
        // North America
        vec![
            (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
            (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
            (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
            (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
            (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
            (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
            (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
            (-168.0, 65.0),
        ],
        // South America
        vec![
            (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
            (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
            (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
            (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
            (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
            (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
        ],
        // Europe
        vec![
            (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
            (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
            (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
            (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
            (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
            (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
        ],
        // Africa
        vec![
            (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
            (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
            (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
            (40.0, -5.0), (40.0, -15.0), (35.0, -25.0), (30.0, -30.0),
            (20.0, -35.0), (18.0, -35.0), (15.0, -30.0), (12.0, -15.0),
            (10.0, -5.0), (8.0, 4.0), (0.0, 5.0), (-10.0, 5.0),
            (-17.0, 15.0),
        ],
        // Asia
        vec![
            (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
            (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
            (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
            (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
            (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
            (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
            (145.0, 50.0), (140.0, 55.0), (160.0, 60.0), (180.0, 66.0),
            (180.0, 72.0), (140.0, 74.0), (100.0, 78.0), (70.0, 73.0),
            (60.0, 70.0), (40.0, 67.0), (40.0, 55.0), (40.0, 43.0),
            (35.0, 42.0),
        ],
        // Australia
        vec![
            (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
            (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
            (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
            (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
        ],
    ])
}
