//! Chart input: the strict combined export reduced to the plotted fields,
//! plus the cleaned subset most charts draw from.

use crate::data::parse::{clean_text, parse_bool};
use crate::data::{DataLoader, EtlError};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Listing flags counted and compared by the feature charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Repair,
    Mortgage,
    BillOfSale,
    Vip,
    Featured,
    Business,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Repair,
        Feature::Mortgage,
        Feature::BillOfSale,
        Feature::Vip,
        Feature::Featured,
        Feature::Business,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Feature::Repair => "has_repair",
            Feature::Mortgage => "has_mortgage",
            Feature::BillOfSale => "has_bill_of_sale",
            Feature::Vip => "vipped",
            Feature::Featured => "featured",
            Feature::Business => "is_business",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Repair => "Has Repair",
            Feature::Mortgage => "Has Mortgage",
            Feature::BillOfSale => "Bill of Sale",
            Feature::Vip => "VIP Listing",
            Feature::Featured => "Featured",
            Feature::Business => "Business",
        }
    }
}

/// One listing as the charts see it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRow {
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub floor: Option<f64>,
    pub floors: Option<f64>,
    pub rooms: Option<f64>,
    pub city: Option<String>,
    pub location: Option<String>,
    /// Flags in [`Feature::ALL`] order.
    pub flags: [Option<bool>; 6],
}

impl PlotRow {
    pub fn flag(&self, feature: Feature) -> Option<bool> {
        Feature::ALL
            .iter()
            .position(|f| *f == feature)
            .and_then(|i| self.flags[i])
    }
}

/// All rows of the export and the cleaned subset.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    pub all: Vec<PlotRow>,
    pub clean: Vec<PlotRow>,
}

impl ChartDataset {
    pub fn load(path: &Path) -> Result<Self, EtlError> {
        let df = DataLoader::load_csv(path)?;
        let dataset = Self::from_rows(Self::rows_from_frame(&df)?);
        info!(
            path = %path.display(),
            rows = dataset.all.len(),
            clean = dataset.clean.len(),
            "chart input loaded"
        );
        Ok(dataset)
    }

    pub fn from_rows(all: Vec<PlotRow>) -> Self {
        let clean = clean_rows(&all);
        Self { all, clean }
    }

    /// Extract the plotted fields; absent columns read as nulls.
    pub fn rows_from_frame(df: &DataFrame) -> Result<Vec<PlotRow>, EtlError> {
        let height = df.height();
        let price = numeric_column(df, "price_value")?;
        let area = numeric_column(df, "area_value")?;
        let floor = numeric_column(df, "floor")?;
        let floors = numeric_column(df, "floors")?;
        let rooms = numeric_column(df, "rooms")?;
        let city = text_column(df, "city_name")?;
        let location = text_column(df, "location_name")?;

        let mut flags = Vec::with_capacity(Feature::ALL.len());
        for feature in Feature::ALL {
            flags.push(flag_column(df, feature.column())?);
        }

        let rows = (0..height)
            .map(|i| PlotRow {
                price: price[i],
                area: area[i],
                floor: floor[i],
                floors: floors[i],
                rooms: rooms[i],
                city: city[i].clone(),
                location: location[i].clone(),
                flags: std::array::from_fn(|f| flags[f][i]),
            })
            .collect();
        Ok(rows)
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, EtlError> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let values = col.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.filter(|v| !v.is_nan()))
        .collect())
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, EtlError> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let values = col.cast(&DataType::String)?;
    Ok(values.str()?.into_iter().map(clean_text).collect())
}

fn flag_column(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>, EtlError> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    if col.dtype() == &DataType::Boolean {
        return Ok(col.bool()?.into_iter().collect());
    }
    let values = col.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_bool))
        .collect())
}

/// Apply the outlier filters in order. Each quantile is taken over the rows
/// that survived the previous steps; a null in a filtered field drops the row.
pub fn clean_rows(rows: &[PlotRow]) -> Vec<PlotRow> {
    let kept: Vec<&PlotRow> = rows.iter().collect();

    let kept = keep(kept, |r| r.price, |v| v > 0.0);
    let kept = keep_below_quantile(kept, |r| r.price, 0.99);
    let kept = keep(kept, |r| r.area, |v| v > 0.0);
    let kept = keep_below_quantile(kept, |r| r.area, 0.99);
    let kept = keep(kept, |r| r.floor, |v| v > 0.0);
    let kept = keep(kept, |r| r.floor, |v| v < 50.0);
    let kept = keep(kept, |r| r.rooms, |v| v > 0.0);
    let kept = keep(kept, |r| r.rooms, |v| v <= 10.0);

    kept.into_iter().cloned().collect()
}

type Field = fn(&PlotRow) -> Option<f64>;

fn keep(rows: Vec<&PlotRow>, field: Field, pred: impl Fn(f64) -> bool) -> Vec<&PlotRow> {
    rows.into_iter()
        .filter(|r| field(r).is_some_and(&pred))
        .collect()
}

fn keep_below_quantile(rows: Vec<&PlotRow>, field: Field, q: f64) -> Vec<&PlotRow> {
    let values: Vec<f64> = rows.iter().filter_map(|r| field(r)).collect();
    let cut = StatsCalculator::quantile(&values, q);
    keep(rows, field, |v| v < cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(price: f64, area: f64, floor: f64, rooms: f64) -> PlotRow {
        PlotRow {
            price: Some(price),
            area: Some(area),
            floor: Some(floor),
            rooms: Some(rooms),
            ..PlotRow::default()
        }
    }

    #[test]
    fn test_clean_rows_filters_in_sequence() {
        let mut rows: Vec<PlotRow> = (1..=100)
            .map(|i| row(i as f64 * 1000.0, 50.0 + i as f64, 3.0, 2.0))
            .collect();
        rows.push(row(0.0, 60.0, 3.0, 2.0));
        rows.push(row(5000.0, 60.0, 0.0, 2.0));
        rows.push(row(5000.0, 60.0, 3.0, 11.0));
        rows.push(PlotRow {
            area: None,
            ..row(5000.0, 0.0, 3.0, 2.0)
        });

        let clean = clean_rows(&rows);
        // price q99 drops 99K and 100K, area q99 drops the largest remaining area
        assert!(clean.iter().all(|r| r.price.unwrap() < 100_000.0));
        assert!(clean.iter().all(|r| r.floor.unwrap() > 0.0));
        assert!(clean.iter().all(|r| r.rooms.unwrap() <= 10.0));
        assert!(clean.iter().all(|r| r.area.is_some()));
        assert_eq!(clean.len(), 97);
    }

    #[test]
    fn test_clean_rows_empty() {
        assert!(clean_rows(&[]).is_empty());
        let nulls = vec![PlotRow::default(); 3];
        assert!(clean_rows(&nulls).is_empty());
    }

    #[test]
    fn test_rows_from_frame() {
        let df = DataFrame::new(vec![
            Column::new("price_value".into(), vec![Some("85000"), None]),
            Column::new("rooms".into(), vec![Some(3i64), Some(2)]),
            Column::new("city_name".into(), vec![Some(" Bakı "), Some("")]),
            Column::new("has_repair".into(), vec![Some(true), None]),
            Column::new("vipped".into(), vec![Some("false"), Some("true")]),
        ])
        .unwrap();

        let rows = ChartDataset::rows_from_frame(&df).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, Some(85000.0));
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[0].rooms, Some(3.0));
        assert_eq!(rows[0].area, None);
        assert_eq!(rows[0].city.as_deref(), Some("Bakı"));
        assert_eq!(rows[1].city, None);
        assert_eq!(rows[0].flag(Feature::Repair), Some(true));
        assert_eq!(rows[1].flag(Feature::Repair), None);
        assert_eq!(rows[1].flag(Feature::Vip), Some(true));
        assert_eq!(rows[0].flag(Feature::Mortgage), None);
    }
}
