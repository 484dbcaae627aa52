//! Whole-volume reductions over a sampled [`Grid`].
//!
//! Statistics describe the physical case, so they read every lattice point
//! and never the extracted, filtered or clipped surfaces.

use serde::Serialize;

use crate::catalog::{material_name, Band, Layer, MaterialId, ZoneCatalog, ZoneId, MATERIALS};
use crate::field::Grid;
use crate::math::round_to;

/// One row of the materials reference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRow {
    pub id: MaterialId,
    pub name: &'static str,
    pub thermal_conductivity: f64,
    pub density: f64,
    pub note: &'static str,
}

/// The materials reference table, in id order.
#[must_use]
pub fn material_table() -> Vec<MaterialRow> {
    MATERIALS
        .iter()
        .map(|m| MaterialRow {
            id: m.id,
            name: m.name,
            thermal_conductivity: m.thermal_conductivity,
            density: m.density,
            note: m.note,
        })
        .collect()
}

/// Temperature statistics of one zone over the whole grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneStatsRow {
    pub zone_id: ZoneId,
    pub name: String,
    pub band: Band,
    pub layer: Layer,
    /// Material of the first grid point classified into the zone.
    pub material_id: MaterialId,
    pub material_name: &'static str,
    pub t_min: f64,
    pub t_max: f64,
    pub t_avg: f64,
    pub count: usize,
}

impl ZoneStatsRow {
    /// Detail text for display.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | Avg {:.1} | Min {:.1} | Max {:.1}",
            self.name, self.material_name, self.t_avg, self.t_min, self.t_max
        )
    }
}

/// Whole-grid temperature summary and the hottest zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalMetrics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub hot_zone_name: String,
    pub hot_material_name: &'static str,
    pub hot_zone_peak: f64,
}

impl GlobalMetrics {
    /// Metric-card values rounded to one decimal.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            min: round_to(self.min, 1),
            max: round_to(self.max, 1),
            avg: round_to(self.avg, 1),
            hot_zone_name: self.hot_zone_name.clone(),
            hot_material_name: self.hot_material_name,
            hot_zone_peak: round_to(self.hot_zone_peak, 1),
        }
    }
}

/// Zone rows and global metrics of one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatistics {
    pub zones: Vec<ZoneStatsRow>,
    pub metrics: GlobalMetrics,
}

impl FieldStatistics {
    /// Row of `zone_id`, if the zone holds any point.
    #[must_use]
    pub fn zone(&self, zone_id: ZoneId) -> Option<&ZoneStatsRow> {
        self.zones.iter().find(|row| row.zone_id == zone_id)
    }
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    material_id: MaterialId,
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn new(material_id: MaterialId, t: f64) -> Self {
        Self {
            material_id,
            min: t,
            max: t,
            sum: t,
            count: 1,
        }
    }

    fn add(&mut self, t: f64) {
        self.min = self.min.min(t);
        self.max = self.max.max(t);
        self.sum += t;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Reduces a grid to per-zone rows and global metrics in a single pass.
pub struct AggregateStatistics<'a> {
    grid: &'a Grid,
    catalog: &'a ZoneCatalog,
}

impl<'a> AggregateStatistics<'a> {
    /// Creates a new `AggregateStatistics` operation.
    #[must_use]
    pub fn new(grid: &'a Grid, catalog: &'a ZoneCatalog) -> Self {
        Self { grid, catalog }
    }

    /// Executes the reduction.
    ///
    /// Rows are listed in zone-id order for zones holding at least one
    /// point. The hottest zone is the row with the largest `t_max`; on a tie
    /// the lower zone id wins.
    #[must_use]
    pub fn execute(&self) -> FieldStatistics {
        let grid = self.grid;
        let mut per_zone: Vec<Option<Accumulator>> = vec![None; self.catalog.len()];
        let mut global: Option<Accumulator> = None;

        for ((&t, &material_id), &zone_id) in grid
            .temperatures()
            .iter()
            .zip(grid.material_ids())
            .zip(grid.zone_ids())
        {
            if let Some(acc) = global.as_mut() {
                acc.add(t);
            } else {
                global = Some(Accumulator::new(material_id, t));
            }
            let Some(slot) = self
                .catalog
                .zones()
                .iter()
                .position(|zone| zone.id == zone_id)
            else {
                continue;
            };
            if let Some(acc) = per_zone[slot].as_mut() {
                acc.add(t);
            } else {
                per_zone[slot] = Some(Accumulator::new(material_id, t));
            }
        }

        let zones: Vec<ZoneStatsRow> = self
            .catalog
            .zones()
            .iter()
            .zip(&per_zone)
            .filter_map(|(zone, acc)| {
                acc.map(|acc| ZoneStatsRow {
                    zone_id: zone.id,
                    name: zone.name.clone(),
                    band: zone.band,
                    layer: zone.layer,
                    material_id: acc.material_id,
                    material_name: material_name(acc.material_id),
                    t_min: acc.min,
                    t_max: acc.max,
                    t_avg: acc.mean(),
                    count: acc.count,
                })
            })
            .collect();

        let mut hottest: Option<&ZoneStatsRow> = None;
        for row in &zones {
            if hottest.map_or(true, |best| row.t_max > best.t_max) {
                hottest = Some(row);
            }
        }

        let metrics = GlobalMetrics {
            min: global.map_or(0.0, |acc| acc.min),
            max: global.map_or(0.0, |acc| acc.max),
            avg: global.map_or(0.0, |acc| acc.mean()),
            hot_zone_name: hottest.map_or_else(|| "N/A".to_owned(), |row| row.name.clone()),
            hot_material_name: hottest.map_or("N/A", |row| row.material_name),
            hot_zone_peak: hottest.map_or(0.0, |row| row.t_max),
        };

        tracing::debug!(
            zones = zones.len(),
            min = metrics.min,
            max = metrics.max,
            "aggregated zone statistics"
        );
        FieldStatistics { zones, metrics }
    }
}
