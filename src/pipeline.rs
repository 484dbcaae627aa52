//! The owned, versioned state of one furnace view.
//!
//! [`ThermalPipeline`] holds the sampled grid, the shell and isotherm
//! surfaces at every stage, the pick index and the statistics. Each state
//! change rebuilds the affected outputs in full and swaps them in as new
//! `Arc`s, so an output handed out earlier is never mutated.
//!
//! ```text
//! case ──> Grid ──┬─> contour (distance = 0) ──> zone filter ──> clip ──> shell ──> PointLocator
//!                 ├─> contour (T = iso)      ──> zone filter ──> clip ──> isotherm
//!                 └─> statistics
//! ```

use std::sync::Arc;

use crate::catalog::{FurnaceCase, ZoneCatalog, ZoneId};
use crate::config::FurnaceConfig;
use crate::error::Result;
use crate::extraction::{
    AttributedMesh, ClipHalfSpace, ClipState, ContourGrid, FilterZones, ZoneVisibility,
};
use crate::field::{Bounds, Grid, SynthesizeField};
use crate::geometry::ClipAxis;
use crate::math::Point3;
use crate::query::{pick, PickOutcome, PointLocator};
use crate::statistics::{
    material_table, AggregateStatistics, FieldStatistics, GlobalMetrics, MaterialRow,
    ZoneStatsRow,
};
use crate::view::{Camera, ColorLookup, OrbitDirection, RenderSettings, ViewPreset};

/// Shown by [`ThermalPipeline::zone_label`] for a zone without a row.
pub const NO_ZONE_LABEL: &str = "Select a zone to view details";

/// What the caller needs to refresh after a case change.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseSnapshot {
    pub case_name: &'static str,
    pub bounds: Bounds,
    /// Slider range of the clip origin along x, y and z.
    pub clip_ranges: [(f64, f64); 3],
    pub clip: ClipState,
    pub materials: Vec<MaterialRow>,
    pub zones: Vec<ZoneStatsRow>,
    pub metrics: GlobalMetrics,
}

/// One surface through every extraction stage.
#[derive(Debug, Clone)]
struct SurfaceStages {
    contoured: Arc<AttributedMesh>,
    filtered: Arc<AttributedMesh>,
    visible: Arc<AttributedMesh>,
}

impl SurfaceStages {
    fn new(contoured: AttributedMesh, visibility: &ZoneVisibility, clip: &ClipState) -> Self {
        let contoured = Arc::new(contoured);
        let filtered = Self::filter(&contoured, visibility);
        let visible = Self::clip(&filtered, clip);
        Self {
            contoured,
            filtered,
            visible,
        }
    }

    fn filter(contoured: &Arc<AttributedMesh>, visibility: &ZoneVisibility) -> Arc<AttributedMesh> {
        Arc::new(FilterZones::new(contoured, visibility).execute())
    }

    fn clip(filtered: &Arc<AttributedMesh>, clip: &ClipState) -> Arc<AttributedMesh> {
        match clip.half_space() {
            Some(half_space) => Arc::new(ClipHalfSpace::new(filtered, half_space).execute()),
            None => Arc::clone(filtered),
        }
    }

    fn refilter(&mut self, visibility: &ZoneVisibility, clip: &ClipState) {
        self.filtered = Self::filter(&self.contoured, visibility);
        self.visible = Self::clip(&self.filtered, clip);
    }

    fn reclip(&mut self, clip: &ClipState) {
        self.visible = Self::clip(&self.filtered, clip);
    }
}

/// The thermal field core behind the dashboard.
///
/// Every operation runs to completion before returning. Invalid identifiers
/// fall back to documented defaults, so no operation after [`Self::new`]
/// can fail.
#[derive(Debug)]
pub struct ThermalPipeline {
    config: FurnaceConfig,
    catalog: ZoneCatalog,
    case: FurnaceCase,
    grid: Arc<Grid>,
    statistics: Arc<FieldStatistics>,
    visibility: ZoneVisibility,
    clip: ClipState,
    iso_value: f64,
    shell: SurfaceStages,
    iso: SurfaceStages,
    locator: Arc<PointLocator>,
    render: RenderSettings,
    colors: ColorLookup,
    camera: Camera,
    revision: u64,
}

impl ThermalPipeline {
    /// Validates `config`, synthesizes its default case and builds every
    /// derived output.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: FurnaceConfig) -> Result<Self> {
        config.validate()?;
        let case = FurnaceCase::from_name(&config.default_case);
        let grid = Arc::new(SynthesizeField::new(&config, case).execute()?);
        let catalog = ZoneCatalog::new();
        let statistics = Arc::new(AggregateStatistics::new(&grid, &catalog).execute());
        let visibility = ZoneVisibility::all(&catalog);
        let clip = ClipState {
            origin: grid.bounds().center(),
            ..ClipState::default()
        };
        let iso_value = config.iso_value;
        let shell = SurfaceStages::new(ContourGrid::shell(&grid).execute(), &visibility, &clip);
        let iso = SurfaceStages::new(
            ContourGrid::isotherm(&grid, iso_value).execute(),
            &visibility,
            &clip,
        );
        let locator = Arc::new(PointLocator::build(&shell.visible));
        let render = RenderSettings::new(config.shell_opacity, config.iso_opacity);
        let colors = ColorLookup::new(config.color_range);
        let camera = Camera::framing(grid.bounds(), config.pan_step);

        tracing::info!(
            case = case.name(),
            points = grid.len(),
            shell_vertices = shell.visible.vertex_count(),
            "built thermal pipeline"
        );
        Ok(Self {
            config,
            catalog,
            case,
            grid,
            statistics,
            visibility,
            clip,
            iso_value,
            shell,
            iso,
            locator,
            render,
            colors,
            camera,
            revision: 0,
        })
    }

    /// Switches to the case named `name` (unknown names select the baseline)
    /// and rebuilds the grid, both surfaces, the pick index and the
    /// statistics. The clip origin moves to the new bounds' center; the clip
    /// flag, clip axis and zone visibility are kept.
    pub fn set_case(&mut self, name: &str) -> CaseSnapshot {
        let case = FurnaceCase::from_name(name);
        let grid = match SynthesizeField::new(&self.config, case).execute() {
            Ok(grid) => Arc::new(grid),
            Err(err) => {
                tracing::error!(%err, case = case.name(), "case rebuild failed, keeping previous state");
                return self.snapshot();
            }
        };

        self.case = case;
        self.statistics = Arc::new(AggregateStatistics::new(&grid, &self.catalog).execute());
        self.clip.origin = grid.bounds().center();
        self.shell = SurfaceStages::new(
            ContourGrid::shell(&grid).execute(),
            &self.visibility,
            &self.clip,
        );
        self.iso = SurfaceStages::new(
            ContourGrid::isotherm(&grid, self.iso_value).execute(),
            &self.visibility,
            &self.clip,
        );
        self.grid = grid;
        self.rebuild_locator();
        self.revision += 1;

        tracing::info!(
            case = case.name(),
            points = self.grid.len(),
            revision = self.revision,
            "switched case"
        );
        self.snapshot()
    }

    /// Re-extracts the isotherm at `celsius`.
    pub fn set_iso_value(&mut self, celsius: f64) {
        self.iso_value = celsius;
        self.iso = SurfaceStages::new(
            ContourGrid::isotherm(&self.grid, celsius).execute(),
            &self.visibility,
            &self.clip,
        );
        self.revision += 1;
    }

    /// Sets the shell opacity, clamped to `[0.1, 1.0]`. No geometry changes.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.render.set_shell_opacity(opacity);
    }

    /// Sets the clip plane and re-clips both surfaces.
    pub fn set_clip(&mut self, enabled: bool, axis: ClipAxis, origin: Point3) {
        self.clip = ClipState {
            enabled,
            axis,
            origin,
        };
        self.shell.reclip(&self.clip);
        self.iso.reclip(&self.clip);
        self.rebuild_locator();
        self.revision += 1;
    }

    /// Shows only the requested zones. Unknown ids are dropped; if nothing
    /// valid remains every zone is shown.
    pub fn set_visible_zones<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ZoneId>,
    {
        self.visibility = ZoneVisibility::from_requested(ids, &self.catalog);
        self.shell.refilter(&self.visibility, &self.clip);
        self.iso.refilter(&self.visibility, &self.clip);
        self.rebuild_locator();
        self.revision += 1;
    }

    /// Resolves `world` against the visible shell.
    #[must_use]
    pub fn pick(&self, world: &Point3) -> PickOutcome {
        pick(&self.locator, &self.shell.visible, world, self.config.pick_radius)
    }

    /// Detail text of zone `id`, or [`NO_ZONE_LABEL`].
    #[must_use]
    pub fn zone_label(&self, id: ZoneId) -> String {
        self.statistics
            .zone(id)
            .map_or_else(|| NO_ZONE_LABEL.to_owned(), ZoneStatsRow::summary)
    }

    /// Bounds, clip defaults and tables of the current case.
    #[must_use]
    pub fn snapshot(&self) -> CaseSnapshot {
        let bounds = *self.grid.bounds();
        CaseSnapshot {
            case_name: self.case.name(),
            bounds,
            clip_ranges: ClipAxis::ALL.map(|axis| bounds.axis_range(axis)),
            clip: self.clip,
            materials: material_table(),
            zones: self.statistics.zones.clone(),
            metrics: self.statistics.metrics.clone(),
        }
    }

    pub fn orbit(&mut self, azimuth: f64, elevation: f64) {
        self.camera.orbit(azimuth, elevation);
    }

    /// One orbit button press.
    pub fn orbit_step(&mut self, direction: OrbitDirection) {
        let (azimuth, elevation) = direction.step();
        self.camera.orbit(azimuth, elevation);
    }

    pub fn zoom(&mut self, factor: f64) {
        self.camera.zoom(factor);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
    }

    /// Applies a named preset; unknown names select the front view.
    pub fn view_preset(&mut self, name: &str) {
        self.camera.view_preset(ViewPreset::from_name(name));
    }

    /// Frames the current grid bounds.
    pub fn reset_camera(&mut self) {
        self.camera.reset(self.grid.bounds());
    }

    fn rebuild_locator(&mut self) {
        self.locator = Arc::new(PointLocator::build(&self.shell.visible));
        tracing::debug!(vertices = self.locator.len(), "rebuilt pick index");
    }

    // Accessors

    #[must_use]
    pub fn config(&self) -> &FurnaceConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn case(&self) -> FurnaceCase {
        self.case
    }

    #[must_use]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// The shell as shown: zone-filtered, then clipped when clipping is on.
    #[must_use]
    pub fn shell(&self) -> &Arc<AttributedMesh> {
        &self.shell.visible
    }

    /// The isotherm as shown.
    #[must_use]
    pub fn isotherm(&self) -> &Arc<AttributedMesh> {
        &self.iso.visible
    }

    /// The shell before zone filtering and clipping.
    #[must_use]
    pub fn full_shell(&self) -> &Arc<AttributedMesh> {
        &self.shell.contoured
    }

    #[must_use]
    pub fn statistics(&self) -> &Arc<FieldStatistics> {
        &self.statistics
    }

    #[must_use]
    pub fn locator(&self) -> &Arc<PointLocator> {
        &self.locator
    }

    #[must_use]
    pub fn visibility(&self) -> &ZoneVisibility {
        &self.visibility
    }

    #[must_use]
    pub fn clip(&self) -> &ClipState {
        &self.clip
    }

    #[must_use]
    pub fn iso_value(&self) -> f64 {
        self.iso_value
    }

    #[must_use]
    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    #[must_use]
    pub fn color_lookup(&self) -> &ColorLookup {
        &self.colors
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Bumped by every rebuild.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
