// Clip and controller generation
//
// Every request is planned in memory first. Only when every sheet, variant and
// animation row checks out is anything handed to the asset store, so a bad
// row offset never leaves half an export behind.

use super::{
    clip_name, controller_name, AnimationClip, AssetStore, ClipHandle, ControllerHandle,
    ExportError,
};
use crate::config::{AnimationDefinition, ExportSettings, GridConfig};
use crate::core::{pair_by_position, reshape, CoreError};
use crate::sheet::Frame;
use log::{debug, info, warn};

/// The frames of one sheet together with where and how to export them
#[derive(Debug, Clone)]
pub struct SheetFrames {
    /// Name used in logs and errors
    pub name: String,
    pub settings: ExportSettings,
    /// Frames in collated order
    pub frames: Vec<Frame>,
}

/// Summary of a finished generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub clips: usize,
    pub controllers: usize,
    pub override_controllers: usize,
    /// Animation rows left out because their variant has no frames there
    pub skipped_rows: usize,
    /// Non-fatal issues, e.g. partially filled variants
    pub warnings: Vec<String>,
}

impl GenerationReport {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// One slot per animation definition; `None` where the row has no frames
type VariantClips = Vec<Option<AnimationClip>>;

/// Clips for every variant of one sheet, built but not yet stored
struct SheetPlan<'s> {
    sheet: &'s SheetFrames,
    variants: Vec<VariantClips>,
}

/// Turns sheets into clips, controllers and override controllers
pub struct Generator<'a> {
    grid: &'a GridConfig,
    animations: &'a [AnimationDefinition],
}

impl<'a> Generator<'a> {
    /// Create a new generator for a grid layout and animation list
    pub fn new(grid: &'a GridConfig, animations: &'a [AnimationDefinition]) -> Self {
        Self { grid, animations }
    }

    /// Generate everything for a main sheet and its override sheets
    ///
    /// The main sheet gets a controller per variant. Each override variant
    /// gets an override controller based on the main sheet's first
    /// controller, swapping clips of the same animation.
    pub fn generate<S: AssetStore>(
        &self,
        store: &mut S,
        main: &SheetFrames,
        overrides: &[SheetFrames],
    ) -> Result<GenerationReport, ExportError> {
        let mut report = GenerationReport::default();

        let main_plan = self.plan_sheet(main, &mut report)?;
        let override_plans = overrides
            .iter()
            .map(|sheet| self.plan_sheet(sheet, &mut report))
            .collect::<Result<Vec<_>, _>>()?;

        // plan_sheet rejects empty sheets, so variant 0 always exists
        let base_clips = &main_plan.variants[0];
        if base_clips.iter().all(Option::is_none) {
            return Err(CoreError::EmptyFrameSequence(main.name.clone()).into());
        }
        for plan in &override_plans {
            for (index, variant) in plan.variants.iter().enumerate() {
                for (original, replacement) in pair_by_position(base_clips, variant)? {
                    if let (None, Some(clip)) = (original, replacement) {
                        report.warn(format!(
                            "{}: {} has no original clip to replace in variant {}",
                            plan.sheet.name, clip.name, index
                        ));
                    }
                }
            }
        }

        let (base_controller, base_handles) = self.write_main(store, &main_plan, &mut report)?;

        for (i, plan) in override_plans.iter().enumerate() {
            info!(
                "Creating override animations for {} ({}/{})",
                plan.sheet.name,
                i + 1,
                override_plans.len()
            );
            self.write_overrides(store, plan, base_controller, &base_handles, &mut report)?;
        }

        info!(
            "Generated {} clips, {} controllers and {} override controllers",
            report.clips, report.controllers, report.override_controllers
        );

        Ok(report)
    }

    /// Build every clip for a sheet without touching the store
    fn plan_sheet<'s>(
        &self,
        sheet: &'s SheetFrames,
        report: &mut GenerationReport,
    ) -> Result<SheetPlan<'s>, ExportError> {
        let frame_rate = self.grid.frame_rate;
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(ExportError::InvalidFrameRate(frame_rate));
        }
        if sheet.frames.is_empty() {
            return Err(CoreError::EmptyFrameSequence(sheet.name.clone()).into());
        }

        let grids = reshape(&sheet.frames, self.grid.width, self.grid.height)?;
        debug!("{}: {} frames in {} variants", sheet.name, sheet.frames.len(), grids.len());

        let mut variants = Vec::with_capacity(grids.len());
        for (index, grid) in grids.iter().enumerate() {
            if !grid.is_complete() {
                report.warn(format!(
                    "{}: variant {} has only {} of {} frames",
                    sheet.name,
                    index,
                    grid.filled(),
                    grid.area()
                ));
            }

            let mut clips = Vec::with_capacity(self.animations.len());
            for animation in self.animations {
                let frames = grid.row_frames(animation.row)?;
                let name = clip_name(&sheet.settings.prefix, &animation.name, index);

                if frames.is_empty() {
                    report.skipped_rows += 1;
                    report.warn(format!(
                        "{}: skipping {}, row {} of variant {} has no frames",
                        sheet.name, name, animation.row, index
                    ));
                    clips.push(None);
                } else {
                    clips.push(Some(AnimationClip::looping(&name, frames, frame_rate)));
                }
            }
            variants.push(clips);
        }

        Ok(SheetPlan { sheet, variants })
    }

    /// Store one variant's clips, keeping a slot per animation
    fn write_clips<S: AssetStore>(
        &self,
        store: &mut S,
        plan: &SheetPlan<'_>,
        index: usize,
        report: &mut GenerationReport,
    ) -> Result<Vec<Option<ClipHandle>>, ExportError> {
        info!(
            "Creating animation clips for sheet {} {}/{}",
            plan.sheet.name,
            index + 1,
            plan.variants.len()
        );

        let folder = &plan.sheet.settings.export_folder;
        let mut handles = Vec::with_capacity(plan.variants[index].len());
        for clip in &plan.variants[index] {
            let handle = match clip {
                Some(clip) => {
                    report.clips += 1;
                    Some(store.create_clip(folder, clip)?)
                }
                None => None,
            };
            handles.push(handle);
        }

        Ok(handles)
    }

    /// Store main clips and controllers, returning variant 0's controller and clip slots
    fn write_main<S: AssetStore>(
        &self,
        store: &mut S,
        plan: &SheetPlan<'_>,
        report: &mut GenerationReport,
    ) -> Result<(ControllerHandle, Vec<Option<ClipHandle>>), ExportError> {
        let settings = &plan.sheet.settings;
        let mut base = None;

        for index in 0..plan.variants.len() {
            let handles = self.write_clips(store, plan, index, report)?;
            let motions: Vec<ClipHandle> = handles.iter().flatten().copied().collect();
            if motions.is_empty() {
                report.warn(format!(
                    "{}: no controller for variant {}, none of its rows have frames",
                    plan.sheet.name, index
                ));
                continue;
            }

            let name = controller_name(&settings.prefix, index);
            let controller = store.create_controller(&settings.export_folder, &name, &motions)?;
            report.controllers += 1;

            if base.is_none() {
                base = Some((controller, handles));
            }
        }

        base.ok_or_else(|| CoreError::EmptyFrameSequence(plan.sheet.name.clone()).into())
    }

    fn write_overrides<S: AssetStore>(
        &self,
        store: &mut S,
        plan: &SheetPlan<'_>,
        base_controller: ControllerHandle,
        base_handles: &[Option<ClipHandle>],
        report: &mut GenerationReport,
    ) -> Result<(), ExportError> {
        let settings = &plan.sheet.settings;

        for index in 0..plan.variants.len() {
            let handles = self.write_clips(store, plan, index, report)?;
            let pairs: Vec<(ClipHandle, ClipHandle)> = pair_by_position(base_handles, &handles)?
                .into_iter()
                .filter_map(|(original, replacement)| Some((original?, replacement?)))
                .collect();

            let name = controller_name(&settings.prefix, index);
            store.create_override_controller(&settings.export_folder, &name, base_controller, &pairs)?;
            report.override_controllers += 1;
        }

        Ok(())
    }
}
