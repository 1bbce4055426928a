//! View state coordinator.
//!
//! # Responsibility
//! - Own every piece of session-local UI state in one place.
//! - Expose the user-facing operations (toggle, filter, camera commands).
//! - Derive render descriptors and per-frame connector lines.
//!
//! # Invariants
//! - Every selected entry is visible: category enabled and `y` in range.
//!   Narrowing visibility evicts selections immediately.
//! - Card rectangles exist only for selected entries.
//! - Fact/event text never reaches the logs.

use crate::config::{ConfigError, FocusPolicy, ViewConfig};
use crate::dataset::Dataset;
use crate::framing::{Bounds, CameraCommand, CameraCommandKind, CameraDirector, CameraFramer};
use crate::model::category::{Category, CategoryKey};
use crate::model::entry::{Entry, EntryId};
use crate::projection::{CameraView, LineTracker, LineUpdate, ScreenRect, Viewport};
use crate::render::{
    label_visible, scale_target, CardDescriptor, EntryDescriptor, RangeDescriptor,
    StalkDescriptor, TitleDescriptor,
};
use crate::state::cards::CardLayout;
use crate::state::selection::SelectionSet;
use crate::state::visibility::{CategoryVisibility, TimeRange};
use glam::Vec3;
use log::{debug, info, warn};

const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

/// Single owner of selection, visibility, range, cards and camera requests.
pub struct ViewState {
    config: ViewConfig,
    dataset: Dataset,
    selection: SelectionSet,
    visibility: CategoryVisibility,
    range: TimeRange,
    cards: CardLayout,
    lines: LineTracker,
    framer: CameraFramer,
    director: CameraDirector,
    show_all_labels: bool,
    show_title: bool,
    camera: CameraView,
    viewport: Viewport,
}

impl ViewState {
    /// Builds a fresh session over `dataset`.
    ///
    /// # Errors
    /// - Returns the first `ConfigError` found by `ViewConfig::validate()`.
    pub fn new(config: ViewConfig, dataset: Dataset) -> Result<Self, ConfigError> {
        config.validate()?;

        for key in dataset.category_keys() {
            if config.category(key.as_str()).is_none() {
                warn!(
                    "event=dataset_category_ignored module=state status=skipped category={}",
                    key
                );
            }
        }

        let keys: Vec<&CategoryKey> = config.categories.iter().map(|c| &c.key).collect();
        let range = TimeRange::from_bounds(dataset.y_bounds(keys.iter().copied()));
        let visibility = CategoryVisibility::all_enabled(keys.iter().copied());
        let framer = CameraFramer::new(config.framing.clone(), config.camera.clone());
        let camera = CameraView::from_preset(&config.camera);

        info!(
            "event=view_open module=state status=ok categories={} entries={} range_lo={} range_hi={}",
            config.categories.len(),
            dataset.len(),
            range.lo(),
            range.hi()
        );

        Ok(Self {
            show_all_labels: config.show_labels_initially,
            show_title: config.show_title_initially,
            config,
            dataset,
            selection: SelectionSet::new(),
            visibility,
            range,
            cards: CardLayout::new(),
            lines: LineTracker::new(),
            framer,
            director: CameraDirector::new(),
            camera,
            viewport: DEFAULT_VIEWPORT,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn cards(&self) -> &CardLayout {
        &self.cards
    }

    pub fn show_all_labels(&self) -> bool {
        self.show_all_labels
    }

    pub fn show_title(&self) -> bool {
        self.show_title
    }

    pub fn is_category_enabled(&self, key: &CategoryKey) -> bool {
        self.visibility.is_enabled(key)
    }

    pub fn is_selected(&self, id: &EntryId) -> bool {
        self.selection.contains(id)
    }

    /// Whether `id` names a loaded entry that currently passes the filter.
    pub fn is_visible(&self, id: &EntryId) -> bool {
        entry_visible(&self.dataset, &self.visibility, &self.range, id)
    }

    /// World-space position of a loaded entry on its stalk.
    pub fn world_position(&self, id: &EntryId) -> Option<Vec3> {
        let entry = self.dataset.get(id)?;
        let category = self.config.category(entry.category.as_str())?;
        Some(entry_position(entry, category))
    }

    // ----- Selection -----

    /// Toggles one entry's selection; returns whether it is selected afterwards.
    ///
    /// Adding an entry that is not visible is a no-op.
    pub fn toggle_entry(&mut self, id: &EntryId) -> bool {
        if !self.selection.contains(id) && !self.is_visible(id) {
            debug!(
                "event=selection_toggle module=state status=skipped reason=not_visible id={}",
                id
            );
            return false;
        }

        let selected = self.selection.toggle(id.clone());
        if !selected {
            self.cards.remove(id);
        }
        info!(
            "event=selection_toggle module=state status=ok id={} selected={} count={}",
            id,
            selected,
            self.selection.len()
        );
        selected
    }

    pub fn clear_selection(&mut self) {
        let count = self.selection.len();
        self.selection.clear();
        self.cards.clear();
        self.lines.clear();
        info!(
            "event=selection_clear module=state status=ok cleared={}",
            count
        );
    }

    // ----- Visibility -----

    /// Flips one category flag; returns the new value, or `None` for an unknown key.
    pub fn toggle_category(&mut self, key: &CategoryKey) -> Option<bool> {
        let enabled = !self.visibility.is_enabled(key);
        self.set_category_enabled(key, enabled)
    }

    /// Sets one category flag; returns the new value, or `None` for an unknown key.
    ///
    /// Disabling evicts that category's selections. Re-enabling restores nothing.
    pub fn set_category_enabled(&mut self, key: &CategoryKey, enabled: bool) -> Option<bool> {
        let Some(previous) = self.visibility.set(key, enabled) else {
            debug!(
                "event=category_toggle module=state status=skipped reason=unknown_category category={}",
                key
            );
            return None;
        };
        info!(
            "event=category_toggle module=state status=ok category={} enabled={}",
            key, enabled
        );
        if previous && !enabled {
            self.evict_hidden();
        }
        Some(enabled)
    }

    /// Moves the lower range endpoint (clamped to the data bounds).
    pub fn set_range_lo(&mut self, value: f64) {
        self.range.set_lo(value);
        self.after_range_change();
    }

    /// Moves the upper range endpoint (clamped to the data bounds).
    pub fn set_range_hi(&mut self, value: f64) {
        self.range.set_hi(value);
        self.after_range_change();
    }

    /// Restores the full data-derived range. Evicted selections stay evicted.
    pub fn reset_range(&mut self) {
        self.range.reset();
        self.after_range_change();
    }

    /// Flips "show all labels"; returns the new value.
    pub fn toggle_labels(&mut self) -> bool {
        self.show_all_labels = !self.show_all_labels;
        debug!(
            "event=labels_toggle module=state status=ok show_all={}",
            self.show_all_labels
        );
        self.show_all_labels
    }

    /// Flips the title strip; returns the new value.
    pub fn toggle_title(&mut self) -> bool {
        self.show_title = !self.show_title;
        debug!(
            "event=title_toggle module=state status=ok show_title={}",
            self.show_title
        );
        self.show_title
    }

    // ----- Cards -----

    /// Records where the host rendered a selected entry's card.
    ///
    /// Returns `false` (and stores nothing) when the entry is not selected.
    pub fn set_card_rect(&mut self, id: &EntryId, rect: ScreenRect) -> bool {
        if !self.selection.contains(id) {
            return false;
        }
        self.cards.set(id.clone(), rect);
        true
    }

    pub fn remove_card_rect(&mut self, id: &EntryId) -> Option<ScreenRect> {
        self.cards.remove(id)
    }

    // ----- Camera -----

    /// Records the host camera and viewport used by later fit commands.
    ///
    /// A camera with non-finite fields is ignored; returns whether the pose
    /// was recorded.
    pub fn observe_camera(&mut self, camera: CameraView, viewport: Viewport) -> bool {
        if !camera.is_finite() {
            debug!("event=camera_observe module=state status=skipped reason=non_finite");
            return false;
        }
        self.camera = camera;
        self.viewport = viewport;
        true
    }

    pub fn camera(&self) -> &CameraView {
        &self.camera
    }

    /// Fits every visible entry. No-op when nothing is visible.
    pub fn home(&mut self) -> Option<CameraCommand> {
        let bounds = Bounds::from_points(
            self.visible_entries()
                .into_iter()
                .map(|(entry, category)| entry_position(entry, category)),
        );
        self.fit(bounds, CameraCommandKind::Home)
    }

    /// Frames the selection according to the configured `FocusPolicy`.
    ///
    /// No-op when the selection is empty.
    pub fn focus_selection(&mut self) -> Option<CameraCommand> {
        match self.config.focus_policy {
            FocusPolicy::FitSelection => {
                let bounds = Bounds::from_points(
                    self.selection
                        .iter()
                        .filter_map(|id| self.world_position(id)),
                );
                self.fit(bounds, CameraCommandKind::Focus)
            }
            FocusPolicy::SnapToLatest => {
                let Some(point) = self
                    .selection
                    .most_recent()
                    .and_then(|id| self.world_position(id))
                else {
                    debug!("event=camera_command module=state status=skipped kind=focus reason=empty");
                    return None;
                };
                let command = self.framer.snap_to(point);
                Some(self.submit(command))
            }
        }
    }

    /// Returns the camera to the configured preset pose.
    pub fn reset_camera(&mut self) -> CameraCommand {
        let command = self.framer.preset();
        self.submit(command)
    }

    /// "Reset all": clears the selection and returns the camera to its preset.
    ///
    /// Category flags and the time range are left as they are.
    pub fn reset(&mut self) -> CameraCommand {
        self.clear_selection();
        self.reset_camera()
    }

    pub fn pending_camera_command(&self) -> Option<&CameraCommand> {
        self.director.pending()
    }

    /// Hands the latest camera command to the host.
    pub fn take_camera_command(&mut self) -> Option<CameraCommand> {
        self.director.take_pending()
    }

    // ----- Read side -----

    /// Entries passing the filter, in category order then source order.
    pub fn visible_entries(&self) -> Vec<(&Entry, &Category)> {
        let dataset = &self.dataset;
        let range = &self.range;
        self.enabled_categories()
            .flat_map(move |category| {
                dataset
                    .entries(&category.key)
                    .iter()
                    .filter(move |entry| range.contains(entry.y))
                    .map(move |entry| (entry, category))
            })
            .collect()
    }

    pub fn entry_descriptors(&self) -> Vec<EntryDescriptor> {
        self.visible_entries()
            .into_iter()
            .map(|(entry, category)| {
                let id = entry.id();
                let selected = self.selection.contains(&id);
                EntryDescriptor {
                    position: entry_position(entry, category).to_array(),
                    color: category.color.clone(),
                    selected,
                    label_visible: label_visible(
                        self.config.label_mode,
                        self.show_all_labels,
                        selected,
                    ),
                    scale_target: scale_target(selected),
                    id,
                }
            })
            .collect()
    }

    pub fn stalk_descriptors(&self) -> Vec<StalkDescriptor> {
        self.enabled_categories()
            .map(|category| StalkDescriptor {
                key: category.key.clone(),
                x: category.x,
                color: category.color.clone(),
                height: self.config.stalk_height,
            })
            .collect()
    }

    /// Detail cards for the selection, in display order.
    pub fn card_feed(&self) -> Vec<CardDescriptor> {
        self.selection
            .ordered(self.config.selection_order)
            .into_iter()
            .filter_map(|id| {
                let entry = self.dataset.get(id)?;
                let category = self.config.category(entry.category.as_str())?;
                Some(CardDescriptor {
                    id: id.clone(),
                    category: category.key.clone(),
                    display_name: category.display_name.clone(),
                    color: category.color.clone(),
                    date: entry.date.clone(),
                    event: entry.event.clone(),
                    fact: entry.fact.clone(),
                })
            })
            .collect()
    }

    /// Headings for enabled categories; empty while the title strip is off.
    pub fn title_strip(&self) -> Vec<TitleDescriptor> {
        if !self.show_title {
            return Vec::new();
        }
        self.enabled_categories()
            .map(|category| TitleDescriptor {
                key: category.key.clone(),
                display_name: category.display_name.clone(),
                color: category.color.clone(),
            })
            .collect()
    }

    pub fn range_descriptor(&self) -> RangeDescriptor {
        RangeDescriptor {
            lo: self.range.lo(),
            hi: self.range.hi(),
            min: self.range.min(),
            max: self.range.max(),
        }
    }

    /// Per-frame connector lines for selected entries with rendered cards.
    ///
    /// Also records `camera` and `viewport` for later fit commands when the
    /// pose is finite.
    pub fn frame_lines(&mut self, camera: CameraView, viewport: Viewport) -> Vec<LineUpdate> {
        self.observe_camera(camera, viewport);
        let targets: Vec<(EntryId, Vec3)> = self
            .selection
            .ordered(self.config.selection_order)
            .into_iter()
            .filter_map(|id| Some((id.clone(), self.world_position(id)?)))
            .collect();
        self.lines.update(
            targets.iter().map(|(id, position)| (id, *position)),
            &self.cards,
            &camera,
            &viewport,
        )
    }

    // ----- Internals -----

    fn enabled_categories(&self) -> impl Iterator<Item = &Category> {
        self.config
            .categories
            .iter()
            .filter(move |category| self.visibility.is_enabled(&category.key))
    }

    fn after_range_change(&mut self) {
        info!(
            "event=range_change module=state status=ok lo={} hi={}",
            self.range.lo(),
            self.range.hi()
        );
        self.evict_hidden();
    }

    fn evict_hidden(&mut self) {
        let Self {
            dataset,
            visibility,
            range,
            selection,
            cards,
            ..
        } = self;
        let evicted = selection.evict(|id| entry_visible(dataset, visibility, range, id));
        for id in &evicted {
            cards.remove(id);
        }
        if !evicted.is_empty() {
            info!(
                "event=selection_evict module=state status=ok evicted={} remaining={}",
                evicted.len(),
                selection.len()
            );
        }
    }

    fn fit(
        &mut self,
        bounds: Option<Bounds>,
        kind: CameraCommandKind,
    ) -> Option<CameraCommand> {
        let Some(bounds) = bounds else {
            debug!(
                "event=camera_command module=state status=skipped kind={} reason=empty",
                kind.as_str()
            );
            return None;
        };
        let command = self.framer.fit(kind, &bounds, &self.camera, &self.viewport);
        Some(self.submit(command))
    }

    fn submit(&mut self, command: CameraCommand) -> CameraCommand {
        info!(
            "event=camera_command module=state status=ok kind={} superseded={}",
            command.kind.as_str(),
            self.director.pending().is_some()
        );
        self.director.submit(command);
        command
    }
}

fn entry_visible(
    dataset: &Dataset,
    visibility: &CategoryVisibility,
    range: &TimeRange,
    id: &EntryId,
) -> bool {
    dataset.get(id).is_some() && visibility.is_enabled(id.category()) && range.contains(id.y())
}

fn entry_position(entry: &Entry, category: &Category) -> Vec3 {
    Vec3::new(category.x, entry.world_y(), 0.0)
}
