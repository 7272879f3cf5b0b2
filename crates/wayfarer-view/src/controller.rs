//! The viewport state machine.
//!
//! `ViewportController` owns the single source of truth for what the camera
//! should currently show. Every transition recomputes the target in full from
//! the current (itinerary, filter, focus) triple — there is no delta or patch
//! logic, so redundant, reordered, or late events cannot corrupt the result.

use crate::bounds;
use crate::mercator::{self, PixelSize};
use crate::model::{CameraCommand, CameraSpec, CameraTarget};
use crate::scene;
use crate::surface::MapSurface;
use crate::timer::{SettleScheduler, TimerToken};
use wayfarer_core::{
    ActivityKey, DayFilter, DayPalette, GeoPoint, Itinerary, Selection, ViewportPolicy,
};

pub struct ViewportController<S: SettleScheduler> {
    itinerary: Option<Itinerary>,
    selection: Selection,
    policy: ViewportPolicy,
    palette: DayPalette,
    viewport_px: Option<PixelSize>,
    current: Option<CameraCommand>,
    /// Bumped whenever the surface must re-apply a value-equal camera:
    /// itinerary identity changes, remounts, explicit view resets.
    generation: u64,
    scheduler: S,
    next_token: TimerToken,
    pending_settle: Option<TimerToken>,
}

impl<S: SettleScheduler> ViewportController<S> {
    pub fn new(policy: ViewportPolicy, scheduler: S) -> Self {
        Self {
            itinerary: None,
            selection: Selection::default(),
            policy,
            palette: DayPalette::default(),
            viewport_px: None,
            current: None,
            generation: 0,
            scheduler,
            next_token: 0,
            pending_settle: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_camera(&self) -> Option<&CameraCommand> {
        self.current.as_ref()
    }

    /// The current camera resolved to `(center, zoom)` for surfaces that do
    /// not take bounds commands. `None` until a camera and a viewport size
    /// are both known.
    pub fn resolved_camera(&self) -> Option<(GeoPoint, f64)> {
        let command = self.current.as_ref()?;
        let size = self.viewport_px?;
        Some(mercator::resolve(&command.spec, size, &self.policy))
    }

    /// Swaps the active itinerary. This is a full reset: selection cleared,
    /// palette re-derived, prior target discarded, generation bumped so the
    /// (possibly remounted) surface re-applies unconditionally.
    pub fn set_itinerary(&mut self, surface: &mut dyn MapSurface, itinerary: Option<Itinerary>) {
        tracing::debug!(
            id = itinerary.as_ref().map(|i| i.id.as_str()).unwrap_or("-"),
            "itinerary changed"
        );
        self.palette = DayPalette::for_theme(
            itinerary
                .as_ref()
                .and_then(|i| i.visual_theme.as_deref()),
        );
        self.itinerary = itinerary;
        self.selection.reset();
        self.generation += 1;
        self.current = None;
        self.cancel_settle();
        self.sync(surface, false);
    }

    /// Day-filter change: re-derives the target over the filtered activity
    /// set. An active focus keeps overriding until cleared.
    pub fn set_day_filter(&mut self, surface: &mut dyn MapSurface, filter: DayFilter) {
        tracing::debug!(?filter, "day filter changed");
        self.selection.day_filter = filter;
        self.sync(surface, false);
    }

    /// Focus override: the camera goes to that single activity regardless of
    /// the day filter. A key that matches nothing (stale after an edit)
    /// leaves the filter-derived target in effect.
    pub fn focus_activity(&mut self, surface: &mut dyn MapSurface, key: ActivityKey) {
        tracing::debug!(activity = %key.activity_name, "focus set");
        self.selection.focus = Some(key);
        self.sync(surface, false);
    }

    /// Clearing focus falls back to the current filtered view, never to the
    /// pre-focus camera — the target is re-derived, not remembered.
    pub fn clear_focus(&mut self, surface: &mut dyn MapSurface) {
        tracing::debug!("focus cleared");
        self.selection.focus = None;
        self.sync(surface, false);
    }

    /// User-initiated snap-back after manual panning: recompute
    /// unconditionally and bump the generation so a value-equal target is
    /// still re-applied.
    pub fn reset_view(&mut self, surface: &mut dyn MapSurface) {
        tracing::debug!("view reset");
        self.generation += 1;
        self.current = None;
        self.sync(surface, false);
    }

    /// One-shot "frame this day" affordance, independent of the global day
    /// filter. A missing day or a day with no routable activities is legal
    /// and silently skipped.
    pub fn frame_day(&mut self, surface: &mut dyn MapSurface, day: u32) {
        let Some(itinerary) = &self.itinerary else {
            return;
        };
        let Some(plan) = itinerary.day(day) else {
            return;
        };
        let Some(target) = CameraTarget::points(plan.routable_points()) else {
            return;
        };
        tracing::debug!(day, "framing day");
        let command = CameraCommand {
            spec: bounds::fit(&target, &self.policy),
            generation: self.generation,
        };
        self.push_camera(surface, command);
    }

    /// The surface (re)mounted with the given pixel size. The camera must be
    /// explicitly re-applied rather than assumed to still hold, and a
    /// confirmatory settle pass is scheduled for after any in-flight layout
    /// transition.
    pub fn surface_mounted(&mut self, surface: &mut dyn MapSurface, size: PixelSize) {
        tracing::debug!(width = size.width, height = size.height, "surface mounted");
        self.viewport_px = Some(size);
        self.generation += 1;
        self.current = None;
        surface.invalidate_size();
        self.sync(surface, false);
        self.schedule_settle();
    }

    /// Container resize: immediate best-effort pass now, confirmatory pass
    /// after the settle delay (layout animations may still be running).
    pub fn surface_resized(&mut self, surface: &mut dyn MapSurface, size: PixelSize) {
        tracing::debug!(width = size.width, height = size.height, "surface resized");
        self.viewport_px = Some(size);
        surface.invalidate_size();
        self.sync(surface, true);
        self.schedule_settle();
    }

    /// Deferred settle callback. Late or superseded firings are harmless:
    /// this recomputes from current authoritative state, same as every other
    /// transition.
    pub fn settle_elapsed(&mut self, surface: &mut dyn MapSurface, token: TimerToken) {
        if self.pending_settle == Some(token) {
            self.pending_settle = None;
        }
        tracing::trace!(token, "settle pass");
        surface.invalidate_size();
        self.sync(surface, true);
    }

    /// The camera spec implied by current state, or `None` when nothing is
    /// visible. Delegates to the shared pure recompute in [`scene`].
    fn desired_spec(&self) -> Option<CameraSpec> {
        let itinerary = self.itinerary.as_ref()?;
        scene::desired_camera(itinerary, &self.selection, &self.policy)
    }

    /// Recomputes and pushes camera + scene. `force` re-sends a value-equal
    /// camera (used by size passes, where the surface must re-frame even
    /// though the spec did not change).
    fn sync(&mut self, surface: &mut dyn MapSurface, force: bool) {
        let command = match self.desired_spec() {
            Some(spec) => Some(CameraCommand {
                spec,
                generation: self.generation,
            }),
            // Nothing visible: settle on the world overview once, then leave
            // the camera alone on subsequent empty recomputes.
            None if self.current.is_none() => Some(CameraCommand {
                spec: CameraSpec::Center {
                    center: self.policy.world_center,
                    zoom: self.policy.world_zoom,
                },
                generation: self.generation,
            }),
            None => None,
        };

        if let Some(command) = command {
            if force || self.current.as_ref() != Some(&command) {
                self.push_camera(surface, command);
            }
        }

        if let Some(itinerary) = &self.itinerary {
            let scene = scene::layout_scene(itinerary, &self.selection, &self.palette);
            if let Err(err) = surface.draw_scene(&scene) {
                // Absorbed: the next mount pass redraws.
                tracing::debug!(error = %err, "scene draw deferred");
            }
        }
    }

    fn push_camera(&mut self, surface: &mut dyn MapSurface, command: CameraCommand) {
        match surface.apply_camera(&command) {
            Ok(()) => self.current = Some(command),
            Err(err) => {
                // Absorbed: leave `current` unset so the next mount
                // notification retries the same idempotent recomputation.
                tracing::debug!(error = %err, "camera apply deferred");
                self.current = None;
            }
        }
    }

    fn schedule_settle(&mut self) {
        self.cancel_settle();
        let token = self.next_token;
        self.next_token += 1;
        self.scheduler.schedule(token, self.policy.settle_delay_ms);
        self.pending_settle = Some(token);
    }

    fn cancel_settle(&mut self) {
        if let Some(token) = self.pending_settle.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl<S: SettleScheduler + std::fmt::Debug> std::fmt::Debug for ViewportController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("selection", &self.selection)
            .field("current", &self.current)
            .field("generation", &self.generation)
            .field("viewport_px", &self.viewport_px)
            .field("pending_settle", &self.pending_settle)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
