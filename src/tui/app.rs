use crate::models::{AreaRecord, ResultCache, ScoredArea};
use crate::scoring::{ImportanceScorer, ImportanceWeights, ATTRIBUTES};

/// Slider increment per key press, mirroring the 0.0-1.0 slider range.
pub const SLIDER_STEP: f64 = 0.05;
pub const SLIDER_MAX: f64 = 1.0;

/// Dashboard state: the immutable working set, the current slider
/// positions, and the most recently rendered scored table.
pub struct App {
    pub areas: Vec<AreaRecord>,
    pub weights: ImportanceWeights,
    pub selected: usize,
    pub scored: Option<Vec<ScoredArea>>,
    pub error_message: Option<String>,
    pub should_quit: bool,
    defaults: ImportanceWeights,
    scorer: ImportanceScorer,
    cache: ResultCache,
}

impl App {
    pub fn new(
        areas: Vec<AreaRecord>,
        weights: ImportanceWeights,
        scorer: ImportanceScorer,
    ) -> Self {
        Self {
            areas,
            defaults: weights.clone(),
            weights,
            selected: 0,
            scored: None,
            error_message: None,
            should_quit: false,
            scorer,
            cache: ResultCache::new(),
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected < ATTRIBUTES.len() - 1 {
            self.selected += 1;
        }
    }

    /// Nudge the selected slider, clamped to the slider range.
    pub fn adjust_selected(&mut self, delta: f64) {
        if let Some(slot) = self.weights.values_mut().into_iter().nth(self.selected) {
            *slot = (*slot + delta).clamp(0.0, SLIDER_MAX);
        }
    }

    pub fn reset_weights(&mut self) {
        self.weights = self.defaults.clone();
    }

    /// Recompute the scored table for the current sliders, going through
    /// the last-result cache. A failed submission surfaces the error and
    /// leaves the previous table visible.
    pub fn update_map(&mut self) {
        let key = ResultCache::key(&self.areas, &self.weights);
        if let Some(hit) = self.cache.get(&key) {
            self.scored = Some(hit.to_vec());
            self.error_message = None;
            return;
        }

        match self.scorer.score(&self.areas, &self.weights) {
            Ok(table) => {
                self.cache.put(key, table.clone());
                self.scored = Some(table);
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
