use serde::{Deserialize, Serialize};

use crate::filters;
use crate::{
    Adjustment, BoundedHistory, DomainError, EditParams, FilterKind, ImageBuffer,
    DEFAULT_HISTORY_CAPACITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub width: u32,
    pub height: u32,
    pub params: EditParams,
    pub history_len: usize,
    pub history_capacity: usize,
}

/// One loaded image and its edits.
///
/// Every filter and adjustment is recomputed from `original`, so repeated
/// edits never accumulate rounding drift. Only discrete filter choices are
/// recorded in the history; adjustments replace `edited` in place.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: ImageBuffer,
    edited: ImageBuffer,
    history: BoundedHistory<ImageBuffer>,
    params: EditParams,
}

impl EditSession {
    pub fn new(image: ImageBuffer) -> Result<Self, DomainError> {
        Self::with_history_capacity(image, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(image: ImageBuffer, capacity: usize) -> Result<Self, DomainError> {
        image.ensure_editable()?;
        Ok(Self {
            edited: image.clone(),
            original: image,
            history: BoundedHistory::new(capacity),
            params: EditParams::default(),
        })
    }

    /// Replaces the whole session. On error nothing changes.
    pub fn load(&mut self, image: ImageBuffer) -> Result<(), DomainError> {
        image.ensure_editable()?;
        self.edited = image.clone();
        self.original = image;
        self.history.clear();
        self.params = EditParams::default();
        Ok(())
    }

    pub fn apply_filter(&mut self, kind: FilterKind) {
        self.history.push(self.edited.clone());
        if kind == FilterKind::None {
            self.reset();
            return;
        }
        self.edited = filters::apply_filter(&self.original, kind);
        self.params.filter = kind;
    }

    pub fn adjust_exposure(&mut self, factor: f32) -> Result<(), DomainError> {
        let factor = Adjustment::Exposure.validate(factor)?;
        self.edited = filters::exposure(&self.original, factor);
        self.params.exposure = factor;
        Ok(())
    }

    pub fn adjust_saturation(&mut self, factor: f32) -> Result<(), DomainError> {
        let factor = Adjustment::Saturation.validate(factor)?;
        self.edited = filters::saturation(&self.original, factor);
        self.params.saturation = factor;
        Ok(())
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.edited = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.edited = self.original.clone();
        self.params = EditParams::default();
    }

    pub fn original(&self) -> &ImageBuffer {
        &self.original
    }

    pub fn edited(&self) -> &ImageBuffer {
        &self.edited
    }

    pub fn params(&self) -> EditParams {
        self.params
    }

    pub fn active_filter(&self) -> FilterKind {
        self.params.filter
    }

    pub fn exposure_factor(&self) -> f32 {
        self.params.exposure
    }

    pub fn saturation_factor(&self) -> f32 {
        self.params.saturation
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            width: self.original.width(),
            height: self.original.height(),
            params: self.params,
            history_len: self.history.len(),
            history_capacity: self.history.capacity(),
        }
    }
}
