// src/render/handwriting.rs
//
// A live handwriting surface: takes render requests, waits for the
// font, memoizes the draw model and drives the playback engine.
// Hosts call `update` when inputs change and `frame` on every refresh.

use super::request::{ModelKey, RenderRequest};
use crate::fonts::{FontCache, FontEntry, FontLookup};
use crate::playback::{
    InkColor, PixmapSurface, PlaybackEngine, PlaybackOptions, Presentation, RasterSurface,
};
use crate::timeline::{build_draw_model, DrawModel};
use log::{debug, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct PresentedKey {
    model: ModelKey,
    options: PlaybackOptions,
    color: InkColor,
    playhead: u64,
}

pub struct HandwritingSurface {
    cache: FontCache,
    request: RenderRequest,
    font_ref: Option<String>,
    font: Option<Arc<FontEntry>>,
    warned: bool,
    built: Option<(ModelKey, Arc<DrawModel>)>,
    presented: Option<PresentedKey>,
    // set by a font switch: the next ready font presents as a restart,
    // even when its key matches what was last shown
    stale: bool,
    engine: PlaybackEngine,
    surface: PixmapSurface,
}

impl HandwritingSurface {
    pub fn new(request: RenderRequest) -> Self {
        Self::with_cache(FontCache::new(), request)
    }

    /// Shares `cache` with other surfaces.
    pub fn with_cache(cache: FontCache, request: RenderRequest) -> Self {
        Self {
            cache,
            request,
            font_ref: None,
            font: None,
            warned: false,
            built: None,
            presented: None,
            stale: false,
            engine: PlaybackEngine::new(),
            surface: PixmapSurface::default(),
        }
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn surface(&self) -> &PixmapSurface {
        &self.surface
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn model(&self) -> Option<&Arc<DrawModel>> {
        self.built.as_ref().map(|(_, model)| model)
    }

    pub fn cache(&self) -> &FontCache {
        &self.cache
    }

    /// Waiting on the font for the current request.
    pub fn is_loading(&self) -> bool {
        self.font.is_none()
            && self
                .cache
                .lookup(&self.request.font_ref)
                .is_some_and(|lookup| lookup.is_pending())
    }

    pub fn update(&mut self, request: RenderRequest, now: f64) {
        self.request = request;
        self.sync(now);
    }

    /// One display refresh. Returns whether the host should keep
    /// calling, either for animation or for a pending font.
    pub fn frame(&mut self, now: f64) -> bool {
        self.sync(now);
        let animating = self.engine.tick(now, &mut self.surface);
        animating || self.is_loading()
    }

    /// Stops the frame loop. The last frame stays on the surface.
    pub fn release(&mut self) {
        self.engine.release();
    }

    fn sync(&mut self, now: f64) {
        if self.font_ref.as_deref() != Some(self.request.font_ref.as_str()) {
            // a late result for the old reference is simply never read
            self.font_ref = Some(self.request.font_ref.clone());
            self.font = None;
            self.warned = false;
            self.built = None;
            self.stale = true;
            self.engine.release();
        }

        let Some(font) = self.resolve_font() else {
            return;
        };
        let Some(model) = self.ensure_model(&font) else {
            return;
        };

        let key = PresentedKey {
            model: self.request.model_key(),
            options: self.request.playback_options(),
            color: self.request.color,
            playhead: self.request.playhead,
        };
        if !self.stale && self.presented.as_ref() == Some(&key) {
            return;
        }

        let force_restart = self.stale
            || self
                .presented
                .as_ref()
                .is_some_and(|previous| previous.model.settings != key.model.settings);
        let presentation = Presentation {
            text: &self.request.text,
            options: key.options,
            color: key.color,
            replay_token: key.playhead,
            force_restart,
        };
        self.engine.present(model, presentation, now, &mut self.surface);
        self.presented = Some(key);
        self.stale = false;
    }

    fn resolve_font(&mut self) -> Option<Arc<FontEntry>> {
        if let Some(font) = &self.font {
            return Some(Arc::clone(font));
        }
        match self.cache.request(&self.request.font_ref) {
            FontLookup::Ready(entry) => {
                self.font = Some(Arc::clone(&entry));
                Some(entry)
            }
            FontLookup::Pending => None,
            FontLookup::Failed(error) => {
                if !self.warned {
                    warn!("{}", error);
                    self.warned = true;
                }
                None
            }
        }
    }

    fn ensure_model(&mut self, font: &FontEntry) -> Option<Arc<DrawModel>> {
        let key = self.request.model_key();
        if let Some((built_key, model)) = &self.built {
            if *built_key == key {
                return Some(Arc::clone(model));
            }
        }

        let face = match font.face() {
            Ok(face) => face,
            Err(error) => {
                if !self.warned {
                    warn!("{}", error);
                    self.warned = true;
                }
                return None;
            }
        };
        let params = self.request.timeline_params(font.profile());
        let model = Arc::new(build_draw_model(&face, &self.request.text, &params));
        debug!(
            "model for {:?}: {}x{} px",
            self.request.text, model.width, model.height
        );
        self.built = Some((key, Arc::clone(&model)));
        Some(model)
    }

    /// Current raster size, for hosts that size textures.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.surface.size()
    }
}
