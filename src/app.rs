// Start-up and the window loop.
// Start-up runs to completion (document, page, render, highlight) before the
// window exists, so no pointer event can arrive against a half-built surface.

use crate::config::ViewerConfig;
use crate::draw::Drawer;
use crate::engine::AnnotationEngine;
use crate::error::Error;
use crate::input::PointerTracker;
use crate::raster;
use crate::surface::PixelSurface;
use crate::types::FrameBuffer;

/// Render the configured page and wrap it in an engine with highlights already painted.
pub fn load(config: &ViewerConfig) -> Result<AnnotationEngine<FrameBuffer>, Error> {
    log::info!("Opening {}", config.document);
    let document = raster::open_document(&config.document)?;
    let page = document.get_page(config.page)?;

    let mut surface = FrameBuffer::filled(0, 0, 0);
    let (w, h) = document.render_page(page, config.scale, &mut surface)?;
    log::info!(
        "Rendered page {}/{} at scale {} -> {}x{}",
        page.number(),
        document.page_count(),
        config.scale,
        w,
        h
    );

    for r in &config.regions {
        if r.x2 < 0 || r.y2 < 0 || r.x1 >= w as i32 || r.y1 >= h as i32 {
            log::warn!("Region ({}, {}, {}, {}) lies outside the {w}x{h} page", r.x1, r.y1, r.x2, r.y2);
        }
    }

    let mut engine = AnnotationEngine::new(surface, config.regions.clone(), &config.style)
        .with_reassert_highlights_on_undo(config.reassert_highlights_on_undo);
    engine.highlight_regions();
    Ok(engine)
}

fn title(document: &str, undo_depth: usize) -> String {
    format!("{document} | undo: {undo_depth} (Ctrl+Z)")
}

pub fn run(config: ViewerConfig) -> Result<(), Error> {
    let mut engine = load(&config)?;
    let (w, h) = engine.surface().size();
    let mut drawer = Drawer::new(&title(&config.document, 0), w, h)?;
    let mut tracker = PointerTracker::new();
    let mut shown_depth = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        for event in tracker.poll(drawer.mouse_pos(), drawer.left_mouse_down()) {
            engine.dispatch(event);
        }
        if drawer.undo_pressed_once() {
            engine.undo();
        }

        if engine.undo_depth() != shown_depth {
            shown_depth = engine.undo_depth();
            drawer.set_title(&title(&config.document, shown_depth));
        }

        drawer.present(engine.surface())?;
    }

    log::info!("Window closed with {} stroke(s) on the undo stack", engine.undo_depth());
    Ok(())
}
