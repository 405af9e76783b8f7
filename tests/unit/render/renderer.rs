use super::*;
use crate::{
    assets::{decode::FrameImage, sequence::FrameSequenceSpec, source::MemorySource, store::LoadOptions},
    foundation::core::Rect,
};

#[derive(Debug, Default)]
struct Recorder {
    viewport: Option<Viewport>,
    ops: Vec<String>,
}

impl DrawSurface for Recorder {
    fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or(Viewport {
            width: 800.0,
            height: 600.0,
            dpr: 1.0,
        })
    }

    fn resize(&mut self, viewport: Viewport) -> ZenithResult<()> {
        self.viewport = Some(viewport);
        self.ops.push(format!("resize {}x{}@{}", viewport.width, viewport.height, viewport.dpr));
        Ok(())
    }

    fn clear(&mut self) {
        self.ops.push("clear".to_string());
    }

    fn draw_image(&mut self, image: &FrameImage, dest: Rect) -> ZenithResult<()> {
        self.ops.push(format!(
            "draw {}x{} -> {},{} {}x{}",
            image.width,
            image.height,
            dest.x0,
            dest.y0,
            dest.width(),
            dest.height()
        ));
        Ok(())
    }
}

fn loaded_store(count: u32, w: u32, h: u32) -> FrameStore {
    let spec = FrameSequenceSpec {
        count,
        directory: "f".to_string(),
        prefix: "".to_string(),
        extension: ".png".to_string(),
    };
    let mut src = MemorySource::new();
    for idx in spec.indices() {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([idx.0 as u8, 0, 0, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        src.insert(&spec.relative_path(idx), buf).unwrap();
    }
    let mut store = FrameStore::new(spec);
    store.load(&src, &LoadOptions::default(), |_| {}).unwrap();
    store
}

#[test]
fn draw_clears_then_cover_fits() {
    let store = loaded_store(3, 400, 400);
    let mut r = CanvasRenderer::new(Recorder::default());
    assert!(r.draw(FrameIndex(2), &store).unwrap());
    assert_eq!(
        r.surface().ops,
        vec!["clear".to_string(), "draw 400x400 -> 0,-100 800x800".to_string()]
    );
    assert_eq!(r.draw_count(), 1);
}

#[test]
fn draw_before_ready_is_a_noop() {
    let store = FrameStore::new(FrameSequenceSpec::default());
    let mut r = CanvasRenderer::new(Recorder::default());
    assert!(!r.draw(FrameIndex(1), &store).unwrap());
    assert!(r.surface().ops.is_empty());
    assert_eq!(r.draw_count(), 0);
    assert_eq!(r.current_index(), Some(FrameIndex(1)));
}

#[test]
fn resize_redraws_same_frame() {
    let store = loaded_store(3, 400, 300);
    let mut r = CanvasRenderer::new(Recorder::default());
    r.draw(FrameIndex(3), &store).unwrap();

    let vp = Viewport::new(1024.0, 768.0, 2.0).unwrap();
    assert!(r.resize(vp, &store).unwrap());
    assert_eq!(r.current_index(), Some(FrameIndex(3)));
    let first = r.surface().ops.clone();
    assert_eq!(first[2], "resize 1024x768@2");
    assert_eq!(first[3], "clear");
    assert_eq!(first[4], "draw 400x300 -> 0,0 1024x768");

    // Repeating the same resize is harmless.
    assert!(r.resize(vp, &store).unwrap());
    assert_eq!(r.surface().ops[5..], first[2..5]);
}

#[test]
fn resize_without_frame_only_reallocates() {
    let store = loaded_store(1, 10, 10);
    let mut r = CanvasRenderer::new(Recorder::default());
    assert!(!r.resize(Viewport::new(10.0, 10.0, 1.0).unwrap(), &store).unwrap());
    assert_eq!(r.surface().ops, vec!["resize 10x10@1".to_string()]);
}

#[test]
fn cpu_renderer_paints_pixels() {
    let store = loaded_store(2, 4, 4);
    let mut r = CanvasRenderer::cpu(Viewport::new(8.0, 8.0, 1.0).unwrap(), [0, 0, 0, 255]).unwrap();
    r.draw(FrameIndex(2), &store).unwrap();
    assert_eq!(r.surface().pixel(3, 3), Some([2, 0, 0, 255]));
}
