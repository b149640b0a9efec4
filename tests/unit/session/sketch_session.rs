use std::io::Cursor;

use super::*;
use crate::bridge::file_bridge::BridgeKind;
use crate::bridge::sandboxed::SandboxedBridge;
use crate::tool::state::{Tone, ToolKind};

fn pad(w: u32, h: u32) -> Sketchpad {
    Sketchpad::new(
        Canvas::new(w, h).unwrap(),
        SketchOpts::default(),
        Box::new(SandboxedBridge::new()),
    )
    .unwrap()
}

fn draw_line(p: &mut Sketchpad, y: f64) {
    p.pointer_down(PointerEvent::with_pressure(6.0, y, 1.0))
        .unwrap();
    for i in 1..10 {
        p.pointer_move(PointerEvent::with_pressure(6.0 + i as f64 * 5.0, y, 1.0))
            .unwrap();
    }
    p.pointer_up().unwrap();
}

fn visible(p: &Sketchpad) -> Vec<u8> {
    p.compositor().visible_rgba8_premul().to_vec()
}

fn red_png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([230, 0, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn starts_blank_with_one_undo_entry() {
    let p = pad(32, 32);
    assert_eq!(p.history_depth(), 1);
    assert_eq!(p.status(), "Pencil");
    assert!(visible(&p).iter().all(|&b| b == 255));
    assert!(!p.is_drawing());
    assert_eq!(p.bridge().kind(), BridgeKind::Sandboxed);
}

#[test]
fn stroke_paints_scratch_until_release() {
    let mut p = pad(64, 64);
    p.pointer_down(PointerEvent::at(6.0, 30.0)).unwrap();
    for i in 1..8 {
        p.pointer_move(PointerEvent::at(6.0 + i as f64 * 6.0, 30.0))
            .unwrap();
    }
    assert!(p.is_drawing());
    assert!(visible(&p).iter().all(|&b| b == 255));
    assert_ne!(p.frame().unwrap().pixel(24, 30).unwrap(), [255; 4]);

    p.pointer_up().unwrap();
    assert!(!p.is_drawing());
    assert_eq!(p.history_depth(), 2);
    assert_ne!(p.frame().unwrap().pixel(24, 30).unwrap(), [255; 4]);
    assert!(p.compositor().scratch_rgba8_premul().iter().all(|&b| b == 0));
}

#[test]
fn moves_and_releases_without_a_press_are_ignored() {
    let mut p = pad(16, 16);
    p.pointer_move(PointerEvent::at(3.0, 3.0)).unwrap();
    p.pointer_up().unwrap();
    assert_eq!(p.history_depth(), 1);
}

#[test]
fn tap_leaves_no_mark_but_records_undo_point() {
    let mut p = pad(16, 16);
    p.pointer_down(PointerEvent::at(5.0, 5.0)).unwrap();
    p.pointer_move(PointerEvent::at(6.0, 5.0)).unwrap();
    p.pointer_up().unwrap();
    assert_eq!(p.history_depth(), 2);
    assert!(visible(&p).iter().all(|&b| b == 255));
}

#[test]
fn undo_is_deferred_until_settle() {
    let mut p = pad(64, 64);
    let blank = visible(&p);
    draw_line(&mut p, 30.0);
    let drawn = visible(&p);
    assert_ne!(drawn, blank);

    assert!(p.undo().unwrap());
    assert!(p.has_pending_paint());
    assert_eq!(visible(&p), drawn);

    assert_eq!(p.settle().unwrap(), 1);
    assert_eq!(visible(&p), blank);
    assert!(!p.has_pending_paint());

    assert!(!p.undo().unwrap());
    assert_eq!(p.settle().unwrap(), 0);
    assert_eq!(visible(&p), blank);
}

#[test]
fn rapid_undos_collapse_to_latest_restore() {
    let mut p = pad(64, 64);
    let blank = visible(&p);
    draw_line(&mut p, 10.0);
    draw_line(&mut p, 30.0);
    draw_line(&mut p, 50.0);
    assert_eq!(p.history_depth(), 4);

    for _ in 0..3 {
        assert!(p.undo().unwrap());
    }
    assert_eq!(p.settle().unwrap(), 1);
    assert_eq!(p.history_depth(), 1);
    assert_eq!(visible(&p), blank);
}

#[test]
fn new_stroke_settles_pending_restore_first() {
    let mut p = pad(64, 64);
    draw_line(&mut p, 10.0);
    let after_first = visible(&p);
    draw_line(&mut p, 30.0);

    p.undo().unwrap();
    draw_line(&mut p, 50.0);
    assert!(!p.has_pending_paint());
    assert_eq!(p.history_depth(), 3);

    p.undo().unwrap();
    p.settle().unwrap();
    assert_eq!(visible(&p), after_first);
}

#[test]
fn release_after_mid_stroke_undo_commits_over_restored_canvas() {
    let mut p = pad(64, 64);
    draw_line(&mut p, 10.0);
    assert_ne!(p.frame().unwrap().pixel(24, 10).unwrap(), [255; 4]);

    p.pointer_down(PointerEvent::with_pressure(6.0, 50.0, 1.0))
        .unwrap();
    for i in 1..10 {
        p.pointer_move(PointerEvent::with_pressure(6.0 + i as f64 * 5.0, 50.0, 1.0))
            .unwrap();
    }
    assert!(p.undo().unwrap());
    assert!(p.is_drawing());

    p.pointer_up().unwrap();
    assert!(!p.is_drawing());
    assert!(!p.has_pending_paint());
    assert_eq!(p.history_depth(), 2);
    let frame = p.frame().unwrap();
    assert_eq!(frame.pixel(24, 10).unwrap(), [255; 4]);
    assert_ne!(frame.pixel(24, 50).unwrap(), [255; 4]);
    assert!(p.compositor().scratch_rgba8_premul().iter().all(|&b| b == 0));
}

#[test]
fn corrupt_snapshot_leaves_canvas_unchanged() {
    let mut p = pad(32, 32);
    draw_line(&mut p, 16.0);
    p.history
        .push(Snapshot::from_png(32, 32, b"corrupt".to_vec()));
    p.history
        .push(Snapshot::from_png(32, 32, b"corrupt".to_vec()));
    let before = visible(&p);
    assert!(p.undo().unwrap());
    p.settle().unwrap();
    assert_eq!(visible(&p), before);
}

#[test]
fn import_places_image_and_records_one_undo_point() {
    let mut bridge = SandboxedBridge::new();
    bridge.offer_file(red_png(10, 10));
    let mut p = Sketchpad::new(
        Canvas::new(100, 100).unwrap(),
        SketchOpts::default(),
        Box::new(bridge),
    )
    .unwrap();
    draw_line(&mut p, 5.0);
    assert_eq!(p.history_depth(), 2);

    assert!(p.open().unwrap());
    assert!(p.has_pending_paint());
    p.settle().unwrap();
    assert_eq!(p.history_depth(), 3);

    let frame = p.frame().unwrap();
    let center = frame.pixel(50, 50).unwrap();
    assert!(center[0] >= 225 && center[1] <= 5);
    assert_eq!(frame.pixel(5, 5).unwrap(), [255; 4]);

    assert!(!p.open().unwrap());
}

#[test]
fn undecodable_import_is_ignored() {
    let mut p = pad(32, 32);
    p.load_image(b"garbage".to_vec()).unwrap();
    p.settle().unwrap();
    assert_eq!(p.history_depth(), 1);
    assert!(visible(&p).iter().all(|&b| b == 255));
}

#[test]
fn undo_right_after_import_steps_back_over_it() {
    let mut p = pad(50, 50);
    draw_line(&mut p, 25.0);
    let drawn = visible(&p);

    p.load_image(red_png(4, 4)).unwrap();
    assert!(p.has_pending_paint());
    assert!(p.undo().unwrap());
    assert_eq!(p.history_depth(), 2);

    p.settle().unwrap();
    assert_eq!(visible(&p), drawn);
}

#[test]
fn clear_asks_for_confirmation() {
    let mut p = pad(32, 32);
    draw_line(&mut p, 16.0);
    let drawn = visible(&p);

    let mut asked = Vec::new();
    p.handle_shortcut(Shortcut::Clear, &mut |q: &str| {
        asked.push(q.to_string());
        false
    })
    .unwrap();
    assert_eq!(asked, vec![CLEAR_PROMPT.to_string()]);
    assert_eq!(visible(&p), drawn);
    assert_eq!(p.history_depth(), 2);

    p.handle_shortcut(Shortcut::Clear, &mut |_: &str| true)
        .unwrap();
    assert!(visible(&p).iter().all(|&b| b == 255));
    assert_eq!(p.history_depth(), 3);
}

#[test]
fn tool_shortcuts_update_state_and_status() {
    let mut p = pad(8, 8);
    let mut yes = |_: &str| true;
    p.handle_shortcut(Shortcut::Tool(ToolKind::Eraser), &mut yes)
        .unwrap();
    assert_eq!(p.tool().tool, ToolKind::Eraser);
    assert_eq!(p.status(), "Eraser");

    p.handle_shortcut(Shortcut::Tone(Tone::Medium), &mut yes)
        .unwrap();
    assert_eq!(p.tool().tool, ToolKind::Pencil);
    assert_eq!(p.status(), "Medium");

    p.handle_shortcut(Shortcut::Widen, &mut yes).unwrap();
    assert_eq!(p.tool().base_width, 12.0);
    p.handle_shortcut(Shortcut::Narrow, &mut yes).unwrap();
    p.handle_shortcut(Shortcut::Narrow, &mut yes).unwrap();
    assert_eq!(p.tool().base_width, 8.0);
}

#[test]
fn save_shortcut_downloads_png_in_sandbox() {
    let mut p = pad(16, 16);
    p.handle_shortcut(Shortcut::Save, &mut |_: &str| true)
        .unwrap();
    assert_eq!(p.status(), "Saved");
    let downloads = p.bridge_mut().take_downloads();
    assert_eq!(downloads.len(), 1);
    assert!(downloads[0].file_name.starts_with("sketch-"));
    assert_eq!(downloads[0].png, p.export_png().unwrap());
}

#[test]
fn resize_drops_active_stroke() {
    let mut p = pad(32, 32);
    p.pointer_down(PointerEvent::at(1.0, 1.0)).unwrap();
    p.resize(Canvas::new(48, 24).unwrap()).unwrap();
    assert!(!p.is_drawing());
    assert_eq!(p.canvas(), Canvas::new(48, 24).unwrap());
    p.pointer_up().unwrap();
    assert_eq!(p.history_depth(), 1);
    assert_eq!(p.frame().unwrap().data.len(), 48 * 24 * 4);
}

#[test]
fn invalid_options_are_rejected() {
    for undo_capacity in [0, usize::MAX] {
        let opts = SketchOpts {
            undo_capacity,
            ..SketchOpts::default()
        };
        assert!(
            Sketchpad::new(
                Canvas::new(8, 8).unwrap(),
                opts,
                Box::new(SandboxedBridge::new())
            )
            .is_err()
        );
    }
}
