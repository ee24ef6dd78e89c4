use arcmenu::{Point, Size};
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

pub const FALLBACK_SCREEN: Size = Size::new(1920.0, 1080.0);

/// Overlay layer, pinned to the top-left corner so that margins act as the
/// window's screen position.
pub fn init_layer_shell(window: &impl IsA<gtk::Window>, namespace: &str) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some(namespace));
    window.set_exclusive_zone(-1);
    window.set_anchor(Edge::Left, true);
    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Right, false);
    window.set_anchor(Edge::Bottom, false);
    window.set_keyboard_mode(KeyboardMode::None);
}

pub fn place(window: &impl IsA<gtk::Window>, position: Point) {
    window.set_margin(Edge::Left, position.x.round() as i32);
    window.set_margin(Edge::Top, position.y.round() as i32);
}

/// Geometry of the first monitor.
pub fn screen_size() -> Option<Size> {
    let display = gdk::Display::default()?;
    let monitor = display
        .monitors()
        .item(0)
        .and_then(|item| item.downcast::<gdk::Monitor>().ok())?;
    let geometry = monitor.geometry();
    Some(Size::new(geometry.width() as f64, geometry.height() as f64))
}
