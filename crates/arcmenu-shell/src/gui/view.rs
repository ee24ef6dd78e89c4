use super::surface::ItemSurface;
use super::theme::ThemeColors;
use arcmenu::{Point, Surface, Visibility};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

const LABEL_SIZE_FACTOR: f64 = 0.4;

struct ItemRenderer<'a> {
    item: &'a ItemSurface,
    center: Point,
    radius: f64,
}

impl<'a> ItemRenderer<'a> {
    fn new(item: &'a ItemSurface, anchor: Point) -> Self {
        Self {
            item,
            center: item.center(anchor),
            radius: item.radius(),
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        // Fully collapsed.
        if self.radius <= 0.0 {
            return Ok(());
        }
        fill_circle(cr, self.center, self.radius, colors.item, self.item.alpha())?;
        self.draw_label(cr, colors)
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.label.into_components();
        cr.set_source_rgba(r, g, b, a * self.item.alpha());
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.radius * 2.0 * LABEL_SIZE_FACTOR);
        if let Ok(ext) = cr.text_extents(&self.item.label) {
            cr.move_to(
                self.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.center.y - ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(&self.item.label)?;
        }
        Ok(())
    }
}

fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
    alpha: f64,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

/// Paints the visible items around `anchor`, in menu window coordinates.
pub fn draw_items(
    cr: &Context,
    items: &[ItemSurface],
    anchor: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for item in items
        .iter()
        .filter(|item| item.visibility() == Visibility::Visible)
    {
        ItemRenderer::new(item, anchor).draw(cr, colors)?;
    }
    Ok(())
}

/// The trigger fills its window; window opacity carries its alpha.
pub fn draw_trigger(
    cr: &Context,
    width: i32,
    height: i32,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (w, h) = (width as f64, height as f64);
    fill_circle(cr, Point::new(w / 2.0, h / 2.0), w.min(h) / 2.0, colors.trigger, 1.0)
}
