use crate::gui::surface::{self, ItemSurface, WindowSurface};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{view, window};
use arcmenu::config::{self, Config};
use arcmenu::events::AppEvent;
use arcmenu::{Overlay, Point, Size, Surface};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type ShellOverlay = Overlay<WindowSurface, ItemSurface>;

pub struct AppModel {
    pub overlay: Rc<RefCell<ShellOverlay>>,
    pub trigger_area: gtk::DrawingArea,
    pub menu_area: gtk::DrawingArea,
    pub started: Instant,
}

#[derive(Debug)]
pub enum AppMsg {
    /// Pointer positions are local to the trigger window.
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerCancel,
    /// Release inside the menu window, in its coordinates.
    MenuClick(Point),
    Tick,
    Toggle,
    Expand,
    Collapse,
    Show,
    Hide,
    Snap,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Expand => AppMsg::Expand,
            AppEvent::Collapse => AppMsg::Collapse,
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Snap => AppMsg::Snap,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn items_from(config: &Config, screen: Size) -> Vec<ItemSurface> {
    config
        .items
        .iter()
        .map(|item| ItemSurface::new(item.label.clone(), item.size, screen))
        .collect()
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("arcmenu"),
            add_css_class: "arcmenu-window",
            set_decorated: false,
            set_resizable: false,

            #[name = "trigger_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "arcmenu-drawing-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerDown(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerUp(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::PointerCancel);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root, "arcmenu-trigger");

        let menu_window = gtk::Window::new();
        menu_window.set_application(Some(&relm4::main_application()));
        menu_window.set_decorated(false);
        menu_window.add_css_class("arcmenu-window");
        window::init_layer_shell(&menu_window, "arcmenu-menu");

        let menu_area = gtk::DrawingArea::new();
        menu_area.add_css_class("arcmenu-drawing-area");
        menu_window.set_child(Some(&menu_area));

        let overlay_config = config.overlay().unwrap_or_else(|e| {
            log::error!("Falling back to defaults: {}", e);
            Default::default()
        });
        let screen = window::screen_size().unwrap_or(window::FALLBACK_SCREEN);
        let trigger_size = Size::new(config.trigger.size, config.trigger.size);
        let trigger = WindowSurface::new(
            root.clone().upcast(),
            Point::new(0.0, (screen.height - trigger_size.height) / 2.0),
            trigger_size,
            screen,
        );
        let menu = WindowSurface::new(menu_window, Point::ZERO, Size::default(), screen);

        let mut overlay = Overlay::new(trigger, menu, items_from(&config, screen), overlay_config);
        if let Err(e) = overlay.measure() {
            log::error!("Failed to lay out the menu: {}", e);
        }
        let overlay = Rc::new(RefCell::new(overlay));

        let widgets = view_output!();

        let model = AppModel {
            overlay: overlay.clone(),
            trigger_area: widgets.trigger_area.clone(),
            menu_area: menu_area.clone(),
            started: Instant::now(),
        };

        widgets
            .trigger_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                if let Err(e) = view::draw_trigger(cr, width, height, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let overlay_draw = overlay.clone();
        menu_area.set_draw_func(move |area, cr, _, _| {
            let Ok(overlay) = overlay_draw.try_borrow() else {
                return;
            };
            let colors = ThemeColors::from_context(&area.style_context());
            let items = overlay.menu().items();
            if let Err(e) = view::draw_items(cr, items, overlay.menu_anchor(), &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        let click = gtk::GestureClick::new();
        let sender_click = sender.clone();
        click.connect_released(move |_, _, x, y| {
            sender_click.input(AppMsg::MenuClick(Point::new(x, y)));
        });
        menu_area.add_controller(click);

        let sender_tick = sender.clone();
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            sender_tick.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = self.started.elapsed();
        match msg {
            AppMsg::PointerDown(local) => {
                let mut overlay = self.overlay.borrow_mut();
                let pointer = overlay.trigger().surface().position() + local;
                overlay.pointer_down(pointer, now);
            }
            AppMsg::PointerMove(local) => {
                let mut overlay = self.overlay.borrow_mut();
                let pointer = overlay.trigger().surface().position() + local;
                overlay.pointer_move(pointer);
            }
            AppMsg::PointerUp(local) => {
                let mut overlay = self.overlay.borrow_mut();
                let pointer = overlay.trigger().surface().position() + local;
                if let Err(e) = overlay.pointer_up(pointer, now) {
                    log::error!("Failed to open the menu: {}", e);
                }
            }
            AppMsg::PointerCancel => {
                self.overlay.borrow_mut().pointer_cancel();
            }
            AppMsg::MenuClick(local) => {
                let mut overlay = self.overlay.borrow_mut();
                let anchor = overlay.menu_anchor();
                let hit = overlay
                    .menu()
                    .items()
                    .iter()
                    .find(|item| item.contains(anchor, local))
                    .map(|item| item.label.clone());
                match hit {
                    Some(label) => {
                        log::info!("Selected {}", label);
                        overlay.collapse();
                    }
                    None => overlay.dismiss(),
                }
            }
            AppMsg::Tick => self.tick(now),
            AppMsg::Toggle => {
                if let Err(e) = self.overlay.borrow_mut().toggle() {
                    log::error!("Failed to toggle the menu: {}", e);
                }
            }
            AppMsg::Expand => {
                if let Err(e) = self.overlay.borrow_mut().expand() {
                    log::error!("Failed to open the menu: {}", e);
                }
            }
            AppMsg::Collapse => self.overlay.borrow_mut().dismiss(),
            AppMsg::Show => self.overlay.borrow_mut().show(),
            AppMsg::Hide => self.overlay.borrow_mut().hide(),
            AppMsg::Snap => {
                self.overlay.borrow_mut().snap();
            }
            AppMsg::ConfigReload => match self.reload() {
                Ok(()) => log::info!("Configuration reloaded"),
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.menu_area.queue_draw();
    }
}

impl AppModel {
    fn tick(&self, now: Duration) {
        let mut overlay = self.overlay.borrow_mut();
        let mut finished: Vec<_> = overlay
            .menu_mut()
            .items_mut()
            .iter_mut()
            .filter_map(|item| surface::tick(item, now))
            .collect();
        finished.extend(surface::tick(overlay.trigger_mut().surface_mut(), now));
        finished.extend(surface::tick(overlay.menu_window_mut(), now));

        for ticket in finished {
            overlay.on_animation_end(ticket);
        }
    }

    fn reload(&self) -> anyhow::Result<()> {
        let config = config::load_config()?;
        let overlay_config = config.overlay()?;

        let mut overlay = self.overlay.borrow_mut();
        let screen = overlay.trigger().surface().screen_size();
        overlay
            .trigger_mut()
            .surface_mut()
            .resize(Size::new(config.trigger.size, config.trigger.size));
        overlay.set_items(items_from(&config, screen));
        overlay.set_config(overlay_config)?;
        self.trigger_area.queue_draw();
        Ok(())
    }
}
