use arcmenu::config;
use arcmenu::sys::runtime;
use arcmenu_shell::gui::app::AppModel;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write the default config: {}", e);
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Control socket and config watcher.
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.arcmenu.arcmenu");

    app.run::<AppModel>((config, rx));
}
