use super::Menu;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum MenuEvent {
    Expanding,
    Expanded,
    Collapsing,
    Collapsed,
    Measured,
}

/// Lifecycle hooks of a [`Menu`]. Every hook defaults to a no-op.
///
/// Listeners are called in the order they were added, after the menu's state
/// has been updated, so `menu.state()` already reflects the event.
pub trait MenuListener<I> {
    fn on_expanding(&mut self, _menu: &Menu<I>) {}
    fn on_expanded(&mut self, _menu: &Menu<I>) {}
    fn on_collapsing(&mut self, _menu: &Menu<I>) {}
    fn on_collapsed(&mut self, _menu: &Menu<I>) {}
    fn on_measured(&mut self, _menu: &Menu<I>) {}
}

impl<I, F> MenuListener<I> for F
where
    F: FnMut(MenuEvent, &Menu<I>),
{
    fn on_expanding(&mut self, menu: &Menu<I>) {
        self(MenuEvent::Expanding, menu);
    }

    fn on_expanded(&mut self, menu: &Menu<I>) {
        self(MenuEvent::Expanded, menu);
    }

    fn on_collapsing(&mut self, menu: &Menu<I>) {
        self(MenuEvent::Collapsing, menu);
    }

    fn on_collapsed(&mut self, menu: &Menu<I>) {
        self(MenuEvent::Collapsed, menu);
    }

    fn on_measured(&mut self, menu: &Menu<I>) {
        self(MenuEvent::Measured, menu);
    }
}

impl MenuEvent {
    pub(crate) fn dispatch<I>(self, listener: &mut dyn MenuListener<I>, menu: &Menu<I>) {
        match self {
            Self::Expanding => listener.on_expanding(menu),
            Self::Expanded => listener.on_expanded(menu),
            Self::Collapsing => listener.on_collapsing(menu),
            Self::Collapsed => listener.on_collapsed(menu),
            Self::Measured => listener.on_measured(menu),
        }
    }
}
