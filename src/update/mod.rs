pub mod router;
pub mod settings;
pub mod setup;
pub mod ui;
pub mod widgets;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Router(event) => router::handle(event, model),
        Event::Setup(event) => setup::handle(event, model),
        Event::Widgets(event) => widgets::handle(event, model),
        Event::Settings(event) => settings::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
