use crux_core::{render::render, Command};

use crate::api_get_silent;
use crate::events::{Event, RouterEvent};
use crate::model::Model;
use crate::types::{resolve, DeviceStatus, Section};
use crate::Effect;

/// Handle routing events (startup status check, navigation, hash changes)
pub fn handle(event: RouterEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        RouterEvent::Initialize { fragment } => {
            model.start_loading();
            model.pending_fragment = Some(fragment);
            Command::all([
                render(),
                api_get_silent!(Router, RouterEvent, "/api/status", StatusResponse, DeviceStatus),
            ])
        }

        RouterEvent::StatusResponse(result) => {
            model.is_loading = false;
            match result {
                Ok(status) => {
                    model.setup_complete = status.setup_complete;
                    model.status = Some(status);
                }
                Err(e) => {
                    // Default to setup mode if we can't check
                    log::error!("Error checking setup status: {e}");
                    model.setup_complete = false;
                }
            }
            apply_navigation(model);
            let fragment = model.pending_fragment.take().unwrap_or_default();
            let section = resolve(&fragment, model.setup_complete);
            navigate(section, model)
        }

        RouterEvent::HashChanged { fragment } => {
            let section = resolve(&fragment, model.setup_complete);
            navigate(section, model)
        }

        RouterEvent::Navigate { section } => {
            let section = resolve(section.fragment(), model.setup_complete);
            navigate(section, model)
        }
    }
}

/// Recompute which navigation links are visible for the current setup state
fn apply_navigation(model: &mut Model) {
    model.visible_sections = Section::visible_for(model.setup_complete);
}

/// Switch the displayed section and kick off its data load.
///
/// Callers must pass a section already resolved against the current setup
/// state; this keeps the displayed section valid at all times.
pub fn navigate(section: Section, model: &mut Model) -> Command<Effect, Event> {
    model.current_section = section;
    model.section_error = None;

    Command::all([render(), load_section(section, model)])
}

fn load_section(section: Section, model: &mut Model) -> Command<Effect, Event> {
    match section {
        // The setup section fetches nothing until the user scans or submits
        Section::Setup => Command::done(),
        Section::Widgets => super::widgets::load(model),
        Section::Settings => super::settings::load(model),
    }
}

/// Promote the session to "setup complete".
///
/// Called from every code path that learns setup has finished (save
/// confirmation or a connection check response). Idempotent: once the flag
/// is set further calls do nothing, so the navigation side effect fires
/// exactly once per session.
pub fn handle_setup_complete(model: &mut Model) -> Command<Effect, Event> {
    if model.setup_complete {
        return Command::done();
    }

    model.setup_complete = true;
    apply_navigation(model);

    if model.current_section == Section::Setup {
        navigate(Section::Widgets, model)
    } else {
        render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod status_gating {
        use super::*;

        #[test]
        fn failed_status_check_defaults_to_setup() {
            let mut model = Model {
                pending_fragment: Some("widgets".to_string()),
                ..Default::default()
            };

            let _ = handle(
                RouterEvent::StatusResponse(Err("Load failed".to_string())),
                &mut model,
            );

            assert!(!model.setup_complete);
            assert_eq!(model.current_section, Section::Setup);
            assert_eq!(model.visible_sections, vec![Section::Setup]);
        }

        #[test]
        fn completed_status_redirects_setup_fragment_to_widgets() {
            let mut model = Model {
                pending_fragment: Some("setup".to_string()),
                ..Default::default()
            };

            let status = DeviceStatus {
                setup_complete: true,
                ..Default::default()
            };
            let _ = handle(RouterEvent::StatusResponse(Ok(status)), &mut model);

            assert!(model.setup_complete);
            assert_eq!(model.current_section, Section::Widgets);
            assert_eq!(
                model.visible_sections,
                vec![Section::Widgets, Section::Settings]
            );
        }

        #[test]
        fn missing_completion_flag_reads_as_incomplete() {
            let status: DeviceStatus = serde_json::from_str("{}").unwrap();
            assert!(!status.setup_complete);
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn hash_change_to_gated_section_is_coerced() {
            let mut model = Model::default();

            let _ = handle(
                RouterEvent::HashChanged {
                    fragment: "settings".to_string(),
                },
                &mut model,
            );

            assert_eq!(model.current_section, Section::Setup);
        }

        #[test]
        fn navigate_clears_previous_section_error() {
            let mut model = Model {
                setup_complete: true,
                section_error: Some("Failed to load widgets section.".to_string()),
                ..Default::default()
            };

            let _ = handle(
                RouterEvent::Navigate {
                    section: Section::Settings,
                },
                &mut model,
            );

            assert_eq!(model.current_section, Section::Settings);
            assert_eq!(model.section_error, None);
        }
    }

    mod setup_promotion {
        use super::*;

        #[test]
        fn promotion_moves_away_from_setup() {
            let mut model = Model::default();

            let _ = handle_setup_complete(&mut model);

            assert!(model.setup_complete);
            assert_eq!(model.current_section, Section::Widgets);
            assert_eq!(
                model.visible_sections,
                vec![Section::Widgets, Section::Settings]
            );
        }

        #[test]
        fn promotion_keeps_current_section_when_not_on_setup() {
            let mut model = Model {
                setup_complete: false,
                current_section: Section::Widgets,
                ..Default::default()
            };

            let _ = handle_setup_complete(&mut model);

            assert_eq!(model.current_section, Section::Widgets);
        }

        #[test]
        fn promotion_is_idempotent() {
            let mut model = Model::default();

            let _ = handle_setup_complete(&mut model);
            model.current_section = Section::Settings;
            let _ = handle_setup_complete(&mut model);

            // A second promotion must not force another navigation
            assert_eq!(model.current_section, Section::Settings);
        }
    }
}
