use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::commands::timer::TimerOutput;
use crate::events::{Event, SetupEvent};
use crate::model::Model;
use crate::types::{
    sort_and_dedup, ConnectionCheckState, DeviceStatus, SaveConfigRequest, SetupForm, WifiNetwork,
    CONNECTION_CHECK_INTERVAL_MS, CONNECTION_CHECK_MAX_ATTEMPTS,
};
use crate::{api_get_silent, api_post, Effect, TimerCmd};

/// Handle setup section events (WiFi scan, setup form, connection check)
pub fn handle(event: SetupEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SetupEvent::ScanNetworks => {
            model.is_scanning = true;
            model.scan_error = None;
            Command::all([
                render(),
                api_get_silent!(
                    Setup,
                    SetupEvent,
                    "/api/scan",
                    ScanNetworksResponse,
                    Vec<WifiNetwork>
                ),
            ])
        }

        SetupEvent::ScanNetworksResponse(result) => {
            model.is_scanning = false;
            match result {
                Ok(networks) => model.networks = Some(sort_and_dedup(networks)),
                Err(e) => {
                    log::error!("WiFi scan failed: {e}");
                    model.scan_error = Some("Failed to scan networks".to_string());
                }
            }
            render()
        }

        SetupEvent::SaveSetup { form } => handle_save_setup(form, model),

        SetupEvent::SaveSetupResponse(result) => handle_save_setup_response(result, model),

        SetupEvent::ConnectionCheckTimer(output) => handle_connection_check_timer(output, model),

        SetupEvent::ConnectionCheckStatus(result) => handle_connection_check_status(result, model),

        SetupEvent::CancelConnectionCheck => handle_cancel_connection_check(model),
    }
}

fn handle_save_setup(form: SetupForm, model: &mut Model) -> Command<Effect, Event> {
    if let Err(e) = form.validate() {
        return model.set_error_and_render(format!("Invalid setup form: {e}"));
    }

    // Remember what was submitted for the success screen
    model.saved_device_name = Some(form.device_name.clone());
    model.saved_wifi_ssid = Some(form.wifi_ssid.clone());

    let request = SaveConfigRequest::from_fields(&form.device_name, &form.wifi_ssid, &form.wifi_pass);
    api_post!(Setup, SetupEvent, model, "/api/config", SaveSetupResponse, "Save setup",
        body_json: &request
    )
}

fn handle_save_setup_response(
    result: Result<(), String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    match result {
        Ok(()) => {
            model.stop_loading();
            model.setup_saved = true;
            model.success_message = Some("Device configuration saved successfully!".to_string());

            // The device considers setup complete as soon as credentials are
            // stored, so promote right away instead of re-fetching status
            let promote = super::router::handle_setup_complete(model);
            let poll = start_connection_check(model);

            Command::all([render(), promote, poll])
        }
        Err(e) => {
            model.setup_saved = false;
            model.set_error_and_render(e)
        }
    }
}

/// Start watching for the device to reach the configured network.
///
/// Restarting while a previous run is still polling retires its timer id,
/// so a leftover tick from the old run is ignored when it fires.
pub fn start_connection_check(model: &mut Model) -> Command<Effect, Event> {
    model.connection_check_state = ConnectionCheckState::Polling { attempt: 0 };
    arm_tick(model)
}

fn arm_tick(model: &mut Model) -> Command<Effect, Event> {
    let id = model.next_timer_id();
    TimerCmd::start(id, CONNECTION_CHECK_INTERVAL_MS)
        .build()
        .then_send(|output| Event::Setup(SetupEvent::ConnectionCheckTimer(output)))
}

/// Handle a connection check timer firing - polls the status endpoint
pub fn handle_connection_check_timer(
    output: TimerOutput,
    model: &mut Model,
) -> Command<Effect, Event> {
    let id = match output {
        TimerOutput::Fired { id } => id,
        TimerOutput::Cancelled { .. } => return Command::done(),
    };

    // Ignore ticks from retired runs and ticks after a terminal transition
    if !model.is_current_timer(id) || !model.connection_check_state.is_polling() {
        return Command::done();
    }

    if let ConnectionCheckState::Polling { attempt } = &mut model.connection_check_state {
        *attempt += 1;
    }

    Command::all([
        render(),
        api_get_silent!(
            Setup,
            SetupEvent,
            "/api/status",
            ConnectionCheckStatus,
            DeviceStatus
        ),
    ])
}

/// Handle a connection check status response - drives the polling state machine
pub fn handle_connection_check_status(
    result: Result<DeviceStatus, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let attempt = match &model.connection_check_state {
        ConnectionCheckState::Polling { attempt } => *attempt,
        // In-flight response of a cancelled or finished run
        _ => return Command::done(),
    };

    match result {
        Ok(status) => {
            // Promotion happens before anything else so navigation is already
            // consistent when this tick's remaining effects run
            let promote = if status.setup_complete && !model.setup_complete {
                super::router::handle_setup_complete(model)
            } else {
                Command::done()
            };

            if status.is_attached() {
                model.connection_check_state = ConnectionCheckState::Connected {
                    ip: status.sta_ip.clone(),
                };
                model.connection_check_timer = None;
                model.status = Some(status);
                Command::all([render(), promote])
            } else if attempt >= CONNECTION_CHECK_MAX_ATTEMPTS {
                model.connection_check_state = ConnectionCheckState::TimedOut {
                    reason: "Could not connect to WiFi. Check password and try again.".to_string(),
                };
                model.connection_check_timer = None;
                model.status = Some(status);
                Command::all([render(), promote])
            } else {
                model.status = Some(status);
                Command::all([render(), promote, arm_tick(model)])
            }
        }
        Err(e) => {
            if attempt >= CONNECTION_CHECK_MAX_ATTEMPTS {
                log::warn!("Connection check failed: {e}");
                model.connection_check_state = ConnectionCheckState::TimedOut {
                    reason: "Connection check failed".to_string(),
                };
                model.connection_check_timer = None;
                render()
            } else {
                // Transient failure, try again on the next tick
                arm_tick(model)
            }
        }
    }
}

fn handle_cancel_connection_check(model: &mut Model) -> Command<Effect, Event> {
    if !model.connection_check_state.is_polling() {
        return Command::done();
    }

    model.connection_check_state = ConnectionCheckState::Cancelled;

    let cancel = match model.connection_check_timer.take() {
        Some(id) => TimerCmd::cancel(id)
            .build()
            .then_send(|output| Event::Setup(SetupEvent::ConnectionCheckTimer(output))),
        None => Command::done(),
    };

    Command::all([render(), cancel])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    fn polling_model(attempt: u32) -> Model {
        let mut model = Model::default();
        let _ = start_connection_check(&mut model);
        model.connection_check_state = ConnectionCheckState::Polling { attempt };
        model
    }

    fn attached_status(ip: &str) -> DeviceStatus {
        DeviceStatus {
            sta_connected: true,
            sta_ip: ip.to_string(),
            setup_complete: true,
            ..Default::default()
        }
    }

    mod connection_check {
        use super::*;

        #[test]
        fn tick_increments_attempt_counter() {
            let mut model = polling_model(0);
            let id = model.connection_check_timer.unwrap();

            let _ = handle_connection_check_timer(TimerOutput::Fired { id }, &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 1 }
            );
        }

        #[test]
        fn stale_timer_tick_is_ignored() {
            let mut model = polling_model(3);

            let _ = handle_connection_check_timer(TimerOutput::Fired { id: 999 }, &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 3 }
            );
        }

        #[test]
        fn tick_after_terminal_state_is_ignored() {
            let mut model = polling_model(30);
            let id = model.connection_check_timer.unwrap();
            model.connection_check_state = ConnectionCheckState::TimedOut {
                reason: "Connection check failed".to_string(),
            };

            let _ = handle_connection_check_timer(TimerOutput::Fired { id }, &mut model);

            assert!(matches!(
                model.connection_check_state,
                ConnectionCheckState::TimedOut { .. }
            ));
        }

        #[test]
        fn attached_response_succeeds() {
            let mut model = polling_model(30);

            let _ =
                handle_connection_check_status(Ok(attached_status("10.0.0.5")), &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Connected {
                    ip: "10.0.0.5".to_string()
                }
            );
            assert_eq!(model.connection_check_timer, None);
        }

        #[test]
        fn connected_without_address_keeps_polling() {
            let mut model = polling_model(5);

            let _ = handle_connection_check_status(Ok(attached_status("")), &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 5 }
            );
            // A fresh tick was armed
            assert!(model.connection_check_timer.is_some());
        }

        #[test]
        fn unattached_response_at_ceiling_times_out() {
            let mut model = polling_model(CONNECTION_CHECK_MAX_ATTEMPTS);

            let status = DeviceStatus {
                setup_complete: true,
                ..Default::default()
            };
            let _ = handle_connection_check_status(Ok(status), &mut model);

            assert!(matches!(
                model.connection_check_state,
                ConnectionCheckState::TimedOut { .. }
            ));
            assert_eq!(model.connection_check_timer, None);
        }

        #[test]
        fn fetch_failure_below_ceiling_keeps_polling() {
            let mut model = polling_model(5);

            let _ =
                handle_connection_check_status(Err("Load failed".to_string()), &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 5 }
            );
            assert!(model.connection_check_timer.is_some());
        }

        #[test]
        fn fetch_failure_at_ceiling_times_out() {
            let mut model = polling_model(CONNECTION_CHECK_MAX_ATTEMPTS);

            let _ =
                handle_connection_check_status(Err("Load failed".to_string()), &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::TimedOut {
                    reason: "Connection check failed".to_string()
                }
            );
            assert_eq!(model.connection_check_timer, None);
        }

        #[test]
        fn response_after_cancellation_is_ignored() {
            let mut model = polling_model(5);
            let _ = handle_cancel_connection_check(&mut model);

            let _ =
                handle_connection_check_status(Ok(attached_status("10.0.0.5")), &mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Cancelled
            );
        }

        #[test]
        fn cancel_outside_polling_does_nothing() {
            let mut model = Model::default();

            let _ = handle_cancel_connection_check(&mut model);

            assert_eq!(model.connection_check_state, ConnectionCheckState::Idle);
        }

        #[test]
        fn restart_retires_previous_run() {
            let mut model = polling_model(7);
            let old_id = model.connection_check_timer.unwrap();

            let _ = start_connection_check(&mut model);

            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 0 }
            );
            let _ = handle_connection_check_timer(TimerOutput::Fired { id: old_id }, &mut model);
            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 0 }
            );
        }

        #[test]
        fn poll_response_promotes_setup_exactly_once() {
            let mut model = polling_model(1);
            model.current_section = Section::Setup;

            let status = DeviceStatus {
                setup_complete: true,
                ..Default::default()
            };
            let _ = handle_connection_check_status(Ok(status.clone()), &mut model);

            assert!(model.setup_complete);
            assert_eq!(model.current_section, Section::Widgets);

            // Later responses find the flag already set and leave routing alone
            model.current_section = Section::Settings;
            let _ = handle_connection_check_status(Ok(status), &mut model);
            assert_eq!(model.current_section, Section::Settings);
        }
    }

    mod scan {
        use super::*;

        #[test]
        fn scan_response_is_sorted_and_deduplicated() {
            let mut model = Model {
                is_scanning: true,
                ..Default::default()
            };

            let networks = vec![
                WifiNetwork {
                    ssid: "attic".to_string(),
                    rssi: -72,
                    auth: 3,
                },
                WifiNetwork {
                    ssid: "attic".to_string(),
                    rssi: -48,
                    auth: 3,
                },
                WifiNetwork {
                    ssid: "cafe".to_string(),
                    rssi: -60,
                    auth: 0,
                },
            ];
            let _ = handle(SetupEvent::ScanNetworksResponse(Ok(networks)), &mut model);

            assert!(!model.is_scanning);
            let stored = model.networks.unwrap();
            assert_eq!(stored.len(), 2);
            assert_eq!(stored[0].ssid, "attic");
            assert_eq!(stored[0].rssi, -48);
        }

        #[test]
        fn scan_failure_sets_scan_error() {
            let mut model = Model {
                is_scanning: true,
                ..Default::default()
            };

            let _ = handle(
                SetupEvent::ScanNetworksResponse(Err("Load failed".to_string())),
                &mut model,
            );

            assert!(!model.is_scanning);
            assert_eq!(
                model.scan_error.as_deref(),
                Some("Failed to scan networks")
            );
        }
    }

    mod save {
        use super::*;

        fn form() -> SetupForm {
            SetupForm {
                device_name: "Kitchen Clock".to_string(),
                wifi_ssid: "attic".to_string(),
                wifi_pass: "hunter2".to_string(),
            }
        }

        #[test]
        fn save_rejects_missing_ssid() {
            let mut model = Model::default();

            let _ = handle(
                SetupEvent::SaveSetup {
                    form: SetupForm {
                        wifi_ssid: String::new(),
                        ..form()
                    },
                },
                &mut model,
            );

            assert!(model.error_message.is_some());
            assert!(!model.setup_saved);
        }

        #[test]
        fn save_success_promotes_and_starts_polling() {
            let mut model = Model::default();
            let _ = handle(SetupEvent::SaveSetup { form: form() }, &mut model);

            let _ = handle(SetupEvent::SaveSetupResponse(Ok(())), &mut model);

            assert!(model.setup_saved);
            assert!(model.setup_complete);
            assert_eq!(model.current_section, Section::Widgets);
            assert_eq!(
                model.connection_check_state,
                ConnectionCheckState::Polling { attempt: 0 }
            );
            assert!(model.connection_check_timer.is_some());
            assert_eq!(model.saved_wifi_ssid.as_deref(), Some("attic"));
        }

        #[test]
        fn save_failure_keeps_setup_incomplete() {
            let mut model = Model::default();
            let _ = handle(SetupEvent::SaveSetup { form: form() }, &mut model);

            let _ = handle(
                SetupEvent::SaveSetupResponse(Err("Save setup failed: HTTP 500".to_string())),
                &mut model,
            );

            assert!(!model.setup_saved);
            assert!(!model.setup_complete);
            assert!(model.error_message.is_some());
            assert_eq!(model.connection_check_state, ConnectionCheckState::Idle);
        }
    }
}
