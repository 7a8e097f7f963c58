use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::events::{Event, SettingsEvent};
use crate::http_helpers::{build_url, process_status_response};
use crate::model::Model;
use crate::types::{
    DeviceConfig, FontSizeConfig, FontSizePreset, SaveConfigRequest, SettingsForm, TimezoneConfig,
};
use crate::{api_get_silent, api_post, handle_response, Effect, HttpCmd};

/// Fetch the stored configuration, timezone and font size
pub fn load(_model: &mut Model) -> Command<Effect, Event> {
    Command::all([
        api_get_silent!(
            Settings,
            SettingsEvent,
            "/api/config",
            DeviceConfigResponse,
            DeviceConfig
        ),
        api_get_silent!(
            Settings,
            SettingsEvent,
            "/api/timezone",
            TimezoneResponse,
            TimezoneConfig
        ),
        api_get_silent!(
            Settings,
            SettingsEvent,
            "/api/font-size",
            FontSizeResponse,
            FontSizeConfig
        ),
    ])
}

/// Handle settings section events
pub fn handle(event: SettingsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SettingsEvent::Load => load(model),

        SettingsEvent::DeviceConfigResponse(result) => handle_response!(model, result, {
            on_success: |model, config| {
                model.device_config = Some(config);
            },
        }),

        SettingsEvent::TimezoneResponse(result) => handle_response!(model, result, {
            on_success: |model, payload| {
                model.timezone = Some(payload.timezone);
            },
        }),

        SettingsEvent::FontSizeResponse(result) => handle_response!(model, result, {
            on_success: |model, payload| {
                model.font_size = Some(payload.font_size);
            },
        }),

        SettingsEvent::Save { form } => handle_save(form, model),

        SettingsEvent::SaveDeviceConfigResponse {
            result,
            timezone,
            font_size,
        } => match result {
            Ok(()) => post_timezone(timezone, font_size, model),
            Err(e) => model.set_error_and_render(e),
        },

        SettingsEvent::SetTimezoneResponse { result, font_size } => match result {
            Ok(()) => post_font_size(font_size, model),
            Err(e) => model.set_error_and_render(e),
        },

        SettingsEvent::SetFontSizeResponse(result) => handle_response!(model, result, {
            success_message: "All settings saved successfully!",
        }),

        SettingsEvent::FactoryReset => {
            model.factory_reset_in_progress = true;
            api_post!(
                Settings,
                SettingsEvent,
                model,
                "/api/reset",
                FactoryResetResponse,
                "Factory reset"
            )
        }

        SettingsEvent::FactoryResetResponse(result) => match result {
            Ok(()) => {
                model.stop_loading();
                model.success_message =
                    Some("Device is resetting. Reconnect to the device's WiFi network.".to_string());
                render()
            }
            Err(e) => {
                model.factory_reset_in_progress = false;
                model.set_error_and_render(e)
            }
        },
    }
}

/// Save settings as the device expects them: the partial config write first
/// (skipped when nothing changed), then the timezone, then the font size.
/// Any step's failure aborts the rest of the chain.
fn handle_save(form: SettingsForm, model: &mut Model) -> Command<Effect, Event> {
    if let Err(e) = form.validate() {
        return model.set_error_and_render(format!("Invalid settings form: {e}"));
    }

    let request =
        SaveConfigRequest::from_fields(&form.device_name, &form.wifi_ssid, &form.wifi_pass);
    let timezone = form.timezone;
    let font_size = form.font_size;

    model.timezone = Some(timezone.clone());
    model.font_size = Some(font_size);

    if request.is_empty() {
        return post_timezone(timezone, font_size, model);
    }

    model.start_loading();
    match HttpCmd::post(build_url("/api/config"))
        .header("Content-Type", "application/json")
        .body_json(&request)
    {
        Ok(builder) => Command::all([
            render(),
            builder.build().then_send(move |result| {
                let result = process_status_response("Save settings", result);
                Event::Settings(SettingsEvent::SaveDeviceConfigResponse {
                    result,
                    timezone,
                    font_size,
                })
            }),
        ]),
        Err(e) => {
            model.set_error_and_render(format!("Failed to create Save settings request: {e}"))
        }
    }
}

fn post_timezone(
    timezone: String,
    font_size: FontSizePreset,
    model: &mut Model,
) -> Command<Effect, Event> {
    let request = TimezoneConfig { timezone };

    model.start_loading();
    match HttpCmd::post(build_url("/api/timezone"))
        .header("Content-Type", "application/json")
        .body_json(&request)
    {
        Ok(builder) => Command::all([
            render(),
            builder.build().then_send(move |result| {
                let result = process_status_response("Save settings", result);
                Event::Settings(SettingsEvent::SetTimezoneResponse { result, font_size })
            }),
        ]),
        Err(e) => {
            model.set_error_and_render(format!("Failed to create Save settings request: {e}"))
        }
    }
}

fn post_font_size(font_size: FontSizePreset, model: &mut Model) -> Command<Effect, Event> {
    let request = FontSizeConfig { font_size };
    api_post!(Settings, SettingsEvent, model, "/api/font-size", SetFontSizeResponse, "Save settings",
        body_json: &request
    )
}
