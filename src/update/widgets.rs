use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::events::{Event, WidgetsEvent};
use crate::http_helpers::{build_url, process_status_response};
use crate::model::Model;
use crate::types::{
    ActiveWidget, ClockConfig, TempUnit, TimerConfig, WeatherTempUnit, WeatherZipCode, WidgetInfo,
};
use crate::{api_get_silent, api_post, handle_response, Effect, HttpCmd};

/// Fetch the widget list and the active widget
pub fn load(_model: &mut Model) -> Command<Effect, Event> {
    Command::all([
        api_get_silent!(
            Widgets,
            WidgetsEvent,
            "/api/widgets",
            WidgetListResponse,
            Vec<WidgetInfo>
        ),
        api_get_silent!(
            Widgets,
            WidgetsEvent,
            "/api/widgets/active",
            ActiveWidgetResponse,
            ActiveWidget
        ),
    ])
}

/// Handle widgets section events
pub fn handle(event: WidgetsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WidgetsEvent::Load => load(model),

        WidgetsEvent::WidgetListResponse(result) => handle_response!(model, result, {
            on_success: |model, widgets| {
                model.widgets = Some(widgets);
            },
        }),

        WidgetsEvent::ActiveWidgetResponse(result) => match result {
            Ok(active) if active.widget_id.is_empty() => {
                model.active_widget = None;
                render()
            }
            Ok(active) => {
                model.active_widget = Some(active.widget_id.clone());
                Command::all([render(), load_widget_config(&active.widget_id)])
            }
            Err(e) => model.set_error_and_render(e),
        },

        WidgetsEvent::SelectWidget { widget_id } => {
            let request = ActiveWidget { widget_id };
            api_post!(Widgets, WidgetsEvent, model, "/api/widgets/active", SelectWidgetResponse, "Set active widget",
                body_json: &request
            )
        }

        WidgetsEvent::SelectWidgetResponse(result) => match result {
            Ok(()) => {
                model.stop_loading();
                // Refresh the list so the new active state shows up
                Command::all([render(), load(model)])
            }
            Err(e) => model.set_error_and_render(e),
        },

        WidgetsEvent::LoadWidgetConfig { widget_id } => load_widget_config(&widget_id),

        WidgetsEvent::ClockConfigResponse(result) => handle_response!(model, result, {
            on_success: |model, config| {
                model.clock_config = Some(config);
            },
        }),

        WidgetsEvent::TimerConfigResponse(result) => handle_response!(model, result, {
            on_success: |model, config| {
                model.timer_config = Some(config);
            },
        }),

        WidgetsEvent::SaveClockConfig { config } => {
            model.clock_config = Some(config.clone());
            api_post!(Widgets, WidgetsEvent, model, "/api/widgets/clock/config", SaveClockConfigResponse, "Save clock settings",
                body_json: &config
            )
        }

        WidgetsEvent::SaveClockConfigResponse(result) => handle_response!(model, result, {
            success_message: "Clock settings saved successfully!",
        }),

        WidgetsEvent::SaveTimerConfig { config } => {
            model.timer_config = Some(config.clone());
            api_post!(Widgets, WidgetsEvent, model, "/api/widgets/timer/config", SaveTimerConfigResponse, "Save timer settings",
                body_json: &config
            )
        }

        WidgetsEvent::SaveTimerConfigResponse(result) => handle_response!(model, result, {
            success_message: "Timer settings saved successfully!",
        }),

        WidgetsEvent::WeatherZipResponse(result) => handle_response!(model, result, {
            on_success: |model, payload| {
                model.weather_zip_code = Some(payload.zip_code);
            },
        }),

        WidgetsEvent::WeatherTempUnitResponse(result) => handle_response!(model, result, {
            on_success: |model, payload| {
                model.weather_temp_unit = Some(payload.temp_unit);
            },
        }),

        WidgetsEvent::SaveWeatherConfig {
            zip_code,
            temp_unit,
        } => handle_save_weather_config(zip_code, temp_unit, model),

        WidgetsEvent::SaveWeatherZipResponse { result, temp_unit } => match result {
            Ok(()) => save_temp_unit(temp_unit, model),
            Err(e) => model.set_error_and_render(e),
        },

        WidgetsEvent::SaveWeatherTempUnitResponse(result) => handle_response!(model, result, {
            success_message: "Weather settings saved successfully!",
        }),
    }
}

/// Fetch the configuration of the given widget; widgets without a
/// configuration panel load nothing
fn load_widget_config(widget_id: &str) -> Command<Effect, Event> {
    match widget_id {
        "clock" => api_get_silent!(
            Widgets,
            WidgetsEvent,
            "/api/widgets/clock/config",
            ClockConfigResponse,
            ClockConfig
        ),
        "timer" => api_get_silent!(
            Widgets,
            WidgetsEvent,
            "/api/widgets/timer/config",
            TimerConfigResponse,
            TimerConfig
        ),
        // Weather settings live on their own endpoints
        "weather" => Command::all([
            api_get_silent!(
                Widgets,
                WidgetsEvent,
                "/api/weather/zip-code",
                WeatherZipResponse,
                WeatherZipCode
            ),
            api_get_silent!(
                Widgets,
                WidgetsEvent,
                "/api/weather/temp-unit",
                WeatherTempUnitResponse,
                WeatherTempUnit
            ),
        ]),
        _ => Command::done(),
    }
}

/// Save weather settings: the zip code first (when given), then the unit,
/// matching the device's expectation of separate sequential writes
fn handle_save_weather_config(
    zip_code: String,
    temp_unit: TempUnit,
    model: &mut Model,
) -> Command<Effect, Event> {
    let request = WeatherZipCode { zip_code };
    if let Err(e) = request.validate() {
        return model.set_error_and_render(format!("Invalid zip code: {e}"));
    }

    model.weather_temp_unit = Some(temp_unit);

    if request.zip_code.is_empty() {
        return save_temp_unit(temp_unit, model);
    }

    model.weather_zip_code = Some(request.zip_code.clone());
    model.start_loading();
    match HttpCmd::post(build_url("/api/weather/zip-code"))
        .header("Content-Type", "application/json")
        .body_json(&request)
    {
        Ok(builder) => Command::all([
            render(),
            builder.build().then_send(move |result| {
                let result = process_status_response("Save weather settings", result);
                Event::Widgets(WidgetsEvent::SaveWeatherZipResponse { result, temp_unit })
            }),
        ]),
        Err(e) => model
            .set_error_and_render(format!("Failed to create Save weather settings request: {e}")),
    }
}

fn save_temp_unit(temp_unit: TempUnit, model: &mut Model) -> Command<Effect, Event> {
    let request = WeatherTempUnit { temp_unit };
    api_post!(Widgets, WidgetsEvent, model, "/api/weather/temp-unit", SaveWeatherTempUnitResponse, "Save weather settings",
        body_json: &request
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClockMode, TimerMode};

    #[test]
    fn widget_list_response_is_stored() {
        let mut model = Model::default();

        let widgets = vec![WidgetInfo {
            id: "clock".to_string(),
            name: "Clock".to_string(),
            icon: Some("🕐".to_string()),
            active: true,
        }];
        let _ = handle(WidgetsEvent::WidgetListResponse(Ok(widgets)), &mut model);

        assert_eq!(model.widgets.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn active_widget_response_remembers_active_id() {
        let mut model = Model::default();

        let _ = handle(
            WidgetsEvent::ActiveWidgetResponse(Ok(ActiveWidget {
                widget_id: "weather".to_string(),
            })),
            &mut model,
        );

        assert_eq!(model.active_widget.as_deref(), Some("weather"));
    }

    #[test]
    fn empty_active_widget_clears_selection() {
        let mut model = Model {
            active_widget: Some("clock".to_string()),
            ..Default::default()
        };

        let _ = handle(
            WidgetsEvent::ActiveWidgetResponse(Ok(ActiveWidget::default())),
            &mut model,
        );

        assert_eq!(model.active_widget, None);
    }

    #[test]
    fn save_clock_config_keeps_submitted_values() {
        let mut model = Model::default();

        let config = ClockConfig {
            mode: ClockMode::Analog,
            show_seconds: true,
            is_24h: false,
        };
        let _ = handle(
            WidgetsEvent::SaveClockConfig {
                config: config.clone(),
            },
            &mut model,
        );

        assert!(model.is_loading);
        assert_eq!(model.clock_config, Some(config));

        let _ = handle(WidgetsEvent::SaveClockConfigResponse(Ok(())), &mut model);
        assert!(!model.is_loading);
        assert_eq!(
            model.success_message.as_deref(),
            Some("Clock settings saved successfully!")
        );
    }

    #[test]
    fn save_timer_config_failure_sets_error() {
        let mut model = Model::default();

        let _ = handle(
            WidgetsEvent::SaveTimerConfig {
                config: TimerConfig {
                    mode: TimerMode::Stopwatch,
                },
            },
            &mut model,
        );
        let _ = handle(
            WidgetsEvent::SaveTimerConfigResponse(Err(
                "Save timer settings failed: HTTP 500".to_string()
            )),
            &mut model,
        );

        assert!(!model.is_loading);
        assert!(model.error_message.is_some());
    }

    #[test]
    fn weather_save_rejects_long_zip_code() {
        let mut model = Model::default();

        let _ = handle(
            WidgetsEvent::SaveWeatherConfig {
                zip_code: "12345678901".to_string(),
                temp_unit: TempUnit::Celsius,
            },
            &mut model,
        );

        assert!(model.error_message.is_some());
        assert_eq!(model.weather_zip_code, None);
    }

    #[test]
    fn weather_zip_success_chains_into_temp_unit_save() {
        let mut model = Model::default();

        let _ = handle(
            WidgetsEvent::SaveWeatherZipResponse {
                result: Ok(()),
                temp_unit: TempUnit::Fahrenheit,
            },
            &mut model,
        );
        // Chain is still in flight; the final response reports success
        assert!(model.is_loading);

        let _ = handle(
            WidgetsEvent::SaveWeatherTempUnitResponse(Ok(())),
            &mut model,
        );
        assert_eq!(
            model.success_message.as_deref(),
            Some("Weather settings saved successfully!")
        );
    }
}
