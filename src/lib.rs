pub mod config;
pub mod control;
pub mod error;
pub mod readout;
pub mod simulation;
pub mod thresholds;
pub mod timers;

use config::{CylinderConfig, Variant};
use control::CylinderController;
use log::Level;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use readout::CylinderReadout;
use simulation::OperationMode;
use timers::{GlooScheduler, TimerEvent};
use wasm_bindgen::prelude::*; // for #[wasm_bindgen(start)]
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Default)]
pub struct Props {
    #[prop_or_default]
    pub variant: Variant,
}

/// Messages for the indicator component.
pub enum Msg {
    Timer(TimerEvent),
    SetMode(OperationMode),
    SetExtension(f64),
    EmergencyStop,
}

/// Hydraulic cylinder indicator: a simulated rod driven by the mode buttons
/// or the manual slider, with a live status readout.
pub struct CylinderIndicator {
    controller: CylinderController<GlooScheduler, ChaCha8Rng>,
}

impl CylinderIndicator {
    fn build_controller(
        ctx: &Context<Self>,
        config: CylinderConfig,
    ) -> Result<CylinderController<GlooScheduler, ChaCha8Rng>, error::CylinderError> {
        let scheduler = GlooScheduler::new(ctx.link().callback(Msg::Timer));
        let seed = js_sys::Date::now().to_bits();
        CylinderController::new(config, scheduler, ChaCha8Rng::seed_from_u64(seed))
    }

    fn view_cylinder(&self, readout: &CylinderReadout) -> Html {
        let ext = readout.extension;
        let barrel = format!(
            "position: absolute; left: 96px; top: 68px; height: 64px; width: {}px; \
             background: linear-gradient(to right, #6b7280, #4b5563); border: 4px solid #9ca3af; \
             transition: width 0.6s ease-in-out;",
            300.0 + ext * 2.0
        );
        let rod = format!(
            "position: absolute; left: 120px; top: 84px; height: 32px; width: {}px; \
             background: linear-gradient(to right, #9ca3af, #6b7280); border: 2px solid #d1d5db; \
             transition: width 0.6s ease-in-out;",
            200.0 + ext * 2.5
        );
        let head = format!(
            "position: absolute; top: 60px; left: {}px; width: 48px; height: 80px; \
             background: linear-gradient(to right, #4b5563, #374151); border: 4px solid #6b7280; \
             border-radius: 0 8px 8px 0; transition: left 0.6s ease-in-out;",
            310.0 + ext * 2.5
        );
        let travel = format!(
            "height: 100%; width: {:.1}%; background: #22c55e; border-radius: 9999px; \
             transition: width 0.6s;",
            ext
        );

        html! {
            <div style="position: relative; width: 600px; height: 200px; margin: 0 auto;">
                <div style="position: absolute; left: 0; top: 52px; width: 128px; height: 96px; \
                            background: #4b5563; border: 4px solid #6b7280; border-radius: 12px 0 0 12px;"></div>
                <div style={barrel}></div>
                <div style={rod}></div>
                <div style={head}></div>
                <div style="position: absolute; bottom: 32px; left: 128px; right: 32px; height: 4px; \
                            background: #4b5563; border-radius: 9999px;">
                    <div style={travel}></div>
                </div>
                if readout.is_operating {
                    <div style="position: absolute; top: -16px; left: 50%; transform: translateX(-50%); \
                                padding: 8px 16px; border-radius: 9999px; color: #93c5fd; \
                                border: 1px solid #60a5fa;">
                        { "OPERATING" }
                    </div>
                }
            </div>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>, readout: &CylinderReadout) -> Html {
        let on_slide = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetExtension(input.value_as_number())
        });

        html! {
            <div style="padding: 24px; border: 1px solid #374151; border-radius: 12px;">
                <h3>{ "Extension Control" }</h3>
                <div style="font-family: monospace; font-size: 2em; color: #4ade80; text-align: center;">
                    { format!("{:.1}%", readout.extension) }
                </div>
                <label>{ "Manual Control" }</label>
                <input
                    type="range"
                    min="0"
                    max="100"
                    step="0.1"
                    style="width: 100%;"
                    value={readout.extension.to_string()}
                    disabled={!readout.mode.is_manual()}
                    oninput={on_slide}
                />
                <label>{ "Operation Mode" }</label>
                <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 8px;">
                    { for OperationMode::ALL.iter().map(|&mode| {
                        let style = if readout.mode == mode {
                            "padding: 8px; background: #2563eb; color: white; border: 2px solid #60a5fa;"
                        } else {
                            "padding: 8px; background: #374151; color: #d1d5db; border: 2px solid #4b5563;"
                        };
                        html! {
                            <button style={style} onclick={ctx.link().callback(move |_| Msg::SetMode(mode))}>
                                { mode.label() }
                            </button>
                        }
                    }) }
                </div>
            </div>
        }
    }

    fn view_status(&self, readout: &CylinderReadout) -> Html {
        let pressure_style = format!("font-family: monospace; color: {};", readout.pressure_band.color());
        let temperature_style = format!(
            "font-family: monospace; color: {};",
            readout.temperature_band.color()
        );
        html! {
            <div style="padding: 24px; border: 1px solid #374151; border-radius: 12px;">
                <h3>{ "System Status" }</h3>
                <p>
                    { "Pressure: " }
                    <span style={pressure_style}>
                        { format!("{:.0} PSI ({})", readout.pressure, readout.pressure_band.label()) }
                    </span>
                </p>
                <p>{ format!("Flow Rate: {:.1} GPM", readout.flow_rate) }</p>
                <p>
                    { "Temperature: " }
                    <span style={temperature_style}>{ format!("{:.1}°F", readout.temperature) }</span>
                </p>
                <p>{ format!("Load: {:.0} lbs", readout.load) }</p>
            </div>
        }
    }
}

impl Component for CylinderIndicator {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let config = CylinderConfig::for_variant(ctx.props().variant);
        let controller = match Self::build_controller(ctx, config) {
            Ok(controller) => controller,
            Err(err) => {
                log::error!("{}; falling back to default configuration", err);
                // Default configuration always validates.
                Self::build_controller(ctx, CylinderConfig::default())
                    .expect("default cylinder configuration is valid")
            }
        };
        log::debug!("cylinder indicator mounted ({:?})", ctx.props().variant);
        Self { controller }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Timer(event) => self.controller.on_timer(event),
            Msg::SetMode(mode) => {
                self.controller.set_mode(mode);
                true
            }
            Msg::SetExtension(value) => match self.controller.set_extension(value) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("{}", err);
                    false
                }
            },
            Msg::EmergencyStop => {
                self.controller.emergency_stop();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let readout = self.controller.readout();
        let on_stop = ctx.link().callback(|_| Msg::EmergencyStop);

        html! {
            <div style="font-family: sans-serif; background: #111827; color: white; padding: 32px;">
                <h1>{ "Hydraulic Cylinder Control" }</h1>
                <p style="color: #9ca3af;">{ "Real-time hydraulic system monitoring" }</p>
                <div style="display: grid; grid-template-columns: 2fr 1fr; gap: 32px;">
                    { self.view_cylinder(&readout) }
                    <div>
                        { self.view_controls(ctx, &readout) }
                        if self.controller.config().show_status_panel {
                            { self.view_status(&readout) }
                        }
                        <button
                            style="width: 100%; padding: 12px; margin-top: 16px; background: #dc2626; \
                                   color: white; font-weight: bold; border: 2px solid #f87171;"
                            onclick={on_stop}
                        >
                            { "EMERGENCY STOP" }
                        </button>
                    </div>
                </div>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.shutdown();
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_log::init_with_level(Level::Debug).expect("error initializing logger");
    yew::Renderer::<CylinderIndicator>::new().render();
}
