// src/main.rs
use msc_zoom::components::zoom_viewer::ZoomViewer;
use msc_zoom::utils::resource_url;
use msc_zoom::ZoomMode;
use yew::prelude::*;

const SCALES: [f64; 4] = [1.5, 2.0, 3.0, 4.0];

pub enum AppMsg {
    Zoomed(ZoomMode),
    ChangeScale(f64),
    ChangeDuration(f64),
}

pub struct App {
    scale: f64,
    duration: f64,
    last_mode: Option<ZoomMode>,
    transitions: u32,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            scale: 2.0,
            duration: 300.0,
            last_mode: None,
            transitions: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Zoomed(mode) => {
                log::info!("zoom transition: {}", mode.as_str());
                self.last_mode = Some(mode);
                self.transitions += 1;
                true
            }
            AppMsg::ChangeScale(scale) => {
                self.scale = scale;
                true
            }
            AppMsg::ChangeDuration(duration) => {
                self.duration = duration;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_zoom = ctx.link().callback(AppMsg::Zoomed);
        let on_scale = ctx.link().batch_callback(|e: Event| {
            e.target_dyn_into::<web_sys::HtmlSelectElement>()
                .and_then(|select| select.value().parse::<f64>().ok())
                .map(AppMsg::ChangeScale)
        });
        let on_duration = ctx.link().batch_callback(|e: Event| {
            e.target_dyn_into::<web_sys::HtmlSelectElement>()
                .and_then(|select| select.value().parse::<f64>().ok())
                .map(AppMsg::ChangeDuration)
        });

        html! {
            <div class="app-container">
                <header class="app-header">
                    <h1>{"msc-zoom"}</h1>
                    <p class="subtitle">{"Click the image to zoom in at that point, click again to zoom out."}</p>
                </header>

                <main class="app-main">
                    <div class="selectors-container">
                        <label for="scale-select">{"Scale: "}</label>
                        <select id="scale-select" onchange={on_scale}>
                            {for SCALES.iter().map(|scale| html! {
                                <option value={scale.to_string()} selected={*scale == self.scale}>
                                    {format!("{}x", scale)}
                                </option>
                            })}
                        </select>

                        <label for="duration-select">{"Duration: "}</label>
                        <select id="duration-select" onchange={on_duration}>
                            {for [150.0, 300.0, 600.0].iter().map(|ms: &f64| html! {
                                <option value={ms.to_string()} selected={*ms == self.duration}>
                                    {format!("{}ms", ms)}
                                </option>
                            })}
                        </select>
                    </div>

                    <div class="viewer-frame" style="width:100%; height:70vh;">
                        <ZoomViewer
                            src={resource_url("public/images/sample.jpg")}
                            alt="sample"
                            scale={Some(self.scale)}
                            duration={Some(self.duration)}
                            {on_zoom}
                        />
                    </div>

                    <div class="zoom-status">
                        { match self.last_mode {
                            Some(mode) => format!("{} ({} transitions)", mode.as_str(), self.transitions),
                            None => "no transitions yet".to_string(),
                        } }
                    </div>
                </main>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
