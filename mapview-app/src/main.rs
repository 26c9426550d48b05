use mapview::{
    constants::{MAP_IMAGE_SIZE, MAP_MARGIN_PX},
    input::{KeyCode, MouseButton},
    HttpMapService, InputEvent, MapSession, OverlayKind, Point, ServiceConfig,
};

const KEY_BINDINGS: [(egui::Key, KeyCode); 6] = [
    (egui::Key::PageUp, KeyCode::PageUp),
    (egui::Key::PageDown, KeyCode::PageDown),
    (egui::Key::W, KeyCode::W),
    (egui::Key::A, KeyCode::A),
    (egui::Key::S, KeyCode::S),
    (egui::Key::D, KeyCode::D),
];

/// Standalone map viewer application
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    let service = HttpMapService::new(config)?;

    let window_width = MAP_IMAGE_SIZE.0 as f32 + 2.0 * MAP_MARGIN_PX as f32 + 280.0;
    let window_height = MAP_IMAGE_SIZE.1 as f32 + 2.0 * MAP_MARGIN_PX as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window_width, window_height])
            .with_resizable(false)
            .with_title("Best Maps App"),
        ..Default::default()
    };

    eframe::run_native(
        "mapview-app",
        options,
        Box::new(move |_cc| Box::new(MapViewApp::new(service))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the viewer: {e}"))?;

    Ok(())
}

/// The main application struct
struct MapViewApp {
    session: MapSession<HttpMapService>,
    search_text: String,
    show_postal_code: bool,
    texture: Option<egui::TextureHandle>,
    texture_revision: u64,
    error: Option<String>,
}

impl MapViewApp {
    fn new(service: HttpMapService) -> Self {
        let mut session = MapSession::new(service);
        let error = session.take_error();
        Self {
            session,
            search_text: String::new(),
            show_postal_code: false,
            texture: None,
            texture_revision: 0,
            error,
        }
    }

    /// Upload the session's latest image if it changed since the last frame
    fn sync_texture(&mut self, ctx: &egui::Context) {
        if self.session.image_revision() == self.texture_revision {
            return;
        }
        self.texture_revision = self.session.image_revision();

        let Some(bytes) = self.session.image() else {
            return;
        };
        match image::load_from_memory(bytes) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw());
                self.texture = Some(ctx.load_texture("map", color_image, egui::TextureOptions::LINEAR));
            }
            Err(e) => {
                log::error!("map image could not be decoded: {}", e);
                self.error = Some(format!("Map image could not be decoded: {e}"));
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<InputEvent>) {
        ui.heading("Map type");
        for kind in OverlayKind::ALL {
            if ui.radio(self.session.view().overlay == kind, kind.label()).clicked() {
                events.push(InputEvent::SelectOverlay { kind });
            }
        }

        ui.separator();
        ui.heading("Search");
        ui.add(
            egui::TextEdit::multiline(&mut self.search_text)
                .desired_rows(2)
                .hint_text("Place name or \"lon,lat\""),
        );
        ui.horizontal(|ui| {
            if ui.button("Search").clicked() {
                events.push(InputEvent::Search {
                    query: self.search_text.clone(),
                });
            }
            if ui.button("Reset").clicked() {
                events.push(InputEvent::ResetSearch);
            }
        });

        ui.separator();
        if ui
            .checkbox(&mut self.show_postal_code, "Show postal code")
            .changed()
        {
            events.push(InputEvent::TogglePostalCode {
                enabled: self.show_postal_code,
            });
        }

        let address = self.session.address_text();
        ui.add(egui::TextEdit::multiline(&mut address.as_str()).desired_rows(4));

        ui.separator();
        ui.small("PageUp/PageDown: zoom, W/A/S/D: move");
        ui.small("Left click: address, right click: pharmacy nearby");
    }

    fn map_area(&mut self, ui: &mut egui::Ui, events: &mut Vec<InputEvent>) {
        let origin = ui.max_rect().min;
        let margin = MAP_MARGIN_PX as f32;
        let image_rect = egui::Rect::from_min_size(
            origin + egui::vec2(margin, margin),
            egui::vec2(MAP_IMAGE_SIZE.0 as f32, MAP_IMAGE_SIZE.1 as f32),
        );
        let response = ui.allocate_rect(image_rect, egui::Sense::click());

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else {
            ui.painter()
                .rect_filled(image_rect, 0.0, egui::Color32::from_gray(220));
        }

        let button = if response.clicked() {
            Some(MouseButton::Left)
        } else if response.secondary_clicked() {
            Some(MouseButton::Right)
        } else if response.middle_clicked() {
            Some(MouseButton::Middle)
        } else {
            None
        };

        if let (Some(button), Some(pos)) = (button, response.interact_pointer_pos()) {
            // Window-relative, margin included
            let local = pos - origin;
            events.push(InputEvent::Click {
                position: Point::new(local.x as f64, local.y as f64),
                button,
            });
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Request error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.error = None;
        }
    }
}

impl eframe::App for MapViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        // Letters typed into the search box must not move the map
        if !ctx.wants_keyboard_input() {
            ctx.input(|i| {
                for (key, code) in KEY_BINDINGS {
                    if i.key_pressed(key) {
                        events.push(InputEvent::KeyPress { key: code });
                    }
                }
            });
        }

        egui::SidePanel::right("controls")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| self.controls(ui, &mut events));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.map_area(ui, &mut events));

        for event in &events {
            self.session.handle(event);
            if let Some(error) = self.session.take_error() {
                self.error = Some(error);
            }
        }

        self.sync_texture(ctx);
        self.error_dialog(ctx);

        if !events.is_empty() {
            ctx.request_repaint();
        }
    }
}
