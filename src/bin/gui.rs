//! GUI for running leaf area measurement and tuning the color band.
//!
//! Run with: cargo run --features gui --bin foliar-gui

use eframe::egui;
use foliar::{
    label_text, Annotator, ColorBand, Hsv, Measurement, MeasurementPipeline, DEFAULT_MARKER_CM,
};
use image::DynamicImage;
use std::io::Write;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "foliar - Leaf Area Measurement",
        options,
        Box::new(|cc| Ok(Box::new(LeafApp::new(cc)))),
    )
}

struct LeafApp {
    // Image state
    original_image: Option<DynamicImage>,
    display_texture: Option<egui::TextureHandle>,
    image_path: Option<PathBuf>,

    // Measurement results
    measurement: Option<Measurement>,
    status: String,

    // Settings
    hue_lo: u8,
    hue_hi: u8,
    sat_lo: u8,
    sat_hi: u8,
    val_lo: u8,
    val_hi: u8,
    marker_cm: f64,
    font_path: String,
}

impl LeafApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let band = ColorBand::leaf_green();
        Self {
            original_image: None,
            display_texture: None,
            image_path: None,
            measurement: None,
            status: "Load an image to begin".to_string(),
            hue_lo: band.lower.h,
            hue_hi: band.upper.h,
            sat_lo: band.lower.s,
            sat_hi: band.upper.s,
            val_lo: band.lower.v,
            val_hi: band.upper.v,
            marker_cm: DEFAULT_MARKER_CM,
            font_path: String::new(),
        }
    }

    fn load_image(&mut self, path: PathBuf) {
        match image::open(&path) {
            Ok(img) => {
                self.original_image = Some(img);
                self.image_path = Some(path.clone());
                self.measurement = None;
                self.display_texture = None;
                self.status = format!("Loaded: {}", path.display());
            }
            Err(e) => {
                self.status = format!("Failed to load image: {}", e);
            }
        }
    }

    fn measure(&mut self) {
        let Some(ref img) = self.original_image else {
            self.status = "No image loaded".to_string();
            return;
        };
        let rgb = img.to_rgb8();

        let band = ColorBand::new(
            Hsv::new(self.hue_lo, self.sat_lo, self.val_lo),
            Hsv::new(self.hue_hi, self.sat_hi, self.val_hi),
        );

        let annotator = if self.font_path.trim().is_empty() {
            Annotator::new()
        } else {
            match Annotator::with_font_file(self.font_path.trim()) {
                Ok(annotator) => annotator,
                Err(e) => {
                    self.status = format!("Failed to load font: {}", e);
                    Annotator::new()
                }
            }
        };

        let pipeline = MeasurementPipeline::new()
            .with_marker_cm(self.marker_cm)
            .with_band(band)
            .with_annotator(annotator);

        match pipeline.measure(&rgb) {
            Ok(m) => {
                self.status = label_text(m.area_cm2);
                self.measurement = Some(m);
            }
            Err(reason) => {
                self.measurement = None;
                self.status = reason.to_string();
            }
        }

        // Clear texture to force redraw
        self.display_texture = None;
    }

    fn render_results(&mut self, ctx: &egui::Context) {
        let Some(ref m) = self.measurement else {
            return;
        };

        let (width, height) = m.annotated.dimensions();
        let size = [width as usize, height as usize];
        let pixels: Vec<egui::Color32> = m
            .annotated
            .pixels()
            .map(|p| egui::Color32::from_rgb(p[0], p[1], p[2]))
            .collect();

        let color_image = egui::ColorImage { size, pixels };
        self.display_texture = Some(ctx.load_texture("result", color_image, Default::default()));
    }
}

impl eframe::App for LeafApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
                            .pick_file()
                        {
                            self.load_image(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::SidePanel::left("controls").min_width(250.0).show(ctx, |ui| {
            ui.heading("Color Band");
            ui.separator();

            ui.add(egui::Slider::new(&mut self.hue_lo, 0..=180).text("Hue min"));
            ui.add(egui::Slider::new(&mut self.hue_hi, 0..=180).text("Hue max"));
            ui.add(egui::Slider::new(&mut self.sat_lo, 0..=255).text("Sat min"));
            ui.add(egui::Slider::new(&mut self.sat_hi, 0..=255).text("Sat max"));
            ui.add(egui::Slider::new(&mut self.val_lo, 0..=255).text("Val min"));
            ui.add(egui::Slider::new(&mut self.val_hi, 0..=255).text("Val max"));
            ui.add_space(16.0);

            ui.heading("Marker");
            ui.separator();

            ui.add(egui::Slider::new(&mut self.marker_cm, 0.5..=20.0).text("Side (cm)"));
            ui.add_space(8.0);

            ui.label("Label font (optional):");
            ui.text_edit_singleline(&mut self.font_path);
            ui.add_space(16.0);

            if ui.button("Measure").clicked() {
                self.measure();
            }
            ui.add_space(16.0);

            ui.heading("Status");
            ui.separator();
            if let Some(ref path) = self.image_path {
                ui.label(format!("Image: {}", path.display()));
            }
            ui.label(&self.status);

            if let Some(ref m) = self.measurement {
                ui.add_space(8.0);
                ui.label(format!("Scale: {:.4} cm/pixel", m.scale.cm_per_px()));
                ui.label(format!("Region: {:.0} px²", m.area_px));
                for (i, p) in m.corners.points.iter().enumerate() {
                    ui.label(format!("  Corner {}: ({:.0}, {:.0})", i, p.x, p.y));
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Render if a measurement is ready and not yet drawn
            if self.original_image.is_some()
                && self.display_texture.is_none()
                && self.measurement.is_some()
            {
                self.render_results(ctx);
            }

            // Show the annotated image
            if let Some(ref texture) = self.display_texture {
                let available_size = ui.available_size();
                let texture_size = texture.size_vec2();

                // Scale to fit
                let scale = (available_size.x / texture_size.x)
                    .min(available_size.y / texture_size.y)
                    .min(1.0);
                let display_size = texture_size * scale;

                ui.centered_and_justified(|ui| {
                    ui.image((texture.id(), display_size));
                });
            } else if let Some(ref img) = self.original_image {
                // Show original image without measurement
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                let size = [width as usize, height as usize];
                let pixels: Vec<egui::Color32> = rgba
                    .pixels()
                    .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
                    .collect();

                let color_image = egui::ColorImage { size, pixels };
                let texture = ctx.load_texture("original", color_image, Default::default());

                let available_size = ui.available_size();
                let texture_size = texture.size_vec2();
                let scale = (available_size.x / texture_size.x)
                    .min(available_size.y / texture_size.y)
                    .min(1.0);
                let display_size = texture_size * scale;

                ui.centered_and_justified(|ui| {
                    ui.image((texture.id(), display_size));
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Drag and drop an image or use File > Open");
                });
            }
        });

        // Handle drag and drop
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.load_image(path.clone());
                }
            }
        });
    }
}
